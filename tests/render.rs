use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use canale::application::render::RenderService;
use canale::infra::http::{HttpState, build_router};

fn router() -> Router {
    build_router(HttpState {
        render: Arc::new(RenderService::new()),
    })
}

async fn post_render(payload: Value) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/render")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build");

    let response = router().oneshot(request).await.expect("router should respond");
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    (
        status,
        content_type,
        String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    )
}

fn minimal_meta() -> Value {
    json!({"title": "foo", "description": "bar", "link": "foobar"})
}

#[tokio::test]
async fn empty_feed_with_valid_meta_renders_an_empty_channel() {
    let (status, content_type, body) =
        post_render(json!({"feed": [], "meta": minimal_meta()})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/rss+xml"));
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(body.contains("<channel>"));
    assert!(body.contains("<title>foo</title>"));
    assert!(body.contains("<category></category>"));
    assert!(!body.contains("<item>"));
}

#[tokio::test]
async fn channel_metadata_is_emitted_in_contract_order() {
    let (status, _, body) = post_render(json!({
        "feed": [
            {"title": "first", "category": "foo"},
            {"title": "second", "category": "bar"},
        ],
        "meta": minimal_meta(),
    }))
    .await;

    assert_eq!(status, StatusCode::OK);

    let positions: Vec<usize> = [
        "<title>foo</title>",
        "<description>bar</description>",
        "<link>foobar</link>",
        "<lastBuildDate>",
        "<docs>",
        "<copyright>",
        "<generator>",
        "<category>foo,bar</category>",
        "<title>first</title>",
        "<title>second</title>",
    ]
    .iter()
    .map(|needle| body.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();

    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "channel nodes out of order:\n{body}"
    );
}

#[tokio::test]
async fn caller_attributes_merge_into_the_root_element() {
    let (status, _, body) = post_render(json!({
        "feed": [],
        "meta": minimal_meta(),
        "attrs": {"xmlns:custom": "http://custom.example/"},
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("xmlns:custom=\"http://custom.example/\""));
    // Defaults survive a merge that only adds keys.
    assert!(body.contains("version=\"2.0\""));
}

#[tokio::test]
async fn missing_required_meta_yields_a_structured_500() {
    let (status, content_type, body) = post_render(json!({"feed": [], "meta": {}})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let payload: Value = serde_json::from_str(&body).expect("JSON error payload");
    assert_eq!(payload["status"], json!(500));
    assert_eq!(
        payload["message"],
        json!("A `title`, `description` and `link` property are all required in the `meta` object for the RSS renderer")
    );
}

#[tokio::test]
async fn malformed_body_yields_a_structured_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/render")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request should build");

    let response = router().oneshot(request).await.expect("router should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let payload: Value = serde_json::from_slice(&bytes).expect("JSON error payload");
    assert_eq!(payload["status"], json!(400));
}

#[tokio::test]
async fn health_endpoint_responds_no_content() {
    let request = Request::builder()
        .method("GET")
        .uri("/_health")
        .body(Body::empty())
        .expect("request should build");

    let response = router().oneshot(request).await.expect("router should respond");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
