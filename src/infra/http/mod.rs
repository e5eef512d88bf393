mod middleware;

pub use middleware::{RequestContext, log_responses, set_request_context};

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header::CONTENT_TYPE},
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::application::{
    error::HttpError,
    render::{RenderRequest, RenderService, RenderedFeed},
};

#[derive(Clone)]
pub struct HttpState {
    pub render: Arc<RenderService>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/render", post(render))
        .route("/_health", get(health))
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn render(
    State(state): State<HttpState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return HttpError::new(
                "infra::http::render",
                StatusCode::BAD_REQUEST,
                rejection.body_text(),
                "request body could not be decoded",
            )
            .into_response();
        }
    };

    match state.render.render(request) {
        Ok(feed) => feed_response(feed),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn feed_response(feed: RenderedFeed) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, feed.content_type)
        .body(Body::from(feed.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
