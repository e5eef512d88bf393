//! Render orchestration: resolved entries in, serialized RSS document out.
//!
//! One render call is a single sequential computation. The entry sequence is
//! fully materialized before merging because the category summary needs
//! every item, so the input is treated as a finite in-memory list.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::application::merger::{ChannelMeta, MetadataMerger};
use crate::domain::channel::wrap_item;
use crate::domain::envelope;
use crate::domain::error::DomainError;
use crate::domain::node::{Attributes, ChannelNode};
use crate::infra::xml::{self, WriteOptions, XmlError};

/// MIME type tagged onto every successful render.
pub const RSS_CONTENT_TYPE: &str = "text/rss+xml";

/// One render call: the resolved entries, the feed-level metadata, and any
/// root-attribute overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    pub feed: Vec<Value>,
    pub meta: ChannelMeta,
    pub attrs: Option<Attributes>,
}

/// Serialized output plus the MIME type it should be delivered under.
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub body: String,
    pub content_type: &'static str,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Validation(String),
    #[error("No data sent to XML renderer, cannot respond")]
    EmptyOutput,
    #[error(transparent)]
    Serialization(#[from] XmlError),
}

impl From<DomainError> for RenderError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => RenderError::Validation(message),
        }
    }
}

/// Sequences the feed-assembly pipeline over one request, short-circuiting
/// on the first failure. No partial output exists: either a complete
/// document is serialized or an error is returned.
#[derive(Debug, Clone, Default)]
pub struct RenderService {
    options: WriteOptions,
}

impl RenderService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, request: RenderRequest) -> Result<RenderedFeed, RenderError> {
        let RenderRequest { feed, meta, attrs } = request;

        let items: Vec<ChannelNode> = feed.into_iter().map(wrap_item).collect();

        let content = MetadataMerger::new(meta).apply(items)?;
        let document = envelope::wrap(content, attrs);

        // A merge that passed validation always yields the fixed metadata
        // nodes; an empty channel here means a stage produced no output.
        if document.channel.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        let body = xml::serialize(&document, &self.options)?;

        Ok(RenderedFeed {
            body,
            content_type: RSS_CONTENT_TYPE,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::application::merger::REQUIRED_META_MESSAGE;

    use super::*;

    fn minimal_request(feed: Vec<Value>) -> RenderRequest {
        RenderRequest {
            feed,
            meta: serde_json::from_value(json!({
                "title": "foo",
                "description": "bar",
                "link": "foobar",
            }))
            .expect("valid meta"),
            attrs: None,
        }
    }

    #[test]
    fn empty_feed_renders_a_channel_without_items() {
        let feed = RenderService::new()
            .render(minimal_request(Vec::new()))
            .expect("render should succeed");

        assert_eq!(feed.content_type, RSS_CONTENT_TYPE);
        assert!(feed.body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(feed.body.contains("<channel>"));
        assert!(feed.body.contains("<category></category>"));
        assert!(!feed.body.contains("<item>"));
    }

    #[test]
    fn items_render_after_the_metadata_in_entry_order() {
        let feed = RenderService::new()
            .render(minimal_request(vec![
                json!({"title": "first", "category": "a"}),
                json!({"title": "second", "category": "b"}),
            ]))
            .expect("render should succeed");

        assert!(feed.body.contains("<category>a,b</category>"));
        let first = feed.body.find("<title>first</title>").expect("first item");
        let second = feed.body.find("<title>second</title>").expect("second item");
        assert!(first < second);
    }

    #[test]
    fn invalid_metadata_short_circuits_with_the_required_field_message() {
        let request = RenderRequest {
            feed: vec![json!({"title": "never reached"})],
            ..RenderRequest::default()
        };

        let err = RenderService::new()
            .render(request)
            .expect_err("metadata should be rejected");
        assert!(matches!(&err, RenderError::Validation(message) if message == REQUIRED_META_MESSAGE));
    }

    #[test]
    fn unserializable_entry_fields_surface_as_serialization_errors() {
        let err = RenderService::new()
            .render(minimal_request(vec![json!({"bad name": "x"})]))
            .expect_err("invalid element name");
        assert!(matches!(err, RenderError::Serialization(_)));
    }
}
