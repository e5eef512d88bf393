//! Channel metadata merging.
//!
//! The merger is configured with the feed-level metadata first and applied
//! to the collected items second: the metadata can be rejected as invalid
//! regardless of whether any items exist, and the required-field check runs
//! before any item is inspected.

use serde::Deserialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc2822;

use crate::domain::channel::elevate_categories;
use crate::domain::error::DomainError;
use crate::domain::node::ChannelNode;

pub const DEFAULT_DOCS: &str = "http://blogs.law.harvard.edu/tech/rss";
pub const DEFAULT_GENERATOR: &str = "Feed delivered by Canale";

pub const REQUIRED_META_MESSAGE: &str = "A `title`, `description` and `link` property are all required in the `meta` object for the RSS renderer";

/// Feed-level metadata supplied by the caller.
///
/// `title`, `description`, and `link` are required at merge time rather than
/// deserialize time so the failure surfaces as the pipeline's own
/// validation error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    /// String or integer; rendered as text either way.
    pub copyright: Option<Value>,
    pub generator: Option<String>,
    pub docs: Option<String>,
    /// Additional metadata nodes, appended verbatim after the recognized
    /// options and before the category summary.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct MetadataMerger {
    meta: ChannelMeta,
}

impl MetadataMerger {
    pub fn new(meta: ChannelMeta) -> Self {
        Self { meta }
    }

    /// Validate the metadata and build the channel content list: the fixed
    /// metadata nodes, extension nodes, the elevated category summary, then
    /// the items in their original order.
    ///
    /// The node order is a wire contract; downstream consumers rely on
    /// positional access.
    pub fn apply(self, items: Vec<ChannelNode>) -> Result<Vec<ChannelNode>, DomainError> {
        let meta = self.meta;

        let (Some(title), Some(description), Some(link)) = (
            non_empty(meta.title),
            non_empty(meta.description),
            non_empty(meta.link),
        ) else {
            return Err(DomainError::validation(REQUIRED_META_MESSAGE));
        };

        let now = OffsetDateTime::now_utc();
        // lastBuildDate must be RFC 822 compliant per the RSS 2.0 spec.
        let last_build_date = now.format(&Rfc2822).unwrap_or_else(|_| now.to_string());

        let copyright = match meta.copyright {
            Some(Value::String(text)) if !text.is_empty() => Value::from(text),
            Some(Value::Number(number)) => Value::from(number),
            _ => Value::from(now.year()),
        };

        let mut content = Vec::with_capacity(8 + meta.extra.len() + items.len());
        content.push(ChannelNode::text("title", title));
        content.push(ChannelNode::text("description", description));
        content.push(ChannelNode::text("link", link));
        content.push(ChannelNode::text("lastBuildDate", last_build_date));
        content.push(ChannelNode::text(
            "docs",
            non_empty(meta.docs).unwrap_or_else(|| DEFAULT_DOCS.to_string()),
        ));
        content.push(ChannelNode::new("copyright", copyright));
        content.push(ChannelNode::text(
            "generator",
            non_empty(meta.generator).unwrap_or_else(|| DEFAULT_GENERATOR.to_string()),
        ));

        for (name, value) in meta.extra {
            content.push(ChannelNode::new(name, value));
        }

        content.push(elevate_categories(&items));
        content.extend(items);

        Ok(content)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
