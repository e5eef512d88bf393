//! Top-level document envelope: the `rss` element and its namespace set.

use serde_json::Value;

use super::node::{Attributes, ChannelNode, Document};

const DEFAULT_ATTRIBUTES: [(&str, &str); 5] = [
    ("version", "2.0"),
    ("xmlns:content", "http://purl.org/rss/1.0/modules/content/"),
    ("xmlns:media", "http://search.yahoo.com/mrss/"),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:mi", "http://schemas.ingestion.microsoft.com/common/"),
];

/// The namespace attributes applied when the caller supplies none.
pub fn default_attributes() -> Attributes {
    DEFAULT_ATTRIBUTES
        .iter()
        .map(|(name, value)| ((*name).to_string(), Value::from(*value)))
        .collect()
}

/// Wrap the assembled channel content in the root document element.
///
/// Caller attributes are merged over the default set; caller keys win on
/// conflict, unrecognized caller keys are appended after the defaults.
pub fn wrap(content: Vec<ChannelNode>, attrs: Option<Attributes>) -> Document {
    let mut merged = default_attributes();
    if let Some(attrs) = attrs {
        for (name, value) in attrs {
            merged.insert(name, value);
        }
    }

    Document {
        attrs: merged,
        channel: content,
    }
}
