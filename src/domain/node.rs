//! Node-tree data model for assembled documents.
//!
//! Entries arrive as arbitrary JSON from the publishing pipeline, so node
//! values are `serde_json::Value`: objects become child elements, arrays
//! repeat their element, scalars become text.

use serde_json::{Map, Value};

/// Ordered attribute set attached to the document's root element.
pub type Attributes = Map<String, Value>;

/// One named node inside the channel element.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelNode {
    pub name: String,
    pub value: Value,
}

impl ChannelNode {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Node holding plain text content.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, Value::String(text.into()))
    }
}

/// The assembled document: root attributes plus the channel content list.
/// Built once per render call and handed straight to the serializer.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub attrs: Attributes,
    pub channel: Vec<ChannelNode>,
}
