//! XML serialization for assembled documents.
//!
//! Pure node-tree-to-text conversion. Rendering follows the document model
//! in `domain::node`: objects become child elements, arrays repeat their
//! element, scalars become escaped text, null becomes an empty element.

use std::fmt::Write;

use serde_json::Value;
use thiserror::Error;

use crate::domain::node::Document;

pub const ROOT_ELEMENT: &str = "rss";
pub const CHANNEL_ELEMENT: &str = "channel";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("invalid XML element name `{0}`")]
    InvalidName(String),
}

#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub declaration: bool,
    pub indent: &'static str,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            indent: "\t",
        }
    }
}

/// Serialize the document to XML text.
///
/// Always succeeds for well-formed trees; the only failure is an element or
/// attribute name that is not a valid XML name.
pub fn serialize(document: &Document, options: &WriteOptions) -> Result<String, XmlError> {
    let mut out = String::new();

    if options.declaration {
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    out.push('<');
    out.push_str(ROOT_ELEMENT);
    for (name, value) in &document.attrs {
        check_name(name)?;
        let _ = write!(out, " {name}=\"{}\"", escape(&scalar_text(value)));
    }
    out.push_str(">\n");

    let _ = writeln!(out, "{}<{CHANNEL_ELEMENT}>", options.indent);
    for node in &document.channel {
        write_node(&mut out, &node.name, &node.value, options, 2)?;
    }
    let _ = writeln!(out, "{}</{CHANNEL_ELEMENT}>", options.indent);

    let _ = writeln!(out, "</{ROOT_ELEMENT}>");
    Ok(out)
}

fn write_node(
    out: &mut String,
    name: &str,
    value: &Value,
    options: &WriteOptions,
    depth: usize,
) -> Result<(), XmlError> {
    check_name(name)?;
    let pad = options.indent.repeat(depth);

    match value {
        Value::Null => {
            let _ = writeln!(out, "{pad}<{name}/>");
        }
        Value::Array(values) => {
            // Arrays repeat the element once per entry.
            for value in values {
                write_node(out, name, value, options, depth)?;
            }
        }
        Value::Object(fields) if fields.is_empty() => {
            let _ = writeln!(out, "{pad}<{name}/>");
        }
        Value::Object(fields) => {
            let _ = writeln!(out, "{pad}<{name}>");
            for (child, value) in fields {
                write_node(out, child, value, options, depth + 1)?;
            }
            let _ = writeln!(out, "{pad}</{name}>");
        }
        scalar => {
            let _ = writeln!(out, "{pad}<{name}>{}</{name}>", escape(&scalar_text(scalar)));
        }
    }

    Ok(())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn check_name(name: &str) -> Result<(), XmlError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
    let valid_rest =
        chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_' | ':'));

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(XmlError::InvalidName(name.to_string()))
    }
}
