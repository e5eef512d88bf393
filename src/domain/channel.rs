//! Item wrapping and category elevation for the channel content list.

use serde_json::Value;

use super::node::ChannelNode;

pub const ITEM_NODE: &str = "item";
pub const CATEGORY_NODE: &str = "category";

/// Wrap one resolved entry as an `item` node, fields untouched.
pub fn wrap_item(entry: Value) -> ChannelNode {
    ChannelNode::new(ITEM_NODE, entry)
}

/// Aggregate every non-empty `category` field across the wrapped items into
/// one comma-joined summary node, preserving entry order.
///
/// Items without a usable category contribute nothing to the join. The node
/// is emitted even when the join comes out empty, so positional consumers
/// always find a category row ahead of the items.
pub fn elevate_categories(items: &[ChannelNode]) -> ChannelNode {
    let joined = items
        .iter()
        .filter_map(|item| item.value.get(CATEGORY_NODE))
        .filter_map(Value::as_str)
        .filter(|category| !category.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    ChannelNode::text(CATEGORY_NODE, joined)
}
