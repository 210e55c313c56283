//! Deep merge of configuration trees
//!
//! Merge semantics:
//! - Trees: deep-merge by key (recursive)
//! - Lists: REPLACE (overlay wins entirely)
//! - Scalars: override (overlay wins)
//! - Entries: contents merge by the rules above; the overlay's priority wins
//!   when it has one, otherwise the base priority is kept

use indexmap::map::Entry as Slot;

use crate::value::{ConfigTree, ConfigValue, Entry, Scalar};

/// Deep merge `overlay` onto `base`.
///
/// Keys only in `base` keep their position; keys only in `overlay` are
/// appended in overlay order.
pub fn merge(mut base: ConfigTree, overlay: ConfigTree) -> ConfigTree {
    for (key, overlay_value) in overlay {
        match base.entries.entry(key) {
            Slot::Occupied(mut slot) => {
                let base_value = std::mem::replace(slot.get_mut(), ConfigValue::Scalar(Scalar::Null));
                *slot.get_mut() = merge_values(base_value, overlay_value);
            }
            Slot::Vacant(slot) => {
                slot.insert(overlay_value);
            }
        }
    }
    base
}

fn merge_values(base: ConfigValue, overlay: ConfigValue) -> ConfigValue {
    match (base, overlay) {
        // Both trees: deep merge
        (ConfigValue::Tree(base_tree), ConfigValue::Tree(overlay_tree)) => {
            ConfigValue::Tree(merge(base_tree, overlay_tree))
        }

        (ConfigValue::Entry(base_entry), ConfigValue::Entry(overlay_entry)) => Entry::new(
            overlay_entry.priority,
            merge_values(*base_entry.content, *overlay_entry.content),
        )
        .into(),

        (ConfigValue::Entry(base_entry), overlay) => {
            Entry::new(base_entry.priority, merge_values(*base_entry.content, overlay)).into()
        }

        (base, ConfigValue::Entry(overlay_entry)) => {
            Entry::new(overlay_entry.priority, merge_values(base, *overlay_entry.content)).into()
        }

        // Lists, scalars and mismatched kinds: overlay wins
        (_, overlay) => overlay,
    }
}

/// Merge multiple layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: Vec<ConfigTree>) -> ConfigTree {
    layers.into_iter().fold(ConfigTree::new(), merge)
}
