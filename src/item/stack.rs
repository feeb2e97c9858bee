use std::collections::BTreeMap;

use serde::Deserialize;

use super::registry::ItemId;

/// Auxiliary per-stack data (charge level, brew strength, ...).
///
/// Ordered map so two stacks carrying the same entries compare and hash
/// equal regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct StackData(BTreeMap<String, i64>);

impl StackData {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }

    pub fn set(&mut self, key: &str, value: i64) {
        self.0.insert(key.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A stack of one item type with an optional data payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
    pub data: Option<StackData>,
}

impl ItemStack {
    pub const fn new(item: ItemId, count: u32) -> Self {
        Self {
            item,
            count,
            data: None,
        }
    }

    pub fn with_data(item: ItemId, count: u32, data: StackData) -> Self {
        Self {
            item,
            count,
            data: Some(data),
        }
    }

    /// A stack with no items in it. Empty stacks never match recipes.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn data_value(&self, key: &str) -> Option<i64> {
        self.data.as_ref().and_then(|d| d.get(key))
    }

    pub fn set_data_value(&mut self, key: &str, value: i64) {
        self.data.get_or_insert_with(StackData::new).set(key, value);
    }
}
