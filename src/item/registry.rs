use std::collections::HashMap;

use bevy::prelude::*;

use super::definition::ItemDef;

/// Compact item identifier. Index into ItemRegistry.defs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemId(pub u16);

/// Registry of all item definitions. Inserted as a Resource after asset loading.
#[derive(Resource, Debug, Default)]
pub struct ItemRegistry {
    defs: Vec<ItemDef>,
    name_to_id: HashMap<String, ItemId>,
}

impl ItemRegistry {
    /// Build registry from a list of ItemDefs. Order = ItemId index.
    pub fn from_defs(defs: Vec<ItemDef>) -> Self {
        let name_to_id = defs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), ItemId(i as u16)))
            .collect();
        Self { defs, name_to_id }
    }

    pub fn get(&self, id: ItemId) -> &ItemDef {
        &self.defs[id.0 as usize]
    }

    pub fn name(&self, id: ItemId) -> &str {
        &self.defs[id.0 as usize].id
    }

    pub fn max_stack(&self, id: ItemId) -> u32 {
        self.defs[id.0 as usize].max_stack
    }

    /// Lookup that panics on unknown names. For content that must exist.
    pub fn by_name(&self, name: &str) -> ItemId {
        *self
            .name_to_id
            .get(name)
            .unwrap_or_else(|| panic!("Unknown item: {name}"))
    }

    /// Fallible lookup for names coming from data files.
    pub fn find(&self, name: &str) -> Option<ItemId> {
        self.name_to_id.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ItemDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, d)| (ItemId(i as u16), d))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
