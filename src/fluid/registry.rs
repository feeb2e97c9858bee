use std::collections::HashMap;

use bevy::prelude::*;

use super::definition::FluidDef;

/// Compact fluid identifier. Index into FluidRegistry.defs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FluidId(pub u16);

/// Registry of all fluid definitions. Inserted as a Resource after asset loading.
#[derive(Resource, Debug, Default)]
pub struct FluidRegistry {
    defs: Vec<FluidDef>,
    name_to_id: HashMap<String, FluidId>,
}

impl FluidRegistry {
    /// Build registry from a list of FluidDefs. Order = FluidId index.
    pub fn from_defs(defs: Vec<FluidDef>) -> Self {
        let name_to_id = defs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), FluidId(i as u16)))
            .collect();
        Self { defs, name_to_id }
    }

    pub fn get(&self, id: FluidId) -> &FluidDef {
        &self.defs[id.0 as usize]
    }

    pub fn name(&self, id: FluidId) -> &str {
        &self.defs[id.0 as usize].id
    }

    /// Lookup that panics on unknown names. For content that must exist.
    pub fn by_name(&self, name: &str) -> FluidId {
        *self
            .name_to_id
            .get(name)
            .unwrap_or_else(|| panic!("Unknown fluid: {name}"))
    }

    /// Fallible lookup for names coming from data files.
    pub fn find(&self, name: &str) -> Option<FluidId> {
        self.name_to_id.get(name).copied()
    }

    pub fn is_flowing(&self, id: FluidId) -> bool {
        self.get(id).still.is_some()
    }

    /// For a flowing fluid, the registered still form. None when the def
    /// names no still form or names one that is not registered.
    pub fn still_of(&self, id: FluidId) -> Option<FluidId> {
        self.get(id).still.as_deref().and_then(|name| self.find(name))
    }

    /// Item id (by name) of the fluid's filled bucket, if declared.
    pub fn bucket_of(&self, id: FluidId) -> Option<&str> {
        self.get(id).bucket.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FluidId, &FluidDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, d)| (FluidId(i as u16), d))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
