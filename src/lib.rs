//! Machine content for a voxel game: item/fluid definitions loaded from
//! RON data files, energy-storage items, and the recipe managers that
//! match machine inputs to processing recipes.

pub mod data;
pub mod fluid;
pub mod item;
pub mod machine;
pub mod recipe;

#[cfg(test)]
pub mod test_helpers;

use bevy::prelude::*;

/// Everything a host game adds to enable the content: registries, data
/// loading with hot reload, and the machine tick systems.
pub struct FluxworksPlugin;

impl Plugin for FluxworksPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            item::ItemPlugin,
            fluid::FluidPlugin,
            data::DataPlugin,
            machine::MachinePlugin,
        ));
    }
}
