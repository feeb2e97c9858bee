use bevy::prelude::*;

use super::registry::FluidRegistry;

pub struct FluidPlugin;

impl Plugin for FluidPlugin {
    fn build(&self, app: &mut App) {
        // Replaced with the loaded registry once data assets are in.
        app.insert_resource(FluidRegistry::from_defs(vec![]));
    }
}
