use bevy::prelude::*;

use super::registry::ItemRegistry;

pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        // Replaced with the loaded registry once data assets are in.
        app.insert_resource(ItemRegistry::from_defs(vec![]));
    }
}
