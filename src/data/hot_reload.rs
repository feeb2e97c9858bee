//! Hot-reload handling for data assets.
//!
//! Recipe files reference items and fluids by name, so any modified data
//! file invalidates everything downstream: registries are rebuilt and
//! both managers re-run `refresh` against the new snapshot. The exclusive
//! resource writes give the rebuild the whole frame to itself; no query
//! observes a half-populated table.

use bevy::asset::AssetEvent;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::assets::{FluidSetAsset, ItemSetAsset, MachinesConfigAsset, RecipeFileAsset};
use super::{insert_content, rebuild_content, DataHandles};

#[allow(clippy::too_many_arguments)]
pub(crate) fn hot_reload_data(
    mut item_events: MessageReader<AssetEvent<ItemSetAsset>>,
    mut fluid_events: MessageReader<AssetEvent<FluidSetAsset>>,
    mut machine_events: MessageReader<AssetEvent<MachinesConfigAsset>>,
    mut recipe_events: MessageReader<AssetEvent<RecipeFileAsset>>,
    handles: Res<DataHandles>,
    item_assets: Res<Assets<ItemSetAsset>>,
    fluid_assets: Res<Assets<FluidSetAsset>>,
    machine_assets: Res<Assets<MachinesConfigAsset>>,
    recipe_assets: Res<Assets<RecipeFileAsset>>,
    mut commands: Commands,
) {
    let mut modified = false;
    for event in item_events.read() {
        modified |= matches!(event, AssetEvent::Modified { .. });
    }
    for event in fluid_events.read() {
        modified |= matches!(event, AssetEvent::Modified { .. });
    }
    for event in machine_events.read() {
        modified |= matches!(event, AssetEvent::Modified { .. });
    }
    for event in recipe_events.read() {
        modified |= matches!(event, AssetEvent::Modified { .. });
    }
    if !modified {
        return;
    }

    let Some(content) = rebuild_content(
        &handles,
        &item_assets,
        &fluid_assets,
        &machine_assets,
        &recipe_assets,
    ) else {
        return;
    };

    info!(
        "Hot-reloaded data assets: {} items, {} fluids, {} declared recipes",
        content.items.len(),
        content.fluids.len(),
        content.source.recipe_count()
    );
    insert_content(&mut commands, content);
}
