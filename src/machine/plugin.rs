use bevy::prelude::*;

use super::process::{filler_tick, grinder_tick, recharge_tick};
use crate::data::AppState;

pub struct MachinePlugin;

impl Plugin for MachinePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (recharge_tick, grinder_tick, filler_tick).run_if(in_state(AppState::InGame)),
        );
    }
}
