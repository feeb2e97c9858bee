use bevy::prelude::*;

use crate::recipe::{ItemFluidRecipes, SingleItemRecipes};

/// Recipe tables for grinder machines. One explicit instance, owned by
/// the app and handed to systems by reference.
#[derive(Resource, Debug)]
pub struct GrinderRecipes(pub SingleItemRecipes);

/// Recipe tables for filler machines.
#[derive(Resource, Debug)]
pub struct FillerRecipes(pub ItemFluidRecipes);
