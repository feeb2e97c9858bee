use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use crate::fluid::FluidDef;
use crate::item::ItemDef;
use crate::recipe::RecipeKind;

/// Asset loaded from fluxworks.items.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct ItemSetAsset {
    pub items: Vec<ItemDef>,
}

/// Asset loaded from fluxworks.fluids.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct FluidSetAsset {
    pub fluids: Vec<FluidDef>,
}

fn default_scale() -> f32 {
    1.0
}

/// Cost configuration for a single machine's manager.
#[derive(Debug, Clone, Deserialize)]
pub struct GrinderConfig {
    pub default_energy: u32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    pub max_output_items: usize,
    pub max_output_fluids: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FillerConfig {
    pub default_energy: u32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    pub max_output_items: usize,
    pub max_output_fluids: usize,
    pub default_bucket_recipes: bool,
    pub default_brew_recipes: bool,
}

/// Asset loaded from fluxworks.machines.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct MachinesConfigAsset {
    pub grinder: GrinderConfig,
    pub filler: FillerConfig,
}

fn default_count() -> u32 {
    1
}

fn default_chance() -> f32 {
    1.0
}

/// An ingredient as written in a recipe file: any of the named items.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIngredient {
    pub any_of: Vec<String>,
    #[serde(default = "default_count")]
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOutput {
    pub item: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default = "default_chance")]
    pub chance: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFluid {
    pub fluid: String,
    pub volume: u32,
}

/// One declared recipe as written in a recipe file. Energy falls back to
/// the owning machine's configured default when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecipe {
    pub id: String,
    #[serde(default)]
    pub energy: Option<u32>,
    #[serde(default)]
    pub experience: f32,
    #[serde(default)]
    pub input_items: Vec<RawIngredient>,
    #[serde(default)]
    pub input_fluids: Vec<RawFluid>,
    #[serde(default)]
    pub output_items: Vec<RawOutput>,
    #[serde(default)]
    pub output_fluids: Vec<RawFluid>,
}

fn default_mod() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalyst {
    pub any_of: Vec<String>,
    #[serde(default = "default_mod")]
    pub primary_mod: f32,
    #[serde(default = "default_mod")]
    pub secondary_mod: f32,
    #[serde(default = "default_mod")]
    pub energy_mod: f32,
    #[serde(default)]
    pub min_chance: f32,
    #[serde(default)]
    pub use_chance: f32,
}

/// Asset loaded from *.recipes.ron
#[derive(Asset, TypePath, Debug, Deserialize)]
pub struct RecipeFileAsset {
    pub kind: RecipeKind,
    #[serde(default)]
    pub recipes: Vec<RawRecipe>,
    #[serde(default)]
    pub catalysts: Vec<RawCatalyst>,
}
