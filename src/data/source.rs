use std::collections::HashMap;

use bevy::prelude::*;

use super::assets::{RawCatalyst, RawRecipe, RecipeFileAsset};
use crate::fluid::{FluidRegistry, FluidStack};
use crate::item::{ItemRegistry, ItemStack};
use crate::recipe::{
    CatalystDef, Ingredient, RecipeDef, RecipeId, RecipeKind, RecipeOutput, RecipeSource,
};

/// Data-driven declarations resolved against the registries, grouped by
/// kind. Rebuilt from the recipe file assets on every (re)load and handed
/// to the managers' `refresh`.
#[derive(Resource, Debug, Default)]
pub struct AssetRecipeSource {
    recipes: HashMap<RecipeKind, Vec<RecipeDef>>,
    catalysts: HashMap<RecipeKind, Vec<CatalystDef>>,
}

impl AssetRecipeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve one recipe file. Entries naming unregistered content are
    /// logged and skipped; the rest of the file still loads.
    pub fn ingest(
        &mut self,
        file: &RecipeFileAsset,
        items: &ItemRegistry,
        fluids: &FluidRegistry,
        default_energy: u32,
    ) {
        for raw in &file.recipes {
            if let Some(def) = resolve_recipe(raw, items, fluids, default_energy) {
                self.recipes.entry(file.kind).or_default().push(def);
            }
        }
        for raw in &file.catalysts {
            if let Some(def) = resolve_catalyst(raw, items) {
                self.catalysts.entry(file.kind).or_default().push(def);
            }
        }
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.values().map(Vec::len).sum()
    }
}

impl RecipeSource for AssetRecipeSource {
    fn recipes(&self, kind: RecipeKind) -> &[RecipeDef] {
        self.recipes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn catalysts(&self, kind: RecipeKind) -> &[CatalystDef] {
        self.catalysts.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn resolve_recipe(
    raw: &RawRecipe,
    items: &ItemRegistry,
    fluids: &FluidRegistry,
    default_energy: u32,
) -> Option<RecipeDef> {
    let mut input_items = Vec::new();
    for ingredient in &raw.input_items {
        let mut matching = Vec::new();
        for name in &ingredient.any_of {
            let Some(id) = items.find(name) else {
                warn!("Recipe `{}` names unknown item `{name}`; skipping it", raw.id);
                return None;
            };
            matching.push(ItemStack::new(id, ingredient.count));
        }
        input_items.push(Ingredient::any_of(matching));
    }
    let mut input_fluids = Vec::new();
    for raw_fluid in &raw.input_fluids {
        let Some(id) = fluids.find(&raw_fluid.fluid) else {
            warn!(
                "Recipe `{}` names unknown fluid `{}`; skipping it",
                raw.id, raw_fluid.fluid
            );
            return None;
        };
        input_fluids.push(FluidStack::new(id, raw_fluid.volume));
    }
    let mut output_items = Vec::new();
    for output in &raw.output_items {
        let Some(id) = items.find(&output.item) else {
            warn!(
                "Recipe `{}` names unknown item `{}`; skipping it",
                raw.id, output.item
            );
            return None;
        };
        output_items.push(RecipeOutput::new(
            ItemStack::new(id, output.count),
            output.chance,
        ));
    }
    let mut output_fluids = Vec::new();
    for raw_fluid in &raw.output_fluids {
        let Some(id) = fluids.find(&raw_fluid.fluid) else {
            warn!(
                "Recipe `{}` names unknown fluid `{}`; skipping it",
                raw.id, raw_fluid.fluid
            );
            return None;
        };
        output_fluids.push(FluidStack::new(id, raw_fluid.volume));
    }
    Some(RecipeDef {
        id: RecipeId::new(raw.id.clone()),
        energy: raw.energy.unwrap_or(default_energy),
        experience: raw.experience,
        input_items,
        input_fluids,
        output_items,
        output_fluids,
    })
}

fn resolve_catalyst(raw: &RawCatalyst, items: &ItemRegistry) -> Option<CatalystDef> {
    let mut matching = Vec::new();
    for name in &raw.any_of {
        let Some(id) = items.find(name) else {
            warn!("Catalyst names unknown item `{name}`; skipping it");
            return None;
        };
        matching.push(ItemStack::new(id, 1));
    }
    Some(CatalystDef {
        ingredient: Ingredient::any_of(matching),
        primary_mod: raw.primary_mod,
        secondary_mod: raw.secondary_mod,
        energy_mod: raw.energy_mod,
        min_chance: raw.min_chance,
        use_chance: raw.use_chance,
    })
}
