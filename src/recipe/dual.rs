//! Item+fluid-keyed recipe manager, used where a fluid participates in
//! matching (container filling). Carries side indexes of every valid
//! input item and fluid for upstream slot filtering, and mirrors its
//! synthesized defaults into an inspectable declaration list.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use super::key::{DualKey, ItemKey};
use super::manager::{
    outputs_valid, primary_fluid, primary_item, InventoryView, ManagerConfig, ManagerState,
    RecipeSource,
};
use super::record::{Ingredient, MachineRecipe, RecipeDef, RecipeId, RecipeKind, RecipeOutput};
use crate::fluid::{FluidId, FluidRegistry, FluidStack, BUCKET_VOLUME, FLASK_VOLUME};
use crate::item::{ItemRegistry, ItemStack};

/// Item id of the empty bucket, expected by default bucket synthesis.
pub const EMPTY_BUCKET_ITEM: &str = "bucket";
/// Item ids and fluid id used by default brew-flask synthesis.
pub const EMPTY_FLASK_ITEM: &str = "glass_flask";
pub const FILLED_FLASK_ITEM: &str = "brew_flask";
pub const BREW_FLUID: &str = "brew";

#[derive(Debug)]
pub struct ItemFluidRecipes {
    kind: RecipeKind,
    config: ManagerConfig,
    max_output_items: usize,
    max_output_fluids: usize,
    default_bucket_recipes: bool,
    default_brew_recipes: bool,
    recipes: HashMap<DualKey, MachineRecipe>,
    valid_items: HashSet<ItemKey>,
    valid_fluids: HashSet<FluidId>,
    converted: Vec<RecipeDef>,
    state: ManagerState,
}

impl ItemFluidRecipes {
    pub fn new(
        kind: RecipeKind,
        config: ManagerConfig,
        max_output_items: usize,
        max_output_fluids: usize,
    ) -> Self {
        Self {
            kind,
            config,
            max_output_items,
            max_output_fluids,
            default_bucket_recipes: false,
            default_brew_recipes: false,
            recipes: HashMap::new(),
            valid_items: HashSet::new(),
            valid_fluids: HashSet::new(),
            converted: Vec::new(),
            state: ManagerState::Empty,
        }
    }

    /// Enable default-recipe synthesis on refresh.
    pub fn with_default_recipes(mut self, bucket_recipes: bool, brew_recipes: bool) -> Self {
        self.default_bucket_recipes = bucket_recipes;
        self.default_brew_recipes = brew_recipes;
        self
    }

    pub fn kind(&self) -> RecipeKind {
        self.kind
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// Register a recipe under the key variant matching its inputs:
    /// item-only, fluid-only, or item+fluid. Returns the stored record, or
    /// None when the declaration is invalid (nothing is mutated in that
    /// case). Duplicate keys overwrite.
    pub fn add_recipe(
        &mut self,
        energy: u32,
        experience: f32,
        input_items: Vec<ItemStack>,
        input_fluids: Vec<FluidStack>,
        output_items: Vec<RecipeOutput>,
        output_fluids: Vec<FluidStack>,
    ) -> Option<&MachineRecipe> {
        if energy == 0 {
            return None;
        }
        let item = input_items.first();
        if item.is_some_and(ItemStack::is_empty) {
            return None;
        }
        let fluid = input_fluids.first();
        if fluid.is_some_and(FluidStack::is_empty) {
            return None;
        }
        // None when neither input is present: fail closed.
        let key = DualKey::for_inputs(item, fluid)?;
        if !outputs_valid(
            &output_items,
            &output_fluids,
            self.max_output_items,
            self.max_output_fluids,
        ) {
            return None;
        }
        if let Some(stack) = item {
            self.valid_items.insert(ItemKey::of(stack));
        }
        if let Some(stack) = fluid {
            self.valid_fluids.insert(stack.fluid);
        }
        let recipe = MachineRecipe {
            energy: self.config.scaled(energy),
            experience,
            input_items,
            input_fluids,
            output_items,
            output_fluids,
        };
        self.recipes.insert(key.clone(), recipe);
        self.recipes.get(&key)
    }

    /// Expand a declared recipe: one table entry per concrete stack the
    /// first ingredient matches, or a single fluid-keyed entry when the
    /// declaration has no item ingredient.
    pub fn add_recipe_def(&mut self, def: &RecipeDef) {
        if let Some(first) = def.input_items.first() {
            for stack in &first.matching {
                self.add_recipe(
                    def.energy,
                    def.experience,
                    vec![stack.clone()],
                    def.input_fluids.clone(),
                    def.output_items.clone(),
                    def.output_fluids.clone(),
                );
            }
        } else {
            self.add_recipe(
                def.energy,
                def.experience,
                vec![],
                def.input_fluids.clone(),
                def.output_items.clone(),
                def.output_fluids.clone(),
            );
        }
    }

    /// Match against the machine's current inputs: item-only, fluid-only,
    /// or item+fluid depending on what is present. Fails closed when both
    /// sources are absent. Fluid data payloads never affect the match.
    pub fn get_recipe(&self, inventory: &impl InventoryView) -> Option<&MachineRecipe> {
        let item = primary_item(inventory.input_slots());
        let fluid = primary_fluid(inventory.input_tanks());
        self.recipes.get(&DualKey::for_inputs(item, fluid)?)
    }

    /// Whether any recipe accepts this item identity, for slot filtering
    /// ahead of a full match.
    pub fn valid_item(&self, input: &ItemStack) -> bool {
        self.valid_items.contains(&ItemKey::of(input))
    }

    /// Whether any recipe accepts this fluid type, tag-insensitive.
    pub fn valid_fluid(&self, input: &FluidStack) -> bool {
        self.valid_fluids.contains(&input.fluid)
    }

    pub fn recipe_list(&self) -> Vec<&MachineRecipe> {
        self.recipes.values().collect()
    }

    /// Synthesized defaults in declaration shape, for export/inspection.
    pub fn converted_recipes(&self) -> &[RecipeDef] {
        &self.converted
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn clear(&mut self) {
        self.recipes.clear();
        self.valid_items.clear();
        self.valid_fluids.clear();
        self.converted.clear();
        self.state = ManagerState::Empty;
    }

    /// Reload: clear, synthesize enabled defaults, then ingest every
    /// declaration of this manager's kind through the same registration
    /// path — a declared recipe colliding with a synthesized default
    /// overwrites it, so data overrides defaults. Idempotent for
    /// identical inputs.
    pub fn refresh(
        &mut self,
        source: &impl RecipeSource,
        items: &ItemRegistry,
        fluids: &FluidRegistry,
    ) {
        self.clear();
        self.state = ManagerState::Populating;
        if self.default_bucket_recipes {
            self.add_default_bucket_recipes(items, fluids);
        }
        if self.default_brew_recipes {
            self.add_default_brew_recipes(items, fluids);
        }
        for def in source.recipes(self.kind) {
            self.add_recipe_def(def);
        }
        self.state = ManagerState::Ready;
    }

    /// One bucket-fill recipe per still fluid with a bucket form:
    /// empty bucket + one bucket of fluid -> filled bucket.
    ///
    /// Walks the flowing variants and resolves each to its still form; a
    /// flowing fluid without a registered still form is a data error —
    /// logged and skipped, never fatal to the pass. Multiple flowing
    /// variants sharing one still form synthesize a single recipe.
    fn add_default_bucket_recipes(&mut self, items: &ItemRegistry, fluids: &FluidRegistry) {
        debug!("Adding default bucket recipes");
        let Some(empty_bucket) = items.find(EMPTY_BUCKET_ITEM) else {
            warn!("No `{EMPTY_BUCKET_ITEM}` item registered; skipping default bucket recipes");
            return;
        };
        let mut seen: HashSet<FluidId> = HashSet::new();
        for (id, def) in fluids.iter() {
            if !fluids.is_flowing(id) {
                continue;
            }
            let Some(still) = fluids.still_of(id) else {
                warn!(
                    "Fluid `{}` has no registered still form; skipping its bucket recipe",
                    def.id
                );
                continue;
            };
            let Some(bucket_name) = fluids.bucket_of(still) else {
                continue;
            };
            let Some(bucket_item) = items.find(bucket_name) else {
                warn!(
                    "Fluid `{}` names unknown bucket item `{bucket_name}`; skipping",
                    fluids.name(still)
                );
                continue;
            };
            if !seen.insert(still) {
                continue;
            }
            self.add_default(
                ItemStack::new(empty_bucket, 1),
                FluidStack::new(still, BUCKET_VOLUME),
                ItemStack::new(bucket_item, 1),
                items,
            );
        }
    }

    /// Fixed flask-filling recipe: empty flask + one flask of brew ->
    /// filled flask.
    fn add_default_brew_recipes(&mut self, items: &ItemRegistry, fluids: &FluidRegistry) {
        debug!("Adding default brew recipes");
        let (Some(flask), Some(filled), Some(brew)) = (
            items.find(EMPTY_FLASK_ITEM),
            items.find(FILLED_FLASK_ITEM),
            fluids.find(BREW_FLUID),
        ) else {
            warn!("Brew content is not registered; skipping default brew recipes");
            return;
        };
        self.add_default(
            ItemStack::new(flask, 1),
            FluidStack::new(brew, FLASK_VOLUME),
            ItemStack::new(filled, 1),
            items,
        );
    }

    /// Register a synthesized default and mirror it into the converted
    /// list under a stable id derived from the input item's name.
    fn add_default(
        &mut self,
        input_item: ItemStack,
        input_fluid: FluidStack,
        output_item: ItemStack,
        items: &ItemRegistry,
    ) {
        let energy = self.config.default_energy;
        self.converted.push(RecipeDef {
            id: RecipeId::synthesized("filling", items.name(input_item.item)),
            energy: self.config.scaled(energy),
            experience: 0.0,
            input_items: vec![Ingredient::of(input_item.clone())],
            input_fluids: vec![input_fluid.clone()],
            output_items: vec![RecipeOutput::certain(output_item.clone())],
            output_fluids: vec![],
        });
        self.add_recipe(
            energy,
            0.0,
            vec![input_item],
            vec![input_fluid],
            vec![RecipeOutput::certain(output_item)],
            vec![],
        );
    }
}
