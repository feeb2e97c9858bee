//! Single-item-keyed recipe manager. Fluids are not part of the key.

use std::collections::HashMap;

use super::catalyst::{Catalyst, CatalystDef, CatalystTable};
use super::key::ItemKey;
use super::manager::{
    outputs_valid, primary_item, InventoryView, ManagerConfig, ManagerState, RecipeSource,
};
use super::record::{MachineRecipe, RecipeDef, RecipeKind, RecipeOutput};
use crate::fluid::FluidStack;
use crate::item::ItemStack;

/// Lookup table keyed by the identity of the first input item.
///
/// Machines that take a catalyst attach a [`CatalystTable`] at
/// construction; the capability is composition, not a subtype.
#[derive(Debug)]
pub struct SingleItemRecipes {
    kind: RecipeKind,
    config: ManagerConfig,
    max_output_items: usize,
    max_output_fluids: usize,
    recipes: HashMap<ItemKey, MachineRecipe>,
    catalysts: Option<CatalystTable>,
    state: ManagerState,
}

impl SingleItemRecipes {
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
            recipes: HashMap::new(),
            catalysts: None,
            state: ManagerState::Empty,
        }
    }

    pub fn with_catalysts(
        kind: RecipeKind,
        config: ManagerConfig,
        max_output_items: usize,
        max_output_fluids: usize,
    ) -> Self {
        Self {
            catalysts: Some(CatalystTable::new()),
            ..Self::new(kind, config, max_output_items, max_output_fluids)
        }
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

    pub fn supports_catalysts(&self) -> bool {
        self.catalysts.is_some()
    }

    /// Register a recipe keyed by its first input item. Returns the stored
    /// record, or None when the declaration is invalid (nothing is
    /// mutated in that case). Duplicate keys overwrite.
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
        let input = input_items.first()?;
        if input.is_empty() {
            return None;
        }
        if !outputs_valid(
            &output_items,
            &output_fluids,
            self.max_output_items,
            self.max_output_fluids,
        ) {
            return None;
        }
        let key = ItemKey::of(input);
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
    /// first ingredient matches.
    pub fn add_recipe_def(&mut self, def: &RecipeDef) {
        let Some(first) = def.input_items.first() else {
            return;
        };
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
    }

    pub fn recipe_for(&self, input: &ItemStack) -> Option<&MachineRecipe> {
        if input.is_empty() {
            return None;
        }
        self.recipes.get(&ItemKey::of(input))
    }

    /// Match against the machine's current inputs. Fails closed when the
    /// primary slot is empty.
    pub fn get_recipe(&self, inventory: &impl InventoryView) -> Option<&MachineRecipe> {
        self.recipe_for(primary_item(inventory.input_slots())?)
    }

    pub fn valid_recipe(&self, input: &ItemStack) -> bool {
        self.recipe_for(input).is_some()
    }

    pub fn recipe_list(&self) -> Vec<&MachineRecipe> {
        self.recipes.values().collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Drop both tables. No partially-cleared state is observable through
    /// the query API afterwards.
    pub fn clear(&mut self) {
        self.recipes.clear();
        if let Some(catalysts) = &mut self.catalysts {
            catalysts.clear();
        }
        self.state = ManagerState::Empty;
    }

    /// Reload: clear, re-ingest every declaration of this manager's kind,
    /// settle Ready. Idempotent for identical source data.
    pub fn refresh(&mut self, source: &impl RecipeSource) {
        self.clear();
        self.state = ManagerState::Populating;
        for def in source.recipes(self.kind) {
            self.add_recipe_def(def);
        }
        for def in source.catalysts(self.kind) {
            self.add_catalyst_def(def);
        }
        self.state = ManagerState::Ready;
    }

    /// Register a catalyst keyed by the input's identity. Returns the
    /// stored record, or None when the input is empty or this manager has
    /// no catalyst capability. Duplicate keys overwrite.
    pub fn add_catalyst(&mut self, input: &ItemStack, catalyst: Catalyst) -> Option<&Catalyst> {
        if input.is_empty() {
            return None;
        }
        let table = self.catalysts.as_mut()?;
        table.insert(input, catalyst);
        table.get(input)
    }

    /// Expand a declared catalyst: one entry per matching stack.
    pub fn add_catalyst_def(&mut self, def: &CatalystDef) {
        let catalyst = Catalyst {
            primary_mod: def.primary_mod,
            secondary_mod: def.secondary_mod,
            energy_mod: def.energy_mod,
            min_chance: def.min_chance,
            use_chance: def.use_chance,
        };
        for stack in def.ingredient.matching.clone() {
            self.add_catalyst(&stack, catalyst.clone());
        }
    }

    pub fn get_catalyst(&self, input: &ItemStack) -> Option<&Catalyst> {
        self.catalysts.as_ref()?.get(input)
    }

    pub fn remove_catalyst(&mut self, input: &ItemStack) -> Option<Catalyst> {
        self.catalysts.as_mut()?.remove(input)
    }

    pub fn valid_catalyst(&self, input: &ItemStack) -> bool {
        self.get_catalyst(input).is_some()
    }

    /// Unit stacks for every registered catalyst identity.
    pub fn catalyst_items(&self) -> Vec<ItemStack> {
        self.catalysts
            .as_ref()
            .map(CatalystTable::items)
            .unwrap_or_default()
    }
}
