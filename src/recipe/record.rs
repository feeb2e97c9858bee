use std::fmt;

use serde::Deserialize;

use crate::fluid::FluidStack;
use crate::item::ItemStack;

/// Namespace for identifiers this crate generates itself.
pub const NAMESPACE: &str = "fluxworks";

/// Which manager's table a data-driven recipe belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum RecipeKind {
    Grinding,
    Filling,
}

/// Stable recipe identifier, `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Deterministic id for a synthesized default, derived from the input
    /// item's registry name.
    pub fn synthesized(category: &str, item_name: &str) -> Self {
        Self(format!("{NAMESPACE}:{category}/{item_name}"))
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recipe output: the stack plus its independent drop chance.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeOutput {
    pub stack: ItemStack,
    pub chance: f32,
}

impl RecipeOutput {
    pub fn new(stack: ItemStack, chance: f32) -> Self {
        Self { stack, chance }
    }

    /// Output that always drops.
    pub fn certain(stack: ItemStack) -> Self {
        Self { stack, chance: 1.0 }
    }
}

/// A resolved table entry: concrete inputs, outputs, and costs.
///
/// Immutable once inserted; dropped wholesale when the owning manager's
/// table clears on refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineRecipe {
    pub energy: u32,
    pub experience: f32,
    pub input_items: Vec<ItemStack>,
    pub input_fluids: Vec<FluidStack>,
    pub output_items: Vec<RecipeOutput>,
    pub output_fluids: Vec<FluidStack>,
}

/// An ingredient already resolved to the concrete stacks it matches.
/// Managers register one table entry per matching stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub matching: Vec<ItemStack>,
}

impl Ingredient {
    pub fn of(stack: ItemStack) -> Self {
        Self {
            matching: vec![stack],
        }
    }

    pub fn any_of(matching: Vec<ItemStack>) -> Self {
        Self { matching }
    }
}

/// A declared recipe in host/data-driven shape, before table expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDef {
    pub id: RecipeId,
    pub energy: u32,
    pub experience: f32,
    pub input_items: Vec<Ingredient>,
    pub input_fluids: Vec<FluidStack>,
    pub output_items: Vec<RecipeOutput>,
    pub output_fluids: Vec<FluidStack>,
}
