//! Shared manager plumbing: config, lifecycle state, and the collaborator
//! contracts managers are queried through and refreshed from.

use super::catalyst::CatalystDef;
use super::record::{RecipeDef, RecipeKind, RecipeOutput};
use crate::fluid::FluidStack;
use crate::item::ItemStack;

/// Per-manager cost configuration, read at load time only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManagerConfig {
    /// Energy cost assumed for declarations that carry none.
    pub default_energy: u32,
    /// Global multiplier applied to every recipe's energy at insertion.
    pub scale: f32,
}

impl ManagerConfig {
    pub fn new(default_energy: u32) -> Self {
        Self {
            default_energy,
            scale: 1.0,
        }
    }

    pub fn with_scale(default_energy: u32, scale: f32) -> Self {
        Self {
            default_energy,
            scale,
        }
    }

    /// Scaled energy cost, rounded to the nearest unit.
    pub fn scaled(&self, energy: u32) -> u32 {
        (energy as f32 * self.scale).round() as u32
    }
}

/// Refresh lifecycle. Tables are only consistent in `Ready`; the caller
/// owning the exclusive borrow during `refresh` is what keeps queries out
/// of the `Populating` window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManagerState {
    #[default]
    Empty,
    Populating,
    Ready,
}

/// Read-only view of a machine's current input slots and tanks, queried
/// at match time. Slot order is significant; the first slot/tank is the
/// primary input.
pub trait InventoryView {
    fn input_slots(&self) -> &[Option<ItemStack>];
    fn input_tanks(&self) -> &[Option<FluidStack>];
}

/// Supplies the declared data-driven recipes of each kind, one full set
/// per reload.
pub trait RecipeSource {
    fn recipes(&self, kind: RecipeKind) -> &[RecipeDef];

    fn catalysts(&self, _kind: RecipeKind) -> &[CatalystDef] {
        &[]
    }
}

/// First non-empty primary input item, if any.
pub(crate) fn primary_item(slots: &[Option<ItemStack>]) -> Option<&ItemStack> {
    slots
        .first()
        .and_then(|slot| slot.as_ref())
        .filter(|stack| !stack.is_empty())
}

/// First non-empty primary input fluid, if any.
pub(crate) fn primary_fluid(tanks: &[Option<FluidStack>]) -> Option<&FluidStack> {
    tanks
        .first()
        .and_then(|tank| tank.as_ref())
        .filter(|stack| !stack.is_empty())
}

/// Output-side validation shared by the managers: at least one output,
/// caps respected, no empty stacks.
pub(crate) fn outputs_valid(
    output_items: &[RecipeOutput],
    output_fluids: &[FluidStack],
    max_output_items: usize,
    max_output_fluids: usize,
) -> bool {
    if output_items.is_empty() && output_fluids.is_empty() {
        return false;
    }
    if output_items.len() > max_output_items || output_fluids.len() > max_output_fluids {
        return false;
    }
    if output_items.iter().any(|output| output.stack.is_empty()) {
        return false;
    }
    !output_fluids.iter().any(FluidStack::is_empty)
}
