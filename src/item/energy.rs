//! Charge handling for energy-storage items.
//!
//! The charge lives in the stack's data payload; item defs supply the
//! capacity and the per-operation transfer bound. All accessors clamp, so
//! stacks with out-of-range payloads (old saves, hand-edited data) never
//! report more than capacity.

use super::definition::EnergyDef;
use super::stack::ItemStack;

/// Data payload key the charge is stored under.
pub const DATA_ENERGY: &str = "energy";

pub fn energy_stored(stack: &ItemStack, def: &EnergyDef) -> u32 {
    let raw = stack.data_value(DATA_ENERGY).unwrap_or(0).max(0) as u32;
    raw.min(def.capacity)
}

pub fn set_energy_stored(stack: &mut ItemStack, def: &EnergyDef, amount: u32) {
    stack.set_data_value(DATA_ENERGY, i64::from(amount.min(def.capacity)));
}

/// Remaining room in the item's storage.
pub fn space(stack: &ItemStack, def: &EnergyDef) -> u32 {
    def.capacity - energy_stored(stack, def)
}

/// Stored charge rescaled to `0..=scale`, for display bars.
pub fn scaled_energy_stored(stack: &ItemStack, def: &EnergyDef, scale: u32) -> u32 {
    if def.capacity == 0 {
        return 0;
    }
    let stored = u64::from(energy_stored(stack, def));
    ((stored * u64::from(scale) + u64::from(def.capacity) / 2) / u64::from(def.capacity)) as u32
}

/// Push up to `max_receive` energy into the stack. Returns the amount
/// accepted; with `simulate` the stack is left untouched.
pub fn receive_energy(stack: &mut ItemStack, def: &EnergyDef, max_receive: u32, simulate: bool) -> u32 {
    let stored = energy_stored(stack, def);
    let receive = max_receive.min(def.transfer).min(def.capacity - stored);
    if !simulate && receive > 0 {
        set_energy_stored(stack, def, stored + receive);
    }
    receive
}

/// Pull up to `max_extract` energy out of the stack. Returns the amount
/// removed; with `simulate` the stack is left untouched.
pub fn extract_energy(stack: &mut ItemStack, def: &EnergyDef, max_extract: u32, simulate: bool) -> u32 {
    let stored = energy_stored(stack, def);
    let extract = max_extract.min(def.transfer).min(stored);
    if !simulate && extract > 0 {
        set_energy_stored(stack, def, stored - extract);
    }
    extract
}
