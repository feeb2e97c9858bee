use bevy::prelude::*;

use crate::fluid::FluidStack;
use crate::item::ItemStack;
use crate::recipe::{InventoryView, RecipeOutput};

/// Marker for grinder machines.
#[derive(Component, Debug)]
pub struct Grinder;

/// Marker for filler machines.
#[derive(Component, Debug)]
pub struct Filler;

/// Input/output buffers of one processing machine. The first input slot
/// and tank are the primary inputs the recipe managers match on.
#[derive(Component, Debug)]
pub struct MachineInventory {
    pub input_slots: Vec<Option<ItemStack>>,
    pub input_tanks: Vec<Option<FluidStack>>,
    pub catalyst_slot: Option<ItemStack>,
    /// Holds a charged energy item that tops up the machine's buffer.
    pub power_slot: Option<ItemStack>,
    pub output_slots: Vec<Option<ItemStack>>,
    pub output_tanks: Vec<Option<FluidStack>>,
}

impl MachineInventory {
    pub fn new(input_slots: usize, input_tanks: usize, output_slots: usize) -> Self {
        Self {
            input_slots: vec![None; input_slots],
            input_tanks: vec![None; input_tanks],
            catalyst_slot: None,
            power_slot: None,
            output_slots: vec![None; output_slots],
            output_tanks: vec![],
        }
    }

    pub fn with_output_tanks(mut self, output_tanks: usize) -> Self {
        self.output_tanks = vec![None; output_tanks];
        self
    }

    /// Place an output stack, merging onto a matching stack or taking the
    /// first free slot. Returns false when no room is left.
    pub fn push_output(&mut self, stack: ItemStack) -> bool {
        for slot in self.output_slots.iter_mut().flatten() {
            if slot.item == stack.item && slot.data == stack.data {
                slot.count += stack.count;
                return true;
            }
        }
        for slot in &mut self.output_slots {
            if slot.is_none() {
                *slot = Some(stack);
                return true;
            }
        }
        false
    }

    /// Place an output fluid, merging volumes by fluid type or taking the
    /// first free tank. Returns false when no room is left.
    pub fn push_output_fluid(&mut self, stack: FluidStack) -> bool {
        for tank in self.output_tanks.iter_mut().flatten() {
            if tank.fluid == stack.fluid {
                tank.volume += stack.volume;
                return true;
            }
        }
        for tank in &mut self.output_tanks {
            if tank.is_none() {
                *tank = Some(stack);
                return true;
            }
        }
        false
    }
}

impl InventoryView for MachineInventory {
    fn input_slots(&self) -> &[Option<ItemStack>] {
        &self.input_slots
    }

    fn input_tanks(&self) -> &[Option<FluidStack>] {
        &self.input_tanks
    }
}

/// Internal energy buffer of a machine.
#[derive(Component, Debug)]
pub struct EnergyBuffer {
    pub stored: u32,
    pub capacity: u32,
}

impl EnergyBuffer {
    pub fn new(capacity: u32) -> Self {
        Self {
            stored: 0,
            capacity,
        }
    }

    pub fn full(capacity: u32) -> Self {
        Self {
            stored: capacity,
            capacity,
        }
    }

    /// Accept up to `amount`, clamped to remaining room. Returns the
    /// amount taken.
    pub fn receive(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.capacity - self.stored);
        self.stored += taken;
        taken
    }

    /// Drain up to `amount`, clamped to what is stored. Returns the
    /// amount drained.
    pub fn extract(&mut self, amount: u32) -> u32 {
        let drained = amount.min(self.stored);
        self.stored -= drained;
        drained
    }
}

/// A job in flight, cloned off the matched recipe when it starts so a
/// mid-job refresh cannot pull the outputs out from under it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveJob {
    pub energy_left: u32,
    pub experience: f32,
    pub output_items: Vec<RecipeOutput>,
    pub output_fluids: Vec<FluidStack>,
}

/// Per-machine processing state.
#[derive(Component, Debug)]
pub struct Machine {
    pub job: Option<ActiveJob>,
    /// Energy drawn from the buffer per tick while a job runs.
    pub power: u32,
    pub stored_experience: f32,
}

impl Machine {
    pub fn new(power: u32) -> Self {
        Self {
            job: None,
            power,
            stored_experience: 0.0,
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(40)
    }
}
