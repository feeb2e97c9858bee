//! Machine-side processing: each tick, idle machines ask their manager
//! for a recipe matching the current inputs, then work the job down
//! against their energy buffer and deliver the rolled outputs.

use bevy::prelude::*;
use rand::Rng;

use super::components::{ActiveJob, EnergyBuffer, Filler, Grinder, Machine, MachineInventory};
use super::managers::{FillerRecipes, GrinderRecipes};
use crate::item::{energy, ItemRegistry, ItemStack};
use crate::recipe::{Catalyst, ItemFluidRecipes, MachineRecipe, RecipeOutput, SingleItemRecipes};

/// Job snapshot with catalyst modifiers folded into the energy cost and
/// output chances (pure function for testing).
pub fn start_job(recipe: &MachineRecipe, catalyst: Option<&Catalyst>) -> ActiveJob {
    let energy_left = catalyst.map_or(recipe.energy, |c| c.adjusted_energy(recipe.energy));
    let output_items = recipe
        .output_items
        .iter()
        .enumerate()
        .map(|(index, output)| {
            let chance =
                catalyst.map_or(output.chance, |c| c.adjusted_chance(output.chance, index == 0));
            RecipeOutput::new(output.stack.clone(), chance)
        })
        .collect();
    ActiveJob {
        energy_left,
        experience: recipe.experience,
        output_items,
        output_fluids: recipe.output_fluids.clone(),
    }
}

/// Deduct the matched recipe's inputs from the primary slot and tank.
pub fn consume_inputs(inventory: &mut MachineInventory, recipe: &MachineRecipe) {
    if let Some(required) = recipe.input_items.first()
        && let Some(slot) = inventory.input_slots.get_mut(0)
    {
        if let Some(stack) = slot.as_mut() {
            stack.count = stack.count.saturating_sub(required.count);
        }
        if slot.as_ref().is_some_and(|stack| stack.count == 0) {
            *slot = None;
        }
    }
    if let Some(required) = recipe.input_fluids.first()
        && let Some(tank) = inventory.input_tanks.get_mut(0)
    {
        if let Some(stack) = tank.as_mut() {
            stack.volume = stack.volume.saturating_sub(required.volume);
        }
        if tank.as_ref().is_some_and(|stack| stack.volume == 0) {
            *tank = None;
        }
    }
}

/// Roll each pending output and deliver the survivors (pure function for
/// testing).
pub fn finish_job(
    rng: &mut impl Rng,
    job: &ActiveJob,
    inventory: &mut MachineInventory,
    machine: &mut Machine,
) {
    for output in &job.output_items {
        if output.chance >= 1.0 || rng.gen_range(0.0..1.0) < output.chance {
            inventory.push_output(output.stack.clone());
        }
    }
    for fluid in &job.output_fluids {
        inventory.push_output_fluid(fluid.clone());
    }
    machine.stored_experience += job.experience;
}

/// Roll the catalyst's use-chance and consume one item on success.
pub fn maybe_consume_catalyst(rng: &mut impl Rng, catalyst: &Catalyst, slot: &mut Option<ItemStack>) {
    if catalyst.use_chance <= 0.0 || rng.gen_range(0.0..1.0) >= catalyst.use_chance {
        return;
    }
    if let Some(stack) = slot.as_mut() {
        stack.count = stack.count.saturating_sub(1);
    }
    if slot.as_ref().is_some_and(|stack| stack.count == 0) {
        *slot = None;
    }
}

/// Drain energy into the running job. Returns the job once it completes.
fn advance_job(machine: &mut Machine, buffer: &mut EnergyBuffer) -> Option<ActiveJob> {
    let job = machine.job.as_mut()?;
    let drained = buffer.extract(machine.power.min(job.energy_left));
    job.energy_left -= drained;
    if job.energy_left == 0 {
        machine.job.take()
    } else {
        None
    }
}

pub(crate) fn grind_machine(
    rng: &mut impl Rng,
    recipes: &SingleItemRecipes,
    machine: &mut Machine,
    inventory: &mut MachineInventory,
    buffer: &mut EnergyBuffer,
) {
    if machine.job.is_none()
        && let Some(recipe) = recipes.get_recipe(inventory)
    {
        let catalyst = inventory
            .catalyst_slot
            .as_ref()
            .and_then(|stack| recipes.get_catalyst(stack));
        let job = start_job(recipe, catalyst);
        consume_inputs(inventory, recipe);
        machine.job = Some(job);
    }
    if let Some(job) = advance_job(machine, buffer) {
        finish_job(rng, &job, inventory, machine);
        let catalyst = inventory
            .catalyst_slot
            .as_ref()
            .and_then(|stack| recipes.get_catalyst(stack))
            .cloned();
        if let Some(catalyst) = catalyst {
            maybe_consume_catalyst(rng, &catalyst, &mut inventory.catalyst_slot);
        }
    }
}

pub(crate) fn fill_machine(
    rng: &mut impl Rng,
    recipes: &ItemFluidRecipes,
    machine: &mut Machine,
    inventory: &mut MachineInventory,
    buffer: &mut EnergyBuffer,
) {
    if machine.job.is_none()
        && let Some(recipe) = recipes.get_recipe(inventory)
    {
        let job = start_job(recipe, None);
        consume_inputs(inventory, recipe);
        machine.job = Some(job);
    }
    if let Some(job) = advance_job(machine, buffer) {
        finish_job(rng, &job, inventory, machine);
    }
}

pub fn grinder_tick(
    recipes: Res<GrinderRecipes>,
    mut query: Query<(&mut Machine, &mut MachineInventory, &mut EnergyBuffer), With<Grinder>>,
) {
    let mut rng = rand::thread_rng();
    for (mut machine, mut inventory, mut buffer) in &mut query {
        grind_machine(&mut rng, &recipes.0, &mut machine, &mut inventory, &mut buffer);
    }
}

pub fn filler_tick(
    recipes: Res<FillerRecipes>,
    mut query: Query<(&mut Machine, &mut MachineInventory, &mut EnergyBuffer), With<Filler>>,
) {
    let mut rng = rand::thread_rng();
    for (mut machine, mut inventory, mut buffer) in &mut query {
        fill_machine(&mut rng, &recipes.0, &mut machine, &mut inventory, &mut buffer);
    }
}

/// Drain charge from the item in the power slot into the machine buffer,
/// bounded by the item's transfer rate and the buffer's remaining room.
pub fn recharge_tick(
    items: Res<ItemRegistry>,
    mut query: Query<(&mut MachineInventory, &mut EnergyBuffer), With<Machine>>,
) {
    for (mut inventory, mut buffer) in &mut query {
        let Some(stack) = inventory.power_slot.as_mut() else {
            continue;
        };
        let Some(def) = items.get(stack.item).energy else {
            continue;
        };
        let space = buffer.capacity - buffer.stored;
        if space == 0 {
            continue;
        }
        let moved = energy::extract_energy(stack, &def, space, false);
        buffer.receive(moved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::fluid::{FluidStack, BUCKET_VOLUME};
    use crate::item::ItemId;
    use crate::test_helpers::fixtures::{
        test_filler, test_fluid_registry, test_grinder, test_item_registry,
    };

    #[test]
    fn start_job_applies_catalyst_modifiers() {
        let items = test_item_registry();
        let grinder = test_grinder(&items);
        let ore = ItemStack::new(items.by_name("copper_ore"), 1);
        let recipe = grinder.recipe_for(&ore).unwrap();
        let catalyst = grinder
            .get_catalyst(&ItemStack::new(items.by_name("ember_catalyst"), 1))
            .unwrap();

        let plain = start_job(recipe, None);
        let boosted = start_job(recipe, Some(catalyst));

        assert_eq!(plain.energy_left, 1600);
        assert_eq!(boosted.energy_left, 1440);
        assert_eq!(boosted.output_items[0].chance, 1.5);
        assert_eq!(boosted.output_items[1].chance, 0.3);
    }

    #[test]
    fn consume_inputs_clears_spent_slots() {
        let items = test_item_registry();
        let grinder = test_grinder(&items);
        let ore = ItemStack::new(items.by_name("copper_ore"), 1);
        let recipe = grinder.recipe_for(&ore).unwrap().clone();

        let mut inventory = MachineInventory::new(1, 0, 2);
        inventory.input_slots[0] = Some(ore);

        consume_inputs(&mut inventory, &recipe);

        assert!(inventory.input_slots[0].is_none());
    }

    #[test]
    fn grind_cycle_produces_the_certain_output() {
        let items = test_item_registry();
        let grinder = test_grinder(&items);
        let mut rng = StdRng::seed_from_u64(42);

        let mut machine = Machine::default();
        let mut inventory = MachineInventory::new(1, 0, 2);
        inventory.input_slots[0] = Some(ItemStack::new(items.by_name("copper_ore"), 1));
        let mut buffer = EnergyBuffer::full(4000);

        // 1600 energy at 40/tick.
        for _ in 0..40 {
            grind_machine(&mut rng, &grinder, &mut machine, &mut inventory, &mut buffer);
        }

        assert!(machine.job.is_none());
        let dust = items.by_name("copper_dust");
        assert!(inventory
            .output_slots
            .iter()
            .flatten()
            .any(|stack| stack.item == dust));
        assert_eq!(machine.stored_experience, 0.2);
        assert_eq!(buffer.stored, 4000 - 1600);
    }

    #[test]
    fn grind_waits_when_buffer_is_drained() {
        let items = test_item_registry();
        let grinder = test_grinder(&items);
        let mut rng = StdRng::seed_from_u64(7);

        let mut machine = Machine::default();
        let mut inventory = MachineInventory::new(1, 0, 2);
        inventory.input_slots[0] = Some(ItemStack::new(items.by_name("copper_ore"), 1));
        let mut buffer = EnergyBuffer::new(4000);

        for _ in 0..100 {
            grind_machine(&mut rng, &grinder, &mut machine, &mut inventory, &mut buffer);
        }

        // Job started (inputs consumed) but cannot advance without power.
        assert!(machine.job.is_some());
        assert!(inventory.output_slots.iter().all(Option::is_none));

        buffer.receive(4000);
        for _ in 0..40 {
            grind_machine(&mut rng, &grinder, &mut machine, &mut inventory, &mut buffer);
        }
        assert!(machine.job.is_none());
    }

    #[test]
    fn fill_cycle_consumes_bucket_and_water() {
        let items = test_item_registry();
        let fluids = test_fluid_registry();
        let filler = test_filler(&items, &fluids);
        let mut rng = StdRng::seed_from_u64(42);

        let mut machine = Machine::default();
        let mut inventory = MachineInventory::new(1, 1, 1);
        inventory.input_slots[0] = Some(ItemStack::new(items.by_name("bucket"), 1));
        inventory.input_tanks[0] = Some(FluidStack::new(fluids.by_name("water"), BUCKET_VOLUME));
        let mut buffer = EnergyBuffer::full(1000);

        // 400 energy at 40/tick.
        for _ in 0..10 {
            fill_machine(&mut rng, &filler, &mut machine, &mut inventory, &mut buffer);
        }

        assert!(machine.job.is_none());
        assert!(inventory.input_slots[0].is_none());
        assert!(inventory.input_tanks[0].is_none());
        assert_eq!(
            inventory.output_slots[0].as_ref().unwrap().item,
            items.by_name("water_bucket")
        );
    }

    #[test]
    fn catalyst_consumption_rolls_use_chance() {
        let catalyst = Catalyst {
            use_chance: 1.0,
            ..Catalyst::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut slot = Some(ItemStack::new(ItemId(7), 2));

        maybe_consume_catalyst(&mut rng, &catalyst, &mut slot);
        assert_eq!(slot.as_ref().unwrap().count, 1);

        maybe_consume_catalyst(&mut rng, &catalyst, &mut slot);
        assert!(slot.is_none());

        let never = Catalyst::default();
        let mut kept = Some(ItemStack::new(ItemId(7), 2));
        maybe_consume_catalyst(&mut rng, &never, &mut kept);
        assert_eq!(kept.as_ref().unwrap().count, 2);
    }

    #[test]
    fn recharge_moves_energy_from_cell_to_buffer() {
        let mut app = crate::test_helpers::fixtures::test_app();
        app.add_systems(Update, recharge_tick);

        let items = test_item_registry();
        let cell_def = items.get(items.by_name("flux_cell")).energy.unwrap();
        let mut cell = ItemStack::new(items.by_name("flux_cell"), 1);
        crate::item::energy::set_energy_stored(&mut cell, &cell_def, 2500);

        let mut inventory = MachineInventory::new(1, 0, 2);
        inventory.power_slot = Some(cell);
        let entity = app
            .world_mut()
            .spawn((Grinder, Machine::default(), inventory, EnergyBuffer::new(4000)))
            .id();

        // Transfer rate is 1000/tick; the cell holds 2500.
        app.update();
        app.update();
        app.update();

        let buffer = app.world().get::<EnergyBuffer>(entity).unwrap();
        assert_eq!(buffer.stored, 2500);
        let inventory = app.world().get::<MachineInventory>(entity).unwrap();
        let cell = inventory.power_slot.as_ref().unwrap();
        assert_eq!(crate::item::energy::energy_stored(cell, &cell_def), 0);
    }

    #[test]
    fn tick_systems_run_against_app_resources() {
        let mut app = crate::test_helpers::fixtures::test_app();
        app.add_systems(Update, (grinder_tick, filler_tick));

        let items = test_item_registry();
        let mut inventory = MachineInventory::new(1, 0, 2);
        inventory.input_slots[0] = Some(ItemStack::new(items.by_name("copper_ore"), 1));
        let entity = app
            .world_mut()
            .spawn((
                Grinder,
                Machine::default(),
                inventory,
                EnergyBuffer::full(4000),
            ))
            .id();

        for _ in 0..40 {
            app.update();
        }

        let inventory = app.world().get::<MachineInventory>(entity).unwrap();
        let dust = items.by_name("copper_dust");
        assert!(inventory
            .output_slots
            .iter()
            .flatten()
            .any(|stack| stack.item == dust));
    }
}
