use std::collections::HashMap;

use super::key::ItemKey;
use super::record::Ingredient;
use crate::item::ItemStack;

/// Yield/cost modifiers contributed by an auxiliary catalyst item.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalyst {
    /// Multiplier on the first output's chance.
    pub primary_mod: f32,
    /// Multiplier on every other output's chance.
    pub secondary_mod: f32,
    /// Multiplier on the recipe's energy cost.
    pub energy_mod: f32,
    /// Floor applied to output chances after modification.
    pub min_chance: f32,
    /// Probability the catalyst item is consumed per use.
    pub use_chance: f32,
}

impl Default for Catalyst {
    fn default() -> Self {
        Self {
            primary_mod: 1.0,
            secondary_mod: 1.0,
            energy_mod: 1.0,
            min_chance: 0.0,
            use_chance: 0.0,
        }
    }
}

impl Catalyst {
    /// Output chance with this catalyst applied. `primary` selects which
    /// multiplier governs the output.
    pub fn adjusted_chance(&self, base: f32, primary: bool) -> f32 {
        let modifier = if primary {
            self.primary_mod
        } else {
            self.secondary_mod
        };
        (base * modifier).max(self.min_chance)
    }

    pub fn adjusted_energy(&self, energy: u32) -> u32 {
        (energy as f32 * self.energy_mod).round() as u32
    }
}

/// A declared catalyst in host/data-driven shape, before table expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalystDef {
    pub ingredient: Ingredient,
    pub primary_mod: f32,
    pub secondary_mod: f32,
    pub energy_mod: f32,
    pub min_chance: f32,
    pub use_chance: f32,
}

/// Catalyst lookup table, keyed like the recipe table it accompanies.
///
/// Attached to a manager by composition when the machine supports
/// catalysts; managers without the capability simply never carry one.
#[derive(Debug, Default)]
pub struct CatalystTable {
    map: HashMap<ItemKey, Catalyst>,
}

impl CatalystTable {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Last write wins on duplicate keys.
    pub fn insert(&mut self, input: &ItemStack, catalyst: Catalyst) {
        self.map.insert(ItemKey::of(input), catalyst);
    }

    pub fn get(&self, input: &ItemStack) -> Option<&Catalyst> {
        self.map.get(&ItemKey::of(input))
    }

    pub fn remove(&mut self, input: &ItemStack) -> Option<Catalyst> {
        self.map.remove(&ItemKey::of(input))
    }

    pub fn contains(&self, input: &ItemStack) -> bool {
        self.map.contains_key(&ItemKey::of(input))
    }

    /// Unit stacks for every registered catalyst identity.
    pub fn items(&self) -> Vec<ItemStack> {
        self.map.keys().map(ItemKey::to_stack).collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &Catalyst> {
        self.map.values()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
