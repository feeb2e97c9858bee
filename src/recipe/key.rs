//! Canonicalized lookup keys for recipe tables.
//!
//! Keys copy identity out of stacks; count and volume never participate,
//! so a stack of 1 and a stack of 64 of the same item key identically.

use crate::fluid::{FluidId, FluidStack};
use crate::item::{ItemId, ItemStack, StackData};

/// Item identity key: item type plus data payload, count-independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub item: ItemId,
    pub data: Option<StackData>,
}

impl ItemKey {
    pub fn of(stack: &ItemStack) -> Self {
        Self {
            item: stack.item,
            data: stack.data.clone(),
        }
    }

    /// Reconstruct a unit stack carrying this key's identity.
    pub fn to_stack(&self) -> ItemStack {
        ItemStack {
            item: self.item,
            count: 1,
            data: self.data.clone(),
        }
    }
}

/// Composite key for tables matching on items, fluids, or both.
///
/// Three distinct variants, not one optional-field key: a recipe keyed on
/// a fluid alone stays retrievable when no item is present, and vice
/// versa. The fluid component is the fluid id only — fluid data payloads
/// never affect matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DualKey {
    Item(ItemKey),
    Fluid(FluidId),
    ItemFluid(ItemKey, FluidId),
}

impl DualKey {
    /// Key for whatever inputs are present. None when both are absent.
    pub fn for_inputs(item: Option<&ItemStack>, fluid: Option<&FluidStack>) -> Option<Self> {
        match (item, fluid) {
            (None, None) => None,
            (Some(i), None) => Some(Self::Item(ItemKey::of(i))),
            (None, Some(f)) => Some(Self::Fluid(f.fluid)),
            (Some(i), Some(f)) => Some(Self::ItemFluid(ItemKey::of(i), f.fluid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_key_ignores_count() {
        let one = ItemStack::new(ItemId(4), 1);
        let many = ItemStack::new(ItemId(4), 64);

        assert_eq!(ItemKey::of(&one), ItemKey::of(&many));
    }

    #[test]
    fn item_key_distinguishes_types_and_data() {
        let a = ItemStack::new(ItemId(4), 1);
        let b = ItemStack::new(ItemId(5), 1);
        assert_ne!(ItemKey::of(&a), ItemKey::of(&b));

        let mut charged = ItemStack::new(ItemId(4), 1);
        charged.set_data_value("charge", 100);
        assert_ne!(ItemKey::of(&a), ItemKey::of(&charged));
    }

    #[test]
    fn dual_key_ignores_fluid_data() {
        let plain = FluidStack::new(FluidId(2), 500);
        let mut data = StackData::new();
        data.set("strength", 2);
        let tagged = FluidStack::with_data(FluidId(2), 250, data);

        assert_eq!(
            DualKey::for_inputs(None, Some(&plain)),
            DualKey::for_inputs(None, Some(&tagged))
        );
    }

    #[test]
    fn dual_key_variants_are_distinct() {
        let item = ItemStack::new(ItemId(1), 1);
        let fluid = FluidStack::new(FluidId(1), 100);

        let item_only = DualKey::for_inputs(Some(&item), None).unwrap();
        let fluid_only = DualKey::for_inputs(None, Some(&fluid)).unwrap();
        let both = DualKey::for_inputs(Some(&item), Some(&fluid)).unwrap();

        assert_ne!(item_only, fluid_only);
        assert_ne!(item_only, both);
        assert_ne!(fluid_only, both);
        assert_eq!(DualKey::for_inputs(None, None), None);
    }
}
