use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum ItemKind {
    #[default]
    Material,
    Block,
    Container,
    Tool,
}

/// Energy-storage parameters for items that carry a charge.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EnergyDef {
    /// Maximum energy the item can hold.
    pub capacity: u32,
    /// Maximum energy moved per receive/extract operation.
    pub transfer: u32,
}

fn default_max_stack() -> u32 {
    99
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub display_name: String,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    #[serde(default)]
    pub kind: ItemKind,
    /// Fluid this item is a filled container for, if any.
    #[serde(default)]
    pub bucket_contents: Option<String>,
    #[serde(default)]
    pub energy: Option<EnergyDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_def_has_required_fields() {
        let item = ItemDef {
            id: "copper_ore".into(),
            display_name: "Copper Ore".into(),
            max_stack: 64,
            kind: ItemKind::Block,
            bucket_contents: None,
            energy: None,
        };

        assert_eq!(item.id, "copper_ore");
        assert_eq!(item.max_stack, 64);
        assert!(item.bucket_contents.is_none());
    }

    #[test]
    fn energy_def_bounds_are_independent() {
        let energy = EnergyDef {
            capacity: 40_000,
            transfer: 1_000,
        };

        assert!(energy.transfer <= energy.capacity);
    }
}
