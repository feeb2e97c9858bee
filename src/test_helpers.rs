pub mod fixtures {
    use std::collections::HashMap;

    use bevy::prelude::*;

    use crate::fluid::{FluidDef, FluidRegistry, FluidStack};
    use crate::item::{EnergyDef, ItemDef, ItemKind, ItemRegistry, ItemStack};
    use crate::machine::{FillerRecipes, GrinderRecipes};
    use crate::recipe::{
        Catalyst, CatalystDef, Ingredient, InventoryView, ItemFluidRecipes, ManagerConfig,
        RecipeDef, RecipeId, RecipeKind, RecipeOutput, RecipeSource, SingleItemRecipes,
    };

    fn item(id: &str, kind: ItemKind) -> ItemDef {
        ItemDef {
            id: id.into(),
            display_name: id.into(),
            max_stack: 99,
            kind,
            bucket_contents: None,
            energy: None,
        }
    }

    pub fn test_item_registry() -> ItemRegistry {
        let mut defs = vec![
            item("bucket", ItemKind::Container),
            item("glass_flask", ItemKind::Container),
            item("brew_flask", ItemKind::Container),
            item("honey_flask", ItemKind::Container),
            item("copper_ore", ItemKind::Block),
            item("copper_dust", ItemKind::Material),
            item("stone_dust", ItemKind::Material),
            item("ember_catalyst", ItemKind::Material),
        ];
        for (bucket, fluid) in [("water_bucket", "water"), ("lava_bucket", "lava")] {
            let mut def = item(bucket, ItemKind::Container);
            def.max_stack = 1;
            def.bucket_contents = Some(fluid.into());
            defs.push(def);
        }
        let mut cell = item("flux_cell", ItemKind::Tool);
        cell.max_stack = 1;
        cell.energy = Some(EnergyDef {
            capacity: 40_000,
            transfer: 1_000,
        });
        defs.push(cell);
        ItemRegistry::from_defs(defs)
    }

    fn fluid(id: &str, still: Option<&str>, bucket: Option<&str>) -> FluidDef {
        FluidDef {
            id: id.into(),
            display_name: id.into(),
            still: still.map(Into::into),
            bucket: bucket.map(Into::into),
        }
    }

    /// Water has two flowing variants (dedup coverage); sludge_flowing
    /// names a still form that is never registered (data-error coverage).
    pub fn test_fluid_registry() -> FluidRegistry {
        FluidRegistry::from_defs(vec![
            fluid("water", None, Some("water_bucket")),
            fluid("water_flowing", Some("water"), None),
            fluid("water_spring", Some("water"), None),
            fluid("lava", None, Some("lava_bucket")),
            fluid("lava_flowing", Some("lava"), None),
            fluid("sludge_flowing", Some("sludge"), None),
            fluid("brew", None, None),
            fluid("honey", None, None),
        ])
    }

    /// Inventory view with explicit slot and tank contents.
    #[derive(Debug, Default)]
    pub struct TestInventory {
        pub slots: Vec<Option<ItemStack>>,
        pub tanks: Vec<Option<FluidStack>>,
    }

    impl TestInventory {
        pub fn with_item(stack: ItemStack) -> Self {
            Self {
                slots: vec![Some(stack)],
                tanks: vec![],
            }
        }

        pub fn with_fluid(stack: FluidStack) -> Self {
            Self {
                slots: vec![],
                tanks: vec![Some(stack)],
            }
        }
    }

    impl InventoryView for TestInventory {
        fn input_slots(&self) -> &[Option<ItemStack>] {
            &self.slots
        }

        fn input_tanks(&self) -> &[Option<FluidStack>] {
            &self.tanks
        }
    }

    /// In-memory recipe source backed by plain lists.
    #[derive(Debug, Default)]
    pub struct ListSource {
        recipes: HashMap<RecipeKind, Vec<RecipeDef>>,
        catalysts: HashMap<RecipeKind, Vec<CatalystDef>>,
    }

    impl ListSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_recipe(&mut self, kind: RecipeKind, def: RecipeDef) {
            self.recipes.entry(kind).or_default().push(def);
        }

        pub fn push_catalyst(&mut self, kind: RecipeKind, def: CatalystDef) {
            self.catalysts.entry(kind).or_default().push(def);
        }

        pub fn with_grinding_recipe(mut self, input: ItemStack, output: RecipeOutput) -> Self {
            self.push_recipe(
                RecipeKind::Grinding,
                RecipeDef {
                    id: RecipeId::new("fluxworks:grinding/test"),
                    energy: 800,
                    experience: 0.1,
                    input_items: vec![Ingredient::of(input)],
                    input_fluids: vec![],
                    output_items: vec![output],
                    output_fluids: vec![],
                },
            );
            self
        }

        pub fn with_filling_recipe(
            mut self,
            input_item: ItemStack,
            input_fluid: FluidStack,
            output: RecipeOutput,
        ) -> Self {
            self.push_recipe(
                RecipeKind::Filling,
                RecipeDef {
                    id: RecipeId::new("fluxworks:filling/test"),
                    energy: 400,
                    experience: 0.0,
                    input_items: vec![Ingredient::of(input_item)],
                    input_fluids: vec![input_fluid],
                    output_items: vec![output],
                    output_fluids: vec![],
                },
            );
            self
        }
    }

    impl RecipeSource for ListSource {
        fn recipes(&self, kind: RecipeKind) -> &[RecipeDef] {
            self.recipes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
        }

        fn catalysts(&self, kind: RecipeKind) -> &[CatalystDef] {
            self.catalysts.get(&kind).map(Vec::as_slice).unwrap_or(&[])
        }
    }

    /// Grinder manager preloaded with copper ore -> dust + bonus stone
    /// dust, and an ember catalyst.
    pub fn test_grinder(items: &ItemRegistry) -> SingleItemRecipes {
        let mut manager =
            SingleItemRecipes::with_catalysts(RecipeKind::Grinding, ManagerConfig::new(2000), 4, 0);
        manager.add_recipe(
            1600,
            0.2,
            vec![ItemStack::new(items.by_name("copper_ore"), 1)],
            vec![],
            vec![
                RecipeOutput::certain(ItemStack::new(items.by_name("copper_dust"), 1)),
                RecipeOutput::new(ItemStack::new(items.by_name("stone_dust"), 1), 0.25),
            ],
            vec![],
        );
        manager.add_catalyst(
            &ItemStack::new(items.by_name("ember_catalyst"), 1),
            Catalyst {
                primary_mod: 1.5,
                secondary_mod: 1.2,
                energy_mod: 0.9,
                min_chance: 0.1,
                use_chance: 0.5,
            },
        );
        manager
    }

    /// Filler manager refreshed with default bucket and brew recipes.
    pub fn test_filler(items: &ItemRegistry, fluids: &FluidRegistry) -> ItemFluidRecipes {
        let mut manager = ItemFluidRecipes::new(RecipeKind::Filling, ManagerConfig::new(400), 1, 0)
            .with_default_recipes(true, true);
        manager.refresh(&ListSource::new(), items, fluids);
        manager
    }

    /// Minimal app carrying registries and refreshed managers, for system
    /// tests.
    pub fn test_app() -> App {
        let items = test_item_registry();
        let fluids = test_fluid_registry();
        let grinder = GrinderRecipes(test_grinder(&items));
        let filler = FillerRecipes(test_filler(&items, &fluids));

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(items);
        app.insert_resource(fluids);
        app.insert_resource(grinder);
        app.insert_resource(filler);
        app
    }
}
