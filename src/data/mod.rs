pub mod assets;
pub mod hot_reload;
pub mod loader;
pub mod source;

use bevy::prelude::*;

use assets::{FluidSetAsset, ItemSetAsset, MachinesConfigAsset, RecipeFileAsset};
use loader::RonLoader;
use source::AssetRecipeSource;

use crate::fluid::FluidRegistry;
use crate::item::ItemRegistry;
use crate::machine::{FillerRecipes, GrinderRecipes};
use crate::recipe::{ItemFluidRecipes, ManagerConfig, RecipeKind, SingleItemRecipes};

/// Application state: Loading waits for data assets, InGame runs gameplay.
#[derive(States, Default, Debug, Clone, Eq, PartialEq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    InGame,
}

/// Handles for data assets. Kept alive for hot-reload detection.
#[derive(Resource)]
pub(crate) struct DataHandles {
    pub(crate) items: Handle<ItemSetAsset>,
    pub(crate) fluids: Handle<FluidSetAsset>,
    pub(crate) machines: Handle<MachinesConfigAsset>,
    pub(crate) recipe_files: Vec<Handle<RecipeFileAsset>>,
}

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_asset::<ItemSetAsset>()
            .init_asset::<FluidSetAsset>()
            .init_asset::<MachinesConfigAsset>()
            .init_asset::<RecipeFileAsset>()
            .register_asset_loader(RonLoader::<ItemSetAsset>::new(&["items.ron"]))
            .register_asset_loader(RonLoader::<FluidSetAsset>::new(&["fluids.ron"]))
            .register_asset_loader(RonLoader::<MachinesConfigAsset>::new(&["machines.ron"]))
            .register_asset_loader(RonLoader::<RecipeFileAsset>::new(&["recipes.ron"]))
            .add_systems(Startup, start_loading)
            .add_systems(Update, check_loading.run_if(in_state(AppState::Loading)))
            .add_systems(
                Update,
                hot_reload::hot_reload_data.run_if(in_state(AppState::InGame)),
            );
    }
}

fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    let items = asset_server.load::<ItemSetAsset>("data/fluxworks.items.ron");
    let fluids = asset_server.load::<FluidSetAsset>("data/fluxworks.fluids.ron");
    let machines = asset_server.load::<MachinesConfigAsset>("data/fluxworks.machines.ron");
    let recipe_files = vec![
        asset_server.load::<RecipeFileAsset>("data/grinding.recipes.ron"),
        asset_server.load::<RecipeFileAsset>("data/filling.recipes.ron"),
    ];
    commands.insert_resource(DataHandles {
        items,
        fluids,
        machines,
        recipe_files,
    });
}

fn check_loading(
    mut commands: Commands,
    handles: Res<DataHandles>,
    item_assets: Res<Assets<ItemSetAsset>>,
    fluid_assets: Res<Assets<FluidSetAsset>>,
    machine_assets: Res<Assets<MachinesConfigAsset>>,
    recipe_assets: Res<Assets<RecipeFileAsset>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(content) = rebuild_content(
        &handles,
        &item_assets,
        &fluid_assets,
        &machine_assets,
        &recipe_assets,
    ) else {
        return; // not loaded yet
    };

    info!(
        "Data assets loaded: {} items, {} fluids, {} declared recipes; entering InGame state",
        content.items.len(),
        content.fluids.len(),
        content.source.recipe_count()
    );
    insert_content(&mut commands, content);
    next_state.set(AppState::InGame);
}

/// Registries, resolved declarations, and refreshed managers built from
/// one consistent snapshot of the data assets.
pub(crate) struct LoadedContent {
    pub(crate) items: ItemRegistry,
    pub(crate) fluids: FluidRegistry,
    pub(crate) source: AssetRecipeSource,
    pub(crate) grinder: GrinderRecipes,
    pub(crate) filler: FillerRecipes,
}

/// Rebuild everything downstream of the data assets. None while any asset
/// is still loading.
pub(crate) fn rebuild_content(
    handles: &DataHandles,
    item_assets: &Assets<ItemSetAsset>,
    fluid_assets: &Assets<FluidSetAsset>,
    machine_assets: &Assets<MachinesConfigAsset>,
    recipe_assets: &Assets<RecipeFileAsset>,
) -> Option<LoadedContent> {
    let item_set = item_assets.get(&handles.items)?;
    let fluid_set = fluid_assets.get(&handles.fluids)?;
    let config = machine_assets.get(&handles.machines)?;
    let mut files = Vec::with_capacity(handles.recipe_files.len());
    for handle in &handles.recipe_files {
        files.push(recipe_assets.get(handle)?);
    }

    let items = ItemRegistry::from_defs(item_set.items.clone());
    let fluids = FluidRegistry::from_defs(fluid_set.fluids.clone());
    validate_bucket_links(&items, &fluids);

    let mut source = AssetRecipeSource::new();
    for file in files {
        let default_energy = match file.kind {
            RecipeKind::Grinding => config.grinder.default_energy,
            RecipeKind::Filling => config.filler.default_energy,
        };
        source.ingest(file, &items, &fluids, default_energy);
    }

    let grinder_cfg = &config.grinder;
    let mut grinder = SingleItemRecipes::with_catalysts(
        RecipeKind::Grinding,
        ManagerConfig::with_scale(grinder_cfg.default_energy, grinder_cfg.scale),
        grinder_cfg.max_output_items,
        grinder_cfg.max_output_fluids,
    );
    grinder.refresh(&source);

    let filler_cfg = &config.filler;
    let mut filler = ItemFluidRecipes::new(
        RecipeKind::Filling,
        ManagerConfig::with_scale(filler_cfg.default_energy, filler_cfg.scale),
        filler_cfg.max_output_items,
        filler_cfg.max_output_fluids,
    )
    .with_default_recipes(
        filler_cfg.default_bucket_recipes,
        filler_cfg.default_brew_recipes,
    );
    filler.refresh(&source, &items, &fluids);

    Some(LoadedContent {
        items,
        fluids,
        source,
        grinder: GrinderRecipes(grinder),
        filler: FillerRecipes(filler),
    })
}

pub(crate) fn insert_content(commands: &mut Commands, content: LoadedContent) {
    commands.insert_resource(content.items);
    commands.insert_resource(content.fluids);
    commands.insert_resource(content.source);
    commands.insert_resource(content.grinder);
    commands.insert_resource(content.filler);
}

/// Cross-check item bucket_contents declarations against the fluid set.
fn validate_bucket_links(items: &ItemRegistry, fluids: &FluidRegistry) {
    for (_, def) in items.iter() {
        if let Some(fluid_name) = &def.bucket_contents
            && fluids.find(fluid_name).is_none()
        {
            warn!(
                "Item `{}` claims to contain unknown fluid `{fluid_name}`",
                def.id
            );
        }
    }
}
