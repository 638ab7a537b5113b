mod config;

use std::path::Path;

use config::BridgeConfig;
use mc_bridge_inventory::translator::default_translators;
use mc_bridge_inventory::InventoryTranslator;
use mc_bridge_registry::loader::MappingData;
use mc_bridge_registry::mappings::{custom_items_from_list, CustomItem};
use mc_bridge_registry::{registries, Registries, RegistryError, VersionedRegistry};
use tracing::{error, info, warn};

fn load_registries(config: &BridgeConfig) -> Result<Registries, RegistryError> {
    let data = match &config.mappings.directory {
        Some(dir) => {
            info!("Loading mappings from {dir}");
            MappingData::from_dir(Path::new(dir))?
        }
        None => MappingData::embedded()?,
    };
    Registries::build(data, config.mappings.default_version)
}

fn load_custom_items(path: &str) -> Result<Vec<CustomItem>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn register_custom_items(registries: &Registries, path: &str) {
    let items = match load_custom_items(path) {
        Ok(items) => items,
        Err(e) => {
            warn!("Failed to read custom items from {path}: {e}");
            return;
        }
    };
    let count = items.len();
    match custom_items_from_list(items).and_then(|items| registries.custom_items.populate(items)) {
        Ok(()) => info!("Registered {count} custom items"),
        Err(e) => warn!("Ignoring custom items from {path}: {e}"),
    }
}

fn report_versions<T>(registry: &VersionedRegistry<T>) {
    info!(
        "{}: versions {:?}, fallback {:?}",
        registry.name(),
        registry.versions(),
        registry.fallback()
    );
}

fn main() {
    let config = match BridgeConfig::load("bridge.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load bridge.toml: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("MC-Bridge v{} starting", env!("CARGO_PKG_VERSION"));

    let loaded = match load_registries(&config) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to load mappings: {e}");
            std::process::exit(1);
        }
    };
    if let Some(path) = &config.mappings.custom_items {
        register_custom_items(&loaded, path);
    }

    let registries = match registries::init(loaded) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to install registries: {e}");
            std::process::exit(1);
        }
    };
    info!("Default Bedrock version: {}", registries.default_version.get());
    info!("Java items: {}", registries.java_items.len());
    report_versions(&registries.item_mappings);
    report_versions(&registries.stonecutter_recipes);

    let translators = match default_translators() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to register inventory translators: {e}");
            std::process::exit(1);
        }
    };
    for (menu, translator) in translators.iter() {
        info!(
            "Menu {:?}: {:?} window, {} slots",
            menu,
            translator.container_type(),
            translator.size()
        );
    }
    info!(
        "Stack requests: reject_unknown_actions = {}",
        config.inventory.reject_unknown_actions
    );
}
