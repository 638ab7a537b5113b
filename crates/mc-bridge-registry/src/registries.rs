//! The process-wide registry bundle.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::deferred::DeferredRegistry;
use crate::error::RegistryError;
use crate::list::{ListRegistry, ListRegistryBuilder};
use crate::loader::MappingData;
use crate::mapped::{MappedRegistry, MappedRegistryBuilder};
use crate::mappings::{
    stonecutter_recipes_from_map, CustomItems, ItemMappings, JavaItem, StonecutterRecipes,
};
use crate::simple::SimpleRegistry;
use crate::versioned::{VersionFallback, VersionedRegistry, VersionedRegistryBuilder};

/// Every registry the translation layer reads, frozen.
#[derive(Debug)]
pub struct Registries {
    /// Primary Bedrock version: the configured one, else the newest with
    /// item mappings. Reported at boot.
    pub default_version: SimpleRegistry<u32>,
    /// Java items indexed by numeric id.
    pub java_items: ListRegistry<JavaItem>,
    /// Java item identifier to numeric id.
    pub java_item_ids: MappedRegistry<String, i32>,
    pub item_mappings: VersionedRegistry<ItemMappings>,
    pub stonecutter_recipes: VersionedRegistry<StonecutterRecipes>,
    /// Items registered by extensions after core data loads.
    pub custom_items: DeferredRegistry<CustomItems>,
}

impl Registries {
    /// Build from the mapping data compiled into the binary.
    pub fn load_embedded() -> Result<Self, RegistryError> {
        Self::build(MappingData::embedded()?, None)
    }

    /// Build from a mappings directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, RegistryError> {
        Self::build(MappingData::from_dir(dir)?, None)
    }

    /// Build from raw data. `default_version` overrides the newest item
    /// mapping version as the default.
    pub fn build(data: MappingData, default_version: Option<u32>) -> Result<Self, RegistryError> {
        let mut java_items = ListRegistryBuilder::new("java_items");
        let mut java_item_ids = MappedRegistryBuilder::new("java_item_ids");
        for (id, item) in data.java_items.into_iter().enumerate() {
            java_item_ids.register(item.identifier.clone(), id as i32)?;
            java_items.register(id, item)?;
        }

        let mut item_mappings =
            VersionedRegistryBuilder::new("item_mappings", VersionFallback::Nearest);
        for file in data.items {
            item_mappings.register(file.version, ItemMappings::from_rows(file.items))?;
        }
        let item_mappings = item_mappings.freeze()?;

        let mut stonecutter_recipes =
            VersionedRegistryBuilder::new("stonecutter_recipes", VersionFallback::FloorOrLowest);
        for file in data.stonecutter {
            stonecutter_recipes.register(file.version, stonecutter_recipes_from_map(file.recipes)?)?;
        }
        let stonecutter_recipes = stonecutter_recipes.freeze()?;

        let default_version = match default_version {
            Some(v) => v,
            // freeze() guarantees at least one version.
            None => item_mappings.versions().last().copied().unwrap_or_default(),
        };

        Ok(Self {
            default_version: SimpleRegistry::new(default_version),
            java_items: java_items.freeze(),
            java_item_ids: java_item_ids.freeze(),
            item_mappings,
            stonecutter_recipes,
            custom_items: DeferredRegistry::new("custom_items"),
        })
    }

    pub fn java_item(&self, id: i32) -> Option<&JavaItem> {
        self.java_items.get(id)
    }

    pub fn java_item_id(&self, identifier: &str) -> Option<i32> {
        self.java_item_ids.get(identifier).copied()
    }

    /// Max stack size for a Java item; unknown items stack to 64.
    pub fn max_stack_size(&self, java_id: i32) -> u8 {
        self.java_item(java_id).map_or(64, |item| item.max_stack_size)
    }

    /// Close every deferred registry; nothing can be added afterwards.
    pub fn seal(&self) {
        self.custom_items.seal();
    }
}

static REGISTRIES: OnceLock<Arc<Registries>> = OnceLock::new();

/// Seal and install the process-wide registries. May only be called once.
pub fn init(registries: Registries) -> Result<Arc<Registries>, RegistryError> {
    registries.seal();
    let registries = Arc::new(registries);
    REGISTRIES
        .set(Arc::clone(&registries))
        .map_err(|_| RegistryError::AlreadyInitialized)?;
    Ok(registries)
}

/// The process-wide registries, if [`init`] has run.
pub fn get() -> Option<Arc<Registries>> {
    REGISTRIES.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappings::{custom_items_from_list, CustomItem, CustomItems};

    #[test]
    fn embedded_registries() {
        let r = Registries::load_embedded().unwrap();
        assert_eq!(*r.default_version.get(), 766);
        assert_eq!(r.java_item_id("minecraft:stonecutter"), Some(31));
        assert_eq!(r.java_item(1).unwrap().identifier, "minecraft:stone");
        assert_eq!(r.max_stack_size(34), 1);
        assert_eq!(r.max_stack_size(9999), 64);
        assert_eq!(r.item_mappings.versions(), &[712, 748, 766]);
    }

    #[test]
    fn stonecutter_recipes_fall_back_to_older_data() {
        let r = Registries::load_embedded().unwrap();
        assert_eq!(r.stonecutter_recipes.resolve_version(766), Some(748));
        let tuff = r.java_item_id("minecraft:tuff").unwrap();
        assert!(r.stonecutter_recipes.get(766).unwrap().contains(&tuff));
        assert!(!r.stonecutter_recipes.get(712).unwrap().contains(&tuff));
    }

    #[test]
    fn stone_candidates_ordered_by_java_id() {
        let r = Registries::load_embedded().unwrap();
        let stone = r.java_item_id("minecraft:stone").unwrap();
        let recipes = r.stonecutter_recipes.get(748).unwrap();
        let outputs = recipes.get(&stone).unwrap().outputs();
        assert!(outputs.windows(2).all(|w| w[0] < w[1]));
        let slab = r.java_item_id("minecraft:stone_slab").unwrap();
        assert!(outputs.contains(&slab));
    }

    #[test]
    fn item_mappings_shift_between_versions() {
        let r = Registries::load_embedded().unwrap();
        let stick = r.java_item_id("minecraft:stick").unwrap();
        let old = r.item_mappings.get(748).unwrap().by_java(stick).unwrap().bedrock_id;
        let new = r.item_mappings.get(766).unwrap().by_java(stick).unwrap().bedrock_id;
        assert_ne!(old, new);
        assert_eq!(
            r.item_mappings.get(766).unwrap().by_bedrock(new).unwrap().java_id,
            stick
        );
    }

    #[test]
    fn custom_items_populate_after_build() {
        let r = Registries::load_embedded().unwrap();
        assert!(!r.custom_items.is_populated());
        let items = custom_items_from_list(vec![CustomItem {
            bedrock_identifier: "bridge:ruby".into(),
            bedrock_id: 3000,
            java_id: 33,
            display_name: Some("Ruby".into()),
        }])
        .unwrap();
        r.custom_items.populate(items).unwrap();
        assert_eq!(r.custom_items.get().unwrap().get(&3000).unwrap().java_id, 33);
    }

    fn ruby() -> CustomItems {
        custom_items_from_list(vec![CustomItem {
            bedrock_identifier: "bridge:ruby".into(),
            bedrock_id: 3000,
            java_id: 33,
            display_name: None,
        }])
        .unwrap()
    }

    // The only test that installs the process-wide handle.
    #[test]
    fn init_seals_deferred_registries() {
        let installed = init(Registries::load_embedded().unwrap()).unwrap();
        assert!(installed.custom_items.is_sealed());

        let err = installed.custom_items.populate(ruby()).unwrap_err();
        assert!(matches!(err, RegistryError::Sealed { .. }));
        assert!(installed.custom_items.get().is_none());
        assert!(get().unwrap().custom_items.get().is_none());

        assert!(matches!(
            init(Registries::load_embedded().unwrap()),
            Err(RegistryError::AlreadyInitialized)
        ));
    }

    #[test]
    fn populated_before_seal_survives() {
        let r = Registries::load_embedded().unwrap();
        r.custom_items.populate(ruby()).unwrap();
        r.seal();
        assert!(r.custom_items.populate(ruby()).is_err());
        assert_eq!(r.custom_items.get().unwrap().get(&3000).unwrap().java_id, 33);
    }

    #[test]
    fn default_version_override() {
        let r = Registries::build(MappingData::embedded().unwrap(), Some(748)).unwrap();
        assert_eq!(*r.default_version.get(), 748);
    }

    #[test]
    fn duplicate_java_identifier_rejected() {
        let mut data = MappingData::embedded().unwrap();
        let dup = data.java_items[1].clone();
        data.java_items.push(dup);
        assert!(matches!(
            Registries::build(data, None),
            Err(RegistryError::DuplicateKey { .. })
        ));
    }
}
