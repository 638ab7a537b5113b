//! Mapping tables between Bedrock and Java identities.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use crate::error::RegistryError;
use crate::mapped::{MappedRegistry, MappedRegistryBuilder};

/// A Java item definition, indexed by its numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JavaItem {
    pub identifier: String,
    #[serde(default = "default_max_stack_size")]
    pub max_stack_size: u8,
}

fn default_max_stack_size() -> u8 {
    64
}

/// One row pairing a Bedrock item with its Java counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemMapping {
    pub bedrock_id: i32,
    pub bedrock_identifier: String,
    #[serde(default)]
    pub bedrock_data: u16,
    pub java_id: i32,
}

/// Item mappings for one Bedrock protocol version.
#[derive(Debug, Clone)]
pub struct ItemMappings {
    by_bedrock: MappedRegistry<i32, ItemMapping>,
    by_java: MappedRegistry<i32, ItemMapping>,
}

impl ItemMappings {
    /// Build both directions from raw rows. Rows whose Bedrock or Java id was
    /// already claimed are skipped for that direction.
    pub fn from_rows(rows: Vec<ItemMapping>) -> Self {
        let mut by_bedrock = MappedRegistryBuilder::new("item_mappings.bedrock");
        let mut by_java = MappedRegistryBuilder::new("item_mappings.java");
        for row in rows {
            // Several Bedrock ids may share a Java item; the first row wins.
            if !by_java.contains(&row.java_id) {
                if let Err(e) = by_java.register(row.java_id, row.clone()) {
                    warn!("skipping item mapping row: {e}");
                }
            }
            let bedrock_id = row.bedrock_id;
            if let Err(e) = by_bedrock.register(bedrock_id, row) {
                warn!("skipping item mapping row: {e}");
            }
        }
        Self {
            by_bedrock: by_bedrock.freeze(),
            by_java: by_java.freeze(),
        }
    }

    pub fn by_bedrock(&self, runtime_id: i32) -> Option<&ItemMapping> {
        self.by_bedrock.get(&runtime_id)
    }

    pub fn by_java(&self, java_id: i32) -> Option<&ItemMapping> {
        self.by_java.get(&java_id)
    }

    pub fn len(&self) -> usize {
        self.by_bedrock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_bedrock.is_empty()
    }
}

/// The output candidates a stonecutter offers for one input item, sorted
/// ascending by Java item id. The sort order is the button order the Java
/// server expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StonecutterCandidates {
    outputs: Vec<i32>,
}

impl StonecutterCandidates {
    pub fn new(mut outputs: Vec<i32>) -> Self {
        outputs.sort_unstable();
        outputs.dedup();
        Self { outputs }
    }

    pub fn outputs(&self) -> &[i32] {
        &self.outputs
    }

    /// Position of `output` in the ordered candidate list.
    pub fn position(&self, output: i32) -> Option<usize> {
        self.outputs.binary_search(&output).ok()
    }
}

/// Stonecutter recipes for one version, keyed by Java input item id.
pub type StonecutterRecipes = MappedRegistry<i32, StonecutterCandidates>;

pub fn stonecutter_recipes_from_map(
    recipes: HashMap<i32, Vec<i32>>,
) -> Result<StonecutterRecipes, RegistryError> {
    let mut builder = MappedRegistryBuilder::new("stonecutter_recipes");
    for (input, outputs) in recipes {
        if outputs.is_empty() {
            continue;
        }
        builder.register(input, StonecutterCandidates::new(outputs))?;
    }
    Ok(builder.freeze())
}

/// An item supplied by an extension rather than the core mapping data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomItem {
    pub bedrock_identifier: String,
    pub bedrock_id: i32,
    /// Vanilla Java item the custom item is carried as.
    pub java_id: i32,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Custom items keyed by Bedrock runtime id.
pub type CustomItems = MappedRegistry<i32, CustomItem>;

pub fn custom_items_from_list(items: Vec<CustomItem>) -> Result<CustomItems, RegistryError> {
    let mut builder = MappedRegistryBuilder::new("custom_items");
    for item in items {
        builder.register(item.bedrock_id, item)?;
    }
    Ok(builder.freeze())
}
