//! Reading mapping data, either embedded in the binary or from a directory
//! laid out the same way as `data/`:
//!
//! ```text
//! java_items.json
//! items/<version>.json
//! stonecutter/<version>.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::RegistryError;
use crate::mappings::{ItemMapping, JavaItem};

const JAVA_ITEMS: &str = include_str!("../data/java_items.json");

const ITEMS: &[(&str, &str)] = &[
    ("items/712.json", include_str!("../data/items/712.json")),
    ("items/748.json", include_str!("../data/items/748.json")),
    ("items/766.json", include_str!("../data/items/766.json")),
];

const STONECUTTER: &[(&str, &str)] = &[
    (
        "stonecutter/712.json",
        include_str!("../data/stonecutter/712.json"),
    ),
    (
        "stonecutter/748.json",
        include_str!("../data/stonecutter/748.json"),
    ),
];

#[derive(Debug, Deserialize)]
pub struct ItemMappingFile {
    pub version: u32,
    pub items: Vec<ItemMapping>,
}

#[derive(Debug, Deserialize)]
pub struct StonecutterFile {
    pub version: u32,
    pub recipes: HashMap<i32, Vec<i32>>,
}

/// Raw mapping data prior to registry construction.
#[derive(Debug)]
pub struct MappingData {
    pub java_items: Vec<JavaItem>,
    pub items: Vec<ItemMappingFile>,
    pub stonecutter: Vec<StonecutterFile>,
}

fn parse<T: DeserializeOwned>(name: &str, text: &str) -> Result<T, RegistryError> {
    serde_json::from_str(text).map_err(|source| RegistryError::Data {
        name: name.to_string(),
        source,
    })
}

fn read(path: &Path) -> Result<String, RegistryError> {
    fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON files directly inside `dir`, sorted by name.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, RegistryError> {
    let io_err = |source| RegistryError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl MappingData {
    /// Data compiled into the binary.
    pub fn embedded() -> Result<Self, RegistryError> {
        let java_items = parse("java_items.json", JAVA_ITEMS)?;
        let items = ITEMS
            .iter()
            .map(|(name, text)| parse(name, text))
            .collect::<Result<_, _>>()?;
        let stonecutter = STONECUTTER
            .iter()
            .map(|(name, text)| parse(name, text))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            java_items,
            items,
            stonecutter,
        })
    }

    /// Data read from a mappings directory.
    pub fn from_dir(dir: &Path) -> Result<Self, RegistryError> {
        let java_path = dir.join("java_items.json");
        let java_items = parse(&java_path.display().to_string(), &read(&java_path)?)?;

        let mut items = Vec::new();
        for path in json_files(&dir.join("items"))? {
            items.push(parse(&path.display().to_string(), &read(&path)?)?);
        }
        let mut stonecutter = Vec::new();
        for path in json_files(&dir.join("stonecutter"))? {
            stonecutter.push(parse(&path.display().to_string(), &read(&path)?)?);
        }
        Ok(Self {
            java_items,
            items,
            stonecutter,
        })
    }
}
