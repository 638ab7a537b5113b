//! Java block states and the read-only world view container translators
//! validate against.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use mc_bridge_proto::types::BlockPos;

pub const CHEST: &str = "minecraft:chest";
pub const TRAPPED_CHEST: &str = "minecraft:trapped_chest";
pub const ENDER_CHEST: &str = "minecraft:ender_chest";
pub const BARREL: &str = "minecraft:barrel";
pub const STONECUTTER: &str = "minecraft:stonecutter";
pub const CRAFTING_TABLE: &str = "minecraft:crafting_table";

/// Property name of the chest variant (`single`, `left`, `right`).
pub const CHEST_TYPE: &str = "type";

/// A block name plus its state properties, e.g. `minecraft:chest[type=left]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    pub name: String,
    pub properties: Vec<(String, String)>,
}

impl BlockState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Builder-style property setter; replaces an existing value.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        match self.properties.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.properties.push((key.to_string(), value.to_string())),
        }
        self
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Chest variant, if this state carries one.
    pub fn chest_type(&self) -> Option<ChestType> {
        self.property(CHEST_TYPE).and_then(ChestType::parse)
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.properties.is_empty() {
            let props: Vec<String> = self
                .properties
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            write!(f, "[{}]", props.join(","))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChestType {
    Single,
    Left,
    Right,
}

impl ChestType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(ChestType::Single),
            "left" => Some(ChestType::Left),
            "right" => Some(ChestType::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChestType::Single => "single",
            ChestType::Left => "left",
            ChestType::Right => "right",
        }
    }
}

/// Read-only access to the block states the session has been told about.
pub trait WorldView {
    fn block_state_at(&self, pos: BlockPos) -> Option<BlockState>;
}

/// A plain position → state map, filled by the chunk translator.
#[derive(Debug, Default, Clone)]
pub struct BlockStateMap {
    states: HashMap<BlockPos, BlockState>,
}

impl BlockStateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, pos: BlockPos, state: BlockState) {
        self.states.insert(pos, state);
    }

    pub fn remove(&mut self, pos: BlockPos) {
        self.states.remove(&pos);
    }
}

impl WorldView for BlockStateMap {
    fn block_state_at(&self, pos: BlockPos) -> Option<BlockState> {
        self.states.get(&pos).cloned()
    }
}
