//! Mirrored item stacks and their translation to either protocol.

use mc_bridge_java::item_stack::JavaItemStack;
use mc_bridge_proto::item_stack::ItemStack;
use mc_bridge_registry::Registries;
use tracing::debug;

/// One slot's contents as the bridge understands it: a Java item plus the
/// stack network id the Bedrock client knows it by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MirroredItemStack {
    pub java_id: i32,
    pub count: u8,
    /// Java NBT payload, kept verbatim for the server.
    pub nbt: Vec<u8>,
    /// Bedrock stack network id; 0 only on the empty stack.
    pub net_id: i32,
}

impl MirroredItemStack {
    pub const EMPTY: MirroredItemStack = MirroredItemStack {
        java_id: 0,
        count: 0,
        nbt: Vec::new(),
        net_id: 0,
    };

    pub fn new(java_id: i32, count: u8, net_id: i32) -> Self {
        if java_id == 0 || count == 0 {
            return Self::EMPTY;
        }
        Self {
            java_id,
            count,
            nbt: Vec::new(),
            net_id,
        }
    }

    /// Take an authoritative Java value, giving it `net_id` if non-empty.
    pub fn from_java(item: &JavaItemStack, net_id: i32) -> Self {
        if item.is_empty() {
            return Self::EMPTY;
        }
        Self {
            java_id: item.id,
            count: item.count.clamp(1, u8::MAX as i32) as u8,
            nbt: item.nbt.clone(),
            net_id,
        }
    }

    pub fn to_java(&self) -> JavaItemStack {
        if self.is_empty() {
            return JavaItemStack::empty();
        }
        JavaItemStack {
            id: self.java_id,
            count: self.count as i32,
            nbt: self.nbt.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.java_id == 0 || self.count == 0
    }

    /// Same item and data, ignoring count and network id.
    pub fn stacks_with(&self, other: &MirroredItemStack) -> bool {
        !self.is_empty() && self.java_id == other.java_id && self.nbt == other.nbt
    }

    /// The same item with a different count; a zero count yields empty.
    pub fn with_count(&self, count: u8) -> Self {
        if count == 0 {
            return Self::EMPTY;
        }
        Self {
            count,
            ..self.clone()
        }
    }
}

/// Converts between Bedrock runtime ids and Java ids for one protocol version.
#[derive(Debug, Clone, Copy)]
pub struct ItemTranslator<'a> {
    registries: &'a Registries,
    version: u32,
}

impl<'a> ItemTranslator<'a> {
    pub fn new(registries: &'a Registries, version: u32) -> Self {
        Self {
            registries,
            version,
        }
    }

    /// Java id of a Bedrock item. Extension items are consulted when the
    /// version mappings have no entry.
    pub fn java_id(&self, item: &ItemStack) -> Option<i32> {
        if item.is_empty() {
            return Some(0);
        }
        self.registries
            .item_mappings
            .get(self.version)
            .and_then(|m| m.by_bedrock(item.runtime_id))
            .map(|m| m.java_id)
            .or_else(|| {
                self.registries
                    .custom_items
                    .get()
                    .and_then(|custom| custom.get(&item.runtime_id))
                    .map(|c| c.java_id)
            })
    }

    pub fn to_bedrock(&self, item: &MirroredItemStack) -> ItemStack {
        if item.is_empty() {
            return ItemStack::empty();
        }
        let mapping = self
            .registries
            .item_mappings
            .get(self.version)
            .and_then(|m| m.by_java(item.java_id));
        match mapping {
            Some(mapping) => ItemStack {
                runtime_id: mapping.bedrock_id,
                count: item.count as u16,
                metadata: mapping.bedrock_data,
                stack_network_id: item.net_id,
                ..ItemStack::default()
            },
            None => {
                debug!(
                    "java item {} has no bedrock mapping for version {}",
                    item.java_id, self.version
                );
                ItemStack::empty()
            }
        }
    }
}
