//! Per-menu inventory translators.
//!
//! A translator knows one window's slot geometry in both protocols, how the
//! window is opened and closed on the Bedrock side, and whether any action
//! needs handling beyond plain slot moves. Slot mappings fall through to the
//! shared player-inventory layout for everything past the window's own slots.

pub mod chest;
pub mod crafting;
pub mod holder;
pub mod player;
pub mod stonecutter;
pub mod updater;

use std::sync::Arc;

use mc_bridge_java::menu::MenuType;
use mc_bridge_proto::container::{ContainerSlotType, ContainerType};
use mc_bridge_proto::packets::{StackAction, StackRequest, StackSlot};
use mc_bridge_registry::{MappedRegistry, MappedRegistryBuilder, RegistryError};

use crate::click::{self, Transaction};
use crate::error::{OpenError, RequestError};
use crate::inventory::{Inventory, HOTBAR_SLOTS, PLAYER_SLOTS};
use crate::session::BridgeSession;

use self::chest::{DoubleChestTranslator, SingleChestTranslator};
use self::crafting::CraftingTableTranslator;
use self::stonecutter::StonecutterTranslator;
use self::updater::Updater;

/// A Bedrock slot address: region tag plus offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BedrockContainerSlot {
    pub container: ContainerSlotType,
    pub slot: u8,
}

impl BedrockContainerSlot {
    pub fn new(container: ContainerSlotType, slot: u8) -> Self {
        Self { container, slot }
    }
}

pub trait InventoryTranslator: Send + Sync {
    /// Slots the window has before the player's 36.
    fn size(&self) -> usize;

    /// Bedrock window type announced on open.
    fn container_type(&self) -> ContainerType;

    fn updater(&self) -> Updater {
        Updater::Container
    }

    /// Region tag of the window's own slots.
    fn slot_type(&self, _inventory: &Inventory) -> ContainerSlotType {
        ContainerSlotType::LevelEntity
    }

    /// Whether requests may address `region` while this window is open.
    fn accepts_region(&self, region: ContainerSlotType, inventory: &Inventory) -> bool {
        region.is_player_inventory() || region == self.slot_type(inventory)
    }

    /// Slots the server fills and the player can only take from.
    fn is_output(&self, _java_slot: usize) -> bool {
        false
    }

    fn bedrock_slot_to_java(&self, slot: &StackSlot) -> i32 {
        default_bedrock_slot_to_java(self.size(), slot)
    }

    fn java_slot_to_bedrock(&self, slot: usize) -> i32 {
        default_java_slot_to_bedrock(self.size(), slot)
    }

    fn java_slot_to_bedrock_container(
        &self,
        slot: usize,
        inventory: &Inventory,
    ) -> BedrockContainerSlot {
        default_java_slot_to_bedrock_container(self.size(), slot, self.slot_type(inventory))
    }

    /// Regions the window declares to the client, with their capacity.
    fn declared_regions(&self, inventory: &Inventory) -> Vec<(ContainerSlotType, usize)> {
        vec![(self.slot_type(inventory), self.size())]
    }

    /// Claim `action` for [`translate_special_request`](Self::translate_special_request).
    fn should_handle_request_first(&self, _action: &StackAction, _inventory: &Inventory) -> bool {
        false
    }

    fn translate_special_request(
        &self,
        tx: &mut Transaction<'_>,
        request: &StackRequest,
    ) -> Result<(), RequestError> {
        self.translate_request(tx, request)
    }

    /// Plain slot moves, planned as Java clicks.
    fn translate_request(
        &self,
        tx: &mut Transaction<'_>,
        request: &StackRequest,
    ) -> Result<(), RequestError> {
        click::translate_request(tx, request)
    }

    /// Validate the window against the world before it is shown.
    fn prepare_inventory(
        &self,
        _session: &BridgeSession,
        _inventory: &mut Inventory,
    ) -> Result<(), OpenError> {
        Ok(())
    }

    fn open_inventory(&self, _session: &BridgeSession, _inventory: &Inventory) {}

    fn close_inventory(&self, _session: &BridgeSession, _inventory: &Inventory, _force: bool) {}

    fn update_inventory(&self, session: &BridgeSession, inventory: &Inventory) {
        updater::update_inventory(self, session, inventory);
    }

    fn update_slot(&self, session: &BridgeSession, inventory: &Inventory, java_slot: usize) {
        updater::update_slot(self, session, inventory, java_slot);
    }
}

/// Player hotbar and main rows map past the window's own slots; any other
/// region keeps its offset.
pub fn default_bedrock_slot_to_java(size: usize, slot: &StackSlot) -> i32 {
    let size = size as i32;
    let offset = slot.slot as i32;
    if slot.container.is_player_inventory() {
        if offset >= HOTBAR_SLOTS as i32 {
            size + offset - HOTBAR_SLOTS as i32
        } else {
            size + offset + (PLAYER_SLOTS - HOTBAR_SLOTS) as i32
        }
    } else {
        offset
    }
}

pub fn default_java_slot_to_bedrock(size: usize, slot: usize) -> i32 {
    if slot >= size {
        let tmp = slot - size;
        if tmp < PLAYER_SLOTS - HOTBAR_SLOTS {
            (tmp + HOTBAR_SLOTS) as i32
        } else {
            (tmp - (PLAYER_SLOTS - HOTBAR_SLOTS)) as i32
        }
    } else {
        slot as i32
    }
}

pub fn default_java_slot_to_bedrock_container(
    size: usize,
    slot: usize,
    own: ContainerSlotType,
) -> BedrockContainerSlot {
    if slot >= size {
        let tmp = slot - size;
        if tmp < PLAYER_SLOTS - HOTBAR_SLOTS {
            BedrockContainerSlot::new(ContainerSlotType::Inventory, (tmp + HOTBAR_SLOTS) as u8)
        } else {
            BedrockContainerSlot::new(
                ContainerSlotType::Hotbar,
                (tmp - (PLAYER_SLOTS - HOTBAR_SLOTS)) as u8,
            )
        }
    } else {
        BedrockContainerSlot::new(own, slot as u8)
    }
}

/// Translators keyed by the Java menu they handle. A menu with no entry is
/// not opened.
pub type TranslatorRegistry = MappedRegistry<MenuType, Arc<dyn InventoryTranslator>>;

pub fn default_translators() -> Result<TranslatorRegistry, RegistryError> {
    let mut builder: MappedRegistryBuilder<MenuType, Arc<dyn InventoryTranslator>> =
        MappedRegistryBuilder::new("inventory_translators");
    builder.register(MenuType::Generic9x3, Arc::new(SingleChestTranslator::new()))?;
    builder.register(MenuType::Generic9x6, Arc::new(DoubleChestTranslator::new()))?;
    builder.register(MenuType::Stonecutter, Arc::new(StonecutterTranslator::new()))?;
    builder.register(MenuType::Crafting, Arc::new(CraftingTableTranslator::new()))?;
    Ok(builder.freeze())
}
