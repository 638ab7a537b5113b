//! Chest-like containers: single chests, ender chests, barrels and double
//! chests.

use mc_bridge_java::block::{self, BlockState, ChestType};
use mc_bridge_proto::container::{ContainerSlotType, ContainerType};

use crate::error::OpenError;
use crate::inventory::Inventory;
use crate::session::BridgeSession;
use crate::translator::holder::BlockInventoryHolder;
use crate::translator::InventoryTranslator;

pub const SINGLE_CHEST_SIZE: usize = 27;
pub const DOUBLE_CHEST_SIZE: usize = 54;

fn single_variant(state: &BlockState) -> bool {
    // Ender chests and barrels never pair up.
    if state.is(block::ENDER_CHEST) || state.is(block::BARREL) {
        return true;
    }
    state.chest_type() == Some(ChestType::Single)
}

fn double_variant(state: &BlockState) -> bool {
    matches!(state.chest_type(), Some(ChestType::Left | ChestType::Right))
}

fn chest_slot_type(inventory: &Inventory) -> ContainerSlotType {
    if inventory.is_barrel() {
        ContainerSlotType::Barrel
    } else {
        ContainerSlotType::LevelEntity
    }
}

pub struct SingleChestTranslator {
    holder: BlockInventoryHolder,
}

impl SingleChestTranslator {
    pub fn new() -> Self {
        Self {
            holder: BlockInventoryHolder::new(
                ContainerType::Container,
                &[block::CHEST, block::TRAPPED_CHEST, block::ENDER_CHEST, block::BARREL],
            )
            .with_validator(single_variant),
        }
    }
}

impl Default for SingleChestTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryTranslator for SingleChestTranslator {
    fn size(&self) -> usize {
        SINGLE_CHEST_SIZE
    }

    fn container_type(&self) -> ContainerType {
        self.holder.container_type()
    }

    fn slot_type(&self, inventory: &Inventory) -> ContainerSlotType {
        chest_slot_type(inventory)
    }

    fn prepare_inventory(
        &self,
        session: &BridgeSession,
        inventory: &mut Inventory,
    ) -> Result<(), OpenError> {
        self.holder.prepare_inventory(session, inventory)
    }

    fn open_inventory(&self, session: &BridgeSession, inventory: &Inventory) {
        self.holder.open_inventory(session, inventory);
    }

    fn close_inventory(&self, session: &BridgeSession, inventory: &Inventory, force: bool) {
        self.holder.close_inventory(session, inventory, force);
    }
}

pub struct DoubleChestTranslator {
    holder: BlockInventoryHolder,
}

impl DoubleChestTranslator {
    pub fn new() -> Self {
        Self {
            holder: BlockInventoryHolder::new(
                ContainerType::Container,
                &[block::CHEST, block::TRAPPED_CHEST],
            )
            .with_validator(double_variant),
        }
    }
}

impl Default for DoubleChestTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryTranslator for DoubleChestTranslator {
    fn size(&self) -> usize {
        DOUBLE_CHEST_SIZE
    }

    fn container_type(&self) -> ContainerType {
        self.holder.container_type()
    }

    fn prepare_inventory(
        &self,
        session: &BridgeSession,
        inventory: &mut Inventory,
    ) -> Result<(), OpenError> {
        self.holder.prepare_inventory(session, inventory)
    }

    fn open_inventory(&self, session: &BridgeSession, inventory: &Inventory) {
        self.holder.open_inventory(session, inventory);
    }

    fn close_inventory(&self, session: &BridgeSession, inventory: &Inventory, force: bool) {
        self.holder.close_inventory(session, inventory, force);
    }
}
