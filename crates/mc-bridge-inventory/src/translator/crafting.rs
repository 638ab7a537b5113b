//! Crafting table: one result slot and a 3x3 grid.

use mc_bridge_java::block;
use mc_bridge_proto::container::{ui_slot, ContainerSlotType, ContainerType};
use mc_bridge_proto::packets::StackSlot;

use crate::error::OpenError;
use crate::inventory::Inventory;
use crate::session::BridgeSession;
use crate::translator::holder::BlockInventoryHolder;
use crate::translator::updater::Updater;
use crate::translator::{BedrockContainerSlot, InventoryTranslator};

const RESULT_SLOT: usize = 0;
const GRID_SLOTS: usize = 9;
/// Bedrock grid offset minus the first Java grid slot.
const GRID_OFFSET: i32 = ui_slot::CRAFTING_INPUT_START as i32 - 1;

pub struct CraftingTableTranslator {
    holder: BlockInventoryHolder,
}

impl CraftingTableTranslator {
    pub fn new() -> Self {
        Self {
            holder: BlockInventoryHolder::new(ContainerType::Workbench, &[block::CRAFTING_TABLE]),
        }
    }
}

impl Default for CraftingTableTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryTranslator for CraftingTableTranslator {
    fn size(&self) -> usize {
        GRID_SLOTS + 1
    }

    fn container_type(&self) -> ContainerType {
        ContainerType::Workbench
    }

    fn updater(&self) -> Updater {
        Updater::Ui
    }

    fn slot_type(&self, _inventory: &Inventory) -> ContainerSlotType {
        ContainerSlotType::CraftingInput
    }

    fn accepts_region(&self, region: ContainerSlotType, _inventory: &Inventory) -> bool {
        region.is_player_inventory()
            || matches!(
                region,
                ContainerSlotType::CraftingInput
                    | ContainerSlotType::CraftingOutput
                    | ContainerSlotType::CreatedOutput
            )
    }

    fn is_output(&self, java_slot: usize) -> bool {
        java_slot == RESULT_SLOT
    }

    fn bedrock_slot_to_java(&self, slot: &StackSlot) -> i32 {
        match slot.container {
            ContainerSlotType::CraftingOutput | ContainerSlotType::CreatedOutput => {
                RESULT_SLOT as i32
            }
            ContainerSlotType::CraftingInput => slot.slot as i32 - GRID_OFFSET,
            _ => super::default_bedrock_slot_to_java(self.size(), slot),
        }
    }

    fn java_slot_to_bedrock(&self, slot: usize) -> i32 {
        match slot {
            RESULT_SLOT => ui_slot::CREATED_OUTPUT as i32,
            1..=GRID_SLOTS => slot as i32 + GRID_OFFSET,
            _ => super::default_java_slot_to_bedrock(self.size(), slot),
        }
    }

    fn java_slot_to_bedrock_container(
        &self,
        slot: usize,
        inventory: &Inventory,
    ) -> BedrockContainerSlot {
        match slot {
            RESULT_SLOT => BedrockContainerSlot::new(
                ContainerSlotType::CraftingOutput,
                ui_slot::CREATED_OUTPUT,
            ),
            1..=GRID_SLOTS => BedrockContainerSlot::new(
                ContainerSlotType::CraftingInput,
                (slot as i32 + GRID_OFFSET) as u8,
            ),
            _ => super::default_java_slot_to_bedrock_container(
                self.size(),
                slot,
                self.slot_type(inventory),
            ),
        }
    }

    fn declared_regions(&self, _inventory: &Inventory) -> Vec<(ContainerSlotType, usize)> {
        vec![
            (ContainerSlotType::CraftingInput, GRID_SLOTS),
            (ContainerSlotType::CraftingOutput, 1),
        ]
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
