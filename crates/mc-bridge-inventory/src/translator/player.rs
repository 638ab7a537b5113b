//! Java window 0, the player's own inventory: 2x2 crafting grid and armor in
//! front of the shared 36 player slots.

use mc_bridge_proto::container::{ui_slot, ContainerSlotType, ContainerType};
use mc_bridge_proto::packets::{BedrockPacket, ContainerClose, StackSlot};

use crate::inventory::Inventory;
use crate::session::BridgeSession;
use crate::translator::updater::Updater;
use crate::translator::{BedrockContainerSlot, InventoryTranslator};

/// Result, four grid slots, four armor slots.
pub const PLAYER_WINDOW_SIZE: usize = 9;

const RESULT_SLOT: usize = 0;
const GRID: std::ops::RangeInclusive<usize> = 1..=4;
const ARMOR: std::ops::RangeInclusive<usize> = 5..=8;
/// Bedrock offset of the 2x2 grid minus the first Java grid slot.
const GRID_OFFSET: i32 = 28 - 1;
const ARMOR_START: i32 = 5;

#[derive(Debug, Default)]
pub struct PlayerInventoryTranslator;

impl InventoryTranslator for PlayerInventoryTranslator {
    fn size(&self) -> usize {
        PLAYER_WINDOW_SIZE
    }

    fn container_type(&self) -> ContainerType {
        ContainerType::Inventory
    }

    fn updater(&self) -> Updater {
        Updater::Player
    }

    fn slot_type(&self, _inventory: &Inventory) -> ContainerSlotType {
        ContainerSlotType::CraftingInput
    }

    fn accepts_region(&self, region: ContainerSlotType, _inventory: &Inventory) -> bool {
        region.is_player_inventory()
            || matches!(
                region,
                ContainerSlotType::Armor
                    | ContainerSlotType::CraftingInput
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
            ContainerSlotType::Armor => slot.slot as i32 + ARMOR_START,
            _ => super::default_bedrock_slot_to_java(self.size(), slot),
        }
    }

    fn java_slot_to_bedrock(&self, slot: usize) -> i32 {
        match slot {
            RESULT_SLOT => ui_slot::CREATED_OUTPUT as i32,
            s if GRID.contains(&s) => s as i32 + GRID_OFFSET,
            s if ARMOR.contains(&s) => s as i32 - ARMOR_START,
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
            s if GRID.contains(&s) => BedrockContainerSlot::new(
                ContainerSlotType::CraftingInput,
                (s as i32 + GRID_OFFSET) as u8,
            ),
            s if ARMOR.contains(&s) => {
                BedrockContainerSlot::new(ContainerSlotType::Armor, (s as i32 - ARMOR_START) as u8)
            }
            _ => super::default_java_slot_to_bedrock_container(
                self.size(),
                slot,
                self.slot_type(inventory),
            ),
        }
    }

    fn declared_regions(&self, _inventory: &Inventory) -> Vec<(ContainerSlotType, usize)> {
        vec![
            (ContainerSlotType::CraftingInput, 4),
            (ContainerSlotType::CraftingOutput, 1),
            (ContainerSlotType::Armor, 4),
        ]
    }

    fn close_inventory(&self, session: &BridgeSession, inventory: &Inventory, force: bool) {
        session.send_bedrock(BedrockPacket::ContainerClose(ContainerClose {
            window_id: inventory.bedrock_id,
            container_type: ContainerType::Inventory,
            server_initiated: force,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::test_support::assert_inverse;

    #[test]
    fn window_zero_layout() {
        let t = PlayerInventoryTranslator;
        let helmet = StackSlot::new(ContainerSlotType::Armor, 0);
        let grid = StackSlot::new(ContainerSlotType::CraftingInput, 28);
        let main = StackSlot::new(ContainerSlotType::Inventory, 9);
        let hotbar = StackSlot::new(ContainerSlotType::Hotbar, 8);
        assert_eq!(t.bedrock_slot_to_java(&helmet), 5);
        assert_eq!(t.bedrock_slot_to_java(&grid), 1);
        assert_eq!(t.bedrock_slot_to_java(&main), 9);
        assert_eq!(t.bedrock_slot_to_java(&hotbar), 44);
    }

    #[test]
    fn slot_mappings_invert() {
        let t = PlayerInventoryTranslator;
        let inv = Inventory::new(0, 0, None, PLAYER_WINDOW_SIZE);
        assert_inverse(&t, &inv);
    }
}
