//! Stonecutter: the client names the result it wants, the Java server wants
//! the index of that result among the recipes for the input.

use mc_bridge_java::block;
use mc_bridge_java::packets::{ContainerButtonClick, ServerboundPacket};
use mc_bridge_proto::container::{ui_slot, ContainerSlotType, ContainerType};
use mc_bridge_proto::packets::{StackAction, StackRequest, StackSlot};
use tracing::debug;

use crate::click::Transaction;
use crate::error::{OpenError, RequestError};
use crate::inventory::Inventory;
use crate::item::MirroredItemStack;
use crate::session::BridgeSession;
use crate::translator::holder::BlockInventoryHolder;
use crate::translator::updater::Updater;
use crate::translator::{BedrockContainerSlot, InventoryTranslator};

pub const INPUT_SLOT: usize = 0;
pub const RESULT_SLOT: usize = 1;

pub struct StonecutterTranslator {
    holder: BlockInventoryHolder,
}

impl StonecutterTranslator {
    pub fn new() -> Self {
        Self {
            holder: BlockInventoryHolder::new(ContainerType::Stonecutter, &[block::STONECUTTER]),
        }
    }
}

impl Default for StonecutterTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryTranslator for StonecutterTranslator {
    fn size(&self) -> usize {
        2
    }

    fn container_type(&self) -> ContainerType {
        ContainerType::Stonecutter
    }

    fn updater(&self) -> Updater {
        Updater::Ui
    }

    fn slot_type(&self, _inventory: &Inventory) -> ContainerSlotType {
        ContainerSlotType::StonecutterInput
    }

    fn accepts_region(&self, region: ContainerSlotType, _inventory: &Inventory) -> bool {
        region.is_player_inventory()
            || matches!(
                region,
                ContainerSlotType::StonecutterInput
                    | ContainerSlotType::StonecutterResult
                    | ContainerSlotType::CreatedOutput
            )
    }

    fn is_output(&self, java_slot: usize) -> bool {
        java_slot == RESULT_SLOT
    }

    fn bedrock_slot_to_java(&self, slot: &StackSlot) -> i32 {
        match slot.container {
            ContainerSlotType::StonecutterInput => INPUT_SLOT as i32,
            ContainerSlotType::StonecutterResult | ContainerSlotType::CreatedOutput => {
                RESULT_SLOT as i32
            }
            _ => super::default_bedrock_slot_to_java(self.size(), slot),
        }
    }

    fn java_slot_to_bedrock(&self, slot: usize) -> i32 {
        match slot {
            INPUT_SLOT => ui_slot::STONECUTTER_INPUT as i32,
            RESULT_SLOT => ui_slot::CREATED_OUTPUT as i32,
            _ => super::default_java_slot_to_bedrock(self.size(), slot),
        }
    }

    fn java_slot_to_bedrock_container(
        &self,
        slot: usize,
        inventory: &Inventory,
    ) -> BedrockContainerSlot {
        match slot {
            INPUT_SLOT => BedrockContainerSlot::new(
                ContainerSlotType::StonecutterInput,
                ui_slot::STONECUTTER_INPUT,
            ),
            RESULT_SLOT => BedrockContainerSlot::new(
                ContainerSlotType::StonecutterResult,
                ui_slot::CREATED_OUTPUT,
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
            (ContainerSlotType::StonecutterInput, 1),
            (ContainerSlotType::StonecutterResult, 1),
        ]
    }

    fn should_handle_request_first(&self, action: &StackAction, _inventory: &Inventory) -> bool {
        matches!(action, StackAction::CraftNonImplementedDeprecated)
    }

    /// Select the recipe whose output the client claims, then run the rest
    /// of the batch as plain slot moves.
    fn translate_special_request(
        &self,
        tx: &mut Transaction<'_>,
        request: &StackRequest,
    ) -> Result<(), RequestError> {
        let Some(StackAction::CraftResultsDeprecated { result_items, .. }) = request.actions.get(1)
        else {
            return Err(RequestError::Malformed(
                "stonecutter craft without deprecated results",
            ));
        };

        let input = tx
            .item(INPUT_SLOT)
            .filter(|item| !item.is_empty())
            .map(|item| item.java_id)
            .ok_or(RequestError::EmptyInput)?;

        let candidates = tx
            .registries()
            .stonecutter_recipes
            .get(tx.version())
            .and_then(|recipes| recipes.get(&input))
            .ok_or(RequestError::NoRecipe { input })?;

        let claimed_item = result_items
            .first()
            .ok_or(RequestError::Malformed("empty stonecutter result list"))?;
        let claimed = tx
            .items()
            .java_id(claimed_item)
            .ok_or(RequestError::UntranslatableItem {
                runtime_id: claimed_item.runtime_id,
            })?;

        let position = candidates
            .position(claimed)
            .ok_or(RequestError::UnresolvableClaim { input, claimed })?;
        let button_id = position as i32 + 1;
        debug!(
            "stonecutter {}: input {} -> output {} (button {})",
            tx.container_id(),
            input,
            claimed,
            button_id
        );

        let container_id = tx.container_id();
        tx.send(ServerboundPacket::ContainerButtonClick(ContainerButtonClick {
            container_id,
            button_id,
        }));

        // The server fills the result slot once it sees the button; assume
        // it already has.
        let net_id = tx.next_net_id();
        let count = claimed_item.count.clamp(1, u8::MAX as u16) as u8;
        tx.set_provisional(RESULT_SLOT, MirroredItemStack::new(claimed, count, net_id))?;

        self.translate_request(tx, request)
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
