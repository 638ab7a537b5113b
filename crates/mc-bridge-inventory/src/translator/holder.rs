//! Open/close lifecycle shared by windows backed by a world block.

use mc_bridge_java::block::BlockState;
use mc_bridge_proto::container::ContainerType;
use mc_bridge_proto::packets::{BedrockPacket, ContainerClose, ContainerOpen};
use tracing::debug;

use crate::error::OpenError;
use crate::inventory::{Holder, Inventory};
use crate::session::BridgeSession;

/// Validates the block the player interacted with and announces the window
/// at its position.
#[derive(Debug, Clone, Copy)]
pub struct BlockInventoryHolder {
    container_type: ContainerType,
    /// Block names that may back this window.
    blocks: &'static [&'static str],
    /// Extra state check, e.g. the chest variant.
    valid_state: fn(&BlockState) -> bool,
}

fn any_state(_: &BlockState) -> bool {
    true
}

impl BlockInventoryHolder {
    pub const fn new(container_type: ContainerType, blocks: &'static [&'static str]) -> Self {
        Self {
            container_type,
            blocks,
            valid_state: any_state,
        }
    }

    pub const fn with_validator(mut self, valid_state: fn(&BlockState) -> bool) -> Self {
        self.valid_state = valid_state;
        self
    }

    pub fn container_type(&self) -> ContainerType {
        self.container_type
    }

    pub fn is_valid_block(&self, state: &BlockState) -> bool {
        self.blocks.iter().any(|name| state.is(name)) && (self.valid_state)(state)
    }

    pub fn prepare_inventory(
        &self,
        session: &BridgeSession,
        inventory: &mut Inventory,
    ) -> Result<(), OpenError> {
        let pos = session.last_interaction().ok_or(OpenError::NoInteraction)?;
        let state = session
            .world()
            .block_state_at(pos)
            .ok_or(OpenError::MissingBlock(pos))?;
        if !self.is_valid_block(&state) {
            return Err(OpenError::StructuralMismatch {
                pos,
                state: state.to_string(),
            });
        }
        debug!("window {} backed by {} at {}", inventory.java_id, state, pos);
        inventory.holder = Some(Holder {
            position: pos,
            block: state.name,
        });
        Ok(())
    }

    pub fn open_inventory(&self, session: &BridgeSession, inventory: &Inventory) {
        let Some(holder) = &inventory.holder else {
            debug!("window {} has no holder, not opening", inventory.java_id);
            return;
        };
        session.send_bedrock(BedrockPacket::ContainerOpen(ContainerOpen {
            window_id: inventory.bedrock_id,
            container_type: self.container_type,
            position: holder.position,
            entity_unique_id: -1,
        }));
    }

    pub fn close_inventory(&self, session: &BridgeSession, inventory: &Inventory, force: bool) {
        session.send_bedrock(BedrockPacket::ContainerClose(ContainerClose {
            window_id: inventory.bedrock_id,
            container_type: self.container_type,
            server_initiated: force,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::Harness;
    use mc_bridge_java::block::{self, BlockStateMap};
    use mc_bridge_java::menu::MenuType;
    use mc_bridge_proto::types::BlockPos;

    const HOLDER: BlockInventoryHolder =
        BlockInventoryHolder::new(ContainerType::Stonecutter, &[block::STONECUTTER]);

    #[test]
    fn refuses_without_interaction() {
        let h = Harness::new(BlockStateMap::new());
        let mut inv = Inventory::new(1, 1, Some(MenuType::Stonecutter), 2);
        assert_eq!(
            HOLDER.prepare_inventory(&h.session, &mut inv),
            Err(OpenError::NoInteraction)
        );
    }

    #[test]
    fn refuses_wrong_block() {
        let pos = BlockPos::new(0, 64, 0);
        let mut world = BlockStateMap::new();
        world.set(pos, BlockState::new(block::CRAFTING_TABLE));
        let mut h = Harness::new(world);
        h.session.set_last_interaction(pos);

        let mut inv = Inventory::new(1, 1, Some(MenuType::Stonecutter), 2);
        let err = HOLDER.prepare_inventory(&h.session, &mut inv).unwrap_err();
        assert!(matches!(err, OpenError::StructuralMismatch { .. }));
        assert!(inv.holder.is_none());
    }

    #[test]
    fn opens_at_block_position() {
        let pos = BlockPos::new(4, 70, -2);
        let mut world = BlockStateMap::new();
        world.set(pos, BlockState::new(block::STONECUTTER).with("facing", "north"));
        let mut h = Harness::new(world);
        h.session.set_last_interaction(pos);

        let mut inv = Inventory::new(7, 7, Some(MenuType::Stonecutter), 2);
        HOLDER.prepare_inventory(&h.session, &mut inv).unwrap();
        HOLDER.open_inventory(&h.session, &inv);
        match h.bedrock_packets().as_slice() {
            [BedrockPacket::ContainerOpen(open)] => {
                assert_eq!(open.window_id, 7);
                assert_eq!(open.position, pos);
                assert_eq!(open.container_type, ContainerType::Stonecutter);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
