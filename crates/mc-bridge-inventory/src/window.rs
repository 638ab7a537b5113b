//! Window lifecycle: opening Java menus on the Bedrock client and closing
//! them from either side.

use tracing::debug;

use mc_bridge_java::packets::{ContainerClose, OpenScreen, ServerboundPacket};

use crate::error::OpenError;
use crate::inventory::{Inventory, SlotCell};
use crate::session::BridgeSession;

/// Bedrock window id for a Java container id. Stays within 1..=99, clear of
/// the player inventory (0) and the fixed ids from 119 up.
pub fn bedrock_window_id(java_id: i32) -> u8 {
    (java_id.rem_euclid(99) + 1) as u8
}

impl BridgeSession {
    /// The server opened a menu. Menus without a translator, or whose block
    /// does not match, are closed again on the Java side and never shown.
    pub fn handle_open_screen(&mut self, packet: &OpenScreen) -> Result<(), OpenError> {
        if let Some(previous) = self.open.take() {
            if let Some(translator) = self.translator_for(&previous) {
                translator.close_inventory(self, &previous, true);
            }
        }

        let result = self.open_window(packet);
        if let Err(e) = &result {
            debug!("refusing window {} ({:?}): {e}", packet.container_id, packet.menu);
            self.send_java(ServerboundPacket::ContainerClose(ContainerClose {
                container_id: packet.container_id,
            }));
        }
        result
    }

    fn open_window(&mut self, packet: &OpenScreen) -> Result<(), OpenError> {
        let translator = self
            .translators()
            .get(&packet.menu)
            .cloned()
            .ok_or(OpenError::UnsupportedMenu(packet.menu))?;

        let mut inventory = Inventory::new(
            packet.container_id,
            bedrock_window_id(packet.container_id),
            Some(packet.menu),
            translator.size(),
        );
        inventory.title = packet.title.clone();
        translator.prepare_inventory(self, &mut inventory)?;
        translator.open_inventory(self, &inventory);
        debug!(
            "opened window {} as bedrock {} ({} slots)",
            inventory.java_id,
            inventory.bedrock_id,
            inventory.size()
        );
        self.open = Some(inventory);
        Ok(())
    }

    /// The client closed `window_id`; tell the server and acknowledge.
    pub fn handle_client_close(&mut self, window_id: u8) {
        let closing = match self.open.take() {
            Some(inventory) if inventory.bedrock_id == window_id => inventory,
            Some(inventory) => {
                debug!("client closed unknown window {window_id}");
                self.open = Some(inventory);
                return;
            }
            // Nothing open: the client left its own inventory screen.
            None => self.player_window.clone(),
        };
        self.send_java(ServerboundPacket::ContainerClose(ContainerClose {
            container_id: closing.java_id,
        }));
        if let Some(translator) = self.translator_for(&closing) {
            translator.close_inventory(self, &closing, false);
        }
        self.player.cursor = SlotCell::default();
    }

    /// The server closed `container_id`.
    pub fn handle_server_close(&mut self, container_id: i32) {
        let closing = match self.open.take() {
            Some(inventory) if inventory.java_id == container_id => inventory,
            other => {
                debug!("server closed unknown window {container_id}");
                self.open = other;
                return;
            }
        };
        if let Some(translator) = self.translator_for(&closing) {
            translator.close_inventory(self, &closing, true);
        }
        self.player.cursor = SlotCell::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::Harness;
    use crate::item::MirroredItemStack;
    use mc_bridge_java::block::{self, BlockState, BlockStateMap};
    use mc_bridge_java::menu::MenuType;
    use mc_bridge_proto::container::{ContainerSlotType, ContainerType};
    use mc_bridge_proto::packets::BedrockPacket;
    use mc_bridge_proto::types::BlockPos;

    const POS: BlockPos = BlockPos::new(10, 64, -3);

    fn at_block(state: BlockState) -> Harness {
        let mut world = BlockStateMap::new();
        world.set(POS, state);
        let mut h = Harness::new(world);
        h.session.set_last_interaction(POS);
        h
    }

    fn screen(container_id: i32, menu: MenuType) -> OpenScreen {
        OpenScreen {
            container_id,
            menu,
            title: "Chest".to_string(),
        }
    }

    fn java_closes(h: &mut Harness) -> Vec<i32> {
        h.java_packets()
            .into_iter()
            .filter_map(|p| match p {
                ServerboundPacket::ContainerClose(c) => Some(c.container_id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn window_ids_avoid_reserved_values() {
        assert_eq!(bedrock_window_id(0), 1);
        assert_eq!(bedrock_window_id(3), 4);
        assert_eq!(bedrock_window_id(98), 99);
        assert_eq!(bedrock_window_id(99), 1);
        assert_eq!(bedrock_window_id(-1), 99);
    }

    #[test]
    fn single_chest_opens_with_27_slots() {
        let mut h = at_block(BlockState::new(block::CHEST).with(block::CHEST_TYPE, "single"));
        h.session
            .handle_open_screen(&screen(3, MenuType::Generic9x3))
            .unwrap();

        let inventory = h.session.open_inventory().unwrap();
        assert_eq!(inventory.size(), 27);
        assert_eq!(inventory.bedrock_id, 4);
        assert_eq!(inventory.title, "Chest");
        let translator = h.session.translator_for(inventory).unwrap();
        assert_eq!(
            translator.declared_regions(inventory),
            vec![(ContainerSlotType::LevelEntity, 27)]
        );

        let packets = h.bedrock_packets();
        let [BedrockPacket::ContainerOpen(open)] = packets.as_slice() else {
            panic!("expected a single ContainerOpen, got {packets:?}");
        };
        assert_eq!(open.window_id, 4);
        assert_eq!(open.container_type, ContainerType::Container);
        assert_eq!(open.position, POS);
        assert!(java_closes(&mut h).is_empty());
    }

    #[test]
    fn double_wide_chest_is_refused_as_single() {
        let mut h = at_block(BlockState::new(block::CHEST).with(block::CHEST_TYPE, "left"));
        let err = h
            .session
            .handle_open_screen(&screen(3, MenuType::Generic9x3))
            .unwrap_err();
        assert!(matches!(err, OpenError::StructuralMismatch { pos: POS, .. }));
        assert!(h.session.open_inventory().is_none());
        assert!(h.bedrock_packets().is_empty());
        assert_eq!(java_closes(&mut h), vec![3]);
    }

    #[test]
    fn double_chest_needs_double_variant() {
        let mut h = at_block(BlockState::new(block::CHEST).with(block::CHEST_TYPE, "right"));
        h.session
            .handle_open_screen(&screen(8, MenuType::Generic9x6))
            .unwrap();
        assert_eq!(h.session.open_inventory().unwrap().size(), 54);
    }

    #[test]
    fn menu_without_translator_is_closed() {
        let mut h = at_block(BlockState::new(block::CHEST));
        let err = h
            .session
            .handle_open_screen(&screen(2, MenuType::Anvil))
            .unwrap_err();
        assert!(matches!(err, OpenError::UnsupportedMenu(MenuType::Anvil)));
        assert!(h.session.open_inventory().is_none());
        assert_eq!(java_closes(&mut h), vec![2]);
    }

    #[test]
    fn client_close_notifies_server_and_clears_cursor() {
        let mut h = at_block(BlockState::new(block::BARREL));
        h.session
            .handle_open_screen(&screen(3, MenuType::Generic9x3))
            .unwrap();
        h.bedrock_packets();
        h.session.player.cursor.item = MirroredItemStack::new(1, 5, 1);

        h.session.handle_client_close(4);
        assert!(h.session.open_inventory().is_none());
        assert!(h.session.player().cursor.item.is_empty());
        assert_eq!(java_closes(&mut h), vec![3]);
        let packets = h.bedrock_packets();
        let [BedrockPacket::ContainerClose(close)] = packets.as_slice() else {
            panic!("expected a ContainerClose, got {packets:?}");
        };
        assert_eq!(close.window_id, 4);
        assert!(!close.server_initiated);
    }

    #[test]
    fn server_close_is_forced() {
        let mut h = at_block(BlockState::new(block::ENDER_CHEST));
        h.session
            .handle_open_screen(&screen(3, MenuType::Generic9x3))
            .unwrap();
        h.bedrock_packets();

        h.session.handle_server_close(5);
        assert!(h.session.open_inventory().is_some());

        h.session.handle_server_close(3);
        assert!(h.session.open_inventory().is_none());
        assert!(java_closes(&mut h).is_empty());
        let packets = h.bedrock_packets();
        let [BedrockPacket::ContainerClose(close)] = packets.as_slice() else {
            panic!("expected a ContainerClose, got {packets:?}");
        };
        assert!(close.server_initiated);
    }

    #[test]
    fn closing_own_inventory_reports_window_zero() {
        let mut h = Harness::new(BlockStateMap::new());
        h.session.handle_client_close(0);
        assert_eq!(java_closes(&mut h), vec![0]);
    }
}
