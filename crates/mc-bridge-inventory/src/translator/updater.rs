//! Pushes mirrored window contents to the Bedrock client.

use mc_bridge_proto::container::{window_id, ContainerSlotType, FullContainerName};
use mc_bridge_proto::item_stack::ItemStack;
use mc_bridge_proto::packets::{BedrockPacket, InventoryContent, InventorySlot};

use crate::inventory::{player_slot_from_java, Inventory};
use crate::session::BridgeSession;
use crate::translator::InventoryTranslator;

/// How a window's own slots reach the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Updater {
    /// The window is its own Bedrock container; contents go in one packet.
    Container,
    /// The slots live in the shared UI container and are sent one by one.
    Ui,
    /// Java window 0: crafting grid in the UI container, armor in its own.
    Player,
}

/// Java window 0 slots 5..9 hold the armor.
const ARMOR_START: usize = 5;

fn bedrock_window<T: InventoryTranslator + ?Sized>(
    translator: &T,
    inventory: &Inventory,
    java_slot: usize,
) -> u32 {
    match translator.updater() {
        Updater::Container => inventory.bedrock_id as u32,
        Updater::Ui => window_id::UI,
        Updater::Player if java_slot >= ARMOR_START => window_id::ARMOR,
        Updater::Player => window_id::UI,
    }
}

pub fn update_inventory<T: InventoryTranslator + ?Sized>(
    translator: &T,
    session: &BridgeSession,
    inventory: &Inventory,
) {
    let items = session.items();
    match translator.updater() {
        Updater::Container => {
            session.send_bedrock(BedrockPacket::InventoryContent(InventoryContent {
                window_id: inventory.bedrock_id as u32,
                items: inventory
                    .cells()
                    .iter()
                    .map(|c| items.to_bedrock(&c.item))
                    .collect(),
                container: FullContainerName::new(
                    translator.java_slot_to_bedrock_container(0, inventory).container,
                ),
            }));
        }
        Updater::Ui => {
            for slot in 0..inventory.size() {
                update_slot(translator, session, inventory, slot);
            }
        }
        Updater::Player => {
            session.send_bedrock(BedrockPacket::InventoryContent(InventoryContent {
                window_id: window_id::ARMOR,
                items: inventory.cells()[ARMOR_START.min(inventory.size())..]
                    .iter()
                    .map(|c| items.to_bedrock(&c.item))
                    .collect(),
                container: FullContainerName::new(ContainerSlotType::Armor),
            }));
            for slot in 0..ARMOR_START.min(inventory.size()) {
                update_slot(translator, session, inventory, slot);
            }
        }
    }
    update_player_inventory(session);
}

pub fn update_slot<T: InventoryTranslator + ?Sized>(
    translator: &T,
    session: &BridgeSession,
    inventory: &Inventory,
    java_slot: usize,
) {
    let items = session.items();
    if let Some(player_slot) = player_slot_from_java(inventory.size(), java_slot) {
        let item = session
            .player()
            .item(player_slot)
            .map(|i| items.to_bedrock(i))
            .unwrap_or_default();
        session.send_bedrock(BedrockPacket::InventorySlot(InventorySlot {
            window_id: window_id::INVENTORY,
            slot: player_slot as u32,
            container: FullContainerName::new(
                translator.java_slot_to_bedrock_container(java_slot, inventory).container,
            ),
            item,
        }));
        return;
    }
    let Some(item) = inventory.item(java_slot) else {
        return;
    };
    session.send_bedrock(BedrockPacket::InventorySlot(InventorySlot {
        window_id: bedrock_window(translator, inventory, java_slot),
        slot: translator.java_slot_to_bedrock(java_slot) as u32,
        container: FullContainerName::new(
            translator.java_slot_to_bedrock_container(java_slot, inventory).container,
        ),
        item: items.to_bedrock(item),
    }));
}

/// Full contents of the player's 36 slots.
pub fn update_player_inventory(session: &BridgeSession) {
    let items = session.items();
    session.send_bedrock(BedrockPacket::InventoryContent(InventoryContent {
        window_id: window_id::INVENTORY,
        items: session
            .player()
            .cells()
            .iter()
            .map(|c| items.to_bedrock(&c.item))
            .collect(),
        container: FullContainerName::new(ContainerSlotType::HotbarAndInventory),
    }));
}

/// The cursor lives in the UI container.
pub fn update_cursor(session: &BridgeSession) {
    let item = session.items().to_bedrock(&session.player().cursor.item);
    session.send_bedrock(BedrockPacket::InventorySlot(InventorySlot {
        window_id: window_id::UI,
        slot: mc_bridge_proto::container::ui_slot::CURSOR as u32,
        container: FullContainerName::new(ContainerSlotType::Cursor),
        item,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MirroredItemStack;
    use crate::session::test_support::Harness;
    use crate::translator::default_translators;
    use mc_bridge_java::block::BlockStateMap;
    use mc_bridge_java::menu::MenuType;

    #[test]
    fn container_updater_sends_whole_window() {
        let mut h = Harness::new(BlockStateMap::new());
        let translators = default_translators().unwrap();
        let chest = translators.get(&MenuType::Generic9x3).unwrap();
        let stone = h.java_id("minecraft:stone");
        let mut inventory = Inventory::new(4, 4, Some(MenuType::Generic9x3), 27);
        inventory.apply_authoritative(0, MirroredItemStack::new(stone, 5, 1));

        chest.update_inventory(&h.session, &inventory);
        let packets = h.bedrock_packets();
        assert_eq!(packets.len(), 2);
        match &packets[0] {
            BedrockPacket::InventoryContent(p) => {
                assert_eq!(p.window_id, 4);
                assert_eq!(p.items.len(), 27);
                assert_eq!(p.items[0].count, 5);
                assert_eq!(p.container.container, ContainerSlotType::LevelEntity);
            }
            other => panic!("unexpected {other:?}"),
        }
        match &packets[1] {
            BedrockPacket::InventoryContent(p) => {
                assert_eq!(p.window_id, window_id::INVENTORY);
                assert_eq!(p.items.len(), 36);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ui_updater_sends_each_slot_at_its_bedrock_offset() {
        let mut h = Harness::new(BlockStateMap::new());
        let translators = default_translators().unwrap();
        let cutter = translators.get(&MenuType::Stonecutter).unwrap();
        let inventory = Inventory::new(2, 2, Some(MenuType::Stonecutter), 2);

        cutter.update_inventory(&h.session, &inventory);
        let slots: Vec<(u32, u32)> = h
            .bedrock_packets()
            .into_iter()
            .filter_map(|p| match p {
                BedrockPacket::InventorySlot(s) => Some((s.window_id, s.slot)),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![(window_id::UI, 3), (window_id::UI, 50)]);
    }

    #[test]
    fn player_slot_update_targets_inventory_window() {
        let mut h = Harness::new(BlockStateMap::new());
        let translators = default_translators().unwrap();
        let chest = translators.get(&MenuType::Generic9x3).unwrap();
        let inventory = Inventory::new(4, 4, Some(MenuType::Generic9x3), 27);

        // Java 54 is the first hotbar slot in a 27-slot window.
        chest.update_slot(&h.session, &inventory, 54);
        match h.bedrock_packets().as_slice() {
            [BedrockPacket::InventorySlot(p)] => {
                assert_eq!(p.window_id, window_id::INVENTORY);
                assert_eq!(p.slot, 0);
                assert_eq!(p.container.container, ContainerSlotType::Hotbar);
                assert_eq!(p.item, ItemStack::empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
