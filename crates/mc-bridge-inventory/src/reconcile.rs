//! Authoritative slot values from the Java server.
//!
//! Every value written here replaces whatever the mirror held, provisional or
//! not, and is forwarded to the client through the window's updater.

use tracing::debug;

use mc_bridge_java::item_stack::JavaItemStack;
use mc_bridge_java::packets::{ContainerSetContent, ContainerSetSlot};

use crate::inventory::{player_slot_from_java, Inventory, SlotCell};
use crate::item::MirroredItemStack;
use crate::session::BridgeSession;
use crate::translator::updater;

/// `ContainerSetSlot` container id addressing the cursor (with slot -1).
pub const CURSOR_CONTAINER: i32 = -1;
/// `ContainerSetSlot` container id addressing window 0 whatever is open.
pub const PLAYER_CONTAINER: i32 = -2;

/// Stamp a fresh network id on non-empty stacks.
fn mirrored(item: &JavaItemStack, net_id: &mut i32) -> MirroredItemStack {
    if item.is_empty() {
        return MirroredItemStack::EMPTY;
    }
    *net_id += 1;
    MirroredItemStack::from_java(item, *net_id)
}

impl BridgeSession {
    pub fn handle_set_content(&mut self, packet: &ContainerSetContent) {
        let BridgeSession {
            open,
            player_window,
            player,
            net_id,
            ..
        } = self;
        let Some(window) = target_window(open, player_window, packet.container_id) else {
            debug!("content for unknown window {}", packet.container_id);
            return;
        };

        let size = window.size();
        for (slot, item) in packet.items.iter().enumerate() {
            let item = mirrored(item, net_id);
            if slot < size {
                window.apply_authoritative(slot, item);
            } else if let Some(player_slot) = player_slot_from_java(size, slot) {
                player.apply_authoritative(player_slot, item);
            }
        }
        window.state_id = packet.state_id;
        player.cursor = SlotCell::authoritative(mirrored(&packet.carried, net_id));

        self.forward(packet.container_id, None);
        updater::update_cursor(self);
    }

    pub fn handle_set_slot(&mut self, packet: &ContainerSetSlot) {
        if packet.container_id == CURSOR_CONTAINER && packet.slot == -1 {
            let item = mirrored(&packet.item, &mut self.net_id);
            self.player.cursor = SlotCell::authoritative(item);
            updater::update_cursor(self);
            return;
        }

        let container_id = match packet.container_id {
            PLAYER_CONTAINER => 0,
            id => id,
        };
        let BridgeSession {
            open,
            player_window,
            player,
            net_id,
            ..
        } = self;
        let Some(window) = target_window(open, player_window, container_id) else {
            debug!("slot update for unknown window {}", packet.container_id);
            return;
        };
        let Ok(slot) = usize::try_from(packet.slot) else {
            debug!("slot update for negative slot {}", packet.slot);
            return;
        };

        let size = window.size();
        let player_slot = player_slot_from_java(size, slot);
        if slot >= size && player_slot.is_none() {
            debug!("slot {} out of range for window {}", slot, container_id);
            return;
        }
        let item = mirrored(&packet.item, net_id);
        match player_slot {
            Some(player_slot) => player.apply_authoritative(player_slot, item),
            None => window.apply_authoritative(slot, item),
        };
        window.state_id = packet.state_id;

        self.forward(container_id, Some(slot));
    }

    fn forward(&self, container_id: i32, slot: Option<usize>) {
        let inventory = match &self.open {
            Some(inventory) if inventory.java_id == container_id => inventory,
            _ => &self.player_window,
        };
        let Some(translator) = self.translator_for(inventory) else {
            return;
        };
        match slot {
            Some(slot) => translator.update_slot(self, inventory, slot),
            None => translator.update_inventory(self, inventory),
        }
    }
}

/// The open window if `container_id` names it, window 0 for id 0.
fn target_window<'a>(
    open: &'a mut Option<Inventory>,
    player_window: &'a mut Inventory,
    container_id: i32,
) -> Option<&'a mut Inventory> {
    match open {
        Some(inventory) if inventory.java_id == container_id => Some(inventory),
        _ if container_id == player_window.java_id => Some(player_window),
        _ => None,
    }
}
