//! Per-session mirrors of the open window and the player's own inventory.

use mc_bridge_java::menu::MenuType;
use mc_bridge_proto::types::BlockPos;

use crate::item::MirroredItemStack;

/// Number of player slots every Java window appends after its own.
pub const PLAYER_SLOTS: usize = 36;
pub const HOTBAR_SLOTS: usize = 9;

/// A mirrored slot. `provisional` marks a value the bridge wrote ahead of
/// the server; only an authoritative update clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotCell {
    pub item: MirroredItemStack,
    pub provisional: bool,
}

impl SlotCell {
    pub fn authoritative(item: MirroredItemStack) -> Self {
        Self {
            item,
            provisional: false,
        }
    }
}

/// The block a container was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holder {
    pub position: BlockPos,
    pub block: String,
}

/// One open window for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    /// Java container id; 0 is the player's own window.
    pub java_id: i32,
    /// Bedrock window id the client knows the container by.
    pub bedrock_id: u8,
    /// `None` for the player's own window.
    pub menu: Option<MenuType>,
    pub title: String,
    /// Last state id the server sent for this window.
    pub state_id: i32,
    pub holder: Option<Holder>,
    slots: Vec<SlotCell>,
}

impl Inventory {
    pub fn new(java_id: i32, bedrock_id: u8, menu: Option<MenuType>, size: usize) -> Self {
        Self {
            java_id,
            bedrock_id,
            menu,
            title: String::new(),
            state_id: 0,
            holder: None,
            slots: vec![SlotCell::default(); size],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn item(&self, slot: usize) -> Option<&MirroredItemStack> {
        self.slots.get(slot).map(|c| &c.item)
    }

    pub fn is_provisional(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|c| c.provisional)
    }

    pub fn cells(&self) -> &[SlotCell] {
        &self.slots
    }

    /// Write a value ahead of the server's confirmation. Live batches write
    /// through their transaction instead.
    #[cfg(test)]
    pub(crate) fn set_provisional(&mut self, slot: usize, item: MirroredItemStack) -> bool {
        match self.slots.get_mut(slot) {
            Some(cell) => {
                *cell = SlotCell {
                    item,
                    provisional: true,
                };
                true
            }
            None => false,
        }
    }

    /// Overwrite a slot with a value the server sent.
    pub fn apply_authoritative(&mut self, slot: usize, item: MirroredItemStack) -> bool {
        match self.slots.get_mut(slot) {
            Some(cell) => {
                *cell = SlotCell::authoritative(item);
                true
            }
            None => false,
        }
    }

    /// Replace every cell, e.g. when committing an accepted batch. The length
    /// must match.
    pub(crate) fn replace_cells(&mut self, cells: Vec<SlotCell>) {
        debug_assert_eq!(cells.len(), self.slots.len());
        if cells.len() == self.slots.len() {
            self.slots = cells;
        }
    }

    pub fn is_barrel(&self) -> bool {
        self.holder
            .as_ref()
            .is_some_and(|h| h.block == mc_bridge_java::block::BARREL)
    }
}

/// The player's 36 main slots (0-8 hotbar) and cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInventory {
    slots: Vec<SlotCell>,
    pub cursor: SlotCell,
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInventory {
    pub fn new() -> Self {
        Self {
            slots: vec![SlotCell::default(); PLAYER_SLOTS],
            cursor: SlotCell::default(),
        }
    }

    pub fn item(&self, slot: usize) -> Option<&MirroredItemStack> {
        self.slots.get(slot).map(|c| &c.item)
    }

    pub fn cells(&self) -> &[SlotCell] {
        &self.slots
    }

    pub fn apply_authoritative(&mut self, slot: usize, item: MirroredItemStack) -> bool {
        match self.slots.get_mut(slot) {
            Some(cell) => {
                *cell = SlotCell::authoritative(item);
                true
            }
            None => false,
        }
    }

    pub(crate) fn replace(&mut self, slots: Vec<SlotCell>, cursor: SlotCell) {
        if slots.len() == PLAYER_SLOTS {
            self.slots = slots;
        }
        self.cursor = cursor;
    }
}

/// Player slot (0-8 hotbar, 9-35 main) for a Java window slot that lies past
/// the window's own `size` slots.
pub fn player_slot_from_java(size: usize, java_slot: usize) -> Option<usize> {
    let offset = java_slot.checked_sub(size)?;
    if offset >= PLAYER_SLOTS {
        return None;
    }
    // Java lists the 27 main slots before the hotbar.
    Some(if offset < PLAYER_SLOTS - HOTBAR_SLOTS {
        offset + HOTBAR_SLOTS
    } else {
        offset - (PLAYER_SLOTS - HOTBAR_SLOTS)
    })
}

/// Java window slot of a player slot, inverse of [`player_slot_from_java`].
pub fn player_slot_to_java(size: usize, player_slot: usize) -> usize {
    if player_slot < HOTBAR_SLOTS {
        size + player_slot + (PLAYER_SLOTS - HOTBAR_SLOTS)
    } else {
        size + player_slot - HOTBAR_SLOTS
    }
}
