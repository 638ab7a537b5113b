//! Stack action planning.
//!
//! A batch is replayed on scratch copies of the window, the player's slots and
//! the cursor, turning each action into the Java clicks that produce the same
//! result. Nothing is written back or sent unless every action succeeds.

use mc_bridge_java::item_stack::JavaItemStack;
use mc_bridge_java::packets::{
    button, ClickMode, ContainerClick, ServerboundPacket, OUTSIDE_SLOT,
};
use mc_bridge_proto::container::{ui_slot, ContainerSlotType};
use mc_bridge_proto::packets::{
    StackAction, StackRequest, StackResponseContainer, StackResponseSlot, StackSlot,
};
use mc_bridge_registry::Registries;
use tracing::debug;

use crate::error::RequestError;
use crate::inventory::{player_slot_from_java, Inventory, SlotCell, PLAYER_SLOTS};
use crate::item::{ItemTranslator, MirroredItemStack};
use crate::session::{BridgeSession, PipelineOptions};
use crate::translator::{BedrockContainerSlot, InventoryTranslator};

/// Where an item sits from the Java side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Cursor,
    /// Java window slot, including the player slots after the window's own.
    Window(usize),
}

/// Scratch state for one stack request.
pub struct Transaction<'a> {
    translator: &'a dyn InventoryTranslator,
    inventory: &'a Inventory,
    registries: &'a Registries,
    version: u32,
    options: PipelineOptions,
    window: Vec<SlotCell>,
    player: Vec<SlotCell>,
    cursor: SlotCell,
    net_id: i32,
    outbound: Vec<ServerboundPacket>,
    touched: Vec<Location>,
}

/// Everything an accepted batch changes.
pub(crate) struct Outcome {
    pub window: Vec<SlotCell>,
    pub player: Vec<SlotCell>,
    pub cursor: SlotCell,
    pub net_id: i32,
    pub outbound: Vec<ServerboundPacket>,
    pub containers: Vec<StackResponseContainer>,
}

impl<'a> Transaction<'a> {
    pub fn new(
        session: &'a BridgeSession,
        translator: &'a dyn InventoryTranslator,
        inventory: &'a Inventory,
    ) -> Self {
        Self {
            translator,
            inventory,
            registries: session.registries(),
            version: session.protocol_version(),
            options: session.options(),
            window: inventory.cells().to_vec(),
            player: session.player().cells().to_vec(),
            cursor: session.player().cursor.clone(),
            net_id: session.net_id,
            outbound: Vec::new(),
            touched: Vec::new(),
        }
    }

    pub fn container_id(&self) -> i32 {
        self.inventory.java_id
    }

    pub fn inventory(&self) -> &'a Inventory {
        self.inventory
    }

    pub fn registries(&self) -> &'a Registries {
        self.registries
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn items(&self) -> ItemTranslator<'a> {
        ItemTranslator::new(self.registries, self.version)
    }

    /// Current scratch value of one of the window's own slots.
    pub fn item(&self, java_slot: usize) -> Option<&MirroredItemStack> {
        self.window.get(java_slot).map(|c| &c.item)
    }

    pub fn next_net_id(&mut self) -> i32 {
        self.net_id += 1;
        self.net_id
    }

    /// Queue a packet for the server; it is only sent if the batch succeeds.
    pub fn send(&mut self, packet: ServerboundPacket) {
        self.outbound.push(packet);
    }

    pub fn set_provisional(
        &mut self,
        java_slot: usize,
        item: MirroredItemStack,
    ) -> Result<(), RequestError> {
        self.write(Location::Window(java_slot), item)
    }

    fn cell(&self, loc: Location) -> Option<&SlotCell> {
        match loc {
            Location::Cursor => Some(&self.cursor),
            Location::Window(slot) if slot < self.window.len() => self.window.get(slot),
            Location::Window(slot) => {
                player_slot_from_java(self.window.len(), slot).and_then(|p| self.player.get(p))
            }
        }
    }

    fn cell_mut(&mut self, loc: Location) -> Option<&mut SlotCell> {
        match loc {
            Location::Cursor => Some(&mut self.cursor),
            Location::Window(slot) if slot < self.window.len() => self.window.get_mut(slot),
            Location::Window(slot) => player_slot_from_java(self.window.len(), slot)
                .and_then(|p| self.player.get_mut(p)),
        }
    }

    fn get(&self, loc: Location) -> MirroredItemStack {
        self.cell(loc)
            .map(|c| c.item.clone())
            .unwrap_or(MirroredItemStack::EMPTY)
    }

    fn write(&mut self, loc: Location, item: MirroredItemStack) -> Result<(), RequestError> {
        let cell = self.cell_mut(loc).ok_or(match loc {
            Location::Window(slot) => RequestError::SlotOutOfRange(slot as i32),
            Location::Cursor => RequestError::Malformed("cursor unavailable"),
        })?;
        *cell = SlotCell {
            item,
            provisional: true,
        };
        if !self.touched.contains(&loc) {
            self.touched.push(loc);
        }
        Ok(())
    }

    fn max_stack(&self, item: &MirroredItemStack) -> u8 {
        self.registries.max_stack_size(item.java_id)
    }

    fn locate(&self, slot: &StackSlot) -> Result<Location, RequestError> {
        if slot.container == ContainerSlotType::Cursor {
            return Ok(Location::Cursor);
        }
        let unmapped = RequestError::UnmappedSlot {
            container: slot.container,
            slot: slot.slot,
        };
        if !self.translator.accepts_region(slot.container, self.inventory) {
            return Err(unmapped);
        }
        let java = self.translator.bedrock_slot_to_java(slot);
        let index = usize::try_from(java)
            .ok()
            .filter(|&j| j < self.window.len() + PLAYER_SLOTS)
            .ok_or(RequestError::SlotOutOfRange(java))?;
        if self.translator.java_slot_to_bedrock(index) != slot.slot as i32 {
            return Err(unmapped);
        }
        Ok(Location::Window(index))
    }

    fn apply(&mut self, action: &StackAction) -> Result<(), RequestError> {
        match action {
            StackAction::Take { count, src, dst } | StackAction::Place { count, src, dst } => {
                let (src, dst) = (self.locate(src)?, self.locate(dst)?);
                self.move_items(*count, src, dst)
            }
            StackAction::Swap { src, dst } => {
                let (src, dst) = (self.locate(src)?, self.locate(dst)?);
                self.swap(src, dst)
            }
            StackAction::Drop { count, src, .. } => {
                let src = self.locate(src)?;
                self.drop_items(*count, src)
            }
            StackAction::Consume { count, src } => {
                let src = self.locate(src)?;
                self.consume(*count, src)
            }
            // The server crafts on its own once the result is taken.
            StackAction::Create { .. }
            | StackAction::CraftRecipe { .. }
            | StackAction::CraftRecipeAuto { .. }
            | StackAction::CraftRecipeOptional { .. }
            | StackAction::CraftNonImplementedDeprecated
            | StackAction::CraftResultsDeprecated { .. } => Ok(()),
            other => {
                let action_type = other.action_type();
                if self.options.reject_unknown_actions {
                    return Err(RequestError::Unsupported(action_type));
                }
                debug!("skipping unsupported stack action {action_type}");
                Ok(())
            }
        }
    }

    /// Simulate a `Pickup` click on `slot` and queue it.
    fn click(&mut self, slot: usize, button: i8) -> Result<(), RequestError> {
        let output = self.translator.is_output(slot);
        let mut item = self.get(Location::Window(slot));
        let mut cursor = self.cursor.item.clone();
        let held = if cursor.is_empty() { &item } else { &cursor };
        let max = self.max_stack(held);

        if button == button::LEFT {
            if cursor.is_empty() {
                std::mem::swap(&mut item, &mut cursor);
            } else if item.stacks_with(&cursor) {
                if output {
                    let room = max.saturating_sub(cursor.count);
                    if item.count > room {
                        return Err(RequestError::NoSpace {
                            wanted: item.count,
                            room,
                        });
                    }
                    cursor.count += item.count;
                    item = MirroredItemStack::EMPTY;
                } else {
                    let moved = max.saturating_sub(item.count).min(cursor.count);
                    item.count += moved;
                    cursor = cursor.with_count(cursor.count - moved);
                }
            } else if output {
                return Err(RequestError::OutputSlot(slot as i32));
            } else {
                std::mem::swap(&mut item, &mut cursor);
            }
        } else if cursor.is_empty() {
            let half = item.count / 2 + item.count % 2;
            if output || half == item.count {
                std::mem::swap(&mut item, &mut cursor);
            } else {
                cursor = item.with_count(half);
                cursor.net_id = self.next_net_id();
                item = item.with_count(item.count - half);
            }
        } else if output {
            return Err(RequestError::OutputSlot(slot as i32));
        } else if item.is_empty() {
            item = cursor.with_count(1);
            item.net_id = self.next_net_id();
            cursor = cursor.with_count(cursor.count - 1);
        } else if item.stacks_with(&cursor) {
            if item.count >= max {
                return Err(RequestError::NoSpace { wanted: 1, room: 0 });
            }
            item.count += 1;
            cursor = cursor.with_count(cursor.count - 1);
        } else {
            std::mem::swap(&mut item, &mut cursor);
        }

        self.write(Location::Window(slot), item.clone())?;
        self.write(Location::Cursor, cursor.clone())?;
        self.queue_click(slot as i16, button, ClickMode::Pickup, vec![(slot as i16, item.to_java())]);
        Ok(())
    }

    /// Simulate a `Throw` click on `slot`.
    fn throw(&mut self, slot: usize, whole: bool) -> Result<(), RequestError> {
        let item = self.get(Location::Window(slot));
        if item.is_empty() {
            return Err(RequestError::EmptySource);
        }
        let remaining = if whole {
            MirroredItemStack::EMPTY
        } else {
            item.with_count(item.count - 1)
        };
        self.write(Location::Window(slot), remaining.clone())?;
        let button = if whole {
            button::THROW_STACK
        } else {
            button::THROW_ONE
        };
        self.queue_click(slot as i16, button, ClickMode::Throw, vec![(slot as i16, remaining.to_java())]);
        Ok(())
    }

    /// Click outside the window with the cursor: left drops all, right one.
    fn throw_cursor(&mut self, whole: bool) -> Result<(), RequestError> {
        let cursor = self.cursor.item.clone();
        if cursor.is_empty() {
            return Err(RequestError::EmptySource);
        }
        let remaining = if whole {
            MirroredItemStack::EMPTY
        } else {
            cursor.with_count(cursor.count - 1)
        };
        self.write(Location::Cursor, remaining)?;
        let button = if whole { button::LEFT } else { button::RIGHT };
        self.queue_click(OUTSIDE_SLOT, button, ClickMode::Pickup, Vec::new());
        Ok(())
    }

    fn queue_click(
        &mut self,
        slot: i16,
        button: i8,
        mode: ClickMode,
        changed_slots: Vec<(i16, JavaItemStack)>,
    ) {
        let click = ContainerClick {
            container_id: self.inventory.java_id,
            state_id: self.inventory.state_id,
            slot,
            button,
            mode,
            changed_slots,
            carried: self.cursor.item.to_java(),
        };
        self.outbound.push(ServerboundPacket::ContainerClick(click));
    }

    fn check_count(count: u8, available: u8) -> Result<(), RequestError> {
        if count == 0 {
            return Err(RequestError::Malformed("zero count"));
        }
        if count > available {
            return Err(RequestError::NotEnoughItems {
                wanted: count,
                available,
            });
        }
        Ok(())
    }

    fn take_to_cursor(&mut self, count: u8, slot: usize) -> Result<(), RequestError> {
        let src = self.get(Location::Window(slot));
        if src.is_empty() {
            return Err(RequestError::EmptySource);
        }
        Self::check_count(count, src.count)?;
        if !self.cursor.item.is_empty() {
            return Err(RequestError::CursorOccupied);
        }
        if count == src.count {
            return self.click(slot, button::LEFT);
        }
        if self.translator.is_output(slot) {
            return Err(RequestError::Malformed("partial take from an output slot"));
        }
        if count == src.count / 2 + src.count % 2 {
            return self.click(slot, button::RIGHT);
        }
        // Pick up everything, then put the surplus back one at a time.
        self.click(slot, button::LEFT)?;
        for _ in count..src.count {
            self.click(slot, button::RIGHT)?;
        }
        Ok(())
    }

    fn place_from_cursor(&mut self, count: u8, slot: usize) -> Result<(), RequestError> {
        let cursor = self.cursor.item.clone();
        if cursor.is_empty() {
            return Err(RequestError::EmptySource);
        }
        Self::check_count(count, cursor.count)?;
        if self.translator.is_output(slot) {
            return Err(RequestError::OutputSlot(slot as i32));
        }
        let dst = self.get(Location::Window(slot));
        if !dst.is_empty() && !dst.stacks_with(&cursor) {
            return Err(RequestError::ItemMismatch);
        }
        let room = self.max_stack(&cursor).saturating_sub(dst.count);
        if count > room {
            return Err(RequestError::NoSpace {
                wanted: count,
                room,
            });
        }
        if count == cursor.count {
            return self.click(slot, button::LEFT);
        }
        for _ in 0..count {
            self.click(slot, button::RIGHT)?;
        }
        Ok(())
    }

    fn move_items(&mut self, count: u8, src: Location, dst: Location) -> Result<(), RequestError> {
        match (src, dst) {
            (Location::Cursor, Location::Cursor) => {
                Err(RequestError::Malformed("move from cursor to cursor"))
            }
            (Location::Window(slot), Location::Cursor) => self.take_to_cursor(count, slot),
            (Location::Cursor, Location::Window(slot)) => self.place_from_cursor(count, slot),
            (Location::Window(a), Location::Window(b)) => {
                if a == b {
                    return Err(RequestError::Malformed("move onto the same slot"));
                }
                if !self.cursor.item.is_empty() {
                    return Err(RequestError::CursorOccupied);
                }
                self.take_to_cursor(count, a)?;
                self.place_from_cursor(count, b)
            }
        }
    }

    fn swap(&mut self, a: Location, b: Location) -> Result<(), RequestError> {
        match (a, b) {
            (Location::Cursor, Location::Cursor) => {
                Err(RequestError::Malformed("swap of cursor with itself"))
            }
            (Location::Cursor, Location::Window(slot)) | (Location::Window(slot), Location::Cursor) => {
                if self.translator.is_output(slot) {
                    return Err(RequestError::OutputSlot(slot as i32));
                }
                if self.get(Location::Window(slot)).stacks_with(&self.cursor.item) {
                    return Err(RequestError::Malformed("swap of stackable items"));
                }
                self.click(slot, button::LEFT)
            }
            (Location::Window(a), Location::Window(b)) => {
                if a == b {
                    return Err(RequestError::Malformed("swap of a slot with itself"));
                }
                if self.translator.is_output(a) || self.translator.is_output(b) {
                    return Err(RequestError::OutputSlot(a.min(b) as i32));
                }
                if !self.cursor.item.is_empty() {
                    return Err(RequestError::CursorOccupied);
                }
                let (first, second) = if self.get(Location::Window(a)).is_empty() {
                    (b, a)
                } else {
                    (a, b)
                };
                let first_item = self.get(Location::Window(first));
                if first_item.is_empty() {
                    return Ok(());
                }
                if first_item.stacks_with(&self.get(Location::Window(second))) {
                    return Err(RequestError::Malformed("swap of stackable items"));
                }
                self.click(first, button::LEFT)?;
                self.click(second, button::LEFT)?;
                if !self.cursor.item.is_empty() {
                    self.click(first, button::LEFT)?;
                }
                Ok(())
            }
        }
    }

    fn drop_items(&mut self, count: u8, src: Location) -> Result<(), RequestError> {
        let item = self.get(src);
        if item.is_empty() {
            return Err(RequestError::EmptySource);
        }
        Self::check_count(count, item.count)?;
        let whole = count == item.count;
        match src {
            Location::Cursor if whole => self.throw_cursor(true),
            Location::Window(slot) if whole => self.throw(slot, true),
            Location::Cursor => (0..count).try_for_each(|_| self.throw_cursor(false)),
            Location::Window(slot) => (0..count).try_for_each(|_| self.throw(slot, false)),
        }
    }

    /// Items used up by crafting; the server does the same when the result
    /// is taken, so no click is needed.
    fn consume(&mut self, count: u8, src: Location) -> Result<(), RequestError> {
        let item = self.get(src);
        if item.is_empty() {
            return Err(RequestError::EmptySource);
        }
        Self::check_count(count, item.count)?;
        self.write(src, item.with_count(item.count - count))
    }

    fn response_slot(&self, loc: Location) -> (BedrockContainerSlot, StackResponseSlot) {
        let address = match loc {
            Location::Cursor => BedrockContainerSlot::new(ContainerSlotType::Cursor, ui_slot::CURSOR),
            Location::Window(slot) => self
                .translator
                .java_slot_to_bedrock_container(slot, self.inventory),
        };
        let item = self.get(loc);
        let slot = StackResponseSlot {
            slot: address.slot,
            hotbar_slot: address.slot,
            count: item.count,
            stack_network_id: item.net_id,
            custom_name: String::new(),
            durability_correction: 0,
        };
        (address, slot)
    }

    pub(crate) fn finish(self) -> Outcome {
        let mut containers: Vec<StackResponseContainer> = Vec::new();
        for loc in &self.touched {
            let (address, slot) = self.response_slot(*loc);
            match containers
                .iter_mut()
                .find(|c| c.container == address.container)
            {
                Some(container) => container.slots.push(slot),
                None => containers.push(StackResponseContainer {
                    container: address.container,
                    slots: vec![slot],
                }),
            }
        }
        Outcome {
            window: self.window,
            player: self.player,
            cursor: self.cursor,
            net_id: self.net_id,
            outbound: self.outbound,
            containers,
        }
    }
}

/// Replay every action of `request` as Java clicks.
pub fn translate_request(tx: &mut Transaction<'_>, request: &StackRequest) -> Result<(), RequestError> {
    request.actions.iter().try_for_each(|action| tx.apply(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_support::Harness;
    use crate::translator::chest::SINGLE_CHEST_SIZE;
    use crate::translator::crafting::CraftingTableTranslator;
    use mc_bridge_java::block::BlockStateMap;
    use mc_bridge_java::menu::MenuType;

    fn chest() -> Harness {
        let mut h = Harness::new(BlockStateMap::new());
        h.session.open = Some(Inventory::new(
            3,
            4,
            Some(MenuType::Generic9x3),
            SINGLE_CHEST_SIZE,
        ));
        h
    }

    fn put(h: &mut Harness, slot: usize, identifier: &str, count: u8) {
        let id = h.java_id(identifier);
        let net_id = h.session.next_net_id();
        let inventory = h.session.open.as_mut().unwrap();
        inventory.apply_authoritative(slot, MirroredItemStack::new(id, count, net_id));
    }

    fn hold(h: &mut Harness, identifier: &str, count: u8) {
        let id = h.java_id(identifier);
        let net_id = h.session.next_net_id();
        h.session.player.cursor = SlotCell::authoritative(MirroredItemStack::new(id, count, net_id));
    }

    fn run(h: &Harness, actions: Vec<StackAction>) -> Result<Outcome, RequestError> {
        let (translator, inventory) = h.session.active_window().unwrap();
        let mut tx = Transaction::new(&h.session, &*translator, inventory);
        translate_request(&mut tx, &StackRequest::new(1, actions))?;
        Ok(tx.finish())
    }

    fn clicks(outcome: &Outcome) -> Vec<(i16, i8, ClickMode)> {
        outcome
            .outbound
            .iter()
            .map(|p| match p {
                ServerboundPacket::ContainerClick(c) => (c.slot, c.button, c.mode),
                other => panic!("unexpected packet {other:?}"),
            })
            .collect()
    }

    fn chest_slot(slot: u8) -> StackSlot {
        StackSlot::new(ContainerSlotType::LevelEntity, slot)
    }

    fn cursor() -> StackSlot {
        StackSlot::new(ContainerSlotType::Cursor, ui_slot::CURSOR)
    }

    fn take(count: u8, src: StackSlot, dst: StackSlot) -> StackAction {
        StackAction::Take { count, src, dst }
    }

    fn place(count: u8, src: StackSlot, dst: StackSlot) -> StackAction {
        StackAction::Place { count, src, dst }
    }

    #[test]
    fn whole_stack_to_cursor_is_one_left_click() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        let out = run(&h, vec![take(10, chest_slot(0), cursor())]).unwrap();

        assert_eq!(clicks(&out), vec![(0, button::LEFT, ClickMode::Pickup)]);
        assert_eq!(out.cursor.item.count, 10);
        assert_eq!(out.cursor.item.net_id, 1);
        assert!(out.window[0].item.is_empty());
        assert!(out.window[0].provisional);

        assert_eq!(out.containers.len(), 2);
        assert_eq!(out.containers[0].container, ContainerSlotType::LevelEntity);
        assert_eq!(out.containers[0].slots[0].count, 0);
        assert_eq!(out.containers[1].container, ContainerSlotType::Cursor);
        assert_eq!(out.containers[1].slots[0].count, 10);
        assert_eq!(out.containers[1].slots[0].stack_network_id, 1);
    }

    #[test]
    fn click_carries_window_and_state_id() {
        let mut h = chest();
        h.session.open.as_mut().unwrap().state_id = 17;
        put(&mut h, 0, "minecraft:stone", 10);
        let out = run(&h, vec![take(10, chest_slot(0), cursor())]).unwrap();
        let ServerboundPacket::ContainerClick(click) = &out.outbound[0] else {
            panic!("expected a click");
        };
        assert_eq!(click.container_id, 3);
        assert_eq!(click.state_id, 17);
        assert_eq!(click.changed_slots, vec![(0, JavaItemStack::empty())]);
        assert_eq!(click.carried.count, 10);
    }

    #[test]
    fn half_stack_is_one_right_click_with_fresh_id() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 9);
        let out = run(&h, vec![take(5, chest_slot(0), cursor())]).unwrap();

        assert_eq!(clicks(&out), vec![(0, button::RIGHT, ClickMode::Pickup)]);
        assert_eq!(out.cursor.item.count, 5);
        assert_eq!(out.window[0].item.count, 4);
        assert_eq!(out.window[0].item.net_id, 1);
        assert_eq!(out.cursor.item.net_id, 2);
        assert_eq!(out.net_id, 2);
    }

    #[test]
    fn partial_take_puts_the_surplus_back() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        let out = run(&h, vec![take(3, chest_slot(0), cursor())]).unwrap();

        let c = clicks(&out);
        assert_eq!(c.len(), 8);
        assert_eq!(c[0], (0, button::LEFT, ClickMode::Pickup));
        assert!(c[1..].iter().all(|&click| click == (0, button::RIGHT, ClickMode::Pickup)));
        assert_eq!(out.cursor.item.count, 3);
        assert_eq!(out.window[0].item.count, 7);
    }

    #[test]
    fn chest_to_hotbar_moves_through_the_cursor() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        let hotbar = StackSlot::new(ContainerSlotType::Hotbar, 0);
        let out = run(&h, vec![take(10, chest_slot(0), hotbar)]).unwrap();

        assert_eq!(
            clicks(&out),
            vec![
                (0, button::LEFT, ClickMode::Pickup),
                (54, button::LEFT, ClickMode::Pickup),
            ]
        );
        assert!(out.cursor.item.is_empty());
        assert_eq!(out.player[0].item.count, 10);
        assert_eq!(out.player[0].item.net_id, 1);

        let regions: Vec<_> = out.containers.iter().map(|c| c.container).collect();
        assert_eq!(
            regions,
            vec![
                ContainerSlotType::LevelEntity,
                ContainerSlotType::Cursor,
                ContainerSlotType::Hotbar
            ]
        );
    }

    #[test]
    fn move_with_occupied_cursor_is_rejected() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        hold(&mut h, "minecraft:granite", 1);
        let hotbar = StackSlot::new(ContainerSlotType::Hotbar, 0);
        let err = run(&h, vec![take(10, chest_slot(0), hotbar)]).err();
        assert_eq!(err, Some(RequestError::CursorOccupied));
    }

    #[test]
    fn partial_place_uses_right_clicks() {
        let mut h = chest();
        hold(&mut h, "minecraft:stone", 8);
        let out = run(&h, vec![place(3, cursor(), chest_slot(4))]).unwrap();

        assert_eq!(clicks(&out), vec![(4, button::RIGHT, ClickMode::Pickup); 3]);
        assert_eq!(out.window[4].item.count, 3);
        assert_eq!(out.cursor.item.count, 5);
        assert_ne!(out.window[4].item.net_id, out.cursor.item.net_id);
    }

    #[test]
    fn place_onto_other_item_is_rejected() {
        let mut h = chest();
        put(&mut h, 4, "minecraft:granite", 2);
        hold(&mut h, "minecraft:stone", 8);
        let err = run(&h, vec![place(8, cursor(), chest_slot(4))]).err();
        assert_eq!(err, Some(RequestError::ItemMismatch));
    }

    #[test]
    fn place_respects_stack_limit() {
        let mut h = chest();
        put(&mut h, 4, "minecraft:ender_pearl", 15);
        hold(&mut h, "minecraft:ender_pearl", 4);
        let err = run(&h, vec![place(4, cursor(), chest_slot(4))]).err();
        assert_eq!(err, Some(RequestError::NoSpace { wanted: 4, room: 1 }));

        let out = run(&h, vec![place(1, cursor(), chest_slot(4))]).unwrap();
        assert_eq!(out.window[4].item.count, 16);
        assert_eq!(out.cursor.item.count, 3);
    }

    #[test]
    fn failed_action_discards_earlier_ones() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        let err = run(
            &h,
            vec![
                take(10, chest_slot(0), cursor()),
                take(1, chest_slot(1), cursor()),
            ],
        )
        .err();
        assert_eq!(err, Some(RequestError::EmptySource));
        assert_eq!(h.session.open_inventory().unwrap().item(0).unwrap().count, 10);
        assert!(h.session.player().cursor.item.is_empty());
    }

    #[test]
    fn drop_from_cursor_clicks_outside() {
        let mut h = chest();
        hold(&mut h, "minecraft:stone", 4);
        let drop = |count| StackAction::Drop {
            count,
            src: cursor(),
            randomly: false,
        };

        let out = run(&h, vec![drop(4)]).unwrap();
        assert_eq!(clicks(&out), vec![(OUTSIDE_SLOT, button::LEFT, ClickMode::Pickup)]);
        assert!(out.cursor.item.is_empty());

        let out = run(&h, vec![drop(2)]).unwrap();
        assert_eq!(clicks(&out), vec![(OUTSIDE_SLOT, button::RIGHT, ClickMode::Pickup); 2]);
        assert_eq!(out.cursor.item.count, 2);
    }

    #[test]
    fn drop_from_slot_throws() {
        let mut h = chest();
        put(&mut h, 2, "minecraft:stone", 5);
        let drop = |count| StackAction::Drop {
            count,
            src: chest_slot(2),
            randomly: false,
        };

        let out = run(&h, vec![drop(2)]).unwrap();
        assert_eq!(clicks(&out), vec![(2, button::THROW_ONE, ClickMode::Throw); 2]);
        assert_eq!(out.window[2].item.count, 3);

        let out = run(&h, vec![drop(5)]).unwrap();
        assert_eq!(clicks(&out), vec![(2, button::THROW_STACK, ClickMode::Throw)]);
        assert!(out.window[2].item.is_empty());
    }

    #[test]
    fn swap_two_slots() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        put(&mut h, 1, "minecraft:granite", 3);
        let out = run(
            &h,
            vec![StackAction::Swap {
                src: chest_slot(0),
                dst: chest_slot(1),
            }],
        )
        .unwrap();

        assert_eq!(
            clicks(&out),
            vec![
                (0, button::LEFT, ClickMode::Pickup),
                (1, button::LEFT, ClickMode::Pickup),
                (0, button::LEFT, ClickMode::Pickup),
            ]
        );
        assert_eq!(out.window[0].item.java_id, h.java_id("minecraft:granite"));
        assert_eq!(out.window[1].item.java_id, h.java_id("minecraft:stone"));
        assert!(out.cursor.item.is_empty());
    }

    #[test]
    fn consume_only_touches_the_mirror() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        let out = run(
            &h,
            vec![StackAction::Consume {
                count: 4,
                src: chest_slot(0),
            }],
        )
        .unwrap();
        assert!(out.outbound.is_empty());
        assert_eq!(out.window[0].item.count, 6);
        assert!(out.window[0].provisional);
    }

    #[test]
    fn unknown_actions_follow_policy() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        let destroy = StackAction::Destroy {
            count: 1,
            src: chest_slot(0),
        };
        let err = run(&h, vec![destroy.clone()]).err();
        assert_eq!(err, Some(RequestError::Unsupported(4)));

        let h = h.with_options(PipelineOptions {
            reject_unknown_actions: false,
        });
        let out = run(&h, vec![destroy]).unwrap();
        assert!(out.outbound.is_empty());
        assert!(out.containers.is_empty());
    }

    #[test]
    fn bad_addresses_are_rejected() {
        let mut h = chest();
        put(&mut h, 0, "minecraft:stone", 10);
        let barrel = StackSlot::new(ContainerSlotType::Barrel, 0);
        assert_eq!(
            run(&h, vec![take(10, barrel, cursor())]).err(),
            Some(RequestError::UnmappedSlot {
                container: ContainerSlotType::Barrel,
                slot: 0
            })
        );
        assert_eq!(
            run(&h, vec![take(1, chest_slot(200), cursor())]).err(),
            Some(RequestError::SlotOutOfRange(200))
        );
        assert!(matches!(
            run(&h, vec![take(1, chest_slot(30), cursor())]).err(),
            Some(RequestError::UnmappedSlot { .. })
        ));
    }

    #[test]
    fn output_slot_refuses_placement() {
        let mut h = Harness::new(BlockStateMap::new());
        h.session.open = Some(Inventory::new(
            2,
            3,
            Some(MenuType::Crafting),
            CraftingTableTranslator::new().size(),
        ));
        hold(&mut h, "minecraft:stone", 4);
        let output = StackSlot::new(ContainerSlotType::CraftingOutput, ui_slot::CREATED_OUTPUT);
        assert_eq!(
            run(&h, vec![place(4, cursor(), output)]).err(),
            Some(RequestError::OutputSlot(0))
        );
    }

    #[test]
    fn player_window_is_used_without_container() {
        let mut h = Harness::new(BlockStateMap::new());
        let stone = h.java_id("minecraft:stone");
        h.session
            .player
            .apply_authoritative(0, MirroredItemStack::new(stone, 5, 1));
        let out = run(
            &h,
            vec![take(
                5,
                StackSlot::new(ContainerSlotType::Hotbar, 0),
                StackSlot::new(ContainerSlotType::Inventory, 9),
            )],
        )
        .unwrap();

        // Hotbar 0 is Java slot 36 and main slot 9 is Java slot 9 of window 0.
        assert_eq!(
            clicks(&out),
            vec![
                (36, button::LEFT, ClickMode::Pickup),
                (9, button::LEFT, ClickMode::Pickup),
            ]
        );
        assert_eq!(out.player[9].item.count, 5);
        assert!(out.player[0].item.is_empty());
    }
}
