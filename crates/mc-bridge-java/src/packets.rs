//! Serverbound inventory commands and the clientbound updates that settle them.

use bytes::BufMut;

use mc_bridge_proto::codec::ProtoEncode;

use crate::item_stack::JavaItemStack;
use crate::menu::MenuType;
use crate::varint::JavaVarInt;

/// Serverbound play packet IDs.
pub mod id {
    pub const CONTAINER_BUTTON_CLICK: i32 = 0x0D;
    pub const CONTAINER_CLICK: i32 = 0x0E;
    pub const CONTAINER_CLOSE: i32 = 0x0F;
}

/// Slot number Java uses for "outside the window" when throwing the cursor.
pub const OUTSIDE_SLOT: i16 = -999;

/// How a click is interpreted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickMode {
    /// Button 0 = left (whole stack), 1 = right (half / one).
    Pickup = 0,
    QuickMove = 1,
    Swap = 2,
    /// Button 0 = throw one, 1 = throw the stack.
    Throw = 4,
}

/// Button values of [`ClickMode::Pickup`].
pub mod button {
    pub const LEFT: i8 = 0;
    pub const RIGHT: i8 = 1;
    pub const THROW_ONE: i8 = 0;
    pub const THROW_STACK: i8 = 1;
}

/// Press a menu button; the stonecutter uses it to select a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerButtonClick {
    pub container_id: i32,
    pub button_id: i32,
}

/// One simulated click with the slot values the client expects afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerClick {
    pub container_id: i32,
    pub state_id: i32,
    pub slot: i16,
    pub button: i8,
    pub mode: ClickMode,
    pub changed_slots: Vec<(i16, JavaItemStack)>,
    pub carried: JavaItemStack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerClose {
    pub container_id: i32,
}

/// Packets the bridge sends toward the Java server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerboundPacket {
    ContainerButtonClick(ContainerButtonClick),
    ContainerClick(ContainerClick),
    ContainerClose(ContainerClose),
}

impl ServerboundPacket {
    pub fn id(&self) -> i32 {
        match self {
            ServerboundPacket::ContainerButtonClick(_) => id::CONTAINER_BUTTON_CLICK,
            ServerboundPacket::ContainerClick(_) => id::CONTAINER_CLICK,
            ServerboundPacket::ContainerClose(_) => id::CONTAINER_CLOSE,
        }
    }
}

impl ProtoEncode for ServerboundPacket {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        match self {
            ServerboundPacket::ContainerButtonClick(p) => {
                JavaVarInt(p.container_id).proto_encode(buf);
                JavaVarInt(p.button_id).proto_encode(buf);
            }
            ServerboundPacket::ContainerClick(p) => {
                JavaVarInt(p.container_id).proto_encode(buf);
                JavaVarInt(p.state_id).proto_encode(buf);
                buf.put_i16(p.slot);
                buf.put_i8(p.button);
                JavaVarInt(p.mode as i32).proto_encode(buf);
                JavaVarInt(p.changed_slots.len() as i32).proto_encode(buf);
                for (slot, item) in &p.changed_slots {
                    buf.put_i16(*slot);
                    item.proto_encode(buf);
                }
                p.carried.proto_encode(buf);
            }
            ServerboundPacket::ContainerClose(p) => {
                JavaVarInt(p.container_id).proto_encode(buf);
            }
        }
    }
}

/// `OpenScreen`: the server opened a menu for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenScreen {
    pub container_id: i32,
    pub menu: MenuType,
    pub title: String,
}

/// `ContainerSetSlot`: authoritative value of one window slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSetSlot {
    pub container_id: i32,
    pub state_id: i32,
    pub slot: i16,
    pub item: JavaItemStack,
}

/// `ContainerSetContent`: authoritative value of every window slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSetContent {
    pub container_id: i32,
    pub state_id: i32,
    pub items: Vec<JavaItemStack>,
    pub carried: JavaItemStack,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn button_click_layout() {
        let pkt = ServerboundPacket::ContainerButtonClick(ContainerButtonClick {
            container_id: 3,
            button_id: 2,
        });
        assert_eq!(pkt.id(), id::CONTAINER_BUTTON_CLICK);
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[3, 2]);
    }

    #[test]
    fn click_layout_with_changed_slot() {
        let pkt = ServerboundPacket::ContainerClick(ContainerClick {
            container_id: 1,
            state_id: 4,
            slot: 0,
            button: button::LEFT,
            mode: ClickMode::Pickup,
            changed_slots: vec![(0, JavaItemStack::empty())],
            carried: JavaItemStack::new(1, 64),
        });
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(
            &buf[..],
            &[1, 4, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 64, 0]
        );
    }

    #[test]
    fn throw_from_cursor_uses_outside_slot() {
        let pkt = ServerboundPacket::ContainerClick(ContainerClick {
            container_id: 1,
            state_id: 0,
            slot: OUTSIDE_SLOT,
            button: button::THROW_STACK,
            mode: ClickMode::Pickup,
            changed_slots: Vec::new(),
            carried: JavaItemStack::empty(),
        });
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[2..4], &(-999i16).to_be_bytes());
    }
}
