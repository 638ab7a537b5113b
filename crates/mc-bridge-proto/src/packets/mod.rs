//! Bedrock packets the inventory bridge reads or writes.

pub mod container_close;
pub mod container_open;
pub mod inventory_content;
pub mod inventory_slot;
pub mod item_stack_request;
pub mod item_stack_response;

use bytes::BufMut;

pub use container_close::ContainerClose;
pub use container_open::ContainerOpen;
pub use inventory_content::InventoryContent;
pub use inventory_slot::InventorySlot;
pub use item_stack_request::{ItemStackRequest, StackAction, StackRequest, StackSlot};
pub use item_stack_response::{
    ItemStackResponse, ResponseStatus, StackResponseContainer, StackResponseEntry,
    StackResponseSlot,
};

use crate::codec::ProtoEncode;

/// Game packet IDs.
pub mod id {
    pub const CONTAINER_OPEN: u32 = 0x2E;
    pub const CONTAINER_CLOSE: u32 = 0x2F;
    pub const INVENTORY_CONTENT: u32 = 0x31;
    pub const INVENTORY_SLOT: u32 = 0x32;
    pub const ITEM_STACK_REQUEST: u32 = 0x93;
    pub const ITEM_STACK_RESPONSE: u32 = 0x94;
}

/// A packet headed for the Bedrock client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BedrockPacket {
    ContainerOpen(ContainerOpen),
    ContainerClose(ContainerClose),
    InventoryContent(InventoryContent),
    InventorySlot(InventorySlot),
    ItemStackResponse(ItemStackResponse),
}

impl BedrockPacket {
    pub fn id(&self) -> u32 {
        match self {
            BedrockPacket::ContainerOpen(_) => id::CONTAINER_OPEN,
            BedrockPacket::ContainerClose(_) => id::CONTAINER_CLOSE,
            BedrockPacket::InventoryContent(_) => id::INVENTORY_CONTENT,
            BedrockPacket::InventorySlot(_) => id::INVENTORY_SLOT,
            BedrockPacket::ItemStackResponse(_) => id::ITEM_STACK_RESPONSE,
        }
    }
}

impl ProtoEncode for BedrockPacket {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        match self {
            BedrockPacket::ContainerOpen(p) => p.proto_encode(buf),
            BedrockPacket::ContainerClose(p) => p.proto_encode(buf),
            BedrockPacket::InventoryContent(p) => p.proto_encode(buf),
            BedrockPacket::InventorySlot(p) => p.proto_encode(buf),
            BedrockPacket::ItemStackResponse(p) => p.proto_encode(buf),
        }
    }
}
