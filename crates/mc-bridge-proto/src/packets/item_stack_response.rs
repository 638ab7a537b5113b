//! ItemStackResponse (0x94): Server → Client.
//!
//! Exactly one entry answers each request of an ItemStackRequest. Accepted
//! entries carry the slot values the server ended up with so the client can
//! correct its prediction.

use bytes::BufMut;

use crate::codec::{write_string, ProtoEncode};
use crate::container::ContainerSlotType;
use crate::types::{VarInt, VarUInt32};

/// Outcome of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResponseStatus {
    Ok = 0,
    Error = 1,
}

/// Resulting state of a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackResponseSlot {
    pub slot: u8,
    pub hotbar_slot: u8,
    pub count: u8,
    pub stack_network_id: i32,
    /// Custom name (empty string if none).
    pub custom_name: String,
    pub durability_correction: i32,
}

impl ProtoEncode for StackResponseSlot {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.slot);
        buf.put_u8(self.hotbar_slot);
        buf.put_u8(self.count);
        VarInt(self.stack_network_id).proto_encode(buf);
        write_string(buf, &self.custom_name);
        VarInt(self.durability_correction).proto_encode(buf);
    }
}

/// Slot updates grouped by region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackResponseContainer {
    pub container: ContainerSlotType,
    pub slots: Vec<StackResponseSlot>,
}

impl ProtoEncode for StackResponseContainer {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        // FullContainerName: region id + dynamic container id
        buf.put_u8(self.container.id());
        VarUInt32(0).proto_encode(buf);
        VarUInt32(self.slots.len() as u32).proto_encode(buf);
        for slot in &self.slots {
            slot.proto_encode(buf);
        }
    }
}

/// Response for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackResponseEntry {
    pub status: ResponseStatus,
    /// Must match the request_id from the ItemStackRequest.
    pub request_id: i32,
    /// Slot corrections; always empty for rejected requests.
    pub containers: Vec<StackResponseContainer>,
}

impl StackResponseEntry {
    pub fn accept(request_id: i32, containers: Vec<StackResponseContainer>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            request_id,
            containers,
        }
    }

    pub fn reject(request_id: i32) -> Self {
        Self {
            status: ResponseStatus::Error,
            request_id,
            containers: Vec::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

impl ProtoEncode for StackResponseEntry {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.status as u8);
        VarInt(self.request_id).proto_encode(buf);
        if self.status == ResponseStatus::Ok {
            VarUInt32(self.containers.len() as u32).proto_encode(buf);
            for container in &self.containers {
                container.proto_encode(buf);
            }
        }
    }
}

/// The complete ItemStackResponse packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStackResponse {
    pub responses: Vec<StackResponseEntry>,
}

impl ProtoEncode for ItemStackResponse {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.responses.len() as u32).proto_encode(buf);
        for response in &self.responses {
            response.proto_encode(buf);
        }
    }
}
