//! Java item stacks as carried in container clicks.

use bytes::BufMut;

use mc_bridge_proto::codec::ProtoEncode;

use crate::varint::JavaVarInt;

/// A Java `Slot` value. `id == 0` or `count == 0` is the empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JavaItemStack {
    /// Java item network id (index into the Java item list).
    pub id: i32,
    pub count: i32,
    /// Named-root-less NBT compound, empty when the stack has none.
    pub nbt: Vec<u8>,
}

impl JavaItemStack {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(id: i32, count: i32) -> Self {
        Self {
            id,
            count,
            nbt: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0 || self.count <= 0
    }
}

/// Wire format: `bool present`, then `VarInt id`, `i8 count`, NBT (TAG_End when absent).
impl ProtoEncode for JavaItemStack {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        if self.is_empty() {
            buf.put_u8(0);
            return;
        }
        buf.put_u8(1);
        JavaVarInt(self.id).proto_encode(buf);
        buf.put_i8(self.count.clamp(i8::MIN as i32, i8::MAX as i32) as i8);
        if self.nbt.is_empty() {
            buf.put_u8(0);
        } else {
            buf.put_slice(&self.nbt);
        }
    }
}
