//! Java VarInt: LEB128 over the two's complement bit pattern, no ZigZag.

use bytes::BufMut;

use mc_bridge_proto::codec::ProtoEncode;
use mc_bridge_proto::types::VarUInt32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaVarInt(pub i32);

impl ProtoEncode for JavaVarInt {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.0 as u32).proto_encode(buf);
    }
}
