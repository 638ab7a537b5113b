//! Variable-length integers and block positions.
//!
//! Bedrock signed varints are ZigZag + LEB128; unsigned ones are plain LEB128.
//! The Java side reuses [`VarUInt32`] for its (non-ZigZag) VarInt by encoding
//! the two's complement bit pattern.

use std::fmt;

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

#[derive(Debug, Error)]
pub enum VarIntError {
    #[error("buffer too short")]
    BufferTooShort,
    #[error("VarInt is too long (more than {max_bytes} bytes)")]
    TooManyBytes { max_bytes: usize },
}

fn write_leb128(buf: &mut impl BufMut, mut value: u64) {
    loop {
        if value & !0x7F == 0 {
            buf.put_u8(value as u8);
            return;
        }
        buf.put_u8((value & 0x7F | 0x80) as u8);
        value >>= 7;
    }
}

fn read_leb128(buf: &mut impl Buf, max_bytes: usize) -> Result<u64, VarIntError> {
    let mut result: u64 = 0;
    for i in 0..max_bytes {
        if !buf.has_remaining() {
            return Err(VarIntError::BufferTooShort);
        }
        let byte = buf.get_u8();
        result |= ((byte & 0x7F) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(VarIntError::TooManyBytes { max_bytes })
}

// ---------------------------------------------------------------------------
// VarInt (i32, ZigZag + LEB128)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarInt(pub i32);

impl VarInt {
    pub const MAX_BYTES: usize = 5;
}

impl ProtoEncode for VarInt {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        let zigzag = ((self.0 << 1) ^ (self.0 >> 31)) as u32;
        write_leb128(buf, zigzag as u64);
    }
}

impl ProtoDecode for VarInt {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let raw = read_leb128(buf, Self::MAX_BYTES)? as u32;
        Ok(VarInt(((raw >> 1) as i32) ^ -((raw & 1) as i32)))
    }
}

impl fmt::Debug for VarInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarInt({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// VarUInt32 (u32, plain LEB128)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarUInt32(pub u32);

impl VarUInt32 {
    pub const MAX_BYTES: usize = 5;
}

impl ProtoEncode for VarUInt32 {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_leb128(buf, self.0 as u64);
    }
}

impl ProtoDecode for VarUInt32 {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(VarUInt32(read_leb128(buf, Self::MAX_BYTES)? as u32))
    }
}

impl fmt::Debug for VarUInt32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarUInt32({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// VarLong (i64, ZigZag + LEB128)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarLong(pub i64);

impl VarLong {
    pub const MAX_BYTES: usize = 10;
}

impl ProtoEncode for VarLong {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        let zigzag = ((self.0 << 1) ^ (self.0 >> 63)) as u64;
        write_leb128(buf, zigzag);
    }
}

impl ProtoDecode for VarLong {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let raw = read_leb128(buf, Self::MAX_BYTES)?;
        Ok(VarLong(((raw >> 1) as i64) ^ -((raw & 1) as i64)))
    }
}

impl fmt::Debug for VarLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarLong({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// BlockPos (i32 x, y, z)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Wire format: VarInt32(x, zigzag) + VarUInt32(y) + VarInt32(z, zigzag).
impl ProtoEncode for BlockPos {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.x).proto_encode(buf);
        VarUInt32(self.y as u32).proto_encode(buf);
        VarInt(self.z).proto_encode(buf);
    }
}

impl ProtoDecode for BlockPos {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let x = VarInt::proto_decode(buf)?.0;
        let y = VarUInt32::proto_decode(buf)?.0 as i32;
        let z = VarInt::proto_decode(buf)?.0;
        Ok(Self { x, y, z })
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn varint_zigzag_small_values() {
        let mut buf = BytesMut::new();
        VarInt(-1).proto_encode(&mut buf);
        VarInt(1).proto_encode(&mut buf);
        assert_eq!(&buf[..], &[0x01, 0x02]);
    }

    #[test]
    fn varint_extremes_decode() {
        for value in [i32::MIN, -64, 0, 63, i32::MAX] {
            let mut buf = BytesMut::new();
            VarInt(value).proto_encode(&mut buf);
            assert_eq!(VarInt::proto_decode(&mut buf.freeze()).unwrap().0, value);
        }
    }

    #[test]
    fn varuint32_multi_byte() {
        let mut buf = BytesMut::new();
        VarUInt32(300).proto_encode(&mut buf);
        assert_eq!(&buf[..], &[0xAC, 0x02]);
    }

    #[test]
    fn varuint32_too_long() {
        let data: &[u8] = &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        assert!(VarUInt32::proto_decode(&mut &data[..]).is_err());
    }

    #[test]
    fn varint_truncated() {
        let data: &[u8] = &[0x80];
        assert!(VarInt::proto_decode(&mut &data[..]).is_err());
    }

    #[test]
    fn varlong_negative() {
        let mut buf = BytesMut::new();
        VarLong(-1).proto_encode(&mut buf);
        assert_eq!(&buf[..], &[0x01]);
        assert_eq!(VarLong::proto_decode(&mut buf.freeze()).unwrap().0, -1);
    }

    #[test]
    fn block_pos_wire_layout() {
        let mut buf = BytesMut::new();
        BlockPos::new(10, 64, -5).proto_encode(&mut buf);
        // zigzag(10)=20, 64, zigzag(-5)=9
        assert_eq!(&buf[..], &[20, 64, 9]);
        let decoded = BlockPos::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, BlockPos::new(10, 64, -5));
    }
}
