//! Bedrock item stacks in `NetworkItemStackDescriptor` form.

use bytes::{Buf, BufMut};

use crate::codec::{ensure_remaining, read_string, read_u8, write_string, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{VarInt, VarUInt32};

/// User-data marker announcing a network NBT compound.
const NBT_MARKER: u32 = 0xFFFF_FFFF;
const NBT_VERSION: u8 = 1;

/// A single item stack in the Bedrock protocol.
///
/// `runtime_id == 0` means the slot is empty (air).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemStack {
    /// Item runtime ID from the StartGame item table. 0 = air/empty.
    pub runtime_id: i32,
    pub count: u16,
    pub metadata: u16,
    pub block_runtime_id: i32,
    /// Network NBT compound bytes, without the marker and version byte.
    pub nbt_data: Vec<u8>,
    pub can_place_on: Vec<String>,
    pub can_destroy: Vec<String>,
    /// Server-assigned stack network ID. 0 = none.
    pub stack_network_id: i32,
}

impl ItemStack {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(runtime_id: i32, count: u16) -> Self {
        Self {
            runtime_id,
            count,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runtime_id == 0 || self.count == 0
    }
}

/// Wire format:
/// ```text
/// VarInt(runtime_id), 0 = empty, return early
/// u16_le(count)
/// VarUInt32(metadata)
/// u8(has_stack_id) + optional VarInt(stack_network_id)
/// VarInt(block_runtime_id)
/// VarUInt32(user_data_marker) + optional NBT
/// VarInt(can_place_on_count) + strings
/// VarInt(can_destroy_count) + strings
/// ```
impl ProtoEncode for ItemStack {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.runtime_id).proto_encode(buf);
        if self.runtime_id == 0 {
            return;
        }

        buf.put_u16_le(self.count);
        VarUInt32(self.metadata as u32).proto_encode(buf);

        if self.stack_network_id != 0 {
            buf.put_u8(1);
            VarInt(self.stack_network_id).proto_encode(buf);
        } else {
            buf.put_u8(0);
        }

        VarInt(self.block_runtime_id).proto_encode(buf);

        if self.nbt_data.is_empty() {
            VarUInt32(0).proto_encode(buf);
        } else {
            VarUInt32(NBT_MARKER).proto_encode(buf);
            buf.put_u8(NBT_VERSION);
            buf.put_slice(&self.nbt_data);
        }

        VarInt(self.can_place_on.len() as i32).proto_encode(buf);
        for s in &self.can_place_on {
            write_string(buf, s);
        }
        VarInt(self.can_destroy.len() as i32).proto_encode(buf);
        for s in &self.can_destroy {
            write_string(buf, s);
        }
    }
}

impl ProtoDecode for ItemStack {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let runtime_id = VarInt::proto_decode(buf)?.0;
        if runtime_id == 0 {
            return Ok(Self::empty());
        }

        ensure_remaining(buf, 2)?;
        let count = buf.get_u16_le();
        let metadata = VarUInt32::proto_decode(buf)?.0 as u16;

        let stack_network_id = if read_u8(buf)? != 0 {
            VarInt::proto_decode(buf)?.0
        } else {
            0
        };

        let block_runtime_id = VarInt::proto_decode(buf)?.0;
        let nbt_data = decode_user_data(buf)?;

        let mut can_place_on = Vec::new();
        for _ in 0..VarInt::proto_decode(buf)?.0 {
            can_place_on.push(read_string(buf)?);
        }
        let mut can_destroy = Vec::new();
        for _ in 0..VarInt::proto_decode(buf)?.0 {
            can_destroy.push(read_string(buf)?);
        }

        Ok(Self {
            runtime_id,
            count,
            metadata,
            block_runtime_id,
            nbt_data,
            can_place_on,
            can_destroy,
            stack_network_id,
        })
    }
}

fn decode_user_data(buf: &mut impl Buf) -> Result<Vec<u8>, ProtoError> {
    let marker = VarUInt32::proto_decode(buf)?.0;
    match marker {
        0 => Ok(Vec::new()),
        NBT_MARKER => {
            let version = read_u8(buf)?;
            if version != NBT_VERSION {
                return Err(ProtoError::InvalidData(format!(
                    "unsupported item NBT version {version}"
                )));
            }
            let mut nbt = NbtCapture {
                buf,
                out: Vec::new(),
            };
            nbt.compound_body()?;
            Ok(nbt.out)
        }
        len => {
            // Legacy length-prefixed user data: opaque to us, skip it.
            ensure_remaining(buf, len as usize)?;
            buf.advance(len as usize);
            Ok(Vec::new())
        }
    }
}

/// Copies one network-format NBT compound out of a buffer byte for byte.
///
/// `Buf` cannot rewind, so the raw bytes are recorded while the tag tree is
/// walked to find where the compound ends.
struct NbtCapture<'a, B: Buf> {
    buf: &'a mut B,
    out: Vec<u8>,
}

impl<B: Buf> NbtCapture<'_, B> {
    fn take(&mut self, n: usize) -> Result<(), ProtoError> {
        ensure_remaining(&*self.buf, n)?;
        let bytes = self.buf.copy_to_bytes(n);
        self.out.extend_from_slice(&bytes);
        Ok(())
    }

    fn byte(&mut self) -> Result<u8, ProtoError> {
        let b = read_u8(&mut *self.buf)?;
        self.out.push(b);
        Ok(b)
    }

    /// Copy a LEB128 value and return it undecoded (ZigZag left to the caller).
    fn leb128(&mut self) -> Result<u64, ProtoError> {
        let mut result = 0u64;
        for i in 0..10 {
            let b = self.byte()?;
            result |= ((b & 0x7F) as u64) << (7 * i);
            if b & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(ProtoError::InvalidData("NBT varint too long".into()))
    }

    fn zigzag_len(&mut self) -> Result<usize, ProtoError> {
        let raw = self.leb128()? as u32;
        let value = ((raw >> 1) as i32) ^ -((raw & 1) as i32);
        usize::try_from(value).map_err(|_| ProtoError::InvalidData("negative NBT length".into()))
    }

    fn compound_body(&mut self) -> Result<(), ProtoError> {
        // The root compound starts with its own tag id and (empty) name.
        let root = self.byte()?;
        if root != 10 {
            return Err(ProtoError::InvalidData(format!(
                "item NBT root is tag {root}, expected compound"
            )));
        }
        let name_len = self.leb128()? as usize;
        self.take(name_len)?;
        self.named_tags()
    }

    fn named_tags(&mut self) -> Result<(), ProtoError> {
        loop {
            let tag = self.byte()?;
            if tag == 0 {
                return Ok(());
            }
            let name_len = self.leb128()? as usize;
            self.take(name_len)?;
            self.payload(tag)?;
        }
    }

    fn payload(&mut self, tag: u8) -> Result<(), ProtoError> {
        match tag {
            1 => self.take(1),
            2 => self.take(2),
            3 | 4 => self.leb128().map(drop),
            5 => self.take(4),
            6 => self.take(8),
            7 => {
                let len = self.zigzag_len()?;
                self.take(len)
            }
            8 => {
                let len = self.leb128()? as usize;
                self.take(len)
            }
            9 => {
                let element = self.byte()?;
                for _ in 0..self.zigzag_len()? {
                    self.payload(element)?;
                }
                Ok(())
            }
            10 => self.named_tags(),
            11 | 12 => {
                for _ in 0..self.zigzag_len()? {
                    self.leb128()?;
                }
                Ok(())
            }
            other => Err(ProtoError::InvalidData(format!("unknown NBT tag type {other}"))),
        }
    }
}
