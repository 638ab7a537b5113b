//! ContainerClose (0x2F): Bidirectional.

use bytes::{Buf, BufMut};

use crate::codec::{read_bool, read_u8, ProtoDecode, ProtoEncode};
use crate::container::ContainerType;
use crate::error::ProtoError;

/// Closes a container window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerClose {
    pub window_id: u8,
    pub container_type: ContainerType,
    /// Whether the server initiated this close.
    pub server_initiated: bool,
}

impl ProtoEncode for ContainerClose {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.window_id);
        buf.put_i8(self.container_type.id());
        buf.put_u8(self.server_initiated as u8);
    }
}

impl ProtoDecode for ContainerClose {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let window_id = read_u8(buf)?;
        // Clients echo whatever type they were opened with; the bridge
        // tracks the real type itself, so only the window matters here.
        let _container_type = read_u8(buf)?;
        let server_initiated = read_bool(buf)?;
        Ok(Self {
            window_id,
            container_type: ContainerType::Container,
            server_initiated,
        })
    }
}
