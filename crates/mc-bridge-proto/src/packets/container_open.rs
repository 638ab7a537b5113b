//! ContainerOpen (0x2E): Server → Client.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::container::ContainerType;
use crate::types::{BlockPos, VarLong};

/// Opens a container window on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerOpen {
    pub window_id: u8,
    pub container_type: ContainerType,
    /// Position of the block the window belongs to.
    pub position: BlockPos,
    /// Entity unique ID (-1 for block containers).
    pub entity_unique_id: i64,
}

impl ProtoEncode for ContainerOpen {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.window_id);
        buf.put_i8(self.container_type.id());
        self.position.proto_encode(buf);
        VarLong(self.entity_unique_id).proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_container_open() {
        let pkt = ContainerOpen {
            window_id: 1,
            container_type: ContainerType::Stonecutter,
            position: BlockPos::new(10, 64, -5),
            entity_unique_id: -1,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(buf[0], 1);
        assert_eq!(buf[1], 29);
        assert_eq!(&buf[2..5], &[20, 64, 9]);
        assert_eq!(buf[5], 1); // VarLong(-1)
    }
}
