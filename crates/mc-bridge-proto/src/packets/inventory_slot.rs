//! InventorySlot (0x32): Server → Client.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::container::FullContainerName;
use crate::item_stack::ItemStack;
use crate::types::VarUInt32;

/// One slot of a window, as the server wants the client to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySlot {
    pub window_id: u32,
    pub slot: u32,
    /// Region the slot belongs to.
    pub container: FullContainerName,
    pub item: ItemStack,
}

impl ProtoEncode for InventorySlot {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.window_id).proto_encode(buf);
        VarUInt32(self.slot).proto_encode(buf);
        self.container.proto_encode(buf);
        // Bundle storage item, unused for plain containers.
        ItemStack::empty().proto_encode(buf);
        self.item.proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerSlotType;
    use bytes::BytesMut;

    #[test]
    fn cursor_slot_layout() {
        let pkt = InventorySlot {
            window_id: 124,
            slot: 0,
            container: FullContainerName::new(ContainerSlotType::Cursor),
            item: ItemStack::empty(),
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[124, 0, 59, 0, 0, 0]);
    }
}
