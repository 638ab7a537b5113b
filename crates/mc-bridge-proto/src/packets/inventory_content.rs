//! InventoryContent (0x31): Server → Client.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::container::FullContainerName;
use crate::item_stack::ItemStack;
use crate::types::VarUInt32;

/// Full contents of a container window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryContent {
    pub window_id: u32,
    pub items: Vec<ItemStack>,
    /// Region the items belong to.
    pub container: FullContainerName,
}

impl ProtoEncode for InventoryContent {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.window_id).proto_encode(buf);
        VarUInt32(self.items.len() as u32).proto_encode(buf);
        for item in &self.items {
            item.proto_encode(buf);
        }
        self.container.proto_encode(buf);
        ItemStack::empty().proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerSlotType;
    use bytes::BytesMut;

    #[test]
    fn encode_two_empty_slots() {
        let pkt = InventoryContent {
            window_id: 2,
            items: vec![ItemStack::empty(), ItemStack::empty()],
            container: FullContainerName::new(ContainerSlotType::LevelEntity),
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[2, 2, 0, 0, 7, 0, 0]);
    }
}
