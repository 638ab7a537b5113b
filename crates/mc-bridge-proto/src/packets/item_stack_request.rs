//! ItemStackRequest (0x93): Client → Server.
//!
//! One packet carries several requests; each request is a batch of actions the
//! client wants applied atomically, answered by one ItemStackResponse entry.

use bytes::Buf;

use crate::codec::{read_string, read_u8, ProtoDecode};
use crate::container::ContainerSlotType;
use crate::error::ProtoError;
use crate::item_stack::ItemStack;
use crate::types::{VarInt, VarUInt32};

/// Wire id of every action kind, as sent in the action header byte.
pub mod action_id {
    pub const TAKE: u8 = 0;
    pub const PLACE: u8 = 1;
    pub const SWAP: u8 = 2;
    pub const DROP: u8 = 3;
    pub const DESTROY: u8 = 4;
    pub const CONSUME: u8 = 5;
    pub const CREATE: u8 = 6;
    pub const CRAFT_RECIPE: u8 = 12;
    pub const CRAFT_RECIPE_AUTO: u8 = 13;
    pub const CRAFT_CREATIVE: u8 = 14;
    pub const CRAFT_RECIPE_OPTIONAL: u8 = 15;
    pub const CRAFT_GRINDSTONE: u8 = 16;
    pub const CRAFT_LOOM: u8 = 17;
    pub const CRAFT_NON_IMPLEMENTED_DEPRECATED: u8 = 18;
    pub const CRAFT_RESULTS_DEPRECATED: u8 = 19;
}

/// A reference to one slot: region tag plus offset inside the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackSlot {
    pub container: ContainerSlotType,
    pub slot: u8,
    /// Stack network ID the client believes is in this slot.
    pub stack_network_id: i32,
}

impl StackSlot {
    pub fn new(container: ContainerSlotType, slot: u8) -> Self {
        Self {
            container,
            slot,
            stack_network_id: 0,
        }
    }
}

impl ProtoDecode for StackSlot {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let container = ContainerSlotType::from_id(read_u8(buf)?);
        let slot = read_u8(buf)?;
        let stack_network_id = VarInt::proto_decode(buf)?.0;
        Ok(Self {
            container,
            slot,
            stack_network_id,
        })
    }
}

/// Individual action within a request.
#[derive(Debug, Clone, PartialEq)]
pub enum StackAction {
    Take {
        count: u8,
        src: StackSlot,
        dst: StackSlot,
    },
    Place {
        count: u8,
        src: StackSlot,
        dst: StackSlot,
    },
    Swap {
        src: StackSlot,
        dst: StackSlot,
    },
    Drop {
        count: u8,
        src: StackSlot,
        randomly: bool,
    },
    Destroy {
        count: u8,
        src: StackSlot,
    },
    Consume {
        count: u8,
        src: StackSlot,
    },
    Create {
        result_slot: u8,
    },
    CraftRecipe {
        recipe_network_id: u32,
    },
    CraftRecipeAuto {
        recipe_network_id: u32,
        times_crafted: u8,
        ingredients: Vec<u8>,
    },
    CraftCreative {
        creative_item_network_id: u32,
    },
    CraftRecipeOptional {
        recipe_network_id: u32,
        filter_string_index: i32,
    },
    CraftGrindstone {
        recipe_network_id: u32,
    },
    CraftLoom {
        pattern_id: String,
    },
    /// Marker sent by UIs the client crafts in without a recipe network ID
    /// (stonecutter, cartography table). Always followed by `CraftResultsDeprecated`.
    CraftNonImplementedDeprecated,
    /// The result items the client computed itself.
    CraftResultsDeprecated {
        result_items: Vec<ItemStack>,
        times_crafted: u8,
    },
    Unknown {
        action_type: u8,
    },
}

impl StackAction {
    /// Wire id of this action.
    pub fn action_type(&self) -> u8 {
        match self {
            StackAction::Take { .. } => action_id::TAKE,
            StackAction::Place { .. } => action_id::PLACE,
            StackAction::Swap { .. } => action_id::SWAP,
            StackAction::Drop { .. } => action_id::DROP,
            StackAction::Destroy { .. } => action_id::DESTROY,
            StackAction::Consume { .. } => action_id::CONSUME,
            StackAction::Create { .. } => action_id::CREATE,
            StackAction::CraftRecipe { .. } => action_id::CRAFT_RECIPE,
            StackAction::CraftRecipeAuto { .. } => action_id::CRAFT_RECIPE_AUTO,
            StackAction::CraftCreative { .. } => action_id::CRAFT_CREATIVE,
            StackAction::CraftRecipeOptional { .. } => action_id::CRAFT_RECIPE_OPTIONAL,
            StackAction::CraftGrindstone { .. } => action_id::CRAFT_GRINDSTONE,
            StackAction::CraftLoom { .. } => action_id::CRAFT_LOOM,
            StackAction::CraftNonImplementedDeprecated => {
                action_id::CRAFT_NON_IMPLEMENTED_DEPRECATED
            }
            StackAction::CraftResultsDeprecated { .. } => action_id::CRAFT_RESULTS_DEPRECATED,
            StackAction::Unknown { action_type } => *action_type,
        }
    }
}

/// A single request: the unit that is accepted or rejected as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct StackRequest {
    pub request_id: i32,
    pub actions: Vec<StackAction>,
    pub filter_strings: Vec<String>,
    pub filter_cause: i32,
}

impl StackRequest {
    pub fn new(request_id: i32, actions: Vec<StackAction>) -> Self {
        Self {
            request_id,
            actions,
            filter_strings: Vec::new(),
            filter_cause: 0,
        }
    }
}

/// The complete ItemStackRequest packet.
#[derive(Debug, Clone)]
pub struct ItemStackRequest {
    pub requests: Vec<StackRequest>,
    /// Decoding stopped before the declared request count was reached, either
    /// at an action of unknown layout or at bytes that failed to decode.
    /// Requests after that point cannot be located and get no response.
    pub truncated: bool,
}

impl ProtoDecode for ItemStackRequest {
    /// Fails only when not even the first request can be read.
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let count = VarUInt32::proto_decode(buf)?.0;
        let mut requests = Vec::with_capacity(count.min(64) as usize);
        for _ in 0..count {
            match decode_stack_request(buf) {
                Ok((request, complete)) => {
                    requests.push(request);
                    if !complete {
                        return Ok(Self {
                            requests,
                            truncated: true,
                        });
                    }
                }
                Err(e) if requests.is_empty() => return Err(e),
                Err(_) => {
                    return Ok(Self {
                        requests,
                        truncated: true,
                    })
                }
            }
        }
        Ok(Self {
            requests,
            truncated: false,
        })
    }
}

/// Decode one request. The flag is false when an unknown action ended it,
/// leaving the buffer somewhere inside that action's payload.
fn decode_stack_request(buf: &mut impl Buf) -> Result<(StackRequest, bool), ProtoError> {
    let request_id = VarInt::proto_decode(buf)?.0;

    let action_count = VarUInt32::proto_decode(buf)?.0;
    let mut actions = Vec::with_capacity(action_count.min(64) as usize);
    for _ in 0..action_count {
        let action = decode_stack_action(buf)?;
        let unknown = matches!(action, StackAction::Unknown { .. });
        actions.push(action);
        if unknown {
            return Ok((StackRequest::new(request_id, actions), false));
        }
    }

    let filter_count = VarUInt32::proto_decode(buf)?.0;
    let mut filter_strings = Vec::new();
    for _ in 0..filter_count {
        filter_strings.push(read_string(buf)?);
    }

    let filter_cause = VarInt::proto_decode(buf)?.0;

    let request = StackRequest {
        request_id,
        actions,
        filter_strings,
        filter_cause,
    };
    Ok((request, true))
}

fn decode_stack_action(buf: &mut impl Buf) -> Result<StackAction, ProtoError> {
    let action_type = read_u8(buf)?;

    let action = match action_type {
        action_id::TAKE => StackAction::Take {
            count: read_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
            dst: StackSlot::proto_decode(buf)?,
        },
        action_id::PLACE => StackAction::Place {
            count: read_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
            dst: StackSlot::proto_decode(buf)?,
        },
        action_id::SWAP => StackAction::Swap {
            src: StackSlot::proto_decode(buf)?,
            dst: StackSlot::proto_decode(buf)?,
        },
        action_id::DROP => StackAction::Drop {
            count: read_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
            randomly: read_u8(buf)? != 0,
        },
        action_id::DESTROY => StackAction::Destroy {
            count: read_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
        },
        action_id::CONSUME => StackAction::Consume {
            count: read_u8(buf)?,
            src: StackSlot::proto_decode(buf)?,
        },
        action_id::CREATE => StackAction::Create {
            result_slot: read_u8(buf)?,
        },
        action_id::CRAFT_RECIPE => StackAction::CraftRecipe {
            recipe_network_id: VarUInt32::proto_decode(buf)?.0,
        },
        action_id::CRAFT_RECIPE_AUTO => {
            let recipe_network_id = VarUInt32::proto_decode(buf)?.0;
            let times_crafted = read_u8(buf)?;
            let ingredient_count = VarUInt32::proto_decode(buf)?.0;
            let mut ingredients = Vec::new();
            for _ in 0..ingredient_count {
                ingredients.push(read_u8(buf)?);
            }
            StackAction::CraftRecipeAuto {
                recipe_network_id,
                times_crafted,
                ingredients,
            }
        }
        action_id::CRAFT_CREATIVE => StackAction::CraftCreative {
            creative_item_network_id: VarUInt32::proto_decode(buf)?.0,
        },
        action_id::CRAFT_RECIPE_OPTIONAL => StackAction::CraftRecipeOptional {
            recipe_network_id: VarUInt32::proto_decode(buf)?.0,
            filter_string_index: VarInt::proto_decode(buf)?.0,
        },
        action_id::CRAFT_GRINDSTONE => StackAction::CraftGrindstone {
            recipe_network_id: VarUInt32::proto_decode(buf)?.0,
        },
        action_id::CRAFT_LOOM => StackAction::CraftLoom {
            pattern_id: read_string(buf)?,
        },
        action_id::CRAFT_NON_IMPLEMENTED_DEPRECATED => StackAction::CraftNonImplementedDeprecated,
        action_id::CRAFT_RESULTS_DEPRECATED => {
            let item_count = VarUInt32::proto_decode(buf)?.0;
            let mut result_items = Vec::new();
            for _ in 0..item_count {
                result_items.push(ItemStack::proto_decode(buf)?);
            }
            StackAction::CraftResultsDeprecated {
                result_items,
                times_crafted: read_u8(buf)?,
            }
        }
        _ => StackAction::Unknown { action_type },
    };
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ProtoEncode;
    use bytes::{BufMut, Bytes, BytesMut};

    fn put_slot(buf: &mut BytesMut, container: ContainerSlotType, slot: u8, net_id: i32) {
        buf.put_u8(container.id());
        buf.put_u8(slot);
        VarInt(net_id).proto_encode(buf);
    }

    #[test]
    fn decode_take_request() {
        let mut buf = BytesMut::new();
        VarUInt32(1).proto_encode(&mut buf);
        VarInt(-3).proto_encode(&mut buf);
        VarUInt32(1).proto_encode(&mut buf);
        buf.put_u8(action_id::TAKE);
        buf.put_u8(16);
        put_slot(&mut buf, ContainerSlotType::LevelEntity, 4, 9);
        put_slot(&mut buf, ContainerSlotType::Cursor, 0, 0);
        VarUInt32(0).proto_encode(&mut buf);
        VarInt(0).proto_encode(&mut buf);

        let pkt = ItemStackRequest::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(pkt.requests.len(), 1);
        let request = &pkt.requests[0];
        assert_eq!(request.request_id, -3);
        match &request.actions[0] {
            StackAction::Take { count, src, dst } => {
                assert_eq!(*count, 16);
                assert_eq!(src.container, ContainerSlotType::LevelEntity);
                assert_eq!(src.slot, 4);
                assert_eq!(src.stack_network_id, 9);
                assert_eq!(dst.container, ContainerSlotType::Cursor);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn decode_stonecutter_craft() {
        let mut buf = BytesMut::new();
        VarUInt32(1).proto_encode(&mut buf);
        VarInt(7).proto_encode(&mut buf);
        VarUInt32(2).proto_encode(&mut buf);
        buf.put_u8(action_id::CRAFT_NON_IMPLEMENTED_DEPRECATED);
        buf.put_u8(action_id::CRAFT_RESULTS_DEPRECATED);
        VarUInt32(1).proto_encode(&mut buf);
        ItemStack::new(1120, 2).proto_encode(&mut buf);
        buf.put_u8(1);
        VarUInt32(0).proto_encode(&mut buf);
        VarInt(0).proto_encode(&mut buf);

        let pkt = ItemStackRequest::proto_decode(&mut buf.freeze()).unwrap();
        let actions = &pkt.requests[0].actions;
        assert_eq!(actions[0], StackAction::CraftNonImplementedDeprecated);
        match &actions[1] {
            StackAction::CraftResultsDeprecated {
                result_items,
                times_crafted,
            } => {
                assert_eq!(result_items[0].runtime_id, 1120);
                assert_eq!(result_items[0].count, 2);
                assert_eq!(*times_crafted, 1);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn unknown_action_stops_the_request() {
        let mut buf = BytesMut::new();
        VarUInt32(1).proto_encode(&mut buf);
        VarInt(1).proto_encode(&mut buf);
        VarUInt32(3).proto_encode(&mut buf);
        buf.put_u8(99);

        let pkt = ItemStackRequest::proto_decode(&mut buf.freeze()).unwrap();
        let actions = &pkt.requests[0].actions;
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type(), 99);
        assert!(pkt.truncated);
    }

    #[test]
    fn unknown_action_ends_the_packet() {
        // Request 2 holds action 99 with three payload bytes, then request 3
        // follows; none of it can be located once the payload is skipped.
        let mut buf = Bytes::from_static(&[2, 4, 1, 99, 7, 7, 7, 6, 0, 0, 0]);
        let pkt = ItemStackRequest::proto_decode(&mut buf).unwrap();
        assert!(pkt.truncated);
        assert_eq!(pkt.requests.len(), 1);
        assert_eq!(pkt.requests[0].request_id, 2);
    }

    #[test]
    fn later_garbage_keeps_earlier_requests() {
        let mut buf = BytesMut::new();
        VarUInt32(2).proto_encode(&mut buf);
        VarInt(5).proto_encode(&mut buf);
        VarUInt32(0).proto_encode(&mut buf);
        VarUInt32(0).proto_encode(&mut buf);
        VarInt(0).proto_encode(&mut buf);
        // Second request: id, one Swap action, then nothing.
        VarInt(6).proto_encode(&mut buf);
        VarUInt32(1).proto_encode(&mut buf);
        buf.put_u8(action_id::SWAP);

        let pkt = ItemStackRequest::proto_decode(&mut buf.freeze()).unwrap();
        assert!(pkt.truncated);
        assert_eq!(pkt.requests.len(), 1);
        assert_eq!(pkt.requests[0].request_id, 5);
    }

    #[test]
    fn complete_packet_is_not_truncated() {
        let mut buf = BytesMut::new();
        VarUInt32(2).proto_encode(&mut buf);
        for id in [1, 2] {
            VarInt(id).proto_encode(&mut buf);
            VarUInt32(0).proto_encode(&mut buf);
            VarUInt32(0).proto_encode(&mut buf);
            VarInt(0).proto_encode(&mut buf);
        }
        let pkt = ItemStackRequest::proto_decode(&mut buf.freeze()).unwrap();
        assert!(!pkt.truncated);
        assert_eq!(pkt.requests.len(), 2);
    }

    #[test]
    fn truncated_request_is_an_error() {
        let mut buf = BytesMut::new();
        VarUInt32(1).proto_encode(&mut buf);
        VarInt(1).proto_encode(&mut buf);
        VarUInt32(1).proto_encode(&mut buf);
        buf.put_u8(action_id::SWAP);
        buf.put_u8(ContainerSlotType::Hotbar.id());
        assert!(ItemStackRequest::proto_decode(&mut buf.freeze()).is_err());
    }
}
