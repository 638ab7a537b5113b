//! Reasons a stack request is rejected or a container refuses to open.
//!
//! None of these leave the process: the client only ever sees a reject
//! status or a window that did not open.

use mc_bridge_java::menu::MenuType;
use mc_bridge_proto::container::ContainerSlotType;
use mc_bridge_proto::types::BlockPos;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Malformed(&'static str),

    #[error("input slot is empty")]
    EmptyInput,

    #[error("no stonecutter recipes for java item {input}")]
    NoRecipe { input: i32 },

    #[error("java item {claimed} is not a stonecutter result for java item {input}")]
    UnresolvableClaim { input: i32, claimed: i32 },

    #[error("bedrock item {runtime_id} has no java mapping")]
    UntranslatableItem { runtime_id: i32 },

    #[error("slot {container:?}:{slot} does not belong to this window")]
    UnmappedSlot { container: ContainerSlotType, slot: u8 },

    #[error("java slot {0} is outside the window")]
    SlotOutOfRange(i32),

    #[error("source slot is empty")]
    EmptySource,

    #[error("not enough items: wanted {wanted}, have {available}")]
    NotEnoughItems { wanted: u8, available: u8 },

    #[error("cursor is holding an item")]
    CursorOccupied,

    #[error("destination holds a different item")]
    ItemMismatch,

    #[error("destination has room for {room}, wanted {wanted}")]
    NoSpace { wanted: u8, room: u8 },

    #[error("java slot {0} is an output slot")]
    OutputSlot(i32),

    #[error("unsupported action type {0}")]
    Unsupported(u8),

    #[error("stack request {request_id} arrived with no window")]
    NoWindow { request_id: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenError {
    #[error("no translator for menu {0:?}")]
    UnsupportedMenu(MenuType),

    #[error("no block interaction precedes the open")]
    NoInteraction,

    #[error("no block known at {0}")]
    MissingBlock(BlockPos),

    #[error("block {state} at {pos} does not match the menu")]
    StructuralMismatch { pos: BlockPos, state: String },
}
