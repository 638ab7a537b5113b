//! Java Edition side of the bridge: the serverbound inventory commands the
//! translators emit, the clientbound slot updates they reconcile against, and
//! the block-state view used to validate container blocks.
//!
//! Framing, compression and decoding of clientbound packets belong to the
//! transport; this crate only models the values that cross into the
//! inventory layer.

pub mod block;
pub mod item_stack;
pub mod menu;
pub mod packets;
pub mod varint;
