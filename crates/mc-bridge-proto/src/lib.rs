//! Bedrock Edition wire types used by the inventory bridge.
//!
//! Only the slice of the protocol that the inventory translators touch lives
//! here: item stacks, container slot regions, stack requests/responses and the
//! container window packets.

pub mod codec;
pub mod container;
pub mod error;
pub mod item_stack;
pub mod packets;
pub mod types;
