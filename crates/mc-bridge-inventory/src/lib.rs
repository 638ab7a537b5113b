//! Inventory translation between Bedrock clients and a Java server.
//!
//! A [`session::BridgeSession`] mirrors the open container and the player's
//! inventory. Bedrock stack requests are resolved through the translator
//! registered for the open menu type and turned into Java container clicks;
//! Java slot updates flow back through the same translator.

pub mod click;
pub mod error;
pub mod inventory;
pub mod item;
pub mod reconcile;
pub mod request;
pub mod session;
pub mod translator;
pub mod window;

pub use error::{OpenError, RequestError};
pub use inventory::{Inventory, PlayerInventory};
pub use item::MirroredItemStack;
pub use session::{BridgeSession, PipelineOptions};
pub use translator::{InventoryTranslator, TranslatorRegistry};
