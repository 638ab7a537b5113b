//! Per-client bridge state.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use mc_bridge_java::block::WorldView;
use mc_bridge_java::packets::ServerboundPacket;
use mc_bridge_proto::packets::BedrockPacket;
use mc_bridge_proto::types::BlockPos;
use mc_bridge_registry::Registries;

use crate::inventory::{Inventory, PlayerInventory};
use crate::item::ItemTranslator;
use crate::translator::player::{PlayerInventoryTranslator, PLAYER_WINDOW_SIZE};
use crate::translator::{InventoryTranslator, TranslatorRegistry};

/// Knobs for the stack request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Reject a batch containing an action the click planner cannot
    /// express. When false such actions are skipped.
    pub reject_unknown_actions: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            reject_unknown_actions: true,
        }
    }
}

/// Inventory state of one bridged player.
///
/// All mutation happens on the task that owns the session, in the order
/// packets arrive. Outbound packets are queued on unbounded channels and
/// never awaited.
pub struct BridgeSession {
    protocol_version: u32,
    registries: Arc<Registries>,
    translators: Arc<TranslatorRegistry>,
    player_translator: Arc<dyn InventoryTranslator>,
    options: PipelineOptions,
    world: Arc<dyn WorldView + Send + Sync>,
    java_tx: UnboundedSender<ServerboundPacket>,
    bedrock_tx: UnboundedSender<BedrockPacket>,
    last_interaction: Option<BlockPos>,
    /// Last stack network id handed out; ids start at 1.
    pub(crate) net_id: i32,
    pub(crate) player: PlayerInventory,
    /// Java window 0: crafting grid and armor.
    pub(crate) player_window: Inventory,
    pub(crate) open: Option<Inventory>,
}

impl BridgeSession {
    pub fn new(
        protocol_version: u32,
        registries: Arc<Registries>,
        translators: Arc<TranslatorRegistry>,
        world: Arc<dyn WorldView + Send + Sync>,
        java_tx: UnboundedSender<ServerboundPacket>,
        bedrock_tx: UnboundedSender<BedrockPacket>,
    ) -> Self {
        Self {
            protocol_version,
            registries,
            translators,
            player_translator: Arc::new(PlayerInventoryTranslator),
            options: PipelineOptions::default(),
            world,
            java_tx,
            bedrock_tx,
            last_interaction: None,
            net_id: 0,
            player: PlayerInventory::new(),
            player_window: Inventory::new(0, 0, None, PLAYER_WINDOW_SIZE),
            open: None,
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn protocol_version(&self) -> u32 {
        self.protocol_version
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    pub fn world(&self) -> &(dyn WorldView + Send + Sync) {
        &*self.world
    }

    pub fn items(&self) -> ItemTranslator<'_> {
        ItemTranslator::new(&self.registries, self.protocol_version)
    }

    /// Record the block the player last interacted with; containers opened
    /// afterwards are validated against it.
    pub fn set_last_interaction(&mut self, pos: BlockPos) {
        self.last_interaction = Some(pos);
    }

    pub fn last_interaction(&self) -> Option<BlockPos> {
        self.last_interaction
    }

    pub fn next_net_id(&mut self) -> i32 {
        self.net_id += 1;
        self.net_id
    }

    pub fn player(&self) -> &PlayerInventory {
        &self.player
    }

    pub fn open_inventory(&self) -> Option<&Inventory> {
        self.open.as_ref()
    }

    pub fn player_window(&self) -> &Inventory {
        &self.player_window
    }

    /// The window stack requests currently address and its translator.
    pub(crate) fn active_window(&self) -> Option<(Arc<dyn InventoryTranslator>, &Inventory)> {
        match &self.open {
            Some(inventory) => {
                let menu = inventory.menu?;
                let translator = self.translators.get(&menu)?;
                Some((Arc::clone(translator), inventory))
            }
            None => Some((Arc::clone(&self.player_translator), &self.player_window)),
        }
    }

    pub(crate) fn translator_for(&self, inventory: &Inventory) -> Option<Arc<dyn InventoryTranslator>> {
        match inventory.menu {
            Some(menu) => self.translators.get(&menu).cloned(),
            None => Some(Arc::clone(&self.player_translator)),
        }
    }

    pub(crate) fn translators(&self) -> &TranslatorRegistry {
        &self.translators
    }

    pub fn send_java(&self, packet: ServerboundPacket) {
        if self.java_tx.send(packet).is_err() {
            warn!("java channel closed, dropping serverbound packet");
        }
    }

    pub fn send_bedrock(&self, packet: BedrockPacket) {
        if self.bedrock_tx.send(packet).is_err() {
            warn!("bedrock channel closed, dropping packet");
        }
    }
}
