//! The stack request pipeline: decode, plan against the active window,
//! commit or reject, respond.

use bytes::Buf;
use tracing::debug;

use mc_bridge_proto::codec::ProtoDecode;
use mc_bridge_proto::packets::{
    BedrockPacket, ItemStackRequest, ItemStackResponse, StackAction, StackRequest,
    StackResponseContainer, StackResponseEntry,
};

use crate::click::{Outcome, Transaction};
use crate::error::RequestError;
use crate::session::BridgeSession;

impl BridgeSession {
    /// Handle an `ItemStackRequest` packet body. Every request that could be
    /// decoded gets exactly one response entry, in order.
    pub fn handle_item_stack_request(&mut self, buf: &mut impl Buf) {
        let packet = match ItemStackRequest::proto_decode(buf) {
            Ok(p) => p,
            Err(e) => {
                debug!("Bad ItemStackRequest: {e}");
                return;
            }
        };
        if packet.truncated {
            debug!(
                "ItemStackRequest cut short after {} request(s)",
                packet.requests.len()
            );
        }

        let responses = packet
            .requests
            .iter()
            .map(|request| self.translate_stack_request(request))
            .collect();
        self.send_bedrock(BedrockPacket::ItemStackResponse(ItemStackResponse {
            responses,
        }));
    }

    /// Accept or reject one batch. On accept the mirror is updated and the
    /// planned Java commands are sent; on reject nothing changes.
    pub fn translate_stack_request(&mut self, request: &StackRequest) -> StackResponseEntry {
        match self.plan(request) {
            Ok(outcome) => {
                let containers = self.commit(outcome);
                StackResponseEntry::accept(request.request_id, containers)
            }
            Err(reason) => {
                debug!(
                    request_id = request.request_id,
                    container_id = self.open.as_ref().map_or(0, |i| i.java_id),
                    "rejecting stack request: {reason}"
                );
                StackResponseEntry::reject(request.request_id)
            }
        }
    }

    fn plan(&self, request: &StackRequest) -> Result<Outcome, RequestError> {
        // Nothing after an unknown action was decoded.
        if let Some(StackAction::Unknown { action_type }) = request
            .actions
            .iter()
            .find(|a| matches!(a, StackAction::Unknown { .. }))
        {
            return Err(RequestError::Unsupported(*action_type));
        }

        let (translator, inventory) = self.active_window().ok_or(RequestError::NoWindow {
            request_id: request.request_id,
        })?;
        let mut tx = Transaction::new(self, &*translator, inventory);
        let special = request
            .actions
            .iter()
            .any(|action| translator.should_handle_request_first(action, inventory));
        if special {
            translator.translate_special_request(&mut tx, request)?;
        } else {
            translator.translate_request(&mut tx, request)?;
        }
        Ok(tx.finish())
    }

    fn commit(&mut self, outcome: Outcome) -> Vec<StackResponseContainer> {
        let Outcome {
            window,
            player,
            cursor,
            net_id,
            outbound,
            containers,
        } = outcome;
        match self.open.as_mut() {
            Some(inventory) => inventory.replace_cells(window),
            None => self.player_window.replace_cells(window),
        }
        self.player.replace(player, cursor);
        self.net_id = net_id;
        for packet in outbound {
            self.send_java(packet);
        }
        containers
    }
}
