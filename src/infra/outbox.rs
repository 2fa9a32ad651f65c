use anyhow::Result;

use crate::{domain::user::ChannelId, infra::contracts::MessageSink};

const OUTBOX_MESSAGE_ACCEPTED: &str = "OUTBOX_MESSAGE_ACCEPTED";

/// Local sink: there is no server connection, submitted drafts are logged.
#[derive(Debug, Clone, Default)]
pub struct TracingOutbox {
    accepted: usize,
}

impl TracingOutbox {
    pub fn accepted(&self) -> usize {
        self.accepted
    }
}

impl MessageSink for TracingOutbox {
    fn send(&mut self, channel: Option<&ChannelId>, text: &str) -> Result<()> {
        self.accepted += 1;
        tracing::info!(
            code = OUTBOX_MESSAGE_ACCEPTED,
            channel = channel.map(ChannelId::as_str),
            chars = text.chars().count(),
            total = self.accepted(),
            "message accepted by local outbox"
        );
        Ok(())
    }
}
