use anyhow::Result;

use crate::{domain::user::ChannelId, infra::config::AppConfig};

pub trait ConfigAdapter {
    fn load(&self) -> Result<AppConfig>;
}

/// Destination for drafts submitted from the composer.
pub trait MessageSink {
    fn send(&mut self, channel: Option<&ChannelId>, text: &str) -> Result<()>;
}
