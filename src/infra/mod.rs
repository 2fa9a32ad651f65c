//! Infrastructure layer: config, fixtures, logging and local outbox.

pub mod config;
pub mod contracts;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod outbox;
pub mod storage_layout;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}
