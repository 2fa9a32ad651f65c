use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::{config::AppConfig, fixture::Fixture, storage_layout::StorageLayout};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub layout: StorageLayout,
    pub fixture: Fixture,
    /// Present once file logging is installed; flushes on drop.
    pub log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(config: AppConfig, layout: StorageLayout, fixture: Fixture) -> Self {
        Self {
            config,
            layout,
            fixture,
            log_guard: None,
        }
    }
}
