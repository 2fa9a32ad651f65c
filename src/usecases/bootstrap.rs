use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    domain::{
        locale::Catalog,
        navigation::Navigation,
        store::ClientStore,
        user::ServerId,
    },
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter},
        contracts::ConfigAdapter,
        error::AppError,
        fixture::Fixture,
        outbox::TracingOutbox,
        storage_layout::StorageLayout,
    },
    ui::CrosstermEventSource,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        shell::{DefaultShellOrchestrator, ShellParts},
    },
};

const NAVIGATION_SERVER_UNKNOWN: &str = "NAVIGATION_SERVER_UNKNOWN";

pub struct ShellComposition {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
    _log_guard: Option<WorkerGuard>,
}

/// Loads config, installs file logging, then loads the fixture so its
/// diagnostics land in the log.
pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let (config, layout) = load_config(config_path)?;
    let guard = infra::logging::init(&config.logging, &layout)?;
    tracing::info!(
        log_file = %infra::logging::log_file(&layout).display(),
        "file logging initialised"
    );

    let fixture = infra::fixture::load(config.fixture.path.as_deref())?;
    let mut context = AppContext::new(config, layout, fixture);
    context.log_guard = Some(guard);

    Ok(context)
}

#[cfg(test)]
fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let (config, layout) = load_config(config_path)?;
    let fixture = infra::fixture::load(config.fixture.path.as_deref())?;

    Ok(AppContext::new(config, layout, fixture))
}

fn load_config(config_path: Option<&Path>) -> Result<(AppConfig, StorageLayout), AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    let config = config_adapter.load().map_err(AppError::Other)?;

    let layout = StorageLayout::resolve(config.logging.directory.clone())?;
    layout.ensure_dirs()?;

    Ok((config, layout))
}

pub fn shell_parts(config: &AppConfig, fixture: Fixture) -> ShellParts {
    let server = resolve_server(config, &fixture);

    ShellParts {
        store: fixture.store,
        navigation: Navigation::new(server),
        locale: Catalog::with_overrides(&config.locale.overrides),
        display: config.display.clone(),
        channel: fixture.channel,
        masquerades: fixture.masquerades,
    }
}

/// Configured server if the fixture knows it, otherwise the fixture's first.
fn resolve_server(config: &AppConfig, fixture: &Fixture) -> Option<ServerId> {
    if let Some(raw) = config.navigation.server.as_deref() {
        let configured = ServerId::new(raw);
        if fixture.store.server(&configured).is_some() {
            return Some(configured);
        }

        tracing::warn!(
            code = NAVIGATION_SERVER_UNKNOWN,
            server = raw,
            "configured server is not in the fixture; falling back to the first server"
        );
    }

    fixture.default_server().cloned()
}

pub fn compose_orchestrator(context: AppContext) -> DefaultShellOrchestrator<TracingOutbox> {
    let parts = shell_parts(&context.config, context.fixture);
    DefaultShellOrchestrator::new(parts, TracingOutbox::default())
}

pub fn compose_shell(mut context: AppContext) -> ShellComposition {
    let log_guard = context.log_guard.take();

    ShellComposition {
        event_source: Box::new(CrosstermEventSource),
        orchestrator: Box::new(compose_orchestrator(context)),
        _log_guard: log_guard,
    }
}
