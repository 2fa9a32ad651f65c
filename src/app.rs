use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    domain, infra, ui,
    usecases::{self, bootstrap, listing::describe_members},
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let context = bootstrap::bootstrap(cli.config.as_deref())?;
            log_module_boundaries();

            let mut shell = bootstrap::compose_shell(context);
            ui::shell::start(shell.event_source.as_mut(), shell.orchestrator.as_mut())?;
        }
        Command::Check => {
            let mut context = bootstrap::bootstrap(cli.config.as_deref())?;
            log_module_boundaries();

            let log_file = infra::logging::log_file(&context.layout);
            let _log_guard = context.log_guard.take();
            let orchestrator = bootstrap::compose_orchestrator(context);

            for line in check_report(&orchestrator, &log_file) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn log_module_boundaries() {
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );
}

fn check_report(
    orchestrator: &dyn usecases::contracts::ShellOrchestrator,
    log_file: &std::path::Path,
) -> Vec<String> {
    let display = orchestrator.display();
    let mut lines = vec![
        format!(
            "identity: {:?} | prefix @: {} | icon size: {}",
            display.show_server_identity, display.prefix_at, display.icon_size
        ),
        format!("log file: {}", log_file.display()),
        String::new(),
    ];
    lines.extend(describe_members(orchestrator));
    lines
}
