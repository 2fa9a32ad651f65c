//! Plain-text member listing printed by `revterm check`.

use crate::domain::display::resolve_display_name;

use super::contracts::ShellOrchestrator;

/// One line per member row: user id, resolved name, then role colour and
/// bot marker when present.
pub fn describe_members(orchestrator: &dyn ShellOrchestrator) -> Vec<String> {
    let identity = orchestrator.display().show_server_identity;

    orchestrator
        .state()
        .members()
        .entries()
        .iter()
        .map(|entry| {
            let user = orchestrator.user(&entry.user_id);
            let name = resolve_display_name(
                user,
                entry.masquerade.as_ref(),
                identity,
                orchestrator.identity(),
            );

            let mut line = format!("{:<28} {}", entry.user_id, name.text);
            if let Some(colour) = &name.colour {
                line.push_str(&format!(" [{colour}]"));
            }
            if name.is_bot {
                line.push_str(" (bot)");
            }
            if entry.masquerade.is_some() {
                line.push_str(" (masquerade)");
            }
            line
        })
        .collect()
}
