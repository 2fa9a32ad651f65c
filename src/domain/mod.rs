//! Domain layer: identity model, display rules and shell state.

pub mod composer;
pub mod display;
pub mod events;
pub mod locale;
pub mod member_list_state;
pub mod message_input_state;
pub mod navigation;
pub mod shell_state;
pub mod store;
pub mod user;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
