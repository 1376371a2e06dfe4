//! Domain layer: core entities, screen models and sync protocol types.

pub mod compose_state;
pub mod conversation;
pub mod conversation_list;
pub mod conversation_list_state;
pub mod conversation_page;
pub mod events;
pub mod message;
pub mod search_state;
pub mod shell_state;
pub mod sync;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
