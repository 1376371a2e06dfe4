//! UI layer: terminal rendering and the interactive shell loop.

mod compose_input;
mod event_source;
mod format;
pub mod shell;
mod search_bar;
mod styles;
mod terminal;
mod timeline;
mod view;

pub(crate) use event_source::CrosstermEventSource;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
