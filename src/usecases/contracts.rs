use anyhow::Result;

use crate::domain::{events::AppEvent, shell_state::ShellState, sync::SyncRequest};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn state_mut(&mut self) -> &mut ShellState;
    /// Issues the requests the first frame depends on.
    fn start(&mut self);
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Hands a request to whatever performs it off the event loop. The response
/// comes back later as an [`AppEvent::Synced`].
pub trait RequestDispatcher {
    fn dispatch(&mut self, request: SyncRequest);
}
