use anyhow::Result;

use crate::usecases::{
    context::AppContext,
    contracts::{AppEventSource, ShellOrchestrator},
};

use super::{terminal::TerminalSession, view};

pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        base_url = %context.config.server.base_url,
        user_id = context.user_id(),
        logs_dir = %context.layout.logs_dir.display(),
        "starting TUI shell"
    );

    let mut terminal = TerminalSession::new()?;
    orchestrator.start();

    while orchestrator.state().is_running() {
        terminal.draw(|frame| view::render(frame, orchestrator.state_mut()))?;
        pump_event(event_source, orchestrator)?;
    }

    tracing::info!("TUI shell stopped");
    Ok(())
}

/// Feeds at most one event to the orchestrator. Returns whether one arrived.
fn pump_event(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<bool> {
    match event_source.next_event()? {
        Some(event) => {
            orchestrator.handle_event(event)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
