use std::{path::Path, sync::mpsc, sync::Arc};

use tokio::runtime::{Builder, Runtime};

use crate::{
    infra::{
        self, config::FileConfigAdapter, contracts::ConfigAdapter, error::AppError,
        storage_layout::StorageLayout,
    },
    remote::{HttpConversationGateway, RuntimeDispatcher},
    ui::CrosstermEventSource,
    usecases::{
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        shell::DefaultShellOrchestrator,
    },
};

pub struct ShellComposition {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = load_config(config_path)?;
    let layout = StorageLayout::resolve()?;
    let log_guard = infra::logging::init(&config.logging, &layout)?;

    tracing::info!(
        base_url = %config.server.base_url,
        user_id = config.session.user_id,
        has_token = config.session.token.is_some(),
        "configuration loaded"
    );

    let runtime = build_runtime()?;
    let gateway = HttpConversationGateway::new(
        &config.server,
        config.session.token.clone(),
        runtime.handle().clone(),
    )?;

    Ok(AppContext::new(
        config,
        layout,
        runtime,
        Arc::new(gateway),
        Some(log_guard),
    ))
}

/// Wires the event loop: responses from the dispatcher and terminal input
/// reach the orchestrator through one event source.
pub fn compose_shell(context: &AppContext) -> ShellComposition {
    let (events_tx, events_rx) = mpsc::channel();
    let dispatcher = RuntimeDispatcher::new(
        context.runtime.handle().clone(),
        context.gateway.clone(),
        context.user_id(),
        events_tx,
    );

    ShellComposition {
        event_source: Box::new(CrosstermEventSource::new(events_rx)),
        orchestrator: Box::new(DefaultShellOrchestrator::new(
            context.user_id(),
            dispatcher,
        )),
    }
}

fn load_config(config_path: Option<&Path>) -> Result<crate::infra::config::AppConfig, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    config_adapter.load().map_err(AppError::Other)
}

fn build_runtime() -> Result<Runtime, AppError> {
    Builder::new_multi_thread()
        .enable_all()
        .thread_name("linksy-sync")
        .build()
        .map_err(|source| AppError::RuntimeBuild { source })
}
