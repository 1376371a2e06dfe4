use std::{sync::Arc, time::Duration};

use tokio::runtime::Runtime;
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    infra::{config::AppConfig, storage_layout::StorageLayout},
    remote::HttpConversationGateway,
};

pub struct AppContext {
    pub config: AppConfig,
    pub layout: StorageLayout,
    pub runtime: Runtime,
    pub gateway: Arc<HttpConversationGateway>,
    log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        layout: StorageLayout,
        runtime: Runtime,
        gateway: Arc<HttpConversationGateway>,
        log_guard: Option<WorkerGuard>,
    ) -> Self {
        Self {
            config,
            layout,
            runtime,
            gateway,
            log_guard,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.config.session.user_id
    }

    /// Gives in-flight requests a bounded grace period, then flushes logs.
    pub fn shutdown(self, grace: Duration) {
        self.runtime.shutdown_timeout(grace);
        tracing::debug!("sync runtime stopped");
        drop(self.log_guard);
    }
}
