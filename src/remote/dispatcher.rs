use std::sync::{mpsc::Sender, Arc};

use tokio::runtime::Handle;

use crate::{
    domain::{events::AppEvent, sync::SyncRequest},
    usecases::{contracts::RequestDispatcher, gateway::execute, gateway::ConversationGateway},
};

/// Runs each request on the runtime's blocking pool and posts the response
/// back to the event loop. Requests never wait on each other, so responses
/// may arrive in any order.
pub struct RuntimeDispatcher {
    runtime: Handle,
    gateway: Arc<dyn ConversationGateway>,
    user_id: i64,
    events: Sender<AppEvent>,
}

impl RuntimeDispatcher {
    pub fn new(
        runtime: Handle,
        gateway: Arc<dyn ConversationGateway>,
        user_id: i64,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            runtime,
            gateway,
            user_id,
            events,
        }
    }
}

impl RequestDispatcher for RuntimeDispatcher {
    fn dispatch(&mut self, request: SyncRequest) {
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();
        let user_id = self.user_id;

        self.runtime.spawn_blocking(move || {
            let kind = request.kind();
            let response = execute(&*gateway, user_id, request);
            if events.send(AppEvent::Synced(response)).is_err() {
                tracing::debug!(kind, "event loop closed; dropping response");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, time::Duration};

    use super::*;
    use crate::{domain::sync::SyncResponse, infra::stubs::StubGateway};

    #[test]
    fn delivers_response_through_channel() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .expect("runtime should build");
        let gateway = Arc::new(StubGateway::default());
        let (tx, rx) = mpsc::channel();
        let mut dispatcher =
            RuntimeDispatcher::new(runtime.handle().clone(), gateway.clone(), 9, tx);

        dispatcher.dispatch(SyncRequest::ToggleFavorite { conversation_id: 3 });

        let event = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("response should arrive");
        assert_eq!(
            event,
            AppEvent::Synced(SyncResponse::FavoriteToggled {
                conversation_id: 3,
                result: Ok(())
            })
        );
        assert_eq!(
            gateway.calls(),
            vec!["toggle_favorite user=9 conversation=3".to_owned()]
        );
    }
}
