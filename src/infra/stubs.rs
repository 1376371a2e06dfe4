use std::sync::Mutex;

use anyhow::Result;

use crate::{
    domain::{
        conversation::Conversation,
        message::{Message, TimelineMessage},
        sync::{GatewayError, SyncRequest},
    },
    infra::{config::AppConfig, contracts::ConfigAdapter},
    usecases::{contracts::RequestDispatcher, gateway::ConversationGateway},
};

#[derive(Debug, Clone, Default)]
pub struct StubConfigAdapter;

impl ConfigAdapter for StubConfigAdapter {
    fn load(&self) -> Result<AppConfig> {
        Ok(AppConfig::default())
    }
}

/// Gateway answering from canned data and recording every call.
#[derive(Debug, Default)]
pub struct StubGateway {
    pub conversations: Vec<Conversation>,
    pub found: Vec<Message>,
    pub timeline: Vec<TimelineMessage>,
    pub error: Option<GatewayError>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl StubGateway {
    pub fn failing(error: GatewayError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record<T>(&self, call: String, ok: T) -> Result<T, GatewayError> {
        self.calls.lock().expect("calls lock").push(call);
        match self.error {
            Some(error) => Err(error),
            None => Ok(ok),
        }
    }
}

impl ConversationGateway for StubGateway {
    fn list_conversations(&self, user_id: i64) -> Result<Vec<Conversation>, GatewayError> {
        self.record(
            format!("list_conversations user={user_id}"),
            self.conversations.clone(),
        )
    }

    fn search_messages(&self, user_id: i64, term: &str) -> Result<Vec<Message>, GatewayError> {
        self.record(
            format!("search_messages user={user_id} term={term}"),
            self.found.clone(),
        )
    }

    fn toggle_favorite(&self, user_id: i64, conversation_id: i64) -> Result<(), GatewayError> {
        self.record(
            format!("toggle_favorite user={user_id} conversation={conversation_id}"),
            (),
        )
    }

    fn list_messages(
        &self,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<Vec<TimelineMessage>, GatewayError> {
        self.record(
            format!("list_messages user={user_id} conversation={conversation_id}"),
            self.timeline.clone(),
        )
    }

    fn search_conversation_messages(
        &self,
        user_id: i64,
        conversation_id: i64,
        term: &str,
    ) -> Result<Vec<Message>, GatewayError> {
        self.record(
            format!(
                "search_conversation_messages user={user_id} conversation={conversation_id} term={term}"
            ),
            self.found.clone(),
        )
    }

    fn send_message(
        &self,
        user_id: i64,
        conversation_id: i64,
        content: &str,
    ) -> Result<(), GatewayError> {
        self.record(
            format!("send_message user={user_id} conversation={conversation_id} content={content}"),
            (),
        )
    }
}

/// Dispatcher that only queues requests so tests decide when and in which
/// order responses arrive.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    pub requests: Vec<SyncRequest>,
}

impl RecordingDispatcher {
    pub fn take(&mut self) -> Vec<SyncRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl RequestDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, request: SyncRequest) {
        self.requests.push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_config_returns_defaults() {
        let config = StubConfigAdapter.load().expect("stub config must load");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn failing_gateway_still_records_calls() {
        let gateway = StubGateway::failing(GatewayError::Unavailable);

        let result = gateway.toggle_favorite(1, 2);

        assert_eq!(result, Err(GatewayError::Unavailable));
        assert_eq!(gateway.calls().len(), 1);
    }
}
