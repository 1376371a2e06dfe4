use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use url::Url;

use crate::{
    domain::{
        conversation::Conversation,
        message::{Message, TimelineMessage},
        sync::GatewayError,
    },
    infra::{config::ServerConfig, error::AppError, secrets::redact_text},
    usecases::gateway::ConversationGateway,
};

use super::wire::{ConversationDto, MessageDto, TimelineEntryDto};

const REQUEST_TRANSPORT_FAILED: &str = "HTTP_TRANSPORT_FAILED";
const REQUEST_REJECTED: &str = "HTTP_REQUEST_REJECTED";
const RESPONSE_UNDECODABLE: &str = "HTTP_RESPONSE_UNDECODABLE";
const TOKEN_MISSING: &str = "HTTP_TOKEN_MISSING";

/// REST client for the chat service.
///
/// Calls are blocking: each one drives its future to completion on the
/// shared runtime, so callers must not already be inside an async context.
pub struct HttpConversationGateway {
    client: Client,
    base_url: Url,
    token: Option<String>,
    runtime: Handle,
}

impl std::fmt::Debug for HttpConversationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConversationGateway")
            .field("base_url", &self.base_url.as_str())
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl HttpConversationGateway {
    pub fn new(
        server: &ServerConfig,
        token: Option<String>,
        runtime: Handle,
    ) -> Result<Self, AppError> {
        let base_url = Url::parse(&server.base_url).map_err(|error| AppError::ConfigInvalid {
            field: "server.base_url",
            details: error.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::ConfigInvalid {
                field: "server.base_url",
                details: "url cannot carry path segments".to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(server.request_timeout_ms))
            .build()
            .map_err(|source| AppError::HttpClientBuild { source })?;

        Ok(Self {
            client,
            base_url,
            token,
            runtime,
        })
    }

    /// `{base}/user/{user_id}/conversation/{rest..}`
    fn endpoint(&self, user_id: i64, rest: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        let user_id = user_id.to_string();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["user", user_id.as_str(), "conversation"])
                .extend(rest);
        }
        url
    }

    fn search_endpoint(&self, user_id: i64, rest: &[&str], term: &str) -> Url {
        let mut url = self.endpoint(user_id, rest);
        url.query_pairs_mut().append_pair("targetWord", term);
        url
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let Some(token) = self.token.as_deref() else {
            tracing::warn!(code = TOKEN_MISSING, operation, "no session token configured");
            return Err(GatewayError::Unauthorized);
        };

        let response = request.bearer_auth(token).send().await.map_err(|error| {
            tracing::warn!(
                code = REQUEST_TRANSPORT_FAILED,
                operation,
                timeout = error.is_timeout(),
                connect = error.is_connect(),
                error = %redact_text(&error.to_string()),
                "request did not complete"
            );
            GatewayError::Unavailable
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error = map_status(status);
        tracing::warn!(
            code = REQUEST_REJECTED,
            operation,
            status = status.as_u16(),
            error_code = error.code(),
            "service rejected request"
        );
        Err(error)
    }

    fn fetch_json<T>(&self, operation: &'static str, url: Url) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        self.runtime.block_on(async {
            let response = self.send(operation, self.client.get(url)).await?;
            response.json::<T>().await.map_err(|error| {
                tracing::warn!(
                    code = RESPONSE_UNDECODABLE,
                    operation,
                    error = %redact_text(&error.to_string()),
                    "response body could not be decoded"
                );
                GatewayError::InvalidData
            })
        })
    }

    fn fire(&self, operation: &'static str, request: RequestBuilder) -> Result<(), GatewayError> {
        self.runtime
            .block_on(async { self.send(operation, request).await.map(|_| ()) })
    }
}

fn map_status(status: StatusCode) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        _ => GatewayError::Unavailable,
    }
}

impl ConversationGateway for HttpConversationGateway {
    fn list_conversations(&self, user_id: i64) -> Result<Vec<Conversation>, GatewayError> {
        let url = self.endpoint(user_id, &[]);
        let items: Vec<ConversationDto> = self.fetch_json("list_conversations", url)?;
        Ok(items.into_iter().map(Conversation::from).collect())
    }

    fn search_messages(&self, user_id: i64, term: &str) -> Result<Vec<Message>, GatewayError> {
        let url = self.search_endpoint(user_id, &["search"], term);
        let items: Vec<MessageDto> = self.fetch_json("search_messages", url)?;
        Ok(items.into_iter().map(Message::from).collect())
    }

    fn toggle_favorite(&self, user_id: i64, conversation_id: i64) -> Result<(), GatewayError> {
        let conversation_id = conversation_id.to_string();
        let url = self.endpoint(user_id, &[conversation_id.as_str(), "favoritar"]);
        self.fire("toggle_favorite", self.client.patch(url))
    }

    fn list_messages(
        &self,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<Vec<TimelineMessage>, GatewayError> {
        let conversation_id = conversation_id.to_string();
        let url = self.endpoint(user_id, &[conversation_id.as_str(), "message"]);
        let items: Vec<TimelineEntryDto> = self.fetch_json("list_messages", url)?;
        Ok(items.into_iter().map(TimelineMessage::from).collect())
    }

    fn search_conversation_messages(
        &self,
        user_id: i64,
        conversation_id: i64,
        term: &str,
    ) -> Result<Vec<Message>, GatewayError> {
        let conversation_id = conversation_id.to_string();
        let url = self.search_endpoint(user_id, &[conversation_id.as_str(), "search"], term);
        let items: Vec<MessageDto> = self.fetch_json("search_conversation_messages", url)?;
        Ok(items.into_iter().map(Message::from).collect())
    }

    fn send_message(
        &self,
        user_id: i64,
        conversation_id: i64,
        content: &str,
    ) -> Result<(), GatewayError> {
        let conversation_id = conversation_id.to_string();
        let url = self.endpoint(user_id, &[conversation_id.as_str(), "message"]);
        let body = serde_json::json!({ "content": content });
        self.fire("send_message", self.client.post(url).json(&body))
    }
}
