//! One-shot connectivity and session check behind `linksy check`.

use crate::{domain::sync::GatewayError, usecases::gateway::ConversationGateway};

const PROBE_FAILED: &str = "PROBE_FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub conversations: usize,
    pub favorites: usize,
    pub groups: usize,
}

impl ProbeReport {
    pub fn summary(&self) -> String {
        format!(
            "ok: {} conversations ({} favorites, {} groups)",
            self.conversations, self.favorites, self.groups
        )
    }
}

pub fn probe(gateway: &dyn ConversationGateway, user_id: i64) -> Result<ProbeReport, GatewayError> {
    let conversations = gateway.list_conversations(user_id).map_err(|error| {
        tracing::warn!(code = PROBE_FAILED, error_code = error.code(), user_id, "probe failed");
        error
    })?;

    Ok(ProbeReport {
        conversations: conversations.len(),
        favorites: conversations.iter().filter(|item| item.favorited).count(),
        groups: conversations.iter().filter(|item| item.is_group()).count(),
    })
}

/// Line printed when the probe fails, phrased for someone fixing config.
pub fn failure_hint(error: GatewayError) -> &'static str {
    match error {
        GatewayError::Unauthorized => {
            "session rejected: check [session] token or LINKSY_TOKEN"
        }
        GatewayError::Unavailable => "service unreachable: check [server] base_url",
        GatewayError::NotFound => "user not found: check [session] user_id",
        GatewayError::InvalidData => "service answered with an unexpected payload",
    }
}
