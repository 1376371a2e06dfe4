//! Requests sent to the remote service and the responses fed back into the
//! event loop.

use thiserror::Error;

use super::{
    conversation::Conversation,
    conversation_page::PageKey,
    message::{Message, TimelineMessage},
    search_state::SearchTicket,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Session token missing, invalid or expired.
    #[error("session is not authorized")]
    Unauthorized,
    /// Transport failure, timeout or server-side error.
    #[error("service is unavailable")]
    Unavailable,
    #[error("requested resource was not found")]
    NotFound,
    #[error("service returned an unexpected payload")]
    InvalidData,
}

impl GatewayError {
    pub fn code(self) -> &'static str {
        match self {
            Self::Unauthorized => "GATEWAY_UNAUTHORIZED",
            Self::Unavailable => "GATEWAY_UNAVAILABLE",
            Self::NotFound => "GATEWAY_NOT_FOUND",
            Self::InvalidData => "GATEWAY_INVALID_DATA",
        }
    }

    pub fn is_auth(self) -> bool {
        self == Self::Unauthorized
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRequest {
    ListConversations,
    SearchMessages {
        ticket: SearchTicket,
        term: String,
    },
    ToggleFavorite {
        conversation_id: i64,
    },
    ListMessages {
        page: PageKey,
    },
    SearchConversationMessages {
        page: PageKey,
        ticket: SearchTicket,
        term: String,
    },
    SendMessage {
        page: PageKey,
        content: String,
    },
}

impl SyncRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ListConversations => "list_conversations",
            Self::SearchMessages { .. } => "search_messages",
            Self::ToggleFavorite { .. } => "toggle_favorite",
            Self::ListMessages { .. } => "list_messages",
            Self::SearchConversationMessages { .. } => "search_conversation_messages",
            Self::SendMessage { .. } => "send_message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResponse {
    ConversationsListed(Result<Vec<Conversation>, GatewayError>),
    MessagesSearched {
        ticket: SearchTicket,
        result: Result<Vec<Message>, GatewayError>,
    },
    FavoriteToggled {
        conversation_id: i64,
        result: Result<(), GatewayError>,
    },
    MessagesListed {
        page: PageKey,
        result: Result<Vec<TimelineMessage>, GatewayError>,
    },
    ConversationMessagesSearched {
        page: PageKey,
        ticket: SearchTicket,
        result: Result<Vec<Message>, GatewayError>,
    },
    MessageSent {
        page: PageKey,
        result: Result<(), GatewayError>,
    },
}
