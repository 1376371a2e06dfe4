//! Contract of the remote conversation service and the routing of
//! [`SyncRequest`]s onto it.

use std::sync::Arc;

use crate::domain::{
    conversation::Conversation,
    message::{Message, TimelineMessage},
    sync::{GatewayError, SyncRequest, SyncResponse},
};

/// Remote source of truth for conversations and messages.
///
/// Every call may fail with [`GatewayError::Unauthorized`] or
/// [`GatewayError::Unavailable`]. An empty search result is a successful
/// "no matches" answer, never an error.
pub trait ConversationGateway: Send + Sync {
    fn list_conversations(&self, user_id: i64) -> Result<Vec<Conversation>, GatewayError>;

    fn search_messages(&self, user_id: i64, term: &str) -> Result<Vec<Message>, GatewayError>;

    /// Flips the server-side flag once per call.
    fn toggle_favorite(&self, user_id: i64, conversation_id: i64) -> Result<(), GatewayError>;

    fn list_messages(
        &self,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<Vec<TimelineMessage>, GatewayError>;

    fn search_conversation_messages(
        &self,
        user_id: i64,
        conversation_id: i64,
        term: &str,
    ) -> Result<Vec<Message>, GatewayError>;

    fn send_message(
        &self,
        user_id: i64,
        conversation_id: i64,
        content: &str,
    ) -> Result<(), GatewayError>;
}

impl<T> ConversationGateway for Arc<T>
where
    T: ConversationGateway + ?Sized,
{
    fn list_conversations(&self, user_id: i64) -> Result<Vec<Conversation>, GatewayError> {
        (**self).list_conversations(user_id)
    }

    fn search_messages(&self, user_id: i64, term: &str) -> Result<Vec<Message>, GatewayError> {
        (**self).search_messages(user_id, term)
    }

    fn toggle_favorite(&self, user_id: i64, conversation_id: i64) -> Result<(), GatewayError> {
        (**self).toggle_favorite(user_id, conversation_id)
    }

    fn list_messages(
        &self,
        user_id: i64,
        conversation_id: i64,
    ) -> Result<Vec<TimelineMessage>, GatewayError> {
        (**self).list_messages(user_id, conversation_id)
    }

    fn search_conversation_messages(
        &self,
        user_id: i64,
        conversation_id: i64,
        term: &str,
    ) -> Result<Vec<Message>, GatewayError> {
        (**self).search_conversation_messages(user_id, conversation_id, term)
    }

    fn send_message(
        &self,
        user_id: i64,
        conversation_id: i64,
        content: &str,
    ) -> Result<(), GatewayError> {
        (**self).send_message(user_id, conversation_id, content)
    }
}

/// Runs one request against the gateway and wraps the result so it can be
/// matched back to the state that issued it.
pub fn execute(
    gateway: &dyn ConversationGateway,
    user_id: i64,
    request: SyncRequest,
) -> SyncResponse {
    match request {
        SyncRequest::ListConversations => {
            SyncResponse::ConversationsListed(gateway.list_conversations(user_id))
        }
        SyncRequest::SearchMessages { ticket, term } => SyncResponse::MessagesSearched {
            ticket,
            result: gateway.search_messages(user_id, &term),
        },
        SyncRequest::ToggleFavorite { conversation_id } => SyncResponse::FavoriteToggled {
            conversation_id,
            result: gateway.toggle_favorite(user_id, conversation_id),
        },
        SyncRequest::ListMessages { page } => SyncResponse::MessagesListed {
            page,
            result: gateway.list_messages(user_id, page.conversation_id),
        },
        SyncRequest::SearchConversationMessages { page, ticket, term } => {
            SyncResponse::ConversationMessagesSearched {
                page,
                ticket,
                result: gateway.search_conversation_messages(user_id, page.conversation_id, &term),
            }
        }
        SyncRequest::SendMessage { page, content } => SyncResponse::MessageSent {
            page,
            result: gateway.send_message(user_id, page.conversation_id, &content),
        },
    }
}
