//! Conversation list screen model.
//!
//! Owns the local conversation snapshot and the global message search. It
//! never talks to the network itself: operations return the [`SyncRequest`]
//! to issue, and `apply_*` methods fold the matching [`SyncResponse`] data
//! back in, reporting what the caller should do next.

use super::{
    conversation::Conversation,
    conversation_list_state::{ConversationListState, ConversationListSync},
    message::Message,
    search_state::{SearchApply, SearchBegin, SearchState, SearchTicket},
    sync::{GatewayError, SyncRequest},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    FetchConversations,
    SearchMessages,
    ToggleFavorite,
}

impl ListError {
    pub fn message(self) -> &'static str {
        match self {
            Self::FetchConversations => "Error fetching conversations",
            Self::SearchMessages => "Error searching messages",
            Self::ToggleFavorite => "Error toggling favorite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Synced,
    /// Session is unusable; the caller must leave for the sign-in landing.
    RedirectToSignIn,
    /// Resync failed but the previous snapshot is still shown.
    Failed,
}

/// What the list area shows. Search results and conversations never share
/// the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing<'a> {
    Conversations(&'a [Conversation]),
    SearchResults(&'a [Message]),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationListModel {
    list: ConversationListState,
    search: SearchState,
    selected_result: Option<usize>,
    error: Option<ListError>,
    /// Set between a failed toggle and the resync it triggers, so that
    /// resync leaves the toggle error on screen.
    toggle_resync_pending: bool,
    profile_visible: bool,
}

impl ConversationListModel {
    pub fn list(&self) -> &ConversationListState {
        &self.list
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn error(&self) -> Option<ListError> {
        self.error
    }

    pub fn profile_visible(&self) -> bool {
        self.profile_visible
    }

    pub fn toggle_profile(&mut self) {
        self.profile_visible = !self.profile_visible;
    }

    pub fn listing(&self) -> Listing<'_> {
        if self.search.is_showing_results() {
            Listing::SearchResults(self.search.results())
        } else {
            Listing::Conversations(self.list.conversations())
        }
    }

    /// Index of the highlighted row within the current listing.
    pub fn selected_index(&self) -> Option<usize> {
        match self.listing() {
            Listing::Conversations(_) => self.list.selected_index(),
            Listing::SearchResults(_) => self.selected_result,
        }
    }

    /// Conversation that `Enter` would open.
    pub fn selected_target(&self) -> Option<i64> {
        match self.listing() {
            Listing::Conversations(_) => self.list.selected_conversation().map(|item| item.id),
            Listing::SearchResults(results) => self
                .selected_result
                .and_then(|index| results.get(index))
                .map(|message| message.conversation_id),
        }
    }

    pub fn select_next(&mut self) {
        match self.listing() {
            Listing::Conversations(_) => self.list.select_next(),
            Listing::SearchResults(results) => {
                let last = results.len().saturating_sub(1);
                self.selected_result = self.selected_result.map(|index| (index + 1).min(last));
            }
        }
    }

    pub fn select_previous(&mut self) {
        match self.listing() {
            Listing::Conversations(_) => self.list.select_previous(),
            Listing::SearchResults(_) => {
                self.selected_result = self.selected_result.map(|index| index.saturating_sub(1));
            }
        }
    }

    pub fn refresh(&mut self) -> SyncRequest {
        self.list.set_loading();
        SyncRequest::ListConversations
    }

    pub fn apply_refresh(
        &mut self,
        result: Result<Vec<Conversation>, GatewayError>,
    ) -> RefreshOutcome {
        match result {
            Ok(conversations) => {
                self.list.set_ready(conversations);
                match self.error {
                    Some(ListError::FetchConversations) => self.error = None,
                    Some(ListError::ToggleFavorite) if !self.toggle_resync_pending => {
                        self.error = None;
                    }
                    _ => {}
                }
                self.toggle_resync_pending = false;
                RefreshOutcome::Synced
            }
            Err(error) => {
                self.error = Some(ListError::FetchConversations);
                if error.is_auth() || self.list.sync() != ConversationListSync::Ready {
                    self.list.set_failed();
                    RefreshOutcome::RedirectToSignIn
                } else {
                    RefreshOutcome::Failed
                }
            }
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> Option<SyncRequest> {
        let begin = self.search.begin(term);
        self.after_search_begin(begin)
    }

    pub fn type_search_char(&mut self, ch: char) -> Option<SyncRequest> {
        let begin = self.search.push_char(ch);
        self.after_search_begin(begin)
    }

    pub fn erase_search_char(&mut self) -> Option<SyncRequest> {
        let begin = self.search.pop_char();
        self.after_search_begin(begin)
    }

    pub fn clear_search(&mut self) -> Option<SyncRequest> {
        let begin = self.search.clear();
        self.after_search_begin(begin)
    }

    fn after_search_begin(&mut self, begin: SearchBegin) -> Option<SyncRequest> {
        match begin {
            SearchBegin::Cleared => {
                self.selected_result = None;
                if self.error == Some(ListError::SearchMessages) {
                    self.error = None;
                }
                None
            }
            SearchBegin::Query { ticket, term } => {
                Some(SyncRequest::SearchMessages { ticket, term })
            }
        }
    }

    pub fn apply_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Message>, GatewayError>,
    ) -> SearchApply {
        match result {
            Ok(messages) => {
                let applied = self.search.resolve(ticket, messages);
                if applied == SearchApply::Applied {
                    self.selected_result = (!self.search.results().is_empty()).then_some(0);
                    if self.error == Some(ListError::SearchMessages) {
                        self.error = None;
                    }
                }
                applied
            }
            Err(_) => {
                let applied = self.search.fail(ticket);
                if applied == SearchApply::Applied {
                    self.error = Some(ListError::SearchMessages);
                }
                applied
            }
        }
    }

    /// Optimistically flips the favorite flag. `None` for unknown ids.
    pub fn toggle_favorite(&mut self, conversation_id: i64) -> Option<SyncRequest> {
        self.list
            .toggle_favorite(conversation_id)
            .then_some(SyncRequest::ToggleFavorite { conversation_id })
    }

    /// Second half of write-then-resync: always returns the refresh to issue.
    /// A failed write keeps the optimistic flip until that refresh lands.
    pub fn apply_toggle(
        &mut self,
        _conversation_id: i64,
        result: Result<(), GatewayError>,
    ) -> SyncRequest {
        match result {
            Ok(()) => {
                if self.error == Some(ListError::ToggleFavorite) {
                    self.error = None;
                }
                self.toggle_resync_pending = false;
            }
            Err(_) => {
                self.error = Some(ListError::ToggleFavorite);
                self.toggle_resync_pending = true;
            }
        }

        self.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationKind;

    fn conversation(id: i64, name: &str, favorited: bool) -> Conversation {
        Conversation {
            id,
            name: name.to_owned(),
            username: Some(name.to_lowercase()),
            kind: ConversationKind::Direct,
            last_message: Some("oi".to_owned()),
            last_message_sender_name: Some(name.to_owned()),
            last_message_created_at_ms: Some(1_700_000_000_000),
            favorited,
        }
    }

    fn message(conversation_id: i64, content: &str) -> Message {
        Message {
            conversation_id,
            content: content.to_owned(),
            sender_name: "Ana".to_owned(),
            created_at_ms: Some(1_700_000_000_000),
            conversation_name: "Amigos".to_owned(),
        }
    }

    fn ready_model(conversations: Vec<Conversation>) -> ConversationListModel {
        let mut model = ConversationListModel::default();
        model.refresh();
        assert_eq!(model.apply_refresh(Ok(conversations)), RefreshOutcome::Synced);
        model
    }

    fn search_ticket(request: Option<SyncRequest>) -> SearchTicket {
        match request {
            Some(SyncRequest::SearchMessages { ticket, .. }) => ticket,
            other => panic!("expected search request, got {other:?}"),
        }
    }

    /// Minimal in-memory service holding the authoritative favorite flags.
    struct FakeService {
        conversations: Vec<Conversation>,
    }

    impl FakeService {
        fn toggle(&mut self, conversation_id: i64) -> Result<(), GatewayError> {
            let item = self
                .conversations
                .iter_mut()
                .find(|item| item.id == conversation_id)
                .ok_or(GatewayError::NotFound)?;
            item.toggle_favorited();
            Ok(())
        }

        fn snapshot(&self) -> Result<Vec<Conversation>, GatewayError> {
            Ok(self.conversations.clone())
        }
    }

    #[test]
    fn first_refresh_moves_through_loading_to_ready() {
        let mut model = ConversationListModel::default();
        assert_eq!(model.list().sync(), ConversationListSync::Unauthenticated);

        assert_eq!(model.refresh(), SyncRequest::ListConversations);
        assert_eq!(model.list().sync(), ConversationListSync::Loading);

        let outcome = model.apply_refresh(Ok(vec![conversation(1, "Ana", false)]));

        assert_eq!(outcome, RefreshOutcome::Synced);
        assert_eq!(model.list().sync(), ConversationListSync::Ready);
    }

    #[test]
    fn initial_fetch_failure_redirects_to_sign_in() {
        for error in [GatewayError::Unavailable, GatewayError::Unauthorized] {
            let mut model = ConversationListModel::default();
            model.refresh();

            assert_eq!(model.apply_refresh(Err(error)), RefreshOutcome::RedirectToSignIn);
            assert_eq!(model.list().sync(), ConversationListSync::Failed);
            assert_eq!(model.error(), Some(ListError::FetchConversations));
        }
    }

    #[test]
    fn network_failure_after_ready_keeps_snapshot() {
        let mut model = ready_model(vec![conversation(1, "Ana", false)]);
        model.refresh();

        let outcome = model.apply_refresh(Err(GatewayError::Unavailable));

        assert_eq!(outcome, RefreshOutcome::Failed);
        assert_eq!(model.list().conversations().len(), 1);
        assert_eq!(model.error(), Some(ListError::FetchConversations));
    }

    #[test]
    fn expired_session_after_ready_redirects() {
        let mut model = ready_model(vec![conversation(1, "Ana", false)]);
        model.refresh();

        let outcome = model.apply_refresh(Err(GatewayError::Unauthorized));

        assert_eq!(outcome, RefreshOutcome::RedirectToSignIn);
    }

    #[test]
    fn refresh_replaces_snapshot_wholesale() {
        let mut model = ready_model(vec![conversation(1, "Ana", false)]);
        model.toggle_favorite(1);

        model.refresh();
        model.apply_refresh(Ok(vec![conversation(1, "Ana", false), conversation(2, "Bia", true)]));

        let conversations = model.list().conversations();
        assert_eq!(conversations.len(), 2);
        assert!(!conversations[0].favorited);
    }

    #[test]
    fn empty_or_whitespace_term_issues_no_request() {
        let mut model = ready_model(vec![conversation(1, "Ana", false)]);

        assert_eq!(model.set_search_term(""), None);
        assert_eq!(model.set_search_term("   "), None);

        assert!(model.search().results().is_empty());
        assert!(!model.search().no_results());
    }

    #[test]
    fn zero_matches_sets_no_results_and_keeps_conversation_listing() {
        let mut model = ready_model(vec![conversation(1, "Ana", false)]);
        let ticket = search_ticket(model.set_search_term("nada"));

        model.apply_search(ticket, Ok(vec![]));

        assert!(model.search().no_results());
        assert!(matches!(model.listing(), Listing::Conversations(items) if items.len() == 1));
    }

    #[test]
    fn hello_search_then_clear_restores_conversation_list() {
        let mut model = ready_model(vec![conversation(1, "Ana", false), conversation(2, "Bia", false)]);
        let ticket = search_ticket(model.set_search_term("hello"));

        model.apply_search(ticket, Ok(vec![message(1, "hello"), message(2, "hello!")]));

        assert!(!model.search().no_results());
        assert!(matches!(model.listing(), Listing::SearchResults(items) if items.len() == 2));

        assert_eq!(model.set_search_term(""), None);

        assert!(!model.search().no_results());
        assert!(model.search().results().is_empty());
        assert!(matches!(model.listing(), Listing::Conversations(items) if items.len() == 2));
    }

    #[test]
    fn stale_search_response_never_overwrites_newer_term() {
        let mut model = ready_model(vec![]);
        let ticket_a = search_ticket(model.set_search_term("A"));
        let ticket_b = search_ticket(model.set_search_term("B"));

        model.apply_search(ticket_b, Ok(vec![message(2, "B")]));
        let late = model.apply_search(ticket_a, Ok(vec![message(1, "A")]));

        assert_eq!(late, SearchApply::Stale);
        assert_eq!(model.search().results(), &[message(2, "B")]);
    }

    #[test]
    fn stale_search_response_arriving_first_is_also_dropped() {
        let mut model = ready_model(vec![]);
        let ticket_a = search_ticket(model.set_search_term("A"));
        let ticket_b = search_ticket(model.set_search_term("B"));

        model.apply_search(ticket_a, Ok(vec![message(1, "A")]));
        assert!(model.search().results().is_empty());

        model.apply_search(ticket_b, Ok(vec![]));
        assert!(model.search().no_results());
    }

    #[test]
    fn search_failure_surfaces_inline_error() {
        let mut model = ready_model(vec![]);
        let ticket = search_ticket(model.type_search_char('x'));

        model.apply_search(ticket, Err(GatewayError::Unavailable));

        assert_eq!(model.error(), Some(ListError::SearchMessages));
        assert!(!model.search().no_results());
    }

    #[test]
    fn clearing_the_term_drops_search_error() {
        let mut model = ready_model(vec![conversation(1, "Ana", false)]);
        let ticket = search_ticket(model.type_search_char('x'));
        model.apply_search(ticket, Err(GatewayError::Unavailable));

        model.clear_search();

        assert_eq!(model.error(), None);
        assert_eq!(model.listing(), Listing::Conversations(model.list().conversations()));
    }

    #[test]
    fn typing_keeps_term_controlled_by_model() {
        let mut model = ready_model(vec![]);

        model.type_search_char('o');
        model.type_search_char('i');
        model.erase_search_char();

        assert_eq!(model.search().term(), "o");
    }

    #[test]
    fn selection_follows_active_listing() {
        let mut model = ready_model(vec![conversation(1, "Ana", false), conversation(2, "Bia", false)]);
        assert_eq!(model.selected_target(), Some(1));

        let ticket = search_ticket(model.set_search_term("oi"));
        model.apply_search(ticket, Ok(vec![message(5, "oi"), message(6, "oi!")]));
        model.select_next();

        assert_eq!(model.selected_index(), Some(1));
        assert_eq!(model.selected_target(), Some(6));

        model.clear_search();
        assert_eq!(model.selected_target(), Some(1));
    }

    #[test]
    fn favorite_star_on_conversation_seven_stays_favorited_after_resync() {
        let mut service = FakeService {
            conversations: vec![conversation(7, "Amigos", false)],
        };
        let mut model = ready_model(service.snapshot().expect("snapshot"));

        let request = model.toggle_favorite(7);
        assert_eq!(request, Some(SyncRequest::ToggleFavorite { conversation_id: 7 }));
        assert_eq!(model.list().conversation(7).map(|item| item.favorited), Some(true));

        let follow_up = model.apply_toggle(7, service.toggle(7));
        assert_eq!(follow_up, SyncRequest::ListConversations);

        model.apply_refresh(service.snapshot());
        assert_eq!(model.list().conversation(7).map(|item| item.favorited), Some(true));
    }

    #[test]
    fn toggling_twice_with_resync_restores_original_value() {
        for original in [false, true] {
            let mut service = FakeService {
                conversations: vec![conversation(3, "Time", original)],
            };
            let mut model = ready_model(service.snapshot().expect("snapshot"));

            for _ in 0..2 {
                model.toggle_favorite(3);
                model.apply_toggle(3, service.toggle(3));
                model.apply_refresh(service.snapshot());
            }

            assert_eq!(
                model.list().conversation(3).map(|item| item.favorited),
                Some(original)
            );
        }
    }

    #[test]
    fn failed_toggle_keeps_flip_until_resync_corrects_it() {
        let service = FakeService {
            conversations: vec![conversation(4, "Ops", false)],
        };
        let mut model = ready_model(service.snapshot().expect("snapshot"));

        model.toggle_favorite(4);
        let follow_up = model.apply_toggle(4, Err(GatewayError::Unavailable));

        assert_eq!(follow_up, SyncRequest::ListConversations);
        assert_eq!(model.error(), Some(ListError::ToggleFavorite));
        assert_eq!(model.list().conversation(4).map(|item| item.favorited), Some(true));

        model.apply_refresh(service.snapshot());
        assert_eq!(model.list().conversation(4).map(|item| item.favorited), Some(false));
        assert_eq!(model.error(), Some(ListError::ToggleFavorite));
    }

    #[test]
    fn successful_toggle_after_failure_clears_toggle_error() {
        let mut service = FakeService {
            conversations: vec![conversation(4, "Ops", false)],
        };
        let mut model = ready_model(service.snapshot().expect("snapshot"));

        model.toggle_favorite(4);
        model.apply_toggle(4, Err(GatewayError::Unavailable));
        model.apply_refresh(service.snapshot());

        model.toggle_favorite(4);
        model.apply_toggle(4, service.toggle(4));
        assert_eq!(model.error(), None);

        model.apply_refresh(service.snapshot());
        assert_eq!(model.error(), None);
        assert_eq!(model.list().conversation(4).map(|item| item.favorited), Some(true));
    }

    #[test]
    fn later_resync_clears_toggle_error() {
        let service = FakeService {
            conversations: vec![conversation(4, "Ops", false)],
        };
        let mut model = ready_model(service.snapshot().expect("snapshot"));
        model.toggle_favorite(4);
        model.apply_toggle(4, Err(GatewayError::Unavailable));
        model.apply_refresh(service.snapshot());

        model.refresh();
        model.apply_refresh(service.snapshot());

        assert_eq!(model.error(), None);
    }

    #[test]
    fn toggle_for_unknown_conversation_issues_nothing() {
        let mut model = ready_model(vec![conversation(1, "Ana", false)]);

        assert_eq!(model.toggle_favorite(42), None);
    }

    #[test]
    fn profile_toggle_keeps_search_and_list_state() {
        let mut model = ready_model(vec![conversation(1, "Ana", false)]);
        let ticket = search_ticket(model.set_search_term("oi"));
        model.apply_search(ticket, Ok(vec![message(1, "oi")]));

        model.toggle_profile();

        assert!(model.profile_visible());
        assert_eq!(model.search().term(), "oi");
        assert_eq!(model.search().results().len(), 1);
        assert_eq!(model.list().conversations().len(), 1);

        model.toggle_profile();
        assert!(!model.profile_visible());
    }
}
