use anyhow::Result;

use crate::domain::{
    conversation_list::{Listing, RefreshOutcome},
    conversation_page::{ConversationPageModel, PageOutcome},
    events::{AppEvent, KeyInput},
    search_state::SearchApply,
    shell_state::{Focus, Screen, ShellState},
    sync::{SyncRequest, SyncResponse},
};

use super::contracts::{RequestDispatcher, ShellOrchestrator};

const SESSION_REJECTED: &str = "SYNC_SESSION_REJECTED";
const STALE_RESPONSE_DROPPED: &str = "SYNC_STALE_RESPONSE_DROPPED";
const LIST_RESYNC_FAILED: &str = "SYNC_LIST_RESYNC_FAILED";
const FAVORITE_TOGGLE_FAILED: &str = "SYNC_FAVORITE_TOGGLE_FAILED";
const REQUEST_FAILED: &str = "SYNC_REQUEST_FAILED";

pub struct DefaultShellOrchestrator<D>
where
    D: RequestDispatcher,
{
    state: ShellState,
    dispatcher: D,
}

impl<D> DefaultShellOrchestrator<D>
where
    D: RequestDispatcher,
{
    pub fn new(user_id: i64, dispatcher: D) -> Self {
        Self {
            state: ShellState::new(user_id),
            dispatcher,
        }
    }

    fn dispatch(&mut self, request: SyncRequest) {
        tracing::debug!(kind = request.kind(), "dispatching sync request");
        self.state.request_started();
        self.dispatcher.dispatch(request);
    }

    fn dispatch_opt(&mut self, request: Option<SyncRequest>) {
        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    fn redirect_to_sign_in(&mut self, source: &'static str) {
        tracing::warn!(
            code = SESSION_REJECTED,
            source,
            "session rejected by service; leaving for sign-in landing"
        );
        self.state.sign_out();
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl && key.key == "c" {
            self.state.stop();
            return;
        }

        match (self.state.screen(), self.state.focus()) {
            (Screen::SignedOut, _) => {
                if matches!(key.key.as_str(), "q" | "esc" | "enter") {
                    self.state.stop();
                }
            }
            (Screen::Conversations, Focus::Search) => self.handle_list_search_key(&key),
            (Screen::Conversations, _) => self.handle_list_key(&key),
            (Screen::Conversation, Focus::Search) => self.handle_page_search_key(&key),
            (Screen::Conversation, Focus::Compose) => self.handle_compose_key(&key),
            (Screen::Conversation, Focus::Navigation) => self.handle_page_key(&key),
        }
    }

    fn handle_list_key(&mut self, key: &KeyInput) {
        match key.key.as_str() {
            "q" => self.state.stop(),
            "j" | "down" => self.state.conversations_mut().select_next(),
            "k" | "up" => self.state.conversations_mut().select_previous(),
            "enter" | "l" => self.open_selected_conversation(),
            "/" => self.state.set_focus(Focus::Search),
            "f" => self.toggle_selected_favorite(),
            "p" => self.state.conversations_mut().toggle_profile(),
            "r" => {
                let request = self.state.conversations_mut().refresh();
                self.dispatch(request);
            }
            "esc" => {
                let request = self.state.conversations_mut().clear_search();
                self.dispatch_opt(request);
            }
            _ => {}
        }
    }

    fn handle_list_search_key(&mut self, key: &KeyInput) {
        let request = match key.key.as_str() {
            "esc" | "enter" => {
                self.state.set_focus(Focus::Navigation);
                None
            }
            "backspace" => self.state.conversations_mut().erase_search_char(),
            _ => match key.as_char() {
                Some(ch) => self.state.conversations_mut().type_search_char(ch),
                None => None,
            },
        };
        self.dispatch_opt(request);
    }

    fn toggle_selected_favorite(&mut self) {
        let list = self.state.conversations();
        if !list.list().is_ready() || !matches!(list.listing(), Listing::Conversations(_)) {
            return;
        }
        let Some(conversation_id) = list.selected_target() else {
            return;
        };

        let request = self
            .state
            .conversations_mut()
            .toggle_favorite(conversation_id);
        self.dispatch_opt(request);
    }

    fn open_selected_conversation(&mut self) {
        let list = self.state.conversations();
        let Some(conversation_id) = list.selected_target() else {
            return;
        };

        let title = match list.listing() {
            Listing::SearchResults(results) => results
                .iter()
                .find(|message| message.conversation_id == conversation_id)
                .map(|message| message.conversation_name.clone()),
            Listing::Conversations(_) => None,
        }
        .or_else(|| {
            list.list()
                .conversation(conversation_id)
                .map(|conversation| conversation.name.clone())
        })
        .unwrap_or_default();

        tracing::info!(conversation_id, "opening conversation");
        let key = self.state.next_page_key(conversation_id);
        let mut page = ConversationPageModel::new(key, title);
        let request = page.load();
        self.state.open_page(page);
        self.dispatch(request);
    }

    fn handle_page_key(&mut self, key: &KeyInput) {
        let Some(page) = self.state.page_mut() else {
            return;
        };

        match key.key.as_str() {
            "q" => self.state.stop(),
            "j" | "down" => page.select_next(),
            "k" | "up" => page.select_previous(),
            "/" => self.state.set_focus(Focus::Search),
            "i" => self.state.set_focus(Focus::Compose),
            "p" => page.toggle_profile(),
            "r" => {
                let request = page.load();
                self.dispatch(request);
            }
            "esc" | "h" => {
                self.state.close_page();
                let request = self.state.conversations_mut().refresh();
                self.dispatch(request);
            }
            _ => {}
        }
    }

    fn handle_page_search_key(&mut self, key: &KeyInput) {
        let Some(page) = self.state.page_mut() else {
            return;
        };

        let request = match key.key.as_str() {
            "esc" | "enter" => {
                self.state.set_focus(Focus::Navigation);
                None
            }
            "backspace" => page.erase_search_char(),
            _ => match key.as_char() {
                Some(ch) => page.type_search_char(ch),
                None => None,
            },
        };
        self.dispatch_opt(request);
    }

    fn handle_compose_key(&mut self, key: &KeyInput) {
        let Some(page) = self.state.page_mut() else {
            return;
        };

        match key.key.as_str() {
            "esc" => self.state.set_focus(Focus::Navigation),
            "enter" => {
                let request = page.submit();
                self.dispatch_opt(request);
            }
            "backspace" => page.compose_mut().backspace(),
            "delete" => page.compose_mut().delete(),
            "left" => page.compose_mut().move_left(),
            "right" => page.compose_mut().move_right(),
            "home" => page.compose_mut().move_home(),
            "end" => page.compose_mut().move_end(),
            _ => {
                if let Some(ch) = key.as_char() {
                    page.compose_mut().insert(ch);
                }
            }
        }
    }

    fn apply_response(&mut self, response: SyncResponse) {
        if self.state.screen() == Screen::SignedOut {
            tracing::debug!("ignoring sync response after sign-out");
            return;
        }

        match response {
            SyncResponse::ConversationsListed(result) => {
                if let Err(error) = &result {
                    tracing::warn!(code = error.code(), "conversation list fetch failed");
                }

                match self.state.conversations_mut().apply_refresh(result) {
                    RefreshOutcome::Synced => {
                        let count = self.state.conversations().list().conversations().len();
                        tracing::debug!(count, "conversation snapshot replaced");
                        self.sync_page_title();
                    }
                    RefreshOutcome::Failed => {
                        tracing::warn!(
                            code = LIST_RESYNC_FAILED,
                            "keeping previous conversation snapshot"
                        );
                    }
                    RefreshOutcome::RedirectToSignIn => {
                        self.redirect_to_sign_in("list_conversations")
                    }
                }
            }
            SyncResponse::MessagesSearched { ticket, result } => {
                if let Err(error) = &result {
                    if error.is_auth() {
                        self.redirect_to_sign_in("search_messages");
                        return;
                    }
                    tracing::warn!(code = error.code(), "global message search failed");
                }

                let applied = self.state.conversations_mut().apply_search(ticket, result);
                if applied == SearchApply::Stale {
                    tracing::debug!(
                        code = STALE_RESPONSE_DROPPED,
                        generation = ticket.generation(),
                        "dropping search response for superseded term"
                    );
                }
            }
            SyncResponse::FavoriteToggled {
                conversation_id,
                result,
            } => {
                if let Err(error) = &result {
                    if error.is_auth() {
                        self.redirect_to_sign_in("toggle_favorite");
                        return;
                    }
                    tracing::warn!(
                        code = FAVORITE_TOGGLE_FAILED,
                        error_code = error.code(),
                        conversation_id,
                        "favorite toggle failed; optimistic flip kept until resync"
                    );
                }

                let resync = self
                    .state
                    .conversations_mut()
                    .apply_toggle(conversation_id, result);
                self.dispatch(resync);
            }
            SyncResponse::MessagesListed { page: key, result } => {
                let Some(page) = self.state.page_mut() else {
                    return;
                };
                if let Err(error) = &result {
                    tracing::warn!(
                        code = error.code(),
                        conversation_id = key.conversation_id,
                        "timeline load failed"
                    );
                }

                let outcome = page.apply_timeline(key, result);
                self.after_page_outcome(outcome, "list_messages");
            }
            SyncResponse::ConversationMessagesSearched {
                page: key,
                ticket,
                result,
            } => {
                let Some(page) = self.state.page_mut() else {
                    return;
                };

                let outcome = page.apply_search(key, ticket, result);
                self.after_page_outcome(outcome, "search_conversation_messages");
            }
            SyncResponse::MessageSent { page: key, result } => {
                let Some(page) = self.state.page_mut() else {
                    return;
                };
                if let Err(error) = &result {
                    tracing::warn!(
                        code = REQUEST_FAILED,
                        error_code = error.code(),
                        conversation_id = key.conversation_id,
                        "message send failed"
                    );
                }

                let (outcome, follow_up) = page.apply_sent(key, result);
                self.after_page_outcome(outcome, "send_message");
                self.dispatch_opt(follow_up);
            }
        }
    }

    fn after_page_outcome(&mut self, outcome: PageOutcome, source: &'static str) {
        match outcome {
            PageOutcome::Applied => {}
            PageOutcome::Ignored => tracing::debug!(
                code = STALE_RESPONSE_DROPPED,
                source,
                "dropping response for superseded page state"
            ),
            PageOutcome::RedirectToSignIn => self.redirect_to_sign_in(source),
        }
    }

    fn sync_page_title(&mut self) {
        let Some(conversation_id) = self.state.page().map(|page| page.conversation_id()) else {
            return;
        };
        let Some(name) = self
            .state
            .conversations()
            .list()
            .conversation(conversation_id)
            .map(|conversation| conversation.name.clone())
        else {
            return;
        };

        if let Some(page) = self.state.page_mut() {
            page.set_title(name);
        }
    }
}

impl<D> ShellOrchestrator for DefaultShellOrchestrator<D>
where
    D: RequestDispatcher,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn start(&mut self) {
        let request = self.state.conversations_mut().refresh();
        self.dispatch(request);
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::Synced(response) => {
                self.state.request_finished();
                self.apply_response(response);
            }
        }

        Ok(())
    }
}
