//! Model for a single open conversation: its message timeline, the
//! conversation-scoped search overlay, the compose buffer and the profile
//! panel toggle.
//!
//! Search results replace the timeline on screen but never modify it, so
//! clearing the term brings the loaded timeline back untouched.

use super::{
    compose_state::ComposeState,
    message::{Message, TimelineMessage},
    search_state::{SearchApply, SearchBegin, SearchState, SearchTicket},
    sync::{GatewayError, SyncRequest},
};

/// Rows kept visible above/below the cursor before scrolling.
const SCROLL_MARGIN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineStatus {
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    LoadMessages,
    SearchMessages,
    SendMessage,
}

impl PageError {
    pub fn message(self) -> &'static str {
        match self {
            Self::LoadMessages => "Error loading messages",
            Self::SearchMessages => "Error searching messages",
            Self::SendMessage => "Error sending message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied,
    /// Response belongs to another page visit or a superseded search.
    Ignored,
    RedirectToSignIn,
}

/// Identifies one visit to a conversation. Reopening the same conversation
/// gets a new `visit`, so responses addressed to an earlier visit are
/// never applied to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageKey {
    pub conversation_id: i64,
    pub visit: u64,
}

impl PageKey {
    pub fn new(conversation_id: i64, visit: u64) -> Self {
        Self {
            conversation_id,
            visit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageContent<'a> {
    SearchResults(&'a [Message]),
    Timeline(&'a [TimelineMessage]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationPageModel {
    key: PageKey,
    title: String,
    timeline: Vec<TimelineMessage>,
    status: TimelineStatus,
    search: SearchState,
    compose: ComposeState,
    sending: bool,
    error: Option<PageError>,
    profile_visible: bool,
    selected_index: Option<usize>,
    scroll_offset: usize,
}

impl ConversationPageModel {
    pub fn new(key: PageKey, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            timeline: Vec::new(),
            status: TimelineStatus::Loading,
            search: SearchState::default(),
            compose: ComposeState::default(),
            sending: false,
            error: None,
            profile_visible: false,
            selected_index: None,
            scroll_offset: 0,
        }
    }

    pub fn key(&self) -> PageKey {
        self.key
    }

    pub fn conversation_id(&self) -> i64 {
        self.key.conversation_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn status(&self) -> TimelineStatus {
        self.status
    }

    pub fn timeline(&self) -> &[TimelineMessage] {
        &self.timeline
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn compose(&self) -> &ComposeState {
        &self.compose
    }

    pub fn compose_mut(&mut self) -> &mut ComposeState {
        &mut self.compose
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn error(&self) -> Option<PageError> {
        self.error
    }

    pub fn profile_visible(&self) -> bool {
        self.profile_visible
    }

    pub fn toggle_profile(&mut self) {
        self.profile_visible = !self.profile_visible;
    }

    pub fn content(&self) -> PageContent<'_> {
        if self.search.is_active() {
            PageContent::SearchResults(self.search.results())
        } else {
            PageContent::Timeline(&self.timeline)
        }
    }

    fn content_len(&self) -> usize {
        match self.content() {
            PageContent::SearchResults(results) => results.len(),
            PageContent::Timeline(messages) => messages.len(),
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn load(&mut self) -> SyncRequest {
        if self.timeline.is_empty() {
            self.status = TimelineStatus::Loading;
        }

        SyncRequest::ListMessages { page: self.key }
    }

    pub fn apply_timeline(
        &mut self,
        page: PageKey,
        result: Result<Vec<TimelineMessage>, GatewayError>,
    ) -> PageOutcome {
        if page != self.key {
            return PageOutcome::Ignored;
        }

        match result {
            Ok(messages) => {
                self.timeline = messages;
                self.status = TimelineStatus::Ready;
                if self.error == Some(PageError::LoadMessages) {
                    self.error = None;
                }
                if !self.search.is_active() {
                    self.select_last();
                }
                PageOutcome::Applied
            }
            Err(error) if error.is_auth() => PageOutcome::RedirectToSignIn,
            Err(_) => {
                self.status = TimelineStatus::Error;
                self.error = Some(PageError::LoadMessages);
                PageOutcome::Applied
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

    fn after_search_begin(&mut self, begin: SearchBegin) -> Option<SyncRequest> {
        match begin {
            SearchBegin::Cleared => {
                if self.error == Some(PageError::SearchMessages) {
                    self.error = None;
                }
                self.select_last();
                None
            }
            SearchBegin::Query { ticket, term } => Some(SyncRequest::SearchConversationMessages {
                page: self.key,
                ticket,
                term,
            }),
        }
    }

    pub fn apply_search(
        &mut self,
        page: PageKey,
        ticket: SearchTicket,
        result: Result<Vec<Message>, GatewayError>,
    ) -> PageOutcome {
        if page != self.key {
            return PageOutcome::Ignored;
        }

        match result {
            Ok(messages) => match self.search.resolve(ticket, messages) {
                SearchApply::Applied => {
                    self.selected_index = (!self.search.results().is_empty()).then_some(0);
                    self.scroll_offset = 0;
                    if self.error == Some(PageError::SearchMessages) {
                        self.error = None;
                    }
                    PageOutcome::Applied
                }
                SearchApply::Stale => PageOutcome::Ignored,
            },
            Err(error) => match self.search.fail(ticket) {
                SearchApply::Stale => PageOutcome::Ignored,
                SearchApply::Applied if error.is_auth() => PageOutcome::RedirectToSignIn,
                SearchApply::Applied => {
                    self.error = Some(PageError::SearchMessages);
                    PageOutcome::Applied
                }
            },
        }
    }

    /// Returns the send request, or `None` for blank text or while a send is
    /// already in flight.
    pub fn submit(&mut self) -> Option<SyncRequest> {
        if self.sending {
            return None;
        }

        let content = self.compose.submission()?;
        self.sending = true;
        Some(SyncRequest::SendMessage {
            page: self.key,
            content,
        })
    }

    /// On success clears the buffer and returns the timeline reload.
    pub fn apply_sent(
        &mut self,
        page: PageKey,
        result: Result<(), GatewayError>,
    ) -> (PageOutcome, Option<SyncRequest>) {
        if page != self.key {
            return (PageOutcome::Ignored, None);
        }

        self.sending = false;
        match result {
            Ok(()) => {
                self.compose.clear();
                if self.error == Some(PageError::SendMessage) {
                    self.error = None;
                }
                (PageOutcome::Applied, Some(self.load()))
            }
            Err(error) if error.is_auth() => (PageOutcome::RedirectToSignIn, None),
            Err(_) => {
                self.error = Some(PageError::SendMessage);
                (PageOutcome::Applied, None)
            }
        }
    }

    pub fn select_next(&mut self) {
        let len = self.content_len();
        if len == 0 {
            return;
        }

        self.selected_index = Some(match self.selected_index {
            None => 0,
            Some(index) => (index + 1).min(len - 1),
        });
    }

    pub fn select_previous(&mut self) {
        let len = self.content_len();
        if len == 0 {
            return;
        }

        self.selected_index = Some(match self.selected_index {
            None => len - 1,
            Some(index) => index.saturating_sub(1),
        });
    }

    fn select_last(&mut self) {
        let len = self.content_len();
        self.selected_index = len.checked_sub(1);
    }

    /// Keeps the selected row inside the viewport with a small margin.
    pub fn update_scroll_offset(&mut self, viewport_height: usize) {
        let Some(index) = self.selected_index else {
            self.scroll_offset = 0;
            return;
        };
        if viewport_height == 0 {
            return;
        }

        let margin = SCROLL_MARGIN.min(viewport_height / 2);

        if index < self.scroll_offset + margin {
            self.scroll_offset = index.saturating_sub(margin);
        }

        if index + margin >= self.scroll_offset + viewport_height {
            self.scroll_offset = (index + margin + 1).saturating_sub(viewport_height);
        }

        let max_offset = self.content_len().saturating_sub(viewport_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}
