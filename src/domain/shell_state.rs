use super::{
    conversation_list::ConversationListModel,
    conversation_page::{ConversationPageModel, PageKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Conversations,
    Conversation,
    /// Landing shown once the session turned out to be invalid.
    SignedOut,
}

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Navigation,
    Search,
    Compose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    user_id: i64,
    focus: Focus,
    signed_out: bool,
    in_flight: usize,
    page_visits: u64,
    conversations: ConversationListModel,
    page: Option<ConversationPageModel>,
}

impl ShellState {
    pub fn new(user_id: i64) -> Self {
        Self {
            running: true,
            user_id,
            focus: Focus::Navigation,
            signed_out: false,
            in_flight: 0,
            page_visits: 0,
            conversations: ConversationListModel::default(),
            page: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn screen(&self) -> Screen {
        if self.signed_out {
            Screen::SignedOut
        } else if self.page.is_some() {
            Screen::Conversation
        } else {
            Screen::Conversations
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn conversations(&self) -> &ConversationListModel {
        &self.conversations
    }

    pub fn conversations_mut(&mut self) -> &mut ConversationListModel {
        &mut self.conversations
    }

    pub fn page(&self) -> Option<&ConversationPageModel> {
        self.page.as_ref()
    }

    pub fn page_mut(&mut self) -> Option<&mut ConversationPageModel> {
        self.page.as_mut()
    }

    /// Key for a fresh visit to `conversation_id`. Never repeats within a
    /// session, even when the same conversation is reopened.
    pub fn next_page_key(&mut self, conversation_id: i64) -> PageKey {
        self.page_visits = self.page_visits.wrapping_add(1);
        PageKey::new(conversation_id, self.page_visits)
    }

    pub fn open_page(&mut self, page: ConversationPageModel) {
        self.page = Some(page);
        self.focus = Focus::Navigation;
    }

    /// Back to the list. The list model is left exactly as it was.
    pub fn close_page(&mut self) {
        self.page = None;
        self.focus = Focus::Navigation;
    }

    pub fn sign_out(&mut self) {
        self.signed_out = true;
        self.page = None;
        self.focus = Focus::Navigation;
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn request_started(&mut self) {
        self.in_flight = self.in_flight.saturating_add(1);
    }

    pub fn request_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }
}
