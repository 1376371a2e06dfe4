use super::conversation::Conversation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationListSync {
    /// Nothing fetched yet for this session.
    Unauthenticated,
    Loading,
    Ready,
    /// The session could not be established. Consumers redirect to sign-in.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationListState {
    sync: ConversationListSync,
    conversations: Vec<Conversation>,
    selected_index: Option<usize>,
}

impl Default for ConversationListState {
    fn default() -> Self {
        Self {
            sync: ConversationListSync::Unauthenticated,
            conversations: Vec::new(),
            selected_index: None,
        }
    }
}

impl ConversationListState {
    pub fn sync(&self) -> ConversationListSync {
        self.sync
    }

    pub fn is_ready(&self) -> bool {
        self.sync == ConversationListSync::Ready
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, conversation_id: i64) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|conversation| conversation.id == conversation_id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        self.selected_index
            .and_then(|index| self.conversations.get(index))
    }

    /// Ready keeps showing the current snapshot while a resync is in flight.
    pub fn set_loading(&mut self) {
        if self.sync != ConversationListSync::Ready {
            self.sync = ConversationListSync::Loading;
        }
    }

    /// Replaces the whole snapshot. Pending optimistic edits are discarded.
    pub fn set_ready(&mut self, conversations: Vec<Conversation>) {
        let previous_selected_id = self.selected_conversation().map(|item| item.id);
        self.sync = ConversationListSync::Ready;
        self.conversations = conversations;
        self.selected_index = resolve_selection_index(&self.conversations, previous_selected_id);
    }

    pub fn set_failed(&mut self) {
        self.sync = ConversationListSync::Failed;
        self.conversations.clear();
        self.selected_index = None;
    }

    /// Flips the local favorite bit. Returns false for unknown ids.
    pub fn toggle_favorite(&mut self, conversation_id: i64) -> bool {
        match self
            .conversations
            .iter_mut()
            .find(|conversation| conversation.id == conversation_id)
        {
            Some(conversation) => {
                conversation.toggle_favorited();
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        let last_index = self.conversations.len().saturating_sub(1);
        self.selected_index = Some(std::cmp::min(index.saturating_add(1), last_index));
    }

    pub fn select_previous(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        self.selected_index = Some(index.saturating_sub(1));
    }
}

fn resolve_selection_index(
    conversations: &[Conversation],
    previous_selected_id: Option<i64>,
) -> Option<usize> {
    if conversations.is_empty() {
        return None;
    }

    previous_selected_id
        .and_then(|id| conversations.iter().position(|item| item.id == id))
        .or(Some(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationKind;

    fn conversation(id: i64, name: &str) -> Conversation {
        Conversation {
            id,
            name: name.to_owned(),
            username: None,
            kind: ConversationKind::Direct,
            last_message: None,
            last_message_sender_name: None,
            last_message_created_at_ms: None,
            favorited: false,
        }
    }

    #[test]
    fn default_state_is_unauthenticated_without_selection() {
        let state = ConversationListState::default();

        assert_eq!(state.sync(), ConversationListSync::Unauthenticated);
        assert!(state.conversations().is_empty());
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn set_loading_from_unauthenticated_moves_to_loading() {
        let mut state = ConversationListState::default();

        state.set_loading();

        assert_eq!(state.sync(), ConversationListSync::Loading);
    }

    #[test]
    fn set_loading_keeps_ready_snapshot_visible() {
        let mut state = ConversationListState::default();
        state.set_ready(vec![conversation(1, "Geral")]);

        state.set_loading();

        assert_eq!(state.sync(), ConversationListSync::Ready);
        assert_eq!(state.conversations().len(), 1);
    }

    #[test]
    fn set_ready_with_data_selects_first_item() {
        let mut state = ConversationListState::default();

        state.set_ready(vec![conversation(1, "Geral"), conversation(2, "Backend")]);

        assert!(state.is_ready());
        assert_eq!(state.selected_conversation().map(|item| item.id), Some(1));
    }

    #[test]
    fn set_ready_with_empty_list_is_ready_without_selection() {
        let mut state = ConversationListState::default();

        state.set_ready(vec![]);

        assert!(state.is_ready());
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn set_failed_clears_items_and_selection() {
        let mut state = ConversationListState::default();
        state.set_ready(vec![conversation(1, "Geral")]);

        state.set_failed();

        assert_eq!(state.sync(), ConversationListSync::Failed);
        assert!(state.conversations().is_empty());
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn toggle_favorite_flips_only_matching_conversation() {
        let mut state = ConversationListState::default();
        state.set_ready(vec![conversation(1, "Geral"), conversation(7, "Amigos")]);

        assert!(state.toggle_favorite(7));

        assert_eq!(state.conversation(7).map(|item| item.favorited), Some(true));
        assert_eq!(state.conversation(1).map(|item| item.favorited), Some(false));
    }

    #[test]
    fn toggle_favorite_reports_unknown_id() {
        let mut state = ConversationListState::default();
        state.set_ready(vec![conversation(1, "Geral")]);

        assert!(!state.toggle_favorite(99));
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut state = ConversationListState::default();
        state.set_ready(vec![conversation(1, "Geral"), conversation(2, "Backend")]);

        state.select_next();
        state.select_next();
        state.select_previous();

        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn set_ready_preserves_selection_by_id() {
        let mut state = ConversationListState::default();
        state.set_ready(vec![
            conversation(1, "Geral"),
            conversation(2, "Backend"),
            conversation(3, "Ops"),
        ]);
        state.select_next();

        state.set_ready(vec![
            conversation(8, "Infra"),
            conversation(9, "Design"),
            conversation(2, "Backend"),
        ]);

        assert_eq!(state.selected_index(), Some(2));
        assert_eq!(state.selected_conversation().map(|item| item.id), Some(2));
    }

    #[test]
    fn set_ready_falls_back_to_first_when_selection_disappears() {
        let mut state = ConversationListState::default();
        state.set_ready(vec![conversation(1, "Geral"), conversation(2, "Backend")]);
        state.select_next();

        state.set_ready(vec![conversation(10, "Infra"), conversation(11, "Design")]);

        assert_eq!(state.selected_conversation().map(|item| item.id), Some(10));
    }
}
