/// Kind of conversation for rendering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationKind {
    /// 1:1 conversation with another user.
    #[default]
    Direct,
    /// Named group conversation.
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: i64,
    pub name: String,
    /// Counterpart username. Always `None` for group conversations.
    pub username: Option<String>,
    pub kind: ConversationKind,
    pub last_message: Option<String>,
    pub last_message_sender_name: Option<String>,
    pub last_message_created_at_ms: Option<i64>,
    pub favorited: bool,
}

impl Conversation {
    pub fn is_group(&self) -> bool {
        self.kind == ConversationKind::Group
    }

    /// Username to display next to the name, only for direct conversations.
    pub fn display_username(&self) -> Option<&str> {
        match self.kind {
            ConversationKind::Direct => self.username.as_deref(),
            ConversationKind::Group => None,
        }
    }

    pub fn toggle_favorited(&mut self) {
        self.favorited = !self.favorited;
    }
}
