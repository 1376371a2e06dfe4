/// A message as returned by the search endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub conversation_id: i64,
    pub content: String,
    pub sender_name: String,
    pub created_at_ms: Option<i64>,
    pub conversation_name: String,
}

/// A message inside an open conversation's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineMessage {
    pub id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub content: String,
    pub created_at_ms: Option<i64>,
}

impl TimelineMessage {
    pub fn is_own(&self, logged_user_id: i64) -> bool {
        self.sender_id == logged_user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_own_compares_sender_with_logged_user() {
        let message = TimelineMessage {
            id: 1,
            sender_id: 5,
            sender_name: "Bia".to_owned(),
            content: "oi".to_owned(),
            created_at_ms: None,
        };

        assert!(message.is_own(5));
        assert!(!message.is_own(6));
    }
}
