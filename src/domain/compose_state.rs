//! Edit buffer for composing a message inside an open conversation.

/// Upper bound on a composed message, in characters.
const MAX_COMPOSE_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposeState {
    chars: Vec<char>,
    /// Cursor as a character index into `chars`.
    cursor: usize,
}

impl ComposeState {
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.chars.iter().all(|ch| ch.is_whitespace())
    }

    /// Returns false once the buffer is full.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.chars.len() >= MAX_COMPOSE_CHARS {
            return false;
        }

        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }

        self.cursor -= 1;
        self.chars.remove(self.cursor);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Trimmed content ready to send, or `None` when there is nothing to send.
    pub fn submission(&self) -> Option<String> {
        let text = self.text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }
}
