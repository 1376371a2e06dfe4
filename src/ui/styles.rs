//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Panels
// =============================================================================

pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn highlight_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
}

// =============================================================================
// Conversation list styles
// =============================================================================

/// Style for conversation name (bold, bright).
pub fn conversation_name_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn username_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Style for the group/person marker in front of the name.
pub fn kind_marker_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Style for last-message preview text (dimmed).
pub fn preview_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn last_sender_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub fn favorite_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn timestamp_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Search and feedback
// =============================================================================

pub fn search_prompt_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn no_results_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::ITALIC)
}

/// Inline error line under the list.
pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

// =============================================================================
// Timeline styles
// =============================================================================

pub fn message_sender_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Sender label on the logged user's own messages.
pub fn own_sender_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn date_separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Input styles
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_name_style_is_bold_white() {
        let style = conversation_name_style();
        assert_eq!(style.fg, Some(Color::White));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn favorite_style_is_yellow() {
        assert_eq!(favorite_style().fg, Some(Color::Yellow));
    }

    #[test]
    fn error_style_is_red() {
        assert_eq!(error_style().fg, Some(Color::Red));
    }

    #[test]
    fn own_sender_differs_from_other_senders() {
        assert_ne!(own_sender_style(), message_sender_style());
    }
}
