//! Message compose field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::compose_state::ComposeState;

use super::styles;

const PLACEHOLDER_TEXT: &str = "Press 'i' to type a message...";
const SENDING_TEXT: &str = "Sending...";
const PROMPT_SYMBOL: &str = "> ";

pub fn render_compose_input(
    frame: &mut Frame<'_>,
    area: Rect,
    compose: &ComposeState,
    is_focused: bool,
    is_sending: bool,
) {
    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if is_sending {
        block = block.title(SENDING_TEXT);
    }

    let paragraph = Paragraph::new(build_input_line(compose, is_focused)).block(block);
    frame.render_widget(paragraph, area);

    if is_focused {
        let before_cursor: String = compose.text().chars().take(compose.cursor()).collect();
        let offset = (PROMPT_SYMBOL.width() + before_cursor.width()).min(u16::MAX as usize) as u16;
        let cursor_x = area.x.saturating_add(1).saturating_add(offset);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn build_input_line(compose: &ComposeState, is_focused: bool) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if !is_focused && compose.text().is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(PLACEHOLDER_TEXT.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(compose.text(), styles::input_text_style()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn shows_placeholder_when_empty_and_unfocused() {
        let text = line_text(&build_input_line(&ComposeState::default(), false));

        assert!(text.contains(PLACEHOLDER_TEXT));
        assert!(text.starts_with(PROMPT_SYMBOL));
    }

    #[test]
    fn shows_bare_prompt_when_focused_and_empty() {
        let text = line_text(&build_input_line(&ComposeState::default(), true));

        assert_eq!(text, PROMPT_SYMBOL);
    }

    #[test]
    fn keeps_draft_visible_when_unfocused() {
        let mut compose = ComposeState::default();
        compose.insert('o');
        compose.insert('i');

        let text = line_text(&build_input_line(&compose, false));

        assert!(text.contains("oi"));
        assert!(!text.contains(PLACEHOLDER_TEXT));
    }
}
