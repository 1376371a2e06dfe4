//! Search field shared by the list and conversation screens.
//!
//! The field always shows the model's term, never a local copy.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::search_state::SearchState;

use super::styles;

pub const NO_RESULTS_TEXT: &str = "Mensagem não encontrada";
const PROMPT_SYMBOL: &str = "/ ";
const PLACEHOLDER_TEXT: &str = "Press '/' to search messages";

/// Needs three rows: border, term, border.
pub fn render_search_bar(frame: &mut Frame<'_>, area: Rect, search: &SearchState, is_focused: bool) {
    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let mut block = Block::default()
        .title("Search")
        .borders(Borders::ALL)
        .border_style(border_style);
    if search.is_pending() {
        block = block.title_bottom("searching...");
    }

    frame.render_widget(Paragraph::new(search_line(search, is_focused)).block(block), area);

    if is_focused {
        let offset = (PROMPT_SYMBOL.width() + search.term().width()).min(u16::MAX as usize) as u16;
        frame.set_cursor_position((
            area.x.saturating_add(1).saturating_add(offset),
            area.y.saturating_add(1),
        ));
    }
}

pub fn search_line(search: &SearchState, is_focused: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(PROMPT_SYMBOL, styles::search_prompt_style())];

    if search.term().is_empty() && !is_focused {
        spans.push(Span::styled(PLACEHOLDER_TEXT, styles::input_placeholder_style()));
    } else {
        spans.push(Span::styled(
            search.term().to_owned(),
            styles::input_text_style(),
        ));
    }

    if search.no_results() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(NO_RESULTS_TEXT, styles::no_results_style()));
    }

    Line::from(spans)
}
