use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::{
    conversation::Conversation,
    conversation_list::{ConversationListModel, Listing},
    conversation_list_state::ConversationListSync,
    conversation_page::{ConversationPageModel, PageContent, TimelineStatus},
    message::Message,
    shell_state::{Focus, Screen, ShellState},
};

use super::{
    compose_input::render_compose_input,
    format,
    search_bar::render_search_bar,
    styles,
    timeline::{build_timeline_rows, row_to_list_item},
};

const FAVORITE_ON: &str = "★";
const FAVORITE_OFF: &str = "☆";
const GROUP_MARKER: &str = "#";
const DIRECT_MARKER: &str = "@";

pub fn render(frame: &mut Frame<'_>, state: &mut ShellState) {
    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    match state.screen() {
        Screen::Conversations => render_conversations_screen(frame, content_area, state),
        Screen::Conversation => render_conversation_screen(frame, content_area, state),
        Screen::SignedOut => render_signed_out(frame, content_area),
    }

    frame.render_widget(Paragraph::new(status_line(state)), status_area);
}

fn border_style(active: bool) -> Style {
    if active {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    }
}

/// Splits off a right-hand side panel when `visible`.
fn with_side_panel(area: Rect, visible: bool) -> (Rect, Option<Rect>) {
    if !visible {
        return (area, None);
    }

    let [main, side] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .areas(area);
    (main, Some(side))
}

fn render_error_line(frame: &mut Frame<'_>, area: Rect, message: Option<&'static str>) {
    if let Some(message) = message {
        frame.render_widget(
            Paragraph::new(Span::styled(message, styles::error_style())),
            area,
        );
    }
}

// =============================================================================
// Conversation list screen
// =============================================================================

fn render_conversations_screen(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let model = state.conversations();
    let [search_area, body_area, error_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(u16::from(model.error().is_some())),
        ])
        .areas(area);

    render_search_bar(
        frame,
        search_area,
        model.search(),
        state.focus() == Focus::Search,
    );

    let (list_area, profile_area) = with_side_panel(body_area, model.profile_visible());
    render_listing(frame, list_area, model, state.focus() == Focus::Navigation);
    if let Some(profile_area) = profile_area {
        render_user_profile(frame, profile_area, state.user_id(), model);
    }

    render_error_line(frame, error_area, model.error().map(|error| error.message()));
}

fn render_listing(
    frame: &mut Frame<'_>,
    area: Rect,
    model: &ConversationListModel,
    is_active: bool,
) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let (title, items) = match model.listing() {
        Listing::SearchResults(results) => (
            format!("Messages ({})", results.len()),
            results
                .iter()
                .map(|message| ListItem::new(search_result_line(message, inner_width)))
                .collect::<Vec<_>>(),
        ),
        Listing::Conversations(conversations) => {
            if let Some(placeholder) = listing_placeholder(model.list().sync(), conversations) {
                let panel = Paragraph::new(placeholder).block(
                    Block::default()
                        .title("Conversations")
                        .borders(Borders::ALL)
                        .border_style(border_style(is_active)),
                );
                frame.render_widget(panel, area);
                return;
            }

            (
                format!("Conversations ({})", conversations.len()),
                conversations
                    .iter()
                    .map(|conversation| ListItem::new(conversation_line(conversation, inner_width)))
                    .collect::<Vec<_>>(),
            )
        }
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style(is_active)),
        )
        .highlight_style(styles::highlight_style());

    let mut list_state = ListState::default();
    list_state.select(model.selected_index());
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn listing_placeholder(
    sync: ConversationListSync,
    conversations: &[Conversation],
) -> Option<&'static str> {
    if !conversations.is_empty() {
        return None;
    }

    Some(match sync {
        ConversationListSync::Unauthenticated | ConversationListSync::Loading => {
            "Loading conversations..."
        }
        ConversationListSync::Ready => "No conversations yet. Press 'r' to refresh.",
        ConversationListSync::Failed => "Failed to load conversations.",
    })
}

fn conversation_line(conversation: &Conversation, width: usize) -> Line<'static> {
    let star = if conversation.favorited {
        FAVORITE_ON
    } else {
        FAVORITE_OFF
    };
    let marker = if conversation.is_group() {
        GROUP_MARKER
    } else {
        DIRECT_MARKER
    };
    let timestamp = conversation
        .last_message_created_at_ms
        .map(format::list_timestamp)
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(format!("{star} "), styles::favorite_style()),
        Span::styled(format!("{marker} "), styles::kind_marker_style()),
        Span::styled(conversation.name.clone(), styles::conversation_name_style()),
    ];
    if let Some(username) = conversation.display_username() {
        spans.push(Span::styled(
            format!(" ({username})"),
            styles::username_style(),
        ));
    }
    spans.push(Span::styled(" | ", styles::separator_style()));

    let sender = conversation
        .last_message_sender_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(|name| format!("{name}: "));
    if let Some(sender) = sender {
        spans.push(Span::styled(sender, styles::last_sender_style()));
    }

    let used: usize = spans.iter().map(|span| span.content.width()).sum();
    let suffix = if timestamp.is_empty() {
        String::new()
    } else {
        format!(" {timestamp}")
    };
    let preview = conversation
        .last_message
        .as_deref()
        .map(format::single_line)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "No messages yet".to_owned());
    let available = width.saturating_sub(used + suffix.width());
    let preview = format::truncate_to_width(&preview, available);
    let padding = available.saturating_sub(preview.width());

    spans.push(Span::styled(preview, styles::preview_style()));
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding)));
    }
    if !suffix.is_empty() {
        spans.push(Span::styled(suffix, styles::timestamp_style()));
    }

    Line::from(spans)
}

fn search_result_line(message: &Message, width: usize) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            message.conversation_name.clone(),
            styles::conversation_name_style(),
        ),
        Span::styled(" | ", styles::separator_style()),
        Span::styled(
            format!("{}: ", message.sender_name),
            styles::last_sender_style(),
        ),
    ];

    let suffix = format!(" {}", format::search_timestamp(message.created_at_ms));
    let used: usize = spans.iter().map(|span| span.content.width()).sum();
    let available = width.saturating_sub(used + suffix.width());
    let content = format::truncate_to_width(&format::single_line(&message.content), available);
    let padding = available.saturating_sub(content.width());

    spans.push(Span::styled(content, styles::message_text_style()));
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding)));
    }
    spans.push(Span::styled(suffix, styles::timestamp_style()));

    Line::from(spans)
}

fn render_user_profile(
    frame: &mut Frame<'_>,
    area: Rect,
    user_id: i64,
    model: &ConversationListModel,
) {
    let conversations = model.list().conversations();
    let favorites = conversations.iter().filter(|item| item.favorited).count();
    let groups = conversations.iter().filter(|item| item.is_group()).count();

    let lines = vec![
        Line::from(format!("User id: {user_id}")),
        Line::from(format!("Conversations: {}", conversations.len())),
        Line::from(format!("Favorites: {favorites}")),
        Line::from(format!("Groups: {groups}")),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title("Profile")
            .borders(Borders::ALL)
            .border_style(styles::inactive_panel_border_style()),
    );
    frame.render_widget(panel, area);
}

// =============================================================================
// Conversation screen
// =============================================================================

fn render_conversation_screen(frame: &mut Frame<'_>, area: Rect, state: &mut ShellState) {
    let focus = state.focus();
    let user_id = state.user_id();
    let details = state
        .page()
        .and_then(|page| state.conversations().list().conversation(page.conversation_id()))
        .cloned();
    let Some(page) = state.page_mut() else {
        return;
    };

    let [search_area, body_area, compose_area, error_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(u16::from(page.error().is_some())),
        ])
        .areas(area);

    render_search_bar(frame, search_area, page.search(), focus == Focus::Search);

    let (content_area, profile_area) = with_side_panel(body_area, page.profile_visible());
    render_page_content(frame, content_area, page, user_id, focus == Focus::Navigation);
    if let Some(profile_area) = profile_area {
        render_conversation_profile(frame, profile_area, page, details.as_ref());
    }

    render_compose_input(
        frame,
        compose_area,
        page.compose(),
        focus == Focus::Compose,
        page.is_sending(),
    );
    render_error_line(frame, error_area, page.error().map(|error| error.message()));
}

fn render_page_content(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &mut ConversationPageModel,
    user_id: i64,
    is_active: bool,
) {
    let block = Block::default()
        .title(page.title().to_owned())
        .borders(Borders::ALL)
        .border_style(border_style(is_active));
    let inner_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem<'static>> = match page.content() {
        PageContent::SearchResults(results) => results
            .iter()
            .map(|message| ListItem::new(search_result_line(message, inner_width)))
            .collect(),
        PageContent::Timeline(messages) => {
            if let Some(placeholder) = timeline_placeholder(page.status(), messages.is_empty()) {
                frame.render_widget(Paragraph::new(placeholder).block(block), area);
                return;
            }
            build_timeline_rows(messages, user_id)
                .iter()
                .map(row_to_list_item)
                .collect()
        }
    };

    page.update_scroll_offset(area.height.saturating_sub(2) as usize);

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::highlight_style());
    let mut list_state = ListState::default();
    list_state.select(page.selected_index());
    *list_state.offset_mut() = page.scroll_offset();
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn timeline_placeholder(status: TimelineStatus, is_empty: bool) -> Option<&'static str> {
    match status {
        TimelineStatus::Loading if is_empty => Some("Loading messages..."),
        TimelineStatus::Error if is_empty => Some("Failed to load messages. Press 'r' to retry."),
        TimelineStatus::Ready if is_empty => Some("No messages in this conversation"),
        _ => None,
    }
}

fn render_conversation_profile(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &ConversationPageModel,
    details: Option<&Conversation>,
) {
    let mut lines = vec![Line::from(Span::styled(
        page.title().to_owned(),
        styles::conversation_name_style(),
    ))];

    if let Some(conversation) = details {
        if let Some(username) = conversation.display_username() {
            lines.push(Line::from(format!("@{username}")));
        }
        lines.push(Line::from(if conversation.is_group() {
            "Group conversation"
        } else {
            "Direct conversation"
        }));
        if conversation.favorited {
            lines.push(Line::from(Span::styled(
                format!("{FAVORITE_ON} Favorite"),
                styles::favorite_style(),
            )));
        }
    }
    lines.push(Line::from(format!("Messages loaded: {}", page.timeline().len())));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Profile")
            .borders(Borders::ALL)
            .border_style(styles::inactive_panel_border_style()),
    );
    frame.render_widget(panel, area);
}

// =============================================================================
// Signed-out landing
// =============================================================================

fn render_signed_out(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Your session is missing or has expired.",
            styles::error_style(),
        )),
        Line::from("Sign in again, update [session] token or LINKSY_TOKEN, then restart."),
        Line::default(),
        Line::from("Press q or Enter to quit."),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Signed out").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn status_line(state: &ShellState) -> String {
    let hints = match (state.screen(), state.focus()) {
        (Screen::SignedOut, _) => "q/Enter: quit",
        (_, Focus::Search) => "type to search | Esc/Enter: done",
        (_, Focus::Compose) => "Enter: send | Esc: cancel",
        (Screen::Conversations, Focus::Navigation) => {
            "j/k: move | l/Enter: open | /: search | f: favorite | p: profile | r: refresh | q: quit"
        }
        (Screen::Conversation, Focus::Navigation) => {
            "j/k: move | i: compose | /: search | p: profile | r: reload | h/Esc: back | q: quit"
        }
    };
    let sync = if state.in_flight() > 0 {
        " | syncing..."
    } else {
        ""
    };

    format!("user {} | {hints}{sync}", state.user_id())
}
