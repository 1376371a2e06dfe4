//! Conversation timeline rendering.
//!
//! One list item per message so selection indices match the model:
//! - a date header is folded into the first message of each day
//! - consecutive messages from the same sender show the name only once
//! - the logged user's messages are labelled `You`

use chrono::NaiveDate;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::message::TimelineMessage;

use super::{format, styles};

const OWN_SENDER_LABEL: &str = "You";
const INDENT: &str = "      ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub date_header: Option<String>,
    pub time: String,
    /// `None` when grouped under the previous message's sender.
    pub sender: Option<String>,
    pub own: bool,
    pub content: String,
}

pub fn build_timeline_rows(messages: &[TimelineMessage], logged_user_id: i64) -> Vec<TimelineRow> {
    let mut rows = Vec::with_capacity(messages.len());
    let mut prev_date: Option<NaiveDate> = None;
    let mut prev_sender: Option<i64> = None;

    for message in messages {
        let date = format::local_date(message.created_at_ms);
        let date_header = if date != prev_date || rows.is_empty() {
            prev_sender = None;
            date.map(format::date_label)
        } else {
            None
        };

        let own = message.is_own(logged_user_id);
        let sender = (prev_sender != Some(message.sender_id)).then(|| {
            if own {
                OWN_SENDER_LABEL.to_owned()
            } else {
                message.sender_name.clone()
            }
        });

        rows.push(TimelineRow {
            date_header,
            time: format::time_of_day(message.created_at_ms),
            sender,
            own,
            content: message.content.clone(),
        });

        prev_date = date;
        prev_sender = Some(message.sender_id);
    }

    rows
}

pub fn row_to_list_item(row: &TimelineRow) -> ListItem<'static> {
    let mut lines = Vec::new();

    if let Some(date) = &row.date_header {
        lines.push(
            Line::from(Span::styled(
                format!("——— {date} ———"),
                styles::date_separator_style(),
            ))
            .alignment(Alignment::Center),
        );
    }

    let time = Span::styled(format!("{:>5} ", row.time), styles::message_time_style());
    let mut content_lines = row.content.lines();

    match &row.sender {
        Some(sender) => {
            let sender_style = if row.own {
                styles::own_sender_style()
            } else {
                styles::message_sender_style()
            };
            lines.push(Line::from(vec![
                time,
                Span::styled(format!("{sender}:"), sender_style),
            ]));
            for text in content_lines {
                lines.push(indented(text));
            }
        }
        None => {
            let first = content_lines.next().unwrap_or_default();
            lines.push(Line::from(vec![
                time,
                Span::styled(first.to_owned(), styles::message_text_style()),
            ]));
            for text in content_lines {
                lines.push(indented(text));
            }
        }
    }

    ListItem::new(lines)
}

fn indented(text: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(INDENT),
        Span::styled(text.to_owned(), styles::message_text_style()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    // Dates are grouped in local time; the two instants are a day apart.
    const FEB_14_2026_10AM: i64 = 1_771_063_200_000;
    const FEB_15_2026_1PM: i64 = 1_771_160_400_000;

    fn msg(id: i64, sender_id: i64, sender: &str, content: &str, ts_ms: i64) -> TimelineMessage {
        TimelineMessage {
            id,
            sender_id,
            sender_name: sender.to_owned(),
            content: content.to_owned(),
            created_at_ms: Some(ts_ms),
        }
    }

    #[test]
    fn first_row_carries_date_header_and_sender() {
        let rows = build_timeline_rows(&[msg(1, 2, "Ana", "oi", FEB_14_2026_10AM)], 1);

        assert_eq!(rows.len(), 1);
        assert!(rows[0].date_header.is_some());
        assert_eq!(rows[0].sender.as_deref(), Some("Ana"));
        assert!(!rows[0].own);
    }

    #[test]
    fn consecutive_messages_from_same_sender_are_grouped() {
        let rows = build_timeline_rows(
            &[
                msg(1, 2, "Ana", "oi", FEB_14_2026_10AM),
                msg(2, 2, "Ana", "tudo bem?", FEB_14_2026_10AM + 60_000),
                msg(3, 1, "Eu", "sim", FEB_14_2026_10AM + 120_000),
            ],
            1,
        );

        assert_eq!(rows[1].sender, None);
        assert_eq!(rows[1].date_header, None);
        assert_eq!(rows[2].sender.as_deref(), Some(OWN_SENDER_LABEL));
        assert!(rows[2].own);
    }

    #[test]
    fn new_day_repeats_header_and_sender() {
        let rows = build_timeline_rows(
            &[
                msg(1, 2, "Ana", "oi", FEB_14_2026_10AM),
                msg(2, 2, "Ana", "bom dia", FEB_15_2026_1PM),
            ],
            1,
        );

        assert!(rows[1].date_header.is_some());
        assert_eq!(rows[1].sender.as_deref(), Some("Ana"));
    }

    #[test]
    fn undated_message_renders_without_header_or_time() {
        let undated = TimelineMessage {
            created_at_ms: None,
            ..msg(1, 2, "Ana", "oi", FEB_14_2026_10AM)
        };

        let rows = build_timeline_rows(&[undated], 1);

        assert_eq!(rows[0].date_header, None);
        assert_eq!(rows[0].time, "??:??");
        assert_eq!(rows[0].sender.as_deref(), Some("Ana"));
    }

    #[test]
    fn multiline_content_becomes_extra_lines() {
        let rows = build_timeline_rows(&[msg(1, 2, "Ana", "a\nb", FEB_14_2026_10AM)], 1);

        let item = row_to_list_item(&rows[0]);

        // date header + sender header + two content lines
        assert_eq!(item.height(), 4);
    }
}
