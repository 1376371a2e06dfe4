//! Local-time formatting and width-aware truncation shared by the screens.

use chrono::{DateTime, Local, LocalResult, NaiveDate, TimeZone};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn to_local(timestamp_ms: i64) -> Option<DateTime<Local>> {
    match Local.timestamp_millis_opt(timestamp_ms) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => None,
    }
}

/// `dd/mm HH:MM`, used on conversation rows.
pub fn list_timestamp(timestamp_ms: i64) -> String {
    to_local(timestamp_ms)
        .map(|dt| dt.format("%d/%m %H:%M").to_string())
        .unwrap_or_else(|| "--/-- --:--".to_owned())
}

/// `dd/mm/YYYY HH:MM:SS`, used on search result rows. Missing timestamps
/// render as a placeholder.
pub fn search_timestamp(timestamp_ms: Option<i64>) -> String {
    timestamp_ms
        .and_then(to_local)
        .map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "--/--/---- --:--:--".to_owned())
}

pub fn time_of_day(timestamp_ms: Option<i64>) -> String {
    timestamp_ms
        .and_then(to_local)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "??:??".to_owned())
}

pub fn local_date(timestamp_ms: Option<i64>) -> Option<NaiveDate> {
    timestamp_ms.and_then(to_local).map(|dt| dt.date_naive())
}

/// Format: "14 Feb 2026"
pub fn date_label(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Collapses runs of whitespace, including newlines, into single spaces.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `text` to at most `max_width` terminal columns, ending with `...`
/// when something was dropped.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }

    if max_width >= 3 {
        out.push_str("...");
    }
    out
}
