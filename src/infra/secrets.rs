use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 5] = ["token", "bearer", "authorization", "secret", "password"];

/// Scrubs credential-looking fragments from free text before it reaches logs
/// or stderr. The word following `Bearer` is always dropped.
pub fn redact_text(input: &str) -> String {
    let mut redact_next = false;

    input
        .split_whitespace()
        .map(|chunk| {
            let lowered = chunk.to_ascii_lowercase();
            let scrubbed = if redact_next {
                REDACTED.to_owned()
            } else {
                redact_chunk(chunk, &lowered)
            };
            redact_next = lowered.trim_end_matches(':') == "bearer";
            scrubbed
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "linksy panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            );
        } else {
            eprintln!("linksy panic: {}", scrubbed);
        }
    }));
}

fn redact_chunk(chunk: &str, lowered: &str) -> String {
    if lowered == "bearer" || lowered == "bearer:" {
        return chunk.to_owned();
    }

    if SENSITIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
        || looks_like_jwt(chunk)
    {
        REDACTED.to_owned()
    } else {
        chunk.to_owned()
    }
}

fn looks_like_jwt(value: &str) -> bool {
    let cleaned = value.trim_matches(|ch: char| ch == '"' || ch == '\'' || ch == ',');
    let segments: Vec<_> = cleaned.split('.').collect();

    segments.len() == 3
        && segments.iter().all(|segment| {
            segment.len() >= 8
                && segment
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        })
}
