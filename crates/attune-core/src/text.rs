//! Transcript text sanitization and display formatting.
//!
//! Transcripts arrive from an external transcription pipeline and may carry
//! control characters or stray non-ASCII bytes. [`sanitize_transcript`]
//! strips everything outside printable ASCII while preserving line structure
//! (tab, newline, and carriage return survive).

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Remove control and non-ASCII characters from transcript content.
///
/// Keeps printable ASCII (`0x20..=0x7E`) plus tab, newline, and carriage
/// return. The output is a subset of the input's characters in original
/// order, so line structure is unchanged.
#[must_use]
pub fn sanitize_transcript(input: &str) -> String {
    input
        .chars()
        .filter(|c| matches!(c, '\t' | '\n' | '\r' | '\x20'..='\x7e'))
        .collect()
}

/// Format a session timestamp for display, e.g. `"June 01, 2025 at 12am"`.
///
/// Minutes are shown only when non-zero (`"June 01, 2025 at 4:45am"`).
/// Always rendered in UTC, matching how session timestamps are stored.
#[must_use]
pub fn format_session_date(ts: DateTime<Utc>) -> String {
    let month = match ts.month() {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    };
    let (is_pm, hour12) = ts.hour12();
    let meridiem = if is_pm { "pm" } else { "am" };
    if ts.minute() == 0 {
        format!(
            "{month} {:02}, {} at {hour12}{meridiem}",
            ts.day(),
            ts.year()
        )
    } else {
        format!(
            "{month} {:02}, {} at {hour12}:{:02}{meridiem}",
            ts.day(),
            ts.year(),
            ts.minute()
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
