//! Text helpers for list and card views.

use chrono::{DateTime, Utc};

const ELLIPSIS: &str = "...";

/// Cut `text` to at most `max_chars` characters, appending `...` when cut.
///
/// Counts characters, not bytes, so multi-byte text never splits mid-char.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", text[..byte_idx].trim_end()),
    }
}

/// First `n` whitespace-separated words, with `...` if any were dropped.
#[must_use]
pub fn first_n_words(text: &str, n: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= n {
        return words.join(" ");
    }
    format!("{}{ELLIPSIS}", words[..n].join(" "))
}

/// Relative age of `ts` as seen from `now`: `just now`, `5m ago`, `3h ago`,
/// `2d ago`, or a calendar date once older than a week.
#[must_use]
pub fn format_time_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    ts.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    use super::*;

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_long_text_appends_ellipsis() {
        assert_eq!(truncate_text("The export button is hidden", 10), "The export...");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_text("héllo wörld", 4), "héll...");
    }

    #[test]
    fn first_words() {
        assert_eq!(first_n_words("one two three four", 2), "one two...");
        assert_eq!(first_n_words("  one   two ", 5), "one two");
        assert_eq!(first_n_words("", 3), "");
    }

    #[rstest]
    #[case(Duration::seconds(20), "just now")]
    #[case(Duration::minutes(5), "5m ago")]
    #[case(Duration::hours(3), "3h ago")]
    #[case(Duration::days(2), "2d ago")]
    #[case(Duration::days(30), "May 2, 2024")]
    fn time_ago(#[case] age: Duration, #[case] expected: &str) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_time_ago(now - age, now), expected);
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_time_ago(now + Duration::hours(1), now), "just now");
    }
}
