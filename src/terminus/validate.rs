//! Name and field checks shared by the model, the commands and the store.
//!
//! Module names and note names double as directory and file names, so they
//! are restricted to a small, portable character set.

use chrono::{NaiveTime, Weekday};
use std::path::Path;
use url::Url;

pub const MAX_NAME_LEN: usize = 100;

const TIME_FORMAT: &str = "%H:%M";

/// True if `name` can be used verbatim as a file or directory name.
///
/// Allowed: ASCII letters, digits, `-`, `_` and inner spaces.
pub fn is_valid_file_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    if name.starts_with(' ') || name.ends_with(' ') {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
}

/// Note file extension with its leading dot, or `None` unless it is a single
/// `[A-Za-z0-9]+` segment (`md`, `.txt`).
pub fn normalize_file_ext(ext: &str) -> Option<String> {
    let bare = ext.strip_prefix('.').unwrap_or(ext);
    if bare.is_empty() || !bare.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!(".{}", bare))
}

/// File name without its last extension (`lecture1.txt` -> `lecture1`).
pub fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

/// Accepts full and short English day names, case-insensitive.
pub fn parse_day(day: &str) -> Option<Weekday> {
    day.trim().parse::<Weekday>().ok()
}

/// 24h `HH:MM`.
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).ok()
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn format_time(time: &NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn is_valid_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_module_codes_and_simple_names() {
        assert!(is_valid_file_name("CS2103"));
        assert!(is_valid_file_name("lecture_1"));
        assert!(is_valid_file_name("week 3-notes"));
    }

    #[test]
    fn rejects_unsafe_names() {
        assert!(!is_valid_file_name(""));
        assert!(!is_valid_file_name(" padded "));
        assert!(!is_valid_file_name("../escape"));
        assert!(!is_valid_file_name("a/b"));
        assert!(!is_valid_file_name("what?"));
        assert!(!is_valid_file_name(".hidden"));
        assert!(!is_valid_file_name(&"x".repeat(MAX_NAME_LEN + 1)));
    }

    #[test]
    fn stem_strips_last_extension_only() {
        assert_eq!(file_stem("lecture1.txt"), "lecture1");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem("plain"), "plain");
    }

    #[test]
    fn file_ext_is_one_alphanumeric_segment() {
        assert_eq!(normalize_file_ext("md").as_deref(), Some(".md"));
        assert_eq!(normalize_file_ext(".txt").as_deref(), Some(".txt"));
        assert_eq!(normalize_file_ext("note.txt"), None);
        assert_eq!(normalize_file_ext(".tar.gz"), None);
        assert_eq!(normalize_file_ext(""), None);
        assert_eq!(normalize_file_ext("."), None);
        assert_eq!(normalize_file_ext("..md"), None);
        assert_eq!(normalize_file_ext("m/d"), None);
    }

    #[test]
    fn parses_days_and_times() {
        assert_eq!(parse_day("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_day("thu"), Some(Weekday::Thu));
        assert_eq!(parse_day("Someday"), None);

        assert_eq!(
            parse_time("09:30"),
            Some(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
        assert!(parse_time("24:00").is_none());
        assert!(parse_time("9am").is_none());
        assert_eq!(format_time(&parse_time("00:00").unwrap()), "00:00");
    }

    #[test]
    fn url_must_be_http_with_host() {
        assert!(is_valid_url("https://zoom.us/j/123"));
        assert!(is_valid_url("http://example.com"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("/local/path"));
    }
}
