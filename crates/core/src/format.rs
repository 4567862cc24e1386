//! Display formatters for table cells
//!
//! The admin screens render dates, prices and counts in Indonesian
//! (`id-ID`) conventions and show rich-text fields as plain text.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use regex::Regex;
use std::sync::LazyLock;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Date rendering styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// `15 Jan 2024`
    #[default]
    Short,
    /// `15 Januari 2024`
    Medium,
    /// `15 Januari 2024 pukul 10.30`
    Long,
    /// `Senin, 15 Januari 2024`
    Full,
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Parse the timestamp shapes the API returns.
///
/// RFC 3339 values keep their own offset; the wall-clock time in that
/// offset is what gets displayed.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a timestamp for display, `"-"` when empty or unparseable.
pub fn format_date(input: &str, format: DateFormat) -> String {
    let Some(dt) = parse_timestamp(input) else {
        return "-".to_string();
    };

    let month = dt.month0() as usize;

    match format {
        DateFormat::Short => format!("{:02} {} {}", dt.day(), MONTHS_SHORT[month], dt.year()),
        DateFormat::Medium => format!("{:02} {} {}", dt.day(), MONTHS[month], dt.year()),
        DateFormat::Long => format!(
            "{:02} {} {} pukul {:02}.{:02}",
            dt.day(),
            MONTHS[month],
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        DateFormat::Full => format!(
            "{}, {:02} {} {}",
            weekday_name(dt.weekday()),
            dt.day(),
            MONTHS[month],
            dt.year()
        ),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}

/// Rupiah amount without decimals, e.g. `Rp 150.000`.
///
/// The separator after `Rp` is a non-breaking space.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };

    format!("{sign}Rp\u{a0}{}", group_thousands(&digits))
}

/// Number with dot grouping and up to three comma decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    if frac_part.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{},{}", group_thousands(int_part), frac_part)
    }
}

/// Plain text content of an HTML fragment.
pub fn strip_html(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");

    stripped
        .replace("&nbsp;", "\u{a0}")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&#x2F;", "/")
        .replace("&amp;", "&")
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `…`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
