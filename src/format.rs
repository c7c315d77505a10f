// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Small formatting helpers used while building SVG markup.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

/// Escapes XML special characters, borrowing the input when nothing needs
/// escaping.
///
/// # Examples
///
/// ```
/// use readme_cards::escape_xml;
///
/// assert_eq!(escape_xml("ACME & <Partners>"), "ACME &amp; &lt;Partners&gt;");
/// ```
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len() + 8);
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

/// Formats counters the way GitHub does on repository pages: `999`, `1.2k`,
/// `12k`, `3.4m`.
pub fn format_compact(value: u64) -> String {
    if value < 1_000 {
        return value.to_string();
    }
    if value < 1_000_000 {
        let scaled = value as f64 / 1_000.0;
        return if value >= 10_000 {
            format!("{scaled:.0}k")
        } else {
            format!("{scaled:.1}k")
        };
    }
    let scaled = value as f64 / 1_000_000.0;
    if value >= 10_000_000 {
        format!("{scaled:.0}m")
    } else {
        format!("{scaled:.1}m")
    }
}

/// Renders an RFC 3339 timestamp as a `YYYY-MM-DD` UTC date.
///
/// Returns an empty string when the timestamp cannot be parsed.
pub fn short_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp.trim())
        .map(|parsed| parsed.with_timezone(&Utc).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Splits a comma separated list, trimming entries and dropping empties.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Same as [`parse_list`] with every entry lowercased.
pub fn parse_lower_list(value: &str) -> Vec<String> {
    parse_list(value)
        .into_iter()
        .map(|entry| entry.to_lowercase())
        .collect()
}

/// Splits a `Label|Value,Label|Value` list into pairs, dropping incomplete
/// entries.
pub fn parse_pairs(value: &str) -> Vec<(String, String)> {
    parse_list(value)
        .into_iter()
        .filter_map(|entry| {
            let (label, detail) = entry.split_once('|')?;
            let (label, detail) = (label.trim(), detail.trim());
            if label.is_empty() || detail.is_empty() {
                None
            } else {
                Some((label.to_owned(), detail.to_owned()))
            }
        })
        .collect()
}
