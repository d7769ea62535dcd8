// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Small text helpers for listing cards.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Plain-text excerpt of at most `length` characters, `...` appended when cut.
pub fn extract_excerpt(text: &str, length: usize) -> String {
    let stripped = TAG_RE.replace_all(text, "");
    let collapsed = SPACE_RE.replace_all(&stripped, " ");
    let plain = collapsed.trim();

    if plain.chars().count() <= length {
        return plain.to_string();
    }
    let mut cut: String = plain.chars().take(length).collect();
    cut.push_str("...");
    cut
}

/// `2024年3月5日`
pub fn format_date(date: NaiveDate) -> String {
    format!("{}年{}月{}日", date.year(), date.month(), date.day())
}
