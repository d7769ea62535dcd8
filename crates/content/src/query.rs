// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Filtering, paging and related-item selection over loaded lists.
//!
//! All functions take date-sorted slices as returned by
//! [`ContentStore::get_all`](crate::ContentStore::get_all) and keep
//! that order.

use crate::{ContentItem, ContentKind, category_name};
use serde::Serialize;

/// Items per listing page unless configured otherwise.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Related items shown under a detail page.
pub const DEFAULT_RELATED: usize = 3;

/// Category id that matches every item.
pub const ALL_CATEGORY: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<ContentItem>,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Items in `category`; `None` or `"all"` keeps everything.
pub fn by_category(items: &[ContentItem], category: Option<&str>) -> Vec<ContentItem> {
    match category {
        None | Some(ALL_CATEGORY) => items.to_vec(),
        Some(id) => items.iter().filter(|i| i.category == id).cloned().collect(),
    }
}

/// The "all" entry followed by each distinct category in first-seen order.
pub fn categories(kind: ContentKind, items: &[ContentItem]) -> Vec<Category> {
    let mut out = vec![Category {
        id: ALL_CATEGORY.to_string(),
        name: "すべて".to_string(),
        count: items.len(),
    }];

    for item in items.iter().filter(|i| !i.category.is_empty()) {
        match out[1..].iter_mut().find(|c| c.id == item.category) {
            Some(c) => c.count += 1,
            None => out.push(Category {
                id: item.category.clone(),
                name: category_name(kind, &item.category),
                count: 1,
            }),
        }
    }
    out
}

/// Slice out page `page` (1-based, clamped into range).
pub fn paginate(items: &[ContentItem], page: usize, per_page: usize) -> Page {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let current_page = page.min(total_pages).max(1);

    let start = (current_page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    let slice = items.get(start..end).unwrap_or_default().to_vec();

    Page {
        items: slice,
        current_page,
        total_pages,
        has_next: current_page < total_pages,
        has_prev: current_page > 1,
    }
}

/// Same-category items first, then others, never the item itself.
///
/// Returns nothing when `current_slug` is not in `items`.
pub fn related(items: &[ContentItem], current_slug: &str, limit: usize) -> Vec<ContentItem> {
    let Some(current) = items.iter().find(|i| i.slug == current_slug) else {
        return Vec::new();
    };

    let others = || items.iter().filter(|i| i.slug != current_slug);
    let same = others().filter(|i| i.category == current.category);
    let rest = others().filter(|i| i.category != current.category);
    same.chain(rest).take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArticleDetails, Details};
    use chrono::NaiveDate;

    fn item(slug: &str, day: u32, category: &str) -> ContentItem {
        ContentItem {
            kind: ContentKind::News,
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            category: category.to_string(),
            thumbnail: None,
            content: String::new(),
            details: Details::Article(ArticleDetails::default()),
        }
    }

    fn slugs(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.slug.as_str()).collect()
    }

    fn sample() -> Vec<ContentItem> {
        vec![
            item("e", 5, "event"),
            item("d", 4, "announcement"),
            item("c", 3, "event"),
            item("b", 2, ""),
            item("a", 1, "media"),
        ]
    }

    #[test]
    fn test_by_category() {
        let items = sample();
        assert_eq!(by_category(&items, None).len(), 5);
        assert_eq!(by_category(&items, Some("all")).len(), 5);
        assert_eq!(slugs(&by_category(&items, Some("event"))), ["e", "c"]);
        assert!(by_category(&items, Some("nope")).is_empty());
    }

    #[test]
    fn test_categories() {
        let cats = categories(ContentKind::News, &sample());
        let ids: Vec<_> = cats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["all", "event", "announcement", "media"]);
        assert_eq!(cats[0].name, "すべて");
        assert_eq!(cats[0].count, 5);
        assert_eq!(cats[1].name, "イベント");
        assert_eq!(cats[1].count, 2);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<_> = (1..=25).map(|d| item(&format!("i{d:02}"), d, "")).collect();

        let first = paginate(&items, 1, 12);
        assert_eq!(first.items.len(), 12);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let last = paginate(&items, 3, 12);
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_next);
        assert!(last.has_prev);

        // Out of range pages clamp
        assert_eq!(paginate(&items, 99, 12).current_page, 3);
        assert_eq!(paginate(&items, 0, 12).current_page, 1);
    }

    #[test]
    fn test_paginate_empty_and_zero_per_page() {
        let empty = paginate(&[], 1, 12);
        assert!(empty.items.is_empty());
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.current_page, 1);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);

        let page = paginate(&sample(), 2, 0);
        assert_eq!(page.total_pages, 5);
        assert_eq!(slugs(&page.items), ["d"]);
    }

    #[test]
    fn test_related_prefers_same_category() {
        let items = sample();
        assert_eq!(slugs(&related(&items, "e", 3)), ["c", "d", "b"]);
        assert_eq!(slugs(&related(&items, "a", 2)), ["e", "d"]);
        assert!(related(&items, "missing", 3).is_empty());
        assert!(related(&items, "e", 0).is_empty());
    }
}
