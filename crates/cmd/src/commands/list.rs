// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use content::{ContentItem, ContentKind, Page, query};

use crate::common::SiteContext;

fn item_line(item: &ContentItem) -> String {
    format!(
        "{}  {:<24} {}  [{}]",
        item.date,
        item.slug,
        item.title,
        item.category_name()
    )
}

fn load(ctx: &SiteContext, kind: ContentKind) -> Result<Vec<ContentItem>> {
    ctx.store
        .get_all(kind)
        .with_context(|| format!("Failed to load {kind}"))
}

/// One line per item on the requested page, then a page summary.
pub fn list_command<F>(
    ctx: &SiteContext,
    kind: ContentKind,
    category: Option<&str>,
    page: usize,
    per_page: Option<usize>,
    mut handler: F,
) -> Result<Page>
where
    F: FnMut(String),
{
    let items = load(ctx, kind)?;
    let filtered = query::by_category(&items, category);
    let per_page = per_page.unwrap_or(ctx.config.listing.per_page);
    let page = query::paginate(&filtered, page, per_page);

    for item in &page.items {
        handler(item_line(item));
    }
    handler(format!(
        "-- page {}/{} ({} {})",
        page.current_page,
        page.total_pages,
        filtered.len(),
        kind.dir_name()
    ));
    Ok(page)
}

/// Category id, display name and item count, "all" first.
pub fn categories_command<F>(ctx: &SiteContext, kind: ContentKind, mut handler: F) -> Result<()>
where
    F: FnMut(String),
{
    let items = load(ctx, kind)?;
    for category in query::categories(kind, &items) {
        handler(format!("{}\t{}\t{}", category.id, category.name, category.count));
    }
    Ok(())
}

/// Items related to `slug`; fails when `slug` does not exist.
pub fn related_command<F>(
    ctx: &SiteContext,
    kind: ContentKind,
    slug: &str,
    limit: Option<usize>,
    mut handler: F,
) -> Result<Vec<ContentItem>>
where
    F: FnMut(String),
{
    let item = ctx
        .store
        .get_by_slug(kind, slug)
        .with_context(|| format!("Cannot find related {kind} for '{slug}'"))?;
    let limit = limit.unwrap_or(ctx.config.listing.related);
    let related = ctx.store.related(kind, &item.slug, limit)?;
    for item in &related {
        handler(item_line(item));
    }
    Ok(related)
}
