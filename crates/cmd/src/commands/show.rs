// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use chrono::Utc;
use content::{ContentKind, Details, text::format_date};
use sitegen::Renderer;

use crate::common::SiteContext;

/// Print an item's metadata followed by its rendered HTML body.
pub fn show_command<F>(
    ctx: &SiteContext,
    kind: ContentKind,
    slug: &str,
    mut handler: F,
) -> Result<()>
where
    F: FnMut(String),
{
    let item = ctx
        .store
        .get_by_slug(kind, slug)
        .with_context(|| format!("Cannot show {kind}/{slug}"))?;

    handler(format!("title:       {}", item.title));
    handler(format!("url:         {}", item.url_path()));
    handler(format!("date:        {} ({})", item.date, format_date(item.date)));
    handler(format!("category:    {} ({})", item.category, item.category_name()));
    if !item.description.is_empty() {
        handler(format!("description: {}", item.description));
    }
    if let Some(thumbnail) = &item.thumbnail {
        handler(format!("thumbnail:   {}", thumbnail));
    }
    match &item.details {
        Details::Work(work) => {
            if let Some(area) = &work.area {
                handler(format!("area:        {}", area));
            }
            if let Some(structure) = &work.structure {
                handler(format!("structure:   {}", structure));
            }
            if let Some(date) = &work.completion_date {
                handler(format!("completed:   {}", date));
            }
            if !work.images.is_empty() {
                handler(format!("images:      {}", work.images.join(", ")));
            }
        }
        Details::Article(article) => {
            if let Some(author) = &article.author {
                handler(format!("author:      {}", author));
            }
            if !article.tags.is_empty() {
                handler(format!("tags:        {}", article.tags.join(", ")));
            }
        }
    }

    let renderer = Renderer::new(&ctx.config, &ctx.store, Utc::now())?;
    let html = renderer.render_item_body(&item, &[])?;
    handler(String::new());
    handler(html);
    Ok(())
}
