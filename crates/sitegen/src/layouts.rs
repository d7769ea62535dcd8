// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Maud HTML layouts.
//!
//! Every layout produces a complete document with header, navigation,
//! breadcrumb, `<main>` and footer landmarks. The page title is the
//! only `<h1>`; Markdown bodies start at `<h2>`.

use crate::config::{NavItem, SiteConfig};
use crate::routes::listing_url;
use crate::shortcodes::breadcrumb;
use content::text::{extract_excerpt, format_date};
use content::{Category, ContentItem, ContentKind, Details, Page};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Excerpt length on listing cards, in characters.
const EXCERPT_CHARS: usize = 120;

/// Context passed to layout functions.
pub struct LayoutContext<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub config: &'a SiteConfig,
    /// URL of the page being rendered, for `aria-current`
    pub current_path: &'a str,
    pub breadcrumbs: &'a [(String, String)],
    /// Rendered HTML for the main area
    pub content: &'a str,
    /// Build year for the copyright line
    pub year: i32,
}

/// Apply a named layout: `page`, `listing`, `article`, or `default`.
pub fn apply_layout(name: &str, ctx: &LayoutContext) -> String {
    let main = match name {
        "page" => page_main(ctx),
        "listing" => listing_main(ctx),
        "article" => article_main(ctx),
        _ => default_main(ctx),
    };
    document(ctx, main).into_string()
}

fn document(ctx: &LayoutContext, main: Markup) -> Markup {
    let site = &ctx.config.site;
    html! {
        (DOCTYPE)
        html lang=(site.locale) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="generator" content=(format!("komuten v{VERSION}"));
                @if !ctx.description.is_empty() {
                    meta name="description" content=(ctx.description);
                }
                title {
                    @if ctx.current_path == "/" {
                        (site.name)
                    } @else {
                        (ctx.title) " | " (site.name)
                    }
                }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (site_header(ctx))
                @if ctx.breadcrumbs.len() > 1 {
                    (breadcrumb(ctx.breadcrumbs))
                }
                (main)
                (site_footer(ctx))
            }
        }
    }
}

fn site_header(ctx: &LayoutContext) -> Markup {
    let site = &ctx.config.site;
    let nav = &ctx.config.navigation;
    html! {
        header class="site-header" {
            a class="logo" href="/" {
                @match &site.logo {
                    Some(logo) => {
                        img src=(logo.src) alt=(logo.alt);
                    }
                    None => {
                        (site.name)
                    }
                }
            }
            nav class="global-nav" aria-label="メインナビゲーション" {
                (nav_list(&nav.main, ctx.current_path))
            }
            @if !nav.utility.is_empty() {
                nav class="utility-nav" aria-label="お問い合わせ" {
                    (nav_list(&nav.utility, ctx.current_path))
                }
            }
        }
    }
}

fn nav_list(items: &[NavItem], current_path: &str) -> Markup {
    html! {
        ul {
            @for item in items {
                li {
                    @if item.href == current_path {
                        a href=(item.href) aria-current="page" { (item.label) }
                    } @else {
                        a href=(item.href) { (item.label) }
                    }
                    @if !item.children.is_empty() {
                        (nav_list(&item.children, current_path))
                    }
                }
            }
        }
    }
}

fn site_footer(ctx: &LayoutContext) -> Markup {
    let company = &ctx.config.company;
    let footer = &ctx.config.footer;
    html! {
        footer class="site-footer" {
            address {
                (company.name) br;
                (company.address) br;
                "TEL " (company.tel)
                @if !company.business_hours.is_empty() {
                    " (" (company.business_hours) ")"
                }
            }
            @if !footer.links.is_empty() {
                nav class="footer-nav" aria-label="フッターナビゲーション" {
                    (nav_list(&footer.links, ctx.current_path))
                }
            }
            p class="copyright" { (ctx.config.copyright(ctx.year)) }
        }
    }
}

/// Home and other free-form pages.
fn default_main(ctx: &LayoutContext) -> Markup {
    html! {
        main class="hero" {
            h1 { (ctx.title) }
            (PreEscaped(ctx.content))
        }
    }
}

/// Brochure pages.
fn page_main(ctx: &LayoutContext) -> Markup {
    html! {
        main class="content-page" {
            article {
                h1 { (ctx.title) }
                (PreEscaped(ctx.content))
            }
        }
    }
}

fn listing_main(ctx: &LayoutContext) -> Markup {
    html! {
        main class="listing-page" {
            h1 { (ctx.title) }
            (PreEscaped(ctx.content))
        }
    }
}

fn article_main(ctx: &LayoutContext) -> Markup {
    html! {
        main class="article-page" {
            article {
                header { h1 { (ctx.title) } }
                (PreEscaped(ctx.content))
            }
        }
    }
}

// ─── Fragments ───────────────────────────────────────────────────────────────

/// Category filter, item cards and pager for one listing page.
pub fn listing_body(
    kind: ContentKind,
    page: &Page,
    categories: &[Category],
    active: Option<&str>,
) -> Markup {
    let active_id = active.unwrap_or(content::query::ALL_CATEGORY);
    html! {
        @if categories.len() > 1 {
            nav class="category-filter" aria-label="カテゴリ" {
                ul {
                    @for c in categories {
                        @let href = listing_url(kind, (c.id != content::query::ALL_CATEGORY).then_some(c.id.as_str()), 1);
                        li {
                            @if c.id == active_id {
                                a href=(href) aria-current="page" { (c.name) " (" (c.count) ")" }
                            } @else {
                                a href=(href) { (c.name) " (" (c.count) ")" }
                            }
                        }
                    }
                }
            }
        }
        @if page.items.is_empty() {
            p class="empty" { "現在、" (kind.label()) "はありません。" }
        } @else {
            div class="cards" {
                @for item in &page.items {
                    (card(item))
                }
            }
        }
        (pager(kind, active, page))
    }
}

fn card(item: &ContentItem) -> Markup {
    let summary = if item.description.is_empty() {
        extract_excerpt(&item.content, EXCERPT_CHARS)
    } else {
        item.description.clone()
    };
    html! {
        article class="card" {
            @if let Some(src) = &item.thumbnail {
                img src=(src) alt="" loading="lazy";
            }
            h2 { a href=(item.url_path()) { (item.title) } }
            p class="meta" {
                time datetime=(item.date.to_string()) { (format_date(item.date)) }
                @if !item.category.is_empty() {
                    " " span class="category" { (item.category_name()) }
                }
            }
            @if !summary.is_empty() {
                p { (summary) }
            }
        }
    }
}

fn pager(kind: ContentKind, category: Option<&str>, page: &Page) -> Markup {
    html! {
        @if page.total_pages > 1 {
            nav class="pagination" aria-label="ページ送り" {
                @if page.has_prev {
                    a rel="prev" href=(listing_url(kind, category, page.current_page - 1)) { "前へ" }
                }
                " "
                span { (page.current_page) " / " (page.total_pages) }
                " "
                @if page.has_next {
                    a rel="next" href=(listing_url(kind, category, page.current_page + 1)) { "次へ" }
                }
            }
        }
    }
}

/// Date, category, kind-specific details and body of a detail page.
pub fn article_body(item: &ContentItem, body_html: &str, related: &[ContentItem]) -> Markup {
    html! {
        p class="meta" {
            time datetime=(item.date.to_string()) { (format_date(item.date)) }
            @if !item.category.is_empty() {
                " "
                a class="category" href=(listing_url(item.kind, Some(item.category.as_str()), 1)) {
                    (item.category_name())
                }
            }
        }
        @if let Some(src) = &item.thumbnail {
            img class="thumbnail" src=(src) alt=(item.title);
        }
        @match &item.details {
            Details::Work(work) => {
                @if work.area.is_some() || work.structure.is_some() || work.completion_date.is_some() {
                    dl class="work-specs" {
                        @if let Some(area) = &work.area { dt { "延床面積" } dd { (area) } }
                        @if let Some(structure) = &work.structure { dt { "構造" } dd { (structure) } }
                        @if let Some(done) = &work.completion_date { dt { "竣工" } dd { (done) } }
                    }
                }
            }
            Details::Article(article) => {
                @if let Some(author) = &article.author {
                    p class="author" { "文：" (author) }
                }
            }
        }
        div class="body" { (PreEscaped(body_html)) }
        @if let Details::Work(work) = &item.details {
            @if !work.images.is_empty() {
                div class="gallery" {
                    @for src in &work.images {
                        img src=(src) alt=(item.title) loading="lazy";
                    }
                }
            }
        }
        @if let Details::Article(article) = &item.details {
            @if !article.tags.is_empty() {
                ul class="tags" {
                    @for tag in &article.tags { li { (tag) } }
                }
            }
        }
        @if !related.is_empty() {
            section class="related" {
                h2 { "関連する" (item.kind.label()) }
                ul {
                    @for r in related {
                        li { a href=(r.url_path()) { (r.title) } }
                    }
                }
            }
        }
        p class="back" { a href=(listing_url(item.kind, None, 1)) { (item.kind.label()) "一覧へ戻る" } }
    }
}
