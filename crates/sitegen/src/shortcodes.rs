// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Built-in shortcodes for brochure page bodies.
//!
//! Each page gets a fresh [`Shortcodes`] registry whose closures capture
//! an `Arc<ShortcodeContext>` holding that page's data.

use crate::config::CompanyInfo;
use crate::markdown::{ShortcodeArgs, Shortcodes};
use crate::routes::Listings;
use content::ContentKind;
use content::text::format_date;
use maud::{Markup, html};
use std::sync::Arc;
use url::Url;

/// Default `limit` for `{{ latest /}}`.
const LATEST_LIMIT: usize = 3;

/// Data visible to shortcodes on one page.
#[derive(Debug, Clone)]
pub struct ShortcodeContext {
    pub site_name: String,
    pub company: CompanyInfo,
    /// Breadcrumb segments: (label, href)
    pub breadcrumbs: Vec<(String, String)>,
    /// Loaded content, newest first per kind
    pub listings: Arc<Listings>,
    pub maps_api_key: Option<String>,
}

/// Build a registry with every built-in shortcode bound to `ctx`.
pub fn register_shortcodes(ctx: Arc<ShortcodeContext>) -> Shortcodes {
    let mut shortcodes = Shortcodes::new();

    {
        let c = ctx.clone();
        shortcodes.register("site_name", move |_| escape(&c.site_name));
    }
    {
        let c = ctx.clone();
        shortcodes.register("company_name", move |_| escape(&c.company.name));
    }
    {
        let c = ctx.clone();
        shortcodes.register("company_tel", move |_| {
            let tel = &c.company.tel;
            html! { a href=(format!("tel:{}", tel.replace('-', ""))) { (tel) } }.into_string()
        });
    }
    {
        let c = ctx.clone();
        shortcodes.register("company_email", move |_| {
            let email = &c.company.email;
            html! { a href=(format!("mailto:{email}")) { (email) } }.into_string()
        });
    }
    {
        let c = ctx.clone();
        shortcodes.register("company_address", move |_| escape(&c.company.address));
    }

    // {{ breadcrumb /}}
    {
        let c = ctx.clone();
        shortcodes.register("breadcrumb", move |_| breadcrumb(&c.breadcrumbs).into_string());
    }

    // {{ latest kind="news" limit="3" /}}
    {
        let c = ctx.clone();
        shortcodes.register("latest", move |args: &ShortcodeArgs| {
            let kind = args.get_str("kind").unwrap_or("news");
            let Ok(kind) = kind.parse::<ContentKind>() else {
                return format!("<!-- latest: unknown kind '{}' -->", escape(kind));
            };
            let limit = args.get_usize("limit", LATEST_LIMIT);
            render_latest(&c.listings, kind, limit).into_string()
        });
    }

    // {{ map /}}
    shortcodes.register("map", move |_| {
        render_map(&ctx.company, ctx.maps_api_key.as_deref()).into_string()
    });

    shortcodes
}

fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

/// Breadcrumb trail; the last entry is the current page.
pub fn breadcrumb(crumbs: &[(String, String)]) -> Markup {
    let last = crumbs.len().saturating_sub(1);
    html! {
        @if !crumbs.is_empty() {
            nav class="breadcrumb" aria-label="パンくずリスト" {
                ol {
                    @for (i, (label, href)) in crumbs.iter().enumerate() {
                        @if i == last {
                            li aria-current="page" { (label) }
                        } @else {
                            li { a href=(href) { (label) } }
                        }
                    }
                }
            }
        }
    }
}

/// Newest `limit` items of `kind` as a dated link list.
pub fn render_latest(listings: &Listings, kind: ContentKind, limit: usize) -> Markup {
    let items = listings.get(&kind).map(Vec::as_slice).unwrap_or_default();
    html! {
        @if items.is_empty() {
            p class="latest-empty" { "現在、" (kind.label()) "はありません。" }
        } @else {
            ul class={ "latest latest-" (kind.dir_name()) } {
                @for item in items.iter().take(limit) {
                    li {
                        time datetime=(item.date.to_string()) { (format_date(item.date)) }
                        " "
                        a href=(item.url_path()) { (item.title) }
                    }
                }
            }
        }
    }
}

const MAPS_EMBED_URL: &str = "https://www.google.com/maps/embed/v1/place";

/// Embed URL for `query`, with both parameters percent-encoded.
fn map_embed_url(key: &str, query: &str) -> Option<Url> {
    Url::parse_with_params(MAPS_EMBED_URL, &[("key", key), ("q", query)])
        .inspect_err(|e| log::warn!("Cannot build map URL: {e}"))
        .ok()
}

/// Embedded map when a maps key is configured, else an address placeholder.
pub fn render_map(company: &CompanyInfo, api_key: Option<&str>) -> Markup {
    let query = match company.coordinates {
        Some(c) => format!("{},{}", c.lat, c.lng),
        None => company.address.clone(),
    };
    html! {
        @match api_key.and_then(|key| map_embed_url(key, &query)) {
            Some(src) => {
                div class="map" {
                    iframe
                        title=(format!("{}の地図", company.name))
                        src=(src.as_str())
                        width="600" height="450" loading="lazy" {}
                }
            }
            None => {
                div class="map map-placeholder" {
                    p { "地図を表示するには Google Maps API キーの設定が必要です。" }
                    p { (company.address) }
                }
            }
        }
    }
}
