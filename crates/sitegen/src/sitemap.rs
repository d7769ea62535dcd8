// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! `sitemap.xml` and `robots.txt`.

use crate::config::SiteConfig;
use crate::routes::Listings;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use content::ContentKind;
use std::fmt::Write;

/// Brochure and listing URLs in the sitemap: (path, priority, changefreq).
pub const SITEMAP_STATIC: [(&str, f32, &str); 10] = [
    ("/", 1.0, "daily"),
    ("/company/", 0.8, "monthly"),
    ("/works/", 0.9, "weekly"),
    ("/quality/", 0.8, "monthly"),
    ("/warranty/", 0.8, "monthly"),
    ("/house/", 0.9, "monthly"),
    ("/maintenance/", 0.8, "monthly"),
    ("/news/", 0.7, "daily"),
    ("/topics/", 0.7, "weekly"),
    ("/contact/", 0.9, "monthly"),
];

/// Order in which detail URLs are listed.
const DETAIL_ORDER: [ContentKind; 3] = [ContentKind::News, ContentKind::Topics, ContentKind::Works];

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn push_url(out: &mut String, loc: &str, lastmod: NaiveDate, changefreq: &str, priority: f32) {
    // Writing to a String cannot fail
    let _ = write!(
        out,
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
        xml_escape(loc),
        lastmod.format("%Y-%m-%d"),
        changefreq,
        priority
    );
}

/// Sitemap of brochure pages (dated `build_date`) then every detail page.
pub fn render_sitemap(config: &SiteConfig, listings: &Listings, build_date: NaiveDate) -> String {
    let base = config.base_url();
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for (path, priority, changefreq) in SITEMAP_STATIC {
        push_url(&mut out, &format!("{base}{path}"), build_date, changefreq, priority);
    }

    for kind in DETAIL_ORDER {
        for item in listings.get(&kind).into_iter().flatten() {
            push_url(
                &mut out,
                &format!("{base}{}", item.url_path()),
                item.date,
                "monthly",
                kind.sitemap_priority(),
            );
        }
    }

    out.push_str("</urlset>\n");
    out
}

/// robots.txt allowing everything but build internals, with bot rules.
pub fn render_robots(config: &SiteConfig, generated_at: DateTime<Utc>) -> String {
    format!(
        "# Robots.txt for {name}
# Generated at: {at}

User-agent: *
Allow: /
Disallow: /api/
Disallow: /_next/
Disallow: /static/
Disallow: /*.json$

# Crawl-delay
Crawl-delay: 1

# Sitemap
Sitemap: {base}/sitemap.xml

# Googlebot
User-agent: Googlebot
Allow: /
Crawl-delay: 0

# Bingbot
User-agent: Bingbot
Allow: /
Crawl-delay: 1

# Block bad bots
User-agent: AhrefsBot
Disallow: /

User-agent: SemrushBot
Disallow: /

User-agent: DotBot
Disallow: /

User-agent: MJ12bot
Disallow: /
",
        name = config.site.name,
        at = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        base = config.base_url(),
    )
}
