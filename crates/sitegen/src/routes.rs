// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Route expansion: turns the site config and loaded content into a flat
//! list of `PageJob`s, one per output HTML file.
//!
//! Brochure pages produce one page each. Every content kind produces a
//! paginated listing, a paginated listing per category and one detail
//! page per item.

use crate::config::SiteConfig;
use content::{ContentItem, ContentKind, category_name, is_path_segment, query};
use std::collections::BTreeMap;

/// Loaded content per kind, each list newest first.
pub type Listings = BTreeMap<ContentKind, Vec<ContentItem>>;

/// Brochure pages as (page id, URL path without slashes).
pub const STATIC_PAGES: [(&str, &str); 12] = [
    ("home", ""),
    ("company", "company"),
    ("house", "house"),
    ("quality", "quality"),
    ("warranty", "warranty"),
    ("maintenance", "maintenance"),
    ("documents", "documents"),
    ("contact", "contact"),
    ("contact-thanks", "contact/thanks"),
    ("privacy", "privacy"),
    ("terms", "terms"),
    ("sitemap", "sitemap"),
];

pub const HOME_LABEL: &str = "ホーム";
pub const NOT_FOUND_TITLE: &str = "ページが見つかりません";

/// What a page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// Brochure page, keyed into `SiteConfig::pages`
    Static { id: String },
    /// One page of a listing; `category` of `None` lists everything
    Listing {
        kind: ContentKind,
        category: Option<String>,
        page: usize,
    },
    Detail { kind: ContentKind, slug: String },
    NotFound,
}

/// One page to generate.
#[derive(Debug, Clone)]
pub struct PageJob {
    /// Output path relative to the output directory (e.g. "news/page/2/index.html")
    pub output_path: String,
    /// Site-relative URL (e.g. "/news/page/2/")
    pub url_path: String,
    pub kind: PageKind,
    /// Breadcrumb trail: (label, url)
    pub breadcrumbs: Vec<(String, String)>,
}

impl PageJob {
    fn at(url_path: String, kind: PageKind, breadcrumbs: Vec<(String, String)>) -> Self {
        Self {
            output_path: output_path_for(&url_path),
            url_path,
            kind,
            breadcrumbs,
        }
    }
}

/// `/company/` → `company/index.html`
pub fn output_path_for(url_path: &str) -> String {
    let trimmed = url_path.trim_matches('/');
    if trimmed.is_empty() {
        "index.html".to_string()
    } else if trimmed.ends_with(".html") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/index.html")
    }
}

/// URL of page `page` of a listing.
pub fn listing_url(kind: ContentKind, category: Option<&str>, page: usize) -> String {
    let mut url = match category {
        Some(id) => format!("/{}/category/{}/", kind.dir_name(), id),
        None => format!("/{}/", kind.dir_name()),
    };
    if page > 1 {
        url.push_str(&format!("page/{page}/"));
    }
    url
}

fn static_url(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        format!("/{path}/")
    }
}

fn home_crumb() -> (String, String) {
    (HOME_LABEL.to_string(), "/".to_string())
}

/// Expand every page of the site.
pub fn expand_routes(config: &SiteConfig, listings: &Listings) -> Vec<PageJob> {
    let mut jobs = Vec::new();

    for (id, path) in STATIC_PAGES {
        jobs.push(PageJob::at(
            static_url(path),
            PageKind::Static { id: id.to_string() },
            static_breadcrumbs(config, path),
        ));
    }

    let empty = Vec::new();
    for kind in ContentKind::ALL {
        let items = listings.get(&kind).unwrap_or(&empty);
        expand_kind(kind, items, config.listing.per_page, &mut jobs);
    }

    jobs.push(PageJob::at(
        "/404.html".to_string(),
        PageKind::NotFound,
        vec![home_crumb(), (NOT_FOUND_TITLE.to_string(), "/404.html".to_string())],
    ));

    log::debug!("Expanded {} routes", jobs.len());
    jobs
}

/// Home, then one crumb per path prefix that is itself a brochure page.
fn static_breadcrumbs(config: &SiteConfig, path: &str) -> Vec<(String, String)> {
    let mut crumbs = vec![home_crumb()];
    let mut prefix = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        if let Some((id, _)) = STATIC_PAGES.iter().find(|(_, p)| *p == prefix) {
            crumbs.push((config.page(id).title, static_url(&prefix)));
        }
    }
    crumbs
}

fn expand_kind(kind: ContentKind, items: &[ContentItem], per_page: usize, jobs: &mut Vec<PageJob>) {
    let kind_crumbs = vec![
        home_crumb(),
        (kind.label().to_string(), listing_url(kind, None, 1)),
    ];

    expand_listing(kind, None, items.len(), per_page, &kind_crumbs, jobs);

    for category in query::categories(kind, items).iter().skip(1) {
        if !is_path_segment(&category.id) {
            log::warn!("Skipping {} category {:?}: not a path segment", kind, category.id);
            continue;
        }
        let mut crumbs = kind_crumbs.clone();
        crumbs.push((category.name.clone(), listing_url(kind, Some(category.id.as_str()), 1)));
        expand_listing(kind, Some(category.id.as_str()), category.count, per_page, &crumbs, jobs);
    }

    for item in items {
        let mut crumbs = kind_crumbs.clone();
        crumbs.push((item.title.clone(), item.url_path()));
        jobs.push(PageJob::at(
            item.url_path(),
            PageKind::Detail {
                kind,
                slug: item.slug.clone(),
            },
            crumbs,
        ));
    }
}

/// Page 1 always exists, even for an empty list.
fn expand_listing(
    kind: ContentKind,
    category: Option<&str>,
    count: usize,
    per_page: usize,
    crumbs: &[(String, String)],
    jobs: &mut Vec<PageJob>,
) {
    let total_pages = count.div_ceil(per_page.max(1)).max(1);
    for page in 1..=total_pages {
        let url = listing_url(kind, category, page);
        let mut breadcrumbs = crumbs.to_vec();
        if page > 1 {
            breadcrumbs.push((format!("{page}ページ目"), url.clone()));
        }
        jobs.push(PageJob::at(
            url,
            PageKind::Listing {
                kind,
                category: category.map(str::to_string),
                page,
            },
            breadcrumbs,
        ));
    }
}

/// Title of a listing page, e.g. "ニュース：イベント".
pub fn listing_title(kind: ContentKind, category: Option<&str>) -> String {
    match category {
        Some(id) => format!("{}：{}", kind.label(), category_name(kind, id)),
        None => kind.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_with_env;
    use chrono::NaiveDate;
    use content::{ArticleDetails, Details, WorkDetails};

    fn item(kind: ContentKind, slug: &str, category: &str) -> ContentItem {
        ContentItem {
            kind,
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: category.to_string(),
            thumbnail: None,
            content: String::new(),
            details: match kind {
                ContentKind::Works => Details::Work(WorkDetails::default()),
                _ => Details::Article(ArticleDetails::default()),
            },
        }
    }

    fn config(per_page: usize) -> SiteConfig {
        let mut config = load_config_with_env(None, |_| None).unwrap();
        config.listing.per_page = per_page;
        config
    }

    fn urls(jobs: &[PageJob]) -> Vec<&str> {
        jobs.iter().map(|j| j.url_path.as_str()).collect()
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(output_path_for("/"), "index.html");
        assert_eq!(output_path_for("/contact/thanks/"), "contact/thanks/index.html");
        assert_eq!(output_path_for("/404.html"), "404.html");
    }

    #[test]
    fn test_listing_url() {
        assert_eq!(listing_url(ContentKind::News, None, 1), "/news/");
        assert_eq!(listing_url(ContentKind::News, None, 3), "/news/page/3/");
        assert_eq!(
            listing_url(ContentKind::Works, Some("renovation"), 2),
            "/works/category/renovation/page/2/"
        );
    }

    #[test]
    fn test_empty_site() {
        let jobs = expand_routes(&config(12), &Listings::new());
        let urls = urls(&jobs);
        assert!(urls.contains(&"/"));
        assert!(urls.contains(&"/contact/thanks/"));
        // One empty listing page per kind
        assert!(urls.contains(&"/works/"));
        assert!(urls.contains(&"/news/"));
        assert!(urls.contains(&"/topics/"));
        assert_eq!(urls.last(), Some(&"/404.html"));
        assert_eq!(jobs.len(), STATIC_PAGES.len() + 3 + 1);
    }

    #[test]
    fn test_pagination_and_categories() {
        let news: Vec<_> = (0..5)
            .map(|i| item(ContentKind::News, &format!("n{i}"), if i < 3 { "event" } else { "media" }))
            .collect();
        let listings = Listings::from([(ContentKind::News, news)]);
        let jobs = expand_routes(&config(2), &listings);
        let urls = urls(&jobs);

        for expected in [
            "/news/",
            "/news/page/2/",
            "/news/page/3/",
            "/news/category/event/",
            "/news/category/event/page/2/",
            "/news/category/media/",
            "/news/n0/",
            "/news/n4/",
        ] {
            assert!(urls.contains(&expected), "missing {expected}");
        }
        assert!(!urls.contains(&"/news/page/4/"));
        assert!(!urls.contains(&"/news/category/media/page/2/"));
    }

    #[test]
    fn test_unsafe_category_gets_no_listing() {
        let news = vec![
            item(ContentKind::News, "ok", "event"),
            item(ContentKind::News, "bad", "../../../escaped"),
        ];
        let listings = Listings::from([(ContentKind::News, news)]);
        let jobs = expand_routes(&config(12), &listings);

        assert!(jobs.iter().all(|j| !j.output_path.contains("..")), "{:?}", urls(&jobs));
        assert!(urls(&jobs).contains(&"/news/category/event/"));
    }

    #[test]
    fn test_breadcrumbs() {
        let listings = Listings::from([(
            ContentKind::Works,
            vec![item(ContentKind::Works, "hill", "new-construction")],
        )]);
        let jobs = expand_routes(&config(12), &listings);
        let find = |url: &str| jobs.iter().find(|j| j.url_path == url).unwrap();

        let thanks = find("/contact/thanks/");
        let labels: Vec<_> = thanks.breadcrumbs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["ホーム", "お問い合わせ", "お問い合わせありがとうございました"]);

        let detail = find("/works/hill/");
        assert_eq!(
            detail.kind,
            PageKind::Detail {
                kind: ContentKind::Works,
                slug: "hill".into()
            }
        );
        let labels: Vec<_> = detail.breadcrumbs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["ホーム", "施工事例", "HILL"]);

        let category = find("/works/category/new-construction/");
        assert_eq!(category.breadcrumbs[2].0, "新築");
        assert_eq!(find("/").breadcrumbs.len(), 1);
    }

    #[test]
    fn test_listing_title() {
        assert_eq!(listing_title(ContentKind::News, None), "ニュース");
        assert_eq!(listing_title(ContentKind::News, Some("event")), "ニュース：イベント");
    }
}
