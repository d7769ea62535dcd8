// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Site generation.
//!
//! 1. Load every content kind from the store
//! 2. Expand routes into page jobs
//! 3. Render each page: Markdown → shortcodes → HTML → layout
//! 4. Write pages, `sitemap.xml` and `robots.txt`, copy static files

use crate::config::SiteConfig;
use crate::layouts::{self, LayoutContext};
use crate::markdown::{preprocess_shortcodes, render_markdown};
use crate::pages;
use crate::routes::{self, Listings, NOT_FOUND_TITLE, PageJob, PageKind};
use crate::shortcodes::{ShortcodeContext, register_shortcodes, render_latest};
use crate::sitemap::{render_robots, render_sitemap};
use crate::{Result, SitegenError};
use chrono::{DateTime, Datelike, Utc};
use content::{ContentItem, ContentKind, ContentStore, query, split_frontmatter};
use log::{debug, info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Items per kind in the home page news and works sections.
const HOME_LATEST: usize = 3;

/// What a build wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// HTML pages, including `404.html`
    pub pages: usize,
    /// Files copied from `static_dir`
    pub assets: usize,
}

/// Front-matter of a brochure page override in `<content>/pages/<id>.md`.
#[derive(Debug, Default, Deserialize)]
struct PageFrontmatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    layout: Option<String>,
}

/// Every kind's items, newest first.
pub fn load_listings(store: &ContentStore) -> Result<Listings> {
    let mut listings = Listings::new();
    for kind in ContentKind::ALL {
        listings.insert(kind, store.get_all(kind)?);
    }
    Ok(listings)
}

/// Renders single pages against one loaded snapshot of the content.
pub struct Renderer<'a> {
    config: &'a SiteConfig,
    store: &'a ContentStore,
    listings: Arc<Listings>,
    year: i32,
}

impl<'a> Renderer<'a> {
    pub fn new(
        config: &'a SiteConfig,
        store: &'a ContentStore,
        build_time: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            config,
            store,
            listings: Arc::new(load_listings(store)?),
            year: build_time.year(),
        })
    }

    pub fn listings(&self) -> &Listings {
        &self.listings
    }

    pub fn render(&self, job: &PageJob) -> Result<String> {
        match &job.kind {
            PageKind::Static { id } => self.render_static(id, job),
            PageKind::Listing {
                kind,
                category,
                page,
            } => Ok(self.render_listing(*kind, category.as_deref(), *page, job)),
            PageKind::Detail { kind, slug } => self.render_detail(*kind, slug, &job.breadcrumbs),
            PageKind::NotFound => Ok(self.render_not_found()),
        }
    }

    fn layout(
        &self,
        name: &str,
        title: &str,
        description: &str,
        url: &str,
        crumbs: &[(String, String)],
        content: &str,
    ) -> String {
        layouts::apply_layout(
            name,
            &LayoutContext {
                title,
                description,
                config: self.config,
                current_path: url,
                breadcrumbs: crumbs,
                content,
                year: self.year,
            },
        )
    }

    /// Expand shortcodes then render Markdown.
    fn render_body(&self, source: &str, page: &str, crumbs: &[(String, String)]) -> Result<String> {
        let ctx = Arc::new(ShortcodeContext {
            site_name: self.config.site.name.clone(),
            company: self.config.company.clone(),
            breadcrumbs: crumbs.to_vec(),
            listings: self.listings.clone(),
            maps_api_key: self.config.integrations.maps_api_key.clone(),
        });
        let shortcodes = register_shortcodes(ctx);
        let expanded =
            preprocess_shortcodes(source, &shortcodes).map_err(|message| SitegenError::Shortcode {
                page: page.to_string(),
                message,
            })?;
        Ok(render_markdown(&expanded))
    }

    fn page_source(&self, id: &str) -> PathBuf {
        self.store.root().join("pages").join(format!("{id}.md"))
    }

    fn render_static(&self, id: &str, job: &PageJob) -> Result<String> {
        let config_page = self.config.page(id);
        let default_layout = if id == "home" { "default" } else { "page" };
        let mut title = match (&config_page.hero, id) {
            (Some(hero), "home") => hero.title.clone(),
            _ => config_page.title.clone(),
        };
        let mut description = config_page.description.clone();
        let mut layout = default_layout.to_string();

        let path = self.page_source(id);
        let mut body = match read_optional(&path)? {
            Some(text) => {
                debug!("Using {} for page '{}'", path.display(), id);
                let (yaml, markdown) = split_frontmatter(&text);
                let fm: PageFrontmatter = if yaml.is_empty() {
                    PageFrontmatter::default()
                } else {
                    serde_yaml_ng::from_str(&yaml).map_err(|source| SitegenError::Config {
                        path: path.clone(),
                        source,
                    })?
                };
                title = fm.title.unwrap_or(title);
                description = fm.description.unwrap_or(description);
                layout = fm.layout.unwrap_or(layout);
                self.render_body(&markdown, &path.display().to_string(), &job.breadcrumbs)?
            }
            None => pages::config_body(&config_page).into_string(),
        };

        let extra = match id {
            "home" => Some(self.home_latest()),
            "company" => Some(pages::company_profile(self.config).into_string()),
            "contact" => Some(pages::contact_form(self.config).into_string()),
            "documents" => Some(pages::document_request_form(self.config).into_string()),
            "sitemap" => Some(pages::html_sitemap(self.config, &self.listings).into_string()),
            _ => None,
        };
        if let Some(extra) = extra {
            body.push_str(&extra);
        }

        Ok(self.layout(&layout, &title, &description, &job.url_path, &job.breadcrumbs, &body))
    }

    fn home_latest(&self) -> String {
        let mut html = String::new();
        for kind in [ContentKind::News, ContentKind::Works] {
            let section = maud::html! {
                section class="home-latest" {
                    h2 { (kind.label()) }
                    (render_latest(&self.listings, kind, HOME_LATEST))
                    p { a href=(routes::listing_url(kind, None, 1)) { (kind.label()) "一覧" } }
                }
            };
            html.push_str(&section.into_string());
        }
        html
    }

    fn render_listing(
        &self,
        kind: ContentKind,
        category: Option<&str>,
        page: usize,
        job: &PageJob,
    ) -> String {
        let empty = Vec::new();
        let items = self.listings.get(&kind).unwrap_or(&empty);
        let filtered = query::by_category(items, category);
        let page = query::paginate(&filtered, page, self.config.listing.per_page);
        let categories = query::categories(kind, items);

        let body = layouts::listing_body(kind, &page, &categories, category).into_string();
        let title = routes::listing_title(kind, category);
        let description = format!("{}の一覧", title);
        self.layout("listing", &title, &description, &job.url_path, &job.breadcrumbs, &body)
    }

    /// Detail page for `slug`; an unknown slug renders the 404 page.
    pub fn render_detail(
        &self,
        kind: ContentKind,
        slug: &str,
        crumbs: &[(String, String)],
    ) -> Result<String> {
        let item = match self.store.get_by_slug(kind, slug) {
            Ok(item) => item,
            Err(e) if e.is_not_found() => {
                warn!("{}", e);
                return Ok(self.render_not_found());
            }
            Err(e) => return Err(e.into()),
        };

        let related = self
            .listings
            .get(&kind)
            .map(|items| query::related(items, &item.slug, self.config.listing.related))
            .unwrap_or_default();
        let body_html = self.render_item_body(&item, crumbs)?;
        let body = layouts::article_body(&item, &body_html, &related).into_string();

        Ok(self.layout(
            "article",
            &item.title,
            &item.description,
            &item.url_path(),
            crumbs,
            &body,
        ))
    }

    /// An item's Markdown body as HTML, shortcodes expanded.
    pub fn render_item_body(
        &self,
        item: &ContentItem,
        crumbs: &[(String, String)],
    ) -> Result<String> {
        self.render_body(&item.content, &item.url_path(), crumbs)
    }

    pub fn render_not_found(&self) -> String {
        let crumbs = vec![
            (routes::HOME_LABEL.to_string(), "/".to_string()),
            (NOT_FOUND_TITLE.to_string(), "/404.html".to_string()),
        ];
        let body = maud::html! {
            p { "お探しのページは移動または削除された可能性があります。" }
            p { a href="/" { "トップページへ戻る" } }
        }
        .into_string();
        self.layout("page", NOT_FOUND_TITLE, "", "/404.html", &crumbs, &body)
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SitegenError {
    let path = path.to_path_buf();
    move |source| SitegenError::Io { path, source }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(io_err(path)(source)),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    std::fs::write(path, contents).map_err(io_err(path))
}

/// Copy `src` into `dst` recursively; returns the number of files.
fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    std::fs::create_dir_all(dst).map_err(io_err(dst))?;
    let mut copied = 0;
    for entry in std::fs::read_dir(src).map_err(io_err(src))? {
        let entry = entry.map_err(io_err(src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copied += copy_dir(&from, &to)?;
        } else {
            std::fs::copy(&from, &to).map_err(io_err(&from))?;
            debug!("copied {}", to.display());
            copied += 1;
        }
    }
    Ok(copied)
}

/// Generate the complete static site into `output_dir`.
pub fn generate_site(
    config: &SiteConfig,
    store: &ContentStore,
    output_dir: &Path,
    build_time: DateTime<Utc>,
) -> Result<BuildReport> {
    let renderer = Renderer::new(config, store, build_time)?;
    let jobs = routes::expand_routes(config, renderer.listings());
    info!("Route expansion: {} pages to generate", jobs.len());

    let mut report = BuildReport::default();
    for job in &jobs {
        let html = renderer.render(job)?;
        write_file(&output_dir.join(&job.output_path), &html)?;
        debug!("wrote {}", job.output_path);
        report.pages += 1;
    }

    write_file(
        &output_dir.join("sitemap.xml"),
        &render_sitemap(config, renderer.listings(), build_time.date_naive()),
    )?;
    write_file(&output_dir.join("robots.txt"), &render_robots(config, build_time))?;

    if let Some(static_dir) = &config.static_dir {
        report.assets = copy_dir(static_dir, output_dir)?;
        info!("Copied {} static files from {}", report.assets, static_dir.display());
    }

    info!(
        "Site generation complete: {} pages, {} assets to {}",
        report.pages,
        report.assets,
        output_dir.display()
    );
    Ok(report)
}
