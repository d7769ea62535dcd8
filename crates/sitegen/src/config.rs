// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Site configuration: built-in defaults, an optional `site.yaml`
//! merged over them, then environment overrides.

use crate::{Result, SitegenError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Shipped defaults, see `defaults.yaml`.
pub const DEFAULTS_YAML: &str = include_str!("defaults.yaml");

/// Environment variables consulted by [`load_config`], with the config
/// key each one sets.
pub const ENV_OVERRIDES: [(&str, &[&str]); 4] = [
    ("SITE_URL", &["site", "url"]),
    ("ANALYTICS_ID", &["integrations", "analytics_id"]),
    ("MAPS_API_KEY", &["integrations", "maps_api_key"]),
    ("FORM_RELAY_ID", &["integrations", "form_relay_id"]),
];

/// Complete site configuration.
///
/// ```yaml
/// site:
///   name: "山田工務店"
///   url: "https://yamada-koumuten.jp"
///
/// company:
///   tel: "0120-000-000"
///
/// pages:
///   company:
///     title: "会社概要"
///
/// listing:
///   per_page: 9
///
/// static_dir: "./public"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub company: CompanyInfo,
    #[serde(default)]
    pub navigation: Navigation,
    #[serde(default)]
    pub footer: Footer,
    /// Design tokens (colors, fonts, spacing, ...), kept as data
    #[serde(default)]
    pub theme: BTreeMap<String, Value>,
    #[serde(default)]
    pub pages: BTreeMap<String, PageConfig>,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub integrations: Integrations,
    /// Directory copied verbatim into the output
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMeta {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Absolute site URL used in sitemap and robots output
    pub url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub logo: Option<Logo>,
}

fn default_locale() -> String {
    "ja".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logo {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub description: String,
    pub address: String,
    pub tel: String,
    pub fax: Option<String>,
    pub email: String,
    pub business_hours: String,
    pub established: Option<String>,
    pub capital: Option<String>,
    pub employees: Option<String>,
    pub president: Option<String>,
    pub business: Vec<String>,
    pub coordinates: Option<Coordinates>,
    pub access: Access,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Access {
    pub train: Vec<String>,
    pub car: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Navigation {
    pub main: Vec<NavItem>,
    pub utility: Vec<NavItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub children: Vec<NavItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    /// `{year}` is replaced with the build year
    pub copyright: String,
    pub links: Vec<NavItem>,
}

/// Text for one brochure page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub hero: Option<Hero>,
    pub intro: Option<String>,
    pub sections: Vec<Section>,
    pub faq: Vec<Faq>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Markdown
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub per_page: usize,
    pub related: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            per_page: content::query::DEFAULT_PER_PAGE,
            related: content::query::DEFAULT_RELATED,
        }
    }
}

/// Third-party ids. Absent means the integration is left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Integrations {
    pub analytics_id: Option<String>,
    pub maps_api_key: Option<String>,
    pub form_relay_id: Option<String>,
}

impl Integrations {
    /// Blank ids from the file count as absent, same as blank env values.
    fn normalize(&mut self) {
        for id in [
            &mut self.analytics_id,
            &mut self.maps_api_key,
            &mut self.form_relay_id,
        ] {
            *id = id.take().map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        }
    }
}

impl SiteConfig {
    /// Page text for `id`, or a bare page titled `id`.
    pub fn page(&self, id: &str) -> PageConfig {
        self.pages.get(id).cloned().unwrap_or_else(|| PageConfig {
            title: id.to_string(),
            ..Default::default()
        })
    }

    /// Site URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }

    pub fn copyright(&self, year: i32) -> String {
        self.footer.copyright.replace("{year}", &year.to_string())
    }
}

/// Defaults, merged with `path` when given, then the process environment.
pub fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit environment lookup.
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> Result<SiteConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut merged: Value =
        serde_yaml_ng::from_str(DEFAULTS_YAML).map_err(|source| SitegenError::Config {
            path: PathBuf::from("<defaults>"),
            source,
        })?;

    if let Some(path) = path {
        let text = std::fs::read_to_string(path).map_err(|source| SitegenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overlay: Value =
            serde_yaml_ng::from_str(&text).map_err(|source| SitegenError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        // An empty file parses as null
        if !overlay.is_null() {
            deep_merge(&mut merged, overlay);
        }
        info!("Loaded site config from {}", path.display());
    }

    for (var, key_path) in ENV_OVERRIDES {
        if let Some(value) = env(var).filter(|v| !v.is_empty()) {
            debug!("{} set, overriding {}", var, key_path.join("."));
            set_path(&mut merged, key_path, Value::String(value));
        }
    }

    let origin = path.map_or_else(|| PathBuf::from("<defaults>"), Path::to_path_buf);
    let mut config: SiteConfig =
        serde_yaml_ng::from_value(merged).map_err(|source| SitegenError::Config {
            path: origin,
            source,
        })?;

    config.integrations.normalize();

    // Relative static_dir is taken from the config file's directory
    if let Some(parent) = path.and_then(Path::parent) {
        config.static_dir = config
            .static_dir
            .map(|dir| if dir.is_relative() { parent.join(dir) } else { dir });
    }
    Ok(config)
}

/// Merge `overlay` into `base`: mappings merge key by key, anything else
/// replaces.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn set_path(node: &mut Value, keys: &[&str], value: Value) {
    let Some((first, rest)) = keys.split_first() else {
        *node = value;
        return;
    };
    if !node.is_mapping() {
        *node = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = node {
        let key = Value::String(first.to_string());
        if !map.contains_key(&key) {
            map.insert(key.clone(), Value::Null);
        }
        if let Some(child) = map.get_mut(&key) {
            set_path(child, rest, value);
        }
    }
}
