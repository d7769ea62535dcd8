// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Typed content records built from front-matter + Markdown body.

use crate::{ContentError, ContentKind, Result, category_name, split_frontmatter};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// One Markdown-backed item (a work, a news post or a topic).
///
/// Identity is `(kind, slug)`; the slug is the file stem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub category: String,
    pub thumbnail: Option<String>,
    /// Raw Markdown body (front-matter removed)
    pub content: String,
    pub details: Details,
}

/// Fields that only exist for some content kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Details {
    Work(WorkDetails),
    Article(ArticleDetails),
}

/// Extra front-matter for `works` items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDetails {
    /// Floor area, e.g. "120㎡"
    #[serde(default, deserialize_with = "opt_scalar")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub structure: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Extra front-matter for `news` and `topics` items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleDetails {
    #[serde(default, deserialize_with = "opt_scalar")]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Front-matter fields shared by every kind.
#[derive(Debug, Deserialize)]
struct CommonFrontmatter {
    #[serde(deserialize_with = "scalar")]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(deserialize_with = "scalar")]
    date: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl ContentItem {
    /// Parse a Markdown document read from `path`.
    pub fn parse(kind: ContentKind, slug: &str, path: &Path, text: &str) -> Result<Self> {
        let (yaml, body) = split_frontmatter(text);
        if yaml.is_empty() {
            return Err(ContentError::MissingFrontmatter {
                path: path.to_path_buf(),
            });
        }

        let bad_yaml = |source| ContentError::Frontmatter {
            path: path.to_path_buf(),
            source,
        };
        let common: CommonFrontmatter = serde_yaml_ng::from_str(&yaml).map_err(bad_yaml)?;
        let details = match kind {
            ContentKind::Works => Details::Work(serde_yaml_ng::from_str(&yaml).map_err(bad_yaml)?),
            ContentKind::News | ContentKind::Topics => {
                Details::Article(serde_yaml_ng::from_str(&yaml).map_err(bad_yaml)?)
            }
        };

        let date = parse_date(&common.date).ok_or_else(|| ContentError::InvalidDate {
            path: path.to_path_buf(),
            value: common.date.clone(),
        })?;

        if !common.category.is_empty() && !is_path_segment(&common.category) {
            return Err(ContentError::InvalidCategory {
                path: path.to_path_buf(),
                value: common.category,
            });
        }

        Ok(ContentItem {
            kind,
            slug: slug.to_string(),
            title: common.title,
            description: common.description,
            date,
            category: common.category,
            thumbnail: common.thumbnail.filter(|t| !t.is_empty()),
            content: body,
            details,
        })
    }

    /// Site-relative URL of the detail page, e.g. `/works/hillside-house/`.
    pub fn url_path(&self) -> String {
        format!("/{}/{}/", self.kind.dir_name(), self.slug)
    }

    /// Display name of this item's category.
    pub fn category_name(&self) -> String {
        category_name(self.kind, &self.category)
    }

    pub fn work_details(&self) -> Option<&WorkDetails> {
        match &self.details {
            Details::Work(w) => Some(w),
            Details::Article(_) => None,
        }
    }

    pub fn article_details(&self) -> Option<&ArticleDetails> {
        match &self.details {
            Details::Article(a) => Some(a),
            Details::Work(_) => None,
        }
    }
}

/// True when `value` can stand as one URL path segment: non-empty, no
/// separators, no `..`. Slugs and category ids must pass.
pub fn is_path_segment(value: &str) -> bool {
    !value.is_empty() && !value.contains(['/', '\\']) && !value.contains("..")
}

/// Accepts `2024-01-15`, `2024/01/15` or an RFC 3339 timestamp (date kept).
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

/// Untyped YAML scalar, so `area: 120` reads the same as `area: "120"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(s: Scalar) -> String {
        match s {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Scalar::deserialize(d).map(String::from)
}

fn opt_scalar<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?.map(String::from))
}
