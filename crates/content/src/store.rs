// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only access to the on-disk content tree.

use crate::{ContentError, ContentItem, ContentKind, Result, is_path_segment, query};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// A directory holding one sub-directory per [`ContentKind`].
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: ContentKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Load one item. `slug` may carry a trailing `.md`.
    pub fn get_by_slug(&self, kind: ContentKind, slug: &str) -> Result<ContentItem> {
        let slug = slug.strip_suffix(".md").unwrap_or(slug);
        let not_found = || ContentError::NotFound {
            kind,
            slug: slug.to_string(),
        };

        if !is_path_segment(slug) {
            return Err(not_found());
        }

        let path = self.kind_dir(kind).join(format!("{slug}.md"));
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(source) => return Err(ContentError::Io { path, source }),
        };
        ContentItem::parse(kind, slug, &path, &text)
    }

    /// Every readable item of `kind`, newest first (ties by slug).
    ///
    /// Files that fail to read or parse are logged and left out.
    pub fn get_all(&self, kind: ContentKind) -> Result<Vec<ContentItem>> {
        let dir = self.kind_dir(kind);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No {} directory at {}", kind, dir.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(ContentError::Io { path: dir, source }),
        };

        let mut items = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") || !path.is_file() {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("Skipping non UTF-8 file name {}", path.display());
                continue;
            };

            let parsed = std::fs::read_to_string(&path)
                .map_err(|source| ContentError::Io {
                    path: path.clone(),
                    source,
                })
                .and_then(|text| ContentItem::parse(kind, slug, &path, &text));
            match parsed {
                Ok(item) => items.push(item),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        debug!("Loaded {} {} items", items.len(), kind);
        Ok(items)
    }

    /// Slugs of every item of `kind`, in listing order.
    pub fn slugs(&self, kind: ContentKind) -> Result<Vec<String>> {
        Ok(self.get_all(kind)?.into_iter().map(|i| i.slug).collect())
    }

    /// Up to `limit` items related to `slug`, see [`query::related`].
    pub fn related(&self, kind: ContentKind, slug: &str, limit: usize) -> Result<Vec<ContentItem>> {
        let items = self.get_all(kind)?;
        Ok(query::related(&items, slug, limit))
    }
}
