// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::ContentKind;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{kind} '{slug}' not found")]
    NotFound { kind: ContentKind, slug: String },

    #[error("Cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad front-matter in {path:?}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Missing front-matter in {path:?}")]
    MissingFrontmatter { path: PathBuf },

    #[error("Invalid date '{value}' in {path:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Invalid category '{value}' in {path:?}")]
    InvalidCategory { path: PathBuf, value: String },

    #[error("Unknown content kind '{0}' (expected works, news or topics)")]
    UnknownKind(String),
}

impl ContentError {
    /// True for a missing item, which callers surface as a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
