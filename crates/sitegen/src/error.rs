// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SitegenError>;

#[derive(Debug, Error)]
pub enum SitegenError {
    #[error("Invalid site config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Content(#[from] content::ContentError),

    #[error("Shortcode error in '{page}': {message}")]
    Shortcode { page: String, message: String },
}
