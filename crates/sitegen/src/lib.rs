// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! # Sitegen — static site generator for komuten
//!
//! Builds the brochure site from a [`SiteConfig`] and a
//! [`ContentStore`](content::ContentStore) with a Markdown + Maud
//! pipeline. Uses pulldown-cmark for Markdown and Maud for HTML layouts.
//!
//! ## Usage
//!
//! ```bash
//! komuten --config site.yaml --content content build ./dist
//! ```

pub mod config;
mod error;
mod generate;
mod layouts;
pub mod markdown;
mod pages;
pub mod routes;
mod shortcodes;
pub mod sitemap;

pub use config::{SiteConfig, load_config};
pub use error::{Result, SitegenError};
pub use generate::{BuildReport, Renderer, generate_site, load_listings};
pub use routes::{Listings, PageJob, PageKind};
