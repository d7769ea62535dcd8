// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! # Content — Markdown flat-file content for komuten
//!
//! One directory per content kind (`works`, `news`, `topics`), one
//! Markdown file per item with YAML front-matter:
//!
//! ```text
//! content/
//!   works/
//!     hillside-house.md
//!   news/
//!     2024-open-house.md
//! ```
//!
//! [`ContentStore`] reads the tree; the [`query`] module filters, pages
//! and picks related items from the in-memory lists it returns.

mod error;
mod frontmatter;
mod item;
mod kind;
pub mod query;
mod store;
pub mod text;

pub use error::{ContentError, Result};
pub use frontmatter::split_frontmatter;
pub use item::{ArticleDetails, ContentItem, Details, WorkDetails, is_path_segment};
pub use kind::{ContentKind, category_name};
pub use query::{Category, Page};
pub use store::ContentStore;
