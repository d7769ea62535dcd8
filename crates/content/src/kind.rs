// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::ContentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the Markdown-backed listing/detail page families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Works,
    News,
    Topics,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Works, ContentKind::News, ContentKind::Topics];

    /// Directory name under the content root, also the URL prefix.
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Works => "works",
            ContentKind::News => "news",
            ContentKind::Topics => "topics",
        }
    }

    /// Listing page title.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Works => "施工事例",
            ContentKind::News => "ニュース",
            ContentKind::Topics => "住まいのトピックス",
        }
    }

    /// Sitemap priority for detail pages of this kind.
    pub fn sitemap_priority(self) -> f32 {
        match self {
            ContentKind::Works => 0.7,
            ContentKind::News | ContentKind::Topics => 0.6,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "works" => Ok(ContentKind::Works),
            "news" => Ok(ContentKind::News),
            "topics" => Ok(ContentKind::Topics),
            _ => Err(ContentError::UnknownKind(s.to_string())),
        }
    }
}

/// Display name for a category id; unknown ids display as themselves.
pub fn category_name(kind: ContentKind, id: &str) -> String {
    let name = match (kind, id) {
        (ContentKind::Works, "new-construction") => "新築",
        (ContentKind::Works, "renovation") => "リフォーム",
        (ContentKind::Works, "exterior") => "外構・エクステリア",
        (ContentKind::News, "announcement") => "お知らせ",
        (ContentKind::News, "event") => "イベント",
        (ContentKind::News, "media") => "メディア掲載",
        (ContentKind::Topics, "technology") => "技術情報",
        (ContentKind::Topics, "column") => "コラム",
        (ContentKind::Topics, "report") => "レポート",
        _ => id,
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("works".parse::<ContentKind>().unwrap(), ContentKind::Works);
        assert_eq!("News".parse::<ContentKind>().unwrap(), ContentKind::News);
        assert!("blog".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_category_names() {
        assert_eq!(category_name(ContentKind::Works, "renovation"), "リフォーム");
        assert_eq!(category_name(ContentKind::News, "event"), "イベント");
        // Ids from another kind's table are not translated
        assert_eq!(category_name(ContentKind::News, "renovation"), "renovation");
        assert_eq!(category_name(ContentKind::Topics, "misc"), "misc");
    }
}
