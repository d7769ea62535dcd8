// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use cmd::commands::{build, form, list, show, sitemap};
use cmd::common::{FormKind, SiteContext};
use content::{ContentKind, ContentStore};
use forms::MockSubmitter;
use sitegen::config::load_config_with_env;
use tempfile::{TempDir, tempdir};

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// A content tree with four news items and two works.
fn setup_site() -> (TempDir, SiteContext) {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    for (slug, date, category) in [
        ("open-house", "2024-05-10", "event"),
        ("seminar", "2024-04-20", "event"),
        ("new-office", "2024-03-01", "announcement"),
        ("holiday", "2024-01-05", "announcement"),
    ] {
        write(
            root,
            &format!("news/{slug}.md"),
            &format!(
                "---\ntitle: {slug}\ndate: {date}\ncategory: {category}\nauthor: 広報\ntags: [お知らせ]\n---\n\n## 概要\n\n{{{{ company_name /}}}}より\n"
            ),
        );
    }
    write(
        root,
        "works/hill.md",
        "---\ntitle: 丘の上の家\ndate: 2024-02-01\ncategory: new-construction\narea: 120㎡\nstructure: 木造2階建て\n---\n\n本文\n",
    );
    write(
        root,
        "works/kitchen.md",
        "---\ntitle: キッチン改修\ndate: 2023-11-11\ncategory: renovation\n---\n\n本文\n",
    );

    let config = load_config_with_env(None, |_| None).unwrap();
    let ctx = SiteContext::new(config, ContentStore::open(root));
    (tmp, ctx)
}

fn discard(_: String) {}

#[test]
fn test_list_command_pages() {
    let (_tmp, ctx) = setup_site();
    let mut lines = Vec::new();
    let page = list::list_command(&ctx, ContentKind::News, None, 2, Some(3), |l| lines.push(l))
        .unwrap();

    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 2);
    assert!(page.has_prev);
    assert!(!page.has_next);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("holiday"));
    assert!(lines[0].contains("[お知らせ]"));
    assert_eq!(lines[1], "-- page 2/2 (4 news)");
}

#[test]
fn test_list_command_category() {
    let (_tmp, ctx) = setup_site();
    let mut lines = Vec::new();
    let page =
        list::list_command(&ctx, ContentKind::News, Some("event"), 1, None, |l| lines.push(l))
            .unwrap();

    let slugs: Vec<_> = page.items.iter().map(|i| i.slug.as_str()).collect();
    assert_eq!(slugs, ["open-house", "seminar"]);
    assert_eq!(lines.last().unwrap(), "-- page 1/1 (2 news)");
}

#[test]
fn test_categories_command() {
    let (_tmp, ctx) = setup_site();
    let mut lines = Vec::new();
    list::categories_command(&ctx, ContentKind::Works, |l| lines.push(l)).unwrap();

    assert_eq!(lines[0], "all\tすべて\t2");
    assert_eq!(lines.len(), 3);
    assert!(lines.contains(&"renovation\tリフォーム\t1".to_string()), "{lines:?}");
}

#[test]
fn test_related_command() {
    let (_tmp, ctx) = setup_site();
    let mut lines = Vec::new();
    let related =
        list::related_command(&ctx, ContentKind::News, "open-house", Some(2), |l| lines.push(l))
            .unwrap();

    let slugs: Vec<_> = related.iter().map(|i| i.slug.as_str()).collect();
    assert_eq!(slugs, ["seminar", "new-office"]);
    assert_eq!(lines.len(), 2);

    assert!(list::related_command(&ctx, ContentKind::News, "missing", None, discard).is_err());
}

#[test]
fn test_show_command() {
    let (_tmp, ctx) = setup_site();
    let mut lines = Vec::new();
    show::show_command(&ctx, ContentKind::News, "seminar", |l| lines.push(l)).unwrap();
    let output = lines.join("\n");

    assert!(output.contains("url:         /news/seminar/"));
    assert!(output.contains("2024年4月20日"));
    assert!(output.contains("author:      広報"));
    assert!(output.contains(r#"<h3 id="概要">概要</h3>"#));
    assert!(output.contains("株式会社サンプルより"));

    let mut lines = Vec::new();
    show::show_command(&ctx, ContentKind::Works, "hill", |l| lines.push(l)).unwrap();
    assert!(lines.iter().any(|l| l == "structure:   木造2階建て"));

    let err = show::show_command(&ctx, ContentKind::Works, "nope", discard).unwrap_err();
    assert!(err.to_string().contains("works/nope"));
}

#[test]
fn test_build_command() {
    let (_tmp, ctx) = setup_site();
    let out = tempdir().unwrap();
    let mut lines = Vec::new();
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let report = build::build_command(&ctx, out.path(), at, |l| lines.push(l)).unwrap();

    assert!(report.pages > 12);
    assert_eq!(report.assets, 0);
    assert!(lines[0].starts_with(&format!("Built {} pages", report.pages)));
    assert!(out.path().join("news/open-house/index.html").exists());
    assert!(out.path().join("404.html").exists());
    assert!(out.path().join("sitemap.xml").exists());
}

#[test]
fn test_sitemap_and_robots_commands() {
    let (_tmp, ctx) = setup_site();
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

    let mut xml = String::new();
    sitemap::sitemap_command(&ctx, at, |s| xml = s).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<loc>https://example.com/news/holiday/</loc>"));
    assert!(xml.contains("<lastmod>2025-01-02</lastmod>"));

    let mut robots = String::new();
    sitemap::robots_command(&ctx, at, |s| robots = s).unwrap();
    assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
}

#[test]
fn test_validate_command() {
    let tmp = tempdir().unwrap();
    let good = tmp.path().join("good.json");
    fs::write(
        &good,
        r#"{
            "company": "山田工務店",
            "name": "山田太郎",
            "email": "taro@example.com",
            "phone": "03-1234-5678",
            "subject": "見学",
            "message": "モデルハウスを見学したいです。",
            "privacy": true
        }"#,
    )
    .unwrap();
    let mut lines = Vec::new();
    let errors = form::validate_command(FormKind::Contact, &good, |l| lines.push(l)).unwrap();
    assert!(errors.is_empty());
    assert_eq!(lines, ["OK"]);

    let bad = tmp.path().join("bad.json");
    fs::write(&bad, r#"{"email":"nope","deliveryMethod":"mail"}"#).unwrap();
    let mut lines = Vec::new();
    let errors = form::validate_command(FormKind::Documents, &bad, |l| lines.push(l)).unwrap();
    let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"postalCode"));
    assert_eq!(lines.len(), errors.len());

    let missing = tmp.path().join("missing.json");
    assert!(form::validate_command(FormKind::Contact, &missing, discard).is_err());
}

#[tokio::test]
async fn test_submit_with_mock() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("submission.json");
    fs::write(
        &path,
        r#"{"name":"山田太郎","email":"taro@example.com","message":"資料を送ってください。"}"#,
    )
    .unwrap();
    let mock = MockSubmitter {
        delay: Duration::ZERO,
        failure_rate: 0.0,
    };

    let mut json = String::new();
    let response = form::submit_with(&mock, None, &path, |s| json = s).await.unwrap();
    assert!(response.success);
    assert_eq!(response.redirect.as_deref(), Some("/contact/thanks"));
    assert!(json.contains(r#""redirect": "/contact/thanks""#));
}

#[tokio::test]
async fn test_submit_rejects_invalid_form() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("contact.json");
    fs::write(&path, r#"{"name":"","email":"bad"}"#).unwrap();
    let mock = MockSubmitter {
        delay: Duration::ZERO,
        failure_rate: 0.0,
    };

    let mut json = String::new();
    let response = form::submit_with(&mock, Some(FormKind::Contact), &path, |s| json = s)
        .await
        .unwrap();
    assert!(!response.success);
    assert!(!response.errors.is_empty());
    assert!(json.contains(r#""success": false"#));
}
