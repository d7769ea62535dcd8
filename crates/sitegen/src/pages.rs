// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Bodies of brochure pages built from configuration rather than
//! Markdown: config sections and FAQ, the company profile, the two
//! forms and the HTML sitemap.

use crate::config::{PageConfig, SiteConfig};
use crate::markdown::render_markdown;
use crate::routes::{Listings, STATIC_PAGES};
use content::ContentKind;
use maud::{Markup, PreEscaped, html};

/// Brochures offered on the document request form: (id, label).
pub const DOCUMENTS: [(&str, &str); 3] = [
    ("catalog", "総合カタログ"),
    ("works", "施工事例集"),
    ("warranty", "保証・メンテナンスのご案内"),
];

/// Hero, intro, sections and FAQ from a page config.
pub fn config_body(page: &PageConfig) -> Markup {
    html! {
        @if let Some(hero) = &page.hero {
            section class="hero" {
                @if let Some(image) = &hero.image {
                    img src=(image) alt="";
                }
                p class="hero-title" { (hero.title) }
                @if let Some(subtitle) = &hero.subtitle {
                    p class="hero-subtitle" { (subtitle) }
                }
            }
        }
        @if let Some(intro) = &page.intro {
            p class="intro" { (intro) }
        }
        @for section in &page.sections {
            section {
                h2 { (section.title) }
                (PreEscaped(render_markdown(&section.body)))
            }
        }
        @if !page.faq.is_empty() {
            section id="faq" class="faq" {
                h2 { "よくあるご質問" }
                dl {
                    @for faq in &page.faq {
                        dt { (faq.question) }
                        dd { (faq.answer) }
                    }
                }
            }
        }
    }
}

/// Company overview table, history and access.
pub fn company_profile(config: &SiteConfig) -> Markup {
    let company = &config.company;
    let rows: Vec<(&str, Option<&str>)> = vec![
        ("会社名", Some(company.name.as_str())),
        ("設立", company.established.as_deref()),
        ("資本金", company.capital.as_deref()),
        ("代表者", company.president.as_deref()),
        ("従業員数", company.employees.as_deref()),
        ("所在地", Some(company.address.as_str())),
        ("電話番号", Some(company.tel.as_str())),
        ("FAX", company.fax.as_deref()),
        ("営業時間", Some(company.business_hours.as_str())),
    ];
    html! {
        section id="overview" {
            h2 { "会社概要" }
            table class="company-overview" {
                @for (label, value) in rows {
                    @if let Some(value) = value.filter(|v| !v.is_empty()) {
                        tr { th scope="row" { (label) } td { (value) } }
                    }
                }
                @if !company.business.is_empty() {
                    tr {
                        th scope="row" { "事業内容" }
                        td { ul { @for b in &company.business { li { (b) } } } }
                    }
                }
            }
        }
        @if !company.history.is_empty() {
            section id="history" {
                h2 { "沿革" }
                dl class="history" {
                    @for entry in &company.history {
                        dt { (entry.date) }
                        dd {
                            strong { (entry.title) }
                            @if !entry.description.is_empty() {
                                " " (entry.description)
                            }
                        }
                    }
                }
            }
        }
        section id="access" {
            h2 { "アクセス" }
            @if !company.access.train.is_empty() {
                h3 { "電車でお越しの方" }
                ul { @for line in &company.access.train { li { (line) } } }
            }
            @if !company.access.car.is_empty() {
                h3 { "お車でお越しの方" }
                ul { @for line in &company.access.car { li { (line) } } }
            }
            (crate::shortcodes::render_map(company, config.integrations.maps_api_key.as_deref()))
        }
    }
}

/// Form `action`: the relay endpoint when configured.
fn form_action(config: &SiteConfig) -> Option<String> {
    config
        .integrations
        .form_relay_id
        .as_deref()
        .map(|id| format!("{}/{}", forms::relay::RELAY_BASE_URL, id))
}

fn text_field(name: &str, label: &str, kind: &str, required: bool) -> Markup {
    html! {
        p {
            label for=(name) {
                (label)
                @if required { " " span class="required" { "必須" } }
            }
            input type=(kind) id=(name) name=(name) required[required];
        }
    }
}

fn privacy_field() -> Markup {
    html! {
        p {
            label {
                input type="checkbox" name="privacy" value="true" required;
                " "
                a href="/privacy/" { "プライバシーポリシー" }
                "に同意する"
            }
        }
    }
}

pub fn contact_form(config: &SiteConfig) -> Markup {
    html! {
        form class="contact-form" method="post" action=[form_action(config)] {
            input type="hidden" name="_next" value=(forms::THANKS_PATH);
            (text_field("company", "会社名", "text", true))
            (text_field("name", "氏名", "text", true))
            (text_field("email", "メールアドレス", "email", true))
            (text_field("phone", "電話番号", "tel", true))
            (text_field("subject", "件名", "text", true))
            p {
                label for="message" { "お問い合わせ内容" " " span class="required" { "必須" } }
                textarea id="message" name="message" rows="8" minlength="10" required {}
            }
            (privacy_field())
            p { button type="submit" { "送信する" } }
        }
    }
}

pub fn document_request_form(config: &SiteConfig) -> Markup {
    html! {
        form class="document-form" method="post" action=[form_action(config)] {
            input type="hidden" name="_next" value=(forms::THANKS_PATH);
            fieldset {
                legend { "ご希望の資料" }
                @for (id, label) in DOCUMENTS {
                    label {
                        input type="checkbox" name="documents" value=(id);
                        " " (label)
                    }
                }
            }
            (text_field("name", "氏名", "text", true))
            (text_field("email", "メールアドレス", "email", true))
            (text_field("phone", "電話番号", "tel", true))
            (text_field("company", "会社名", "text", false))
            fieldset {
                legend { "送付方法" }
                label { input type="radio" name="deliveryMethod" value="download" checked; " ダウンロード" }
                label { input type="radio" name="deliveryMethod" value="mail"; " 郵送" }
            }
            (text_field("postalCode", "郵便番号", "text", false))
            (text_field("address", "住所", "text", false))
            p {
                label for="message" { "備考" }
                textarea id="message" name="message" rows="4" {}
            }
            (privacy_field())
            p { button type="submit" { "資料を請求する" } }
        }
    }
}

/// Every brochure page, then each content kind with its items.
pub fn html_sitemap(config: &SiteConfig, listings: &Listings) -> Markup {
    html! {
        section {
            h2 { "ページ一覧" }
            ul {
                @for (id, path) in STATIC_PAGES {
                    @let href = if path.is_empty() { "/".to_string() } else { format!("/{path}/") };
                    li { a href=(href) { (config.page(id).title) } }
                }
            }
        }
        @for kind in ContentKind::ALL {
            section {
                h2 { a href=(format!("/{}/", kind.dir_name())) { (kind.label()) } }
                @if let Some(items) = listings.get(&kind).filter(|items| !items.is_empty()) {
                    ul {
                        @for item in items {
                            li { a href=(item.url_path()) { (item.title) } }
                        }
                    }
                }
            }
        }
    }
}
