// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Form records and their validation rules.
//!
//! Field-level validation reports at most one message per field (the
//! first rule that fails), in field order. The relay-level
//! [`FormSubmission::validate`] reports every failing message.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\-+() ]+$").expect("valid phone regex"));
static JP_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0\d{1,4}-?\d{1,4}-?\d{3,4}$").expect("valid phone regex"));
static POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-?\d{4}$").expect("valid postal code regex"));

/// Minimum inquiry length, in characters.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// A message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Collects the first failure per field.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    /// Run `rules` for `field` in order; record the first message.
    fn field(&mut self, field: &'static str, rules: &[(bool, &'static str)]) {
        if let Some(&(_, message)) = rules.iter().find(|(ok, _)| !*ok) {
            self.errors.push(FieldError { field, message });
        }
    }

    fn name(&mut self, name: &str) {
        self.field("name", &[(!name.trim().is_empty(), "氏名を入力してください")]);
    }

    fn email(&mut self, email: &str) {
        let email = email.trim();
        self.field(
            "email",
            &[
                (!email.is_empty(), "メールアドレスを入力してください"),
                (EMAIL_RE.is_match(email), "正しいメールアドレスを入力してください"),
            ],
        );
    }

    fn phone(&mut self, phone: &str) {
        let phone = phone.trim();
        self.field(
            "phone",
            &[
                (!phone.is_empty(), "電話番号を入力してください"),
                (PHONE_CHARS_RE.is_match(phone), "正しい電話番号を入力してください"),
            ],
        );
    }

    fn privacy(&mut self, agreed: bool) {
        self.field("privacy", &[(agreed, "プライバシーポリシーに同意してください")]);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub privacy: bool,
}

impl ContactForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut c = Checker::default();
        c.field("company", &[(!self.company.trim().is_empty(), "会社名を入力してください")]);
        c.name(&self.name);
        c.email(&self.email);
        c.phone(&self.phone);
        c.field("subject", &[(!self.subject.trim().is_empty(), "件名を入力してください")]);
        // Blank text is empty, but the length counts what was typed
        c.field(
            "message",
            &[
                (!self.message.trim().is_empty(), "お問い合わせ内容を入力してください"),
                (
                    self.message.chars().count() >= MIN_MESSAGE_CHARS,
                    "お問い合わせ内容は10文字以上で入力してください",
                ),
            ],
        );
        c.privacy(self.privacy);
        c.errors
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    #[default]
    Download,
    Mail,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentRequestForm {
    /// Brochure ids
    pub documents: Vec<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub delivery_method: DeliveryMethod,
    pub postal_code: Option<String>,
    pub address: Option<String>,
    pub message: Option<String>,
    pub privacy: bool,
}

impl DocumentRequestForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut c = Checker::default();
        c.field("documents", &[(!self.documents.is_empty(), "資料を1つ以上選択してください")]);
        c.name(&self.name);
        c.email(&self.email);
        c.phone(&self.phone);

        if self.delivery_method == DeliveryMethod::Mail {
            let postal = self.postal_code.as_deref().unwrap_or("").trim();
            c.field(
                "postalCode",
                &[
                    (!postal.is_empty(), "郵便番号を入力してください"),
                    (POSTAL_RE.is_match(postal), "郵便番号を正しく入力してください"),
                ],
            );
            let address = self.address.as_deref().unwrap_or("").trim();
            c.field("address", &[(!address.is_empty(), "住所を入力してください")]);
        }

        c.privacy(self.privacy);
        c.errors
    }
}

/// The flattened record sent to the form relay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub turnstile_token: Option<String>,
}

impl FormSubmission {
    /// Every relay-level problem, in field order. Empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("お名前を入力してください。".to_string());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("メールアドレスを入力してください。".to_string());
        } else if !EMAIL_RE.is_match(email) {
            errors.push("有効なメールアドレスを入力してください。".to_string());
        }

        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            if !JP_PHONE_RE.is_match(&normalize_dashes(phone)) {
                errors.push("有効な電話番号を入力してください。".to_string());
            }
        }

        if self.message.trim().is_empty() {
            errors.push("お問い合わせ内容を入力してください。".to_string());
        } else if self.message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push("お問い合わせ内容は10文字以上で入力してください。".to_string());
        }

        errors
    }
}

/// Long-vowel marks and full-width dashes typed in phone numbers.
fn normalize_dashes(phone: &str) -> String {
    phone
        .chars()
        .map(|c| match c {
            'ー' | '－' | '―' => '-',
            c => c,
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl From<&ContactForm> for FormSubmission {
    fn from(form: &ContactForm) -> Self {
        let message = if form.subject.trim().is_empty() {
            form.message.clone()
        } else {
            format!("【{}】\n{}", form.subject.trim(), form.message)
        };
        FormSubmission {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: non_empty(&form.phone),
            company: non_empty(&form.company),
            message,
            turnstile_token: None,
        }
    }
}

impl From<&DocumentRequestForm> for FormSubmission {
    fn from(form: &DocumentRequestForm) -> Self {
        let mut lines = vec![format!("資料請求: {}", form.documents.join(", "))];
        match form.delivery_method {
            DeliveryMethod::Download => lines.push("送付方法: ダウンロード".to_string()),
            DeliveryMethod::Mail => {
                lines.push("送付方法: 郵送".to_string());
                lines.push(format!(
                    "送付先: 〒{} {}",
                    form.postal_code.as_deref().unwrap_or("").trim(),
                    form.address.as_deref().unwrap_or("").trim()
                ));
            }
        }
        if let Some(note) = form.message.as_deref().and_then(non_empty) {
            lines.push(note);
        }

        FormSubmission {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: non_empty(&form.phone),
            company: form.company.as_deref().and_then(non_empty),
            message: lines.join("\n"),
            turnstile_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactForm {
        ContactForm {
            company: "山田工務店".into(),
            name: "山田太郎".into(),
            email: "taro@example.jp".into(),
            phone: "03-1234-5678".into(),
            subject: "新築の相談".into(),
            message: "平屋の新築を検討しています。".into(),
            privacy: true,
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_contact_valid() {
        assert!(contact().validate().is_empty());
    }

    #[test]
    fn test_contact_empty() {
        let errors = ContactForm::default().validate();
        assert_eq!(
            fields(&errors),
            ["company", "name", "email", "phone", "subject", "message", "privacy"]
        );
        assert_eq!(errors[2].message, "メールアドレスを入力してください");
        assert_eq!(errors[5].message, "お問い合わせ内容を入力してください");
    }

    #[test]
    fn test_contact_malformed() {
        let form = ContactForm {
            email: "taro@example".into(),
            phone: "03-1234-abcd".into(),
            message: "短い".into(),
            ..contact()
        };
        let errors = form.validate();
        assert_eq!(fields(&errors), ["email", "phone", "message"]);
        assert_eq!(errors[0].message, "正しいメールアドレスを入力してください");
        assert_eq!(errors[1].message, "正しい電話番号を入力してください");
        assert_eq!(errors[2].message, "お問い合わせ内容は10文字以上で入力してください");
    }

    #[test]
    fn test_message_length_counts_untrimmed_text() {
        let form = ContactForm {
            message: "  123456789 ".into(),
            ..contact()
        };
        assert!(form.validate().is_empty());

        let blank = ContactForm {
            message: " ".repeat(12),
            ..contact()
        };
        let errors = blank.validate();
        assert_eq!(fields(&errors), ["message"]);
        assert_eq!(errors[0].message, "お問い合わせ内容を入力してください");

        let submission = FormSubmission {
            message: "  123456789 ".into(),
            ..FormSubmission::from(&contact())
        };
        assert!(submission.validate().is_empty());
    }

    #[test]
    fn test_document_request_mail_needs_address() {
        let mut form = DocumentRequestForm {
            documents: vec!["catalog".into()],
            name: "佐藤花子".into(),
            email: "hanako@example.com".into(),
            phone: "090-1111-2222".into(),
            delivery_method: DeliveryMethod::Mail,
            postal_code: Some("12-345".into()),
            privacy: true,
            ..Default::default()
        };
        let errors = form.validate();
        assert_eq!(fields(&errors), ["postalCode", "address"]);
        assert_eq!(errors[0].message, "郵便番号を正しく入力してください");

        form.postal_code = Some("1234567".into());
        form.address = Some("東京都千代田区1-1".into());
        assert!(form.validate().is_empty());

        form.delivery_method = DeliveryMethod::Download;
        form.address = None;
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_document_request_empty() {
        let errors = DocumentRequestForm::default().validate();
        assert_eq!(fields(&errors), ["documents", "name", "email", "phone", "privacy"]);
    }

    #[test]
    fn test_submission_validate() {
        let ok = FormSubmission::from(&contact());
        assert!(ok.validate().is_empty());

        let empty = FormSubmission::default();
        assert_eq!(
            empty.validate(),
            [
                "お名前を入力してください。",
                "メールアドレスを入力してください。",
                "お問い合わせ内容を入力してください。",
            ]
        );

        let bad = FormSubmission {
            name: "太郎".into(),
            email: "not-an-email".into(),
            phone: Some("12345".into()),
            message: "短すぎる".into(),
            ..Default::default()
        };
        assert_eq!(
            bad.validate(),
            [
                "有効なメールアドレスを入力してください。",
                "有効な電話番号を入力してください。",
                "お問い合わせ内容は10文字以上で入力してください。",
            ]
        );
    }

    #[test]
    fn test_submission_phone_dash_variants() {
        let form = FormSubmission {
            phone: Some("03ー1234－5678".into()),
            ..FormSubmission::from(&contact())
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_document_request_to_submission() {
        let form = DocumentRequestForm {
            documents: vec!["catalog".into(), "price".into()],
            name: "佐藤".into(),
            email: "s@example.com".into(),
            phone: String::new(),
            delivery_method: DeliveryMethod::Mail,
            postal_code: Some("100-0001".into()),
            address: Some("東京都".into()),
            ..Default::default()
        };
        let sub = FormSubmission::from(&form);
        assert_eq!(sub.phone, None);
        assert!(sub.message.starts_with("資料請求: catalog, price\n送付方法: 郵送"));
        assert!(sub.message.contains("〒100-0001 東京都"));
        assert!(sub.validate().is_empty());
    }
}
