// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Delivery of validated submissions.

use crate::{FormError, FormSubmission};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use rand::Rng;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

/// Public form relay endpoint prefix; the relay id is appended.
pub const RELAY_BASE_URL: &str = "https://formspree.io/f";

/// Route shown after a successful submission.
pub const THANKS_PATH: &str = "/contact/thanks";

const TIMEOUT_SECONDS: u64 = 30;

const ACCEPTED: &str = "お問い合わせを受け付けました。担当者より折り返しご連絡いたします。";
const MOCK_ACCEPTED: &str = "（開発環境）お問い合わせを受け付けました。";
const GENERIC_FAILURE: &str = "送信中にエラーが発生しました。";

/// Something that can deliver a [`FormSubmission`].
///
/// `Ok` carries the acceptance message shown to the visitor.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, data: &FormSubmission) -> Result<String, FormError>;
}

/// POSTs submissions to the hosted form relay.
pub struct RelayClient {
    http_client: reqwest::Client,
    url: String,
}

impl RelayClient {
    pub fn new(relay_id: &str) -> Result<Self, FormError> {
        Self::with_base_url(RELAY_BASE_URL, relay_id)
    }

    /// Client for a relay hosted somewhere other than [`RELAY_BASE_URL`].
    pub fn with_base_url(base_url: &str, relay_id: &str) -> Result<Self, FormError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()?;
        Ok(Self {
            http_client,
            url: format!("{}/{}", base_url.trim_end_matches('/'), relay_id),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn payload(data: &FormSubmission) -> serde_json::Value {
        json!({
            "name": data.name,
            "email": data.email,
            "phone": data.phone.as_deref().unwrap_or(""),
            "company": data.company.as_deref().unwrap_or(""),
            "message": data.message,
            "_subject": format!("お問い合わせ: {}様より", data.name),
            "_replyto": data.email,
            "_captcha": data.turnstile_token,
        })
    }
}

#[async_trait]
impl Submitter for RelayClient {
    async fn submit(&self, data: &FormSubmission) -> Result<String, FormError> {
        debug!("Posting form submission to {}", self.url);
        let response = self
            .http_client
            .post(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&Self::payload(data))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Option<serde_json::Value> = response.json().await.ok();
            let message = body
                .as_ref()
                .and_then(|b| b.get("error"))
                .and_then(|e| e.as_str())
                .map(str::to_string);
            return Err(match message {
                Some(message) => FormError::Rejected(message),
                None => FormError::Status(status),
            });
        }

        // The relay answers JSON; anything else is not an acceptance
        let _: serde_json::Value = response.json().await?;
        info!("Form relay accepted submission ({})", status);
        Ok(ACCEPTED.to_string())
    }
}

/// Stand-in responder for local builds without a relay id.
pub struct MockSubmitter {
    pub delay: Duration,
    /// Probability in `[0, 1]` of a simulated failure
    pub failure_rate: f64,
}

impl Default for MockSubmitter {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
            failure_rate: 0.1,
        }
    }
}

#[async_trait]
impl Submitter for MockSubmitter {
    async fn submit(&self, data: &FormSubmission) -> Result<String, FormError> {
        tokio::time::sleep(self.delay).await;

        let roll: f64 = rand::thread_rng().r#gen();
        if roll < self.failure_rate {
            return Err(FormError::Simulated);
        }

        info!("Mock form submission from {} <{}>", data.name, data.email);
        Ok(MOCK_ACCEPTED.to_string())
    }
}

/// The relay client when `relay_id` is set, otherwise the mock.
pub fn submitter_from_relay_id(relay_id: Option<&str>) -> Result<Box<dyn Submitter>, FormError> {
    match relay_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Ok(Box::new(RelayClient::new(id)?)),
        None => {
            warn!("Form relay id not configured. Using mock submission.");
            Ok(Box::new(MockSubmitter::default()))
        }
    }
}

/// Outcome of [`submit_form`], serialised for the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Where to send the visitor next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Validate, then deliver. Never fails; problems land in the response.
pub async fn submit_form(submitter: &dyn Submitter, data: &FormSubmission) -> SubmitResponse {
    let errors = data.validate();
    if !errors.is_empty() {
        debug!("Submission rejected by validation: {:?}", errors);
        return SubmitResponse {
            success: false,
            error: errors.first().cloned(),
            errors,
            ..Default::default()
        };
    }

    match submitter.submit(data).await {
        Ok(message) => SubmitResponse {
            success: true,
            message: Some(message),
            redirect: Some(THANKS_PATH.to_string()),
            ..Default::default()
        },
        Err(e) => {
            error!("Form submission error: {}", e);
            let text = e.to_string();
            SubmitResponse {
                success: false,
                error: Some(if text.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    text
                }),
                ..Default::default()
            }
        }
    }
}
