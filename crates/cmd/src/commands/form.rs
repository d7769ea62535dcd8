// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::Result;
use forms::{
    ContactForm, DocumentRequestForm, FieldError, FormSubmission, SubmitResponse, Submitter,
    submit_form, submitter_from_relay_id,
};

use crate::common::{FormKind, SiteContext, read_json};

/// Field-level check of a form JSON file. Returns the failures, empty when valid.
pub fn validate_command<F>(form: FormKind, path: &Path, mut handler: F) -> Result<Vec<FieldError>>
where
    F: FnMut(String),
{
    let errors = match form {
        FormKind::Contact => read_json::<ContactForm>(path)?.validate(),
        FormKind::Documents => read_json::<DocumentRequestForm>(path)?.validate(),
    };

    if errors.is_empty() {
        handler("OK".to_string());
    }
    for error in &errors {
        handler(format!("{}: {}", error.field, error.message));
    }
    Ok(errors)
}

/// Read a submission, optionally from one of the site's form schemas.
///
/// A schema form must pass its own field rules before it is converted.
fn read_submission(
    form: Option<FormKind>,
    path: &Path,
) -> Result<Result<FormSubmission, Vec<FieldError>>> {
    let (submission, errors) = match form {
        None => (read_json::<FormSubmission>(path)?, Vec::new()),
        Some(FormKind::Contact) => {
            let contact: ContactForm = read_json(path)?;
            (FormSubmission::from(&contact), contact.validate())
        }
        Some(FormKind::Documents) => {
            let request: DocumentRequestForm = read_json(path)?;
            (FormSubmission::from(&request), request.validate())
        }
    };
    Ok(if errors.is_empty() {
        Ok(submission)
    } else {
        Err(errors)
    })
}

/// Run the submission pipeline with `submitter` and print the response JSON.
pub async fn submit_with<F>(
    submitter: &dyn Submitter,
    form: Option<FormKind>,
    path: &Path,
    mut handler: F,
) -> Result<SubmitResponse>
where
    F: FnMut(String),
{
    let response = match read_submission(form, path)? {
        Ok(submission) => submit_form(submitter, &submission).await,
        Err(errors) => {
            let errors: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
            SubmitResponse {
                success: false,
                error: errors.first().cloned(),
                errors,
                ..Default::default()
            }
        }
    };
    handler(serde_json::to_string_pretty(&response)?);
    Ok(response)
}

/// Submit through the configured relay, or the mock when none is set.
pub async fn submit_command<F>(
    ctx: &SiteContext,
    form: Option<FormKind>,
    path: &Path,
    handler: F,
) -> Result<SubmitResponse>
where
    F: FnMut(String),
{
    let submitter = submitter_from_relay_id(ctx.config.integrations.form_relay_id.as_deref())?;
    submit_with(submitter.as_ref(), form, path, handler).await
}
