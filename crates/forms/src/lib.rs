// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! # Forms — contact and document-request handling
//!
//! Two layers:
//!
//! - [`validation`]: field-level checks on the contact and
//!   document-request forms, plus the relay-level check on the
//!   flattened [`FormSubmission`]
//! - [`relay`]: the [`Submitter`] seam, with a real form relay client
//!   and an in-process mock used when no relay is configured
//!
//! [`submit_form`] ties them together and always answers with a
//! [`SubmitResponse`].

mod error;
pub mod relay;
pub mod validation;

pub use error::FormError;
pub use relay::{
    MockSubmitter, RelayClient, SubmitResponse, Submitter, THANKS_PATH, submit_form,
    submitter_from_relay_id,
};
pub use validation::{
    ContactForm, DeliveryMethod, DocumentRequestForm, FieldError, FormSubmission,
};
