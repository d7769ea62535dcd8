// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    /// The relay answered with an error message meant for the user.
    #[error("{0}")]
    Rejected(String),

    #[error("送信エラー: {0}")]
    Status(reqwest::StatusCode),

    #[error("Form relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Deliberate failure from the mock responder.
    #[error("テスト用エラー: 送信に失敗しました。")]
    Simulated,
}
