// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Passphrase verification errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of a failed passphrase verification.
///
/// Messages sent to the client are fixed and generic. Details attached to
/// [`AuthError::Internal`] are only ever written to the server log.
#[derive(Debug)]
pub enum AuthError {
    /// No passphrase (or an empty one) was submitted
    MissingPassphrase,
    /// The passphrase does not match the stored hash
    InvalidPassphrase,
    /// No passphrase hash is configured
    MissingConfiguration,
    /// Anything else that went wrong while verifying
    Internal(String),
}

/// JSON body of a failed verification.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthErrorBody {
    /// Human-readable, generic message.
    pub error: String,
    /// Stable machine-readable code.
    pub error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingPassphrase => "passphrase_required",
            AuthError::InvalidPassphrase => "invalid_passphrase",
            AuthError::MissingConfiguration => "server_configuration_error",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingPassphrase => StatusCode::BAD_REQUEST,
            AuthError::InvalidPassphrase => StatusCode::UNAUTHORIZED,
            AuthError::MissingConfiguration | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingPassphrase => write!(f, "Passphrase required"),
            AuthError::InvalidPassphrase => write!(f, "Invalid passphrase"),
            AuthError::MissingConfiguration => write!(f, "Server configuration error"),
            AuthError::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::MissingConfiguration => {
                tracing::error!("Passphrase hash is not configured (set PASSWORD_HASH)");
            }
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "Passphrase verification failed unexpectedly");
            }
            _ => {}
        }

        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
