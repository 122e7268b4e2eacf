// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::state::AppState;

/// Passphrase submission from the landing page.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyRequest {
    /// The shared gallery passphrase.
    #[serde(default)]
    pub passphrase: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub success: bool,
}

/// Check a submitted passphrase and, on success, issue the session cookie.
///
/// A body that is not valid JSON, or lacks a string `passphrase`, is treated
/// the same as an empty submission.
#[utoipa::path(
    post,
    path = "/verify",
    tag = "Access",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Passphrase accepted, session cookie set", body = VerifyResponse),
        (status = 400, description = "Passphrase required", body = crate::auth::AuthErrorBody),
        (status = 401, description = "Invalid passphrase", body = crate::auth::AuthErrorBody),
        (status = 500, description = "Server configuration error", body = crate::auth::AuthErrorBody)
    )
)]
pub async fn verify_passphrase(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<VerifyResponse>), AuthError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable verification request");
            VerifyRequest::default()
        }
    };
    let passphrase = request.passphrase.unwrap_or_default();

    state.verifier.verify(&passphrase).await?;

    Ok((
        jar.add(state.session.issue()),
        Json(VerifyResponse { success: true }),
    ))
}
