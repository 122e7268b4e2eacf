// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Route guard middleware for Axum.
//!
//! Layered over the whole router; only paths under
//! [`PROTECTED_PREFIXES`](super::session::PROTECTED_PREFIXES) are inspected.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/photographers", get(photographers))
//!     .layer(axum::middleware::from_fn(require_session));
//! ```

use axum::{
    extract::Request,
    http::{header::LOCATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use super::session::{is_protected, SessionState, ENTRY_PATH};

/// Redirect unauthenticated requests for protected paths to the entry page.
///
/// Authenticated requests and unprotected paths pass through unmodified.
pub async fn require_session(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if !is_protected(path) {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    match SessionState::from_jar(&jar) {
        SessionState::Authenticated => next.run(request).await,
        SessionState::Unauthenticated => {
            debug!(path = %path, "No session, redirecting to entry page");
            redirect_to_entry()
        }
    }
}

/// `302 Found` pointing at the entry page.
pub fn redirect_to_entry() -> Response {
    (StatusCode::FOUND, [(LOCATION, ENTRY_PATH)]).into_response()
}
