// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! A single shared passphrase guards the gallery.
//!
//! ## Auth Flow
//!
//! 1. The landing page posts `{ "passphrase": ... }` to `/verify`
//! 2. The server recomputes the Argon2 digest of the submission using the
//!    parameters embedded in `PASSWORD_HASH` and compares
//! 3. On a match the response sets the `authenticated=true` session cookie
//! 4. The route guard checks that cookie on every request to
//!    `/photographers` and `/photographer/*`, redirecting to `/` without it
//!
//! ## Security
//!
//! - The passphrase only ever exists as a one-way hash in configuration
//! - Failure responses carry fixed, generic messages
//! - The cookie is HttpOnly, SameSite=Strict and Secure in production

pub mod error;
pub mod middleware;
pub mod passphrase;
pub mod session;

pub use error::{AuthError, AuthErrorBody};
pub use middleware::require_session;
pub use passphrase::{HashError, PassphraseVerifier};
pub use session::{SessionPolicy, SessionState};
