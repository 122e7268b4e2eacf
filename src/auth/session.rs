// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session cookie issued after a successful passphrase check.
//!
//! There is no server-side session store. The cookie is the whole credential:
//! clearing it or letting it expire is the only way to sign out.

use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::GalleryConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "authenticated";

/// The only cookie value that counts as authenticated.
pub const SESSION_MARKER: &str = "true";

/// Path prefixes that require a session.
pub const PROTECTED_PREFIXES: [&str; 2] = ["/photographers", "/photographer/"];

/// Where unauthenticated visitors are sent.
pub const ENTRY_PATH: &str = "/";

/// Session state of an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

impl SessionState {
    /// Derive the state from the request cookies alone.
    pub fn from_jar(jar: &CookieJar) -> Self {
        match jar.get(SESSION_COOKIE) {
            Some(cookie) if cookie.value() == SESSION_MARKER => SessionState::Authenticated,
            _ => SessionState::Unauthenticated,
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == SessionState::Authenticated
    }
}

/// Whether `path` falls under one of the protected prefixes.
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Cookie attributes for issued sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Lifetime after which the browser drops the cookie.
    pub ttl: Duration,
    /// Restrict the cookie to HTTPS.
    pub secure: bool,
}

impl SessionPolicy {
    pub fn new(ttl: Duration, secure: bool) -> Self {
        Self { ttl, secure }
    }

    /// Secure cookies are enabled in production.
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(config.session_ttl, config.environment.is_production())
    }

    /// Build the session cookie: HttpOnly, SameSite=Strict, fixed Max-Age.
    pub fn issue(&self) -> Cookie<'static> {
        let max_age = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        Cookie::build((SESSION_COOKIE, SESSION_MARKER))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(cookie::time::Duration::seconds(max_age))
            .build()
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}
