// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::auth::HashError;
use crate::config::ConfigError;
use crate::gallery::CatalogError;
use crate::views;

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("PASSWORD_HASH is unusable: {0}")]
    PasswordHash(#[from] HashError),

    #[error("gallery catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("failed to load TLS certificate or key: {0}")]
    Tls(std::io::Error),

    #[error("server error: {0}")]
    Server(std::io::Error),
}

/// Error rendered as an HTML page.
#[derive(Debug)]
pub struct PageError {
    pub status: StatusCode,
    pub message: String,
}

impl PageError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let page = views::error_page(self.status.as_u16(), &self.message);
        (self.status, Html(page)).into_response()
    }
}
