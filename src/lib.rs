// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Grace Gallery - Passphrase-Gated Photography Gallery
//!
//! A small web server that keeps a set of photographer galleries behind a
//! single shared passphrase.
//!
//! ## Modules
//!
//! - `api` - HTTP routes and handlers (Axum)
//! - `auth` - Passphrase verification, session cookie and route guard
//! - `gallery` - Photographer catalog
//! - `views` - Server-rendered HTML pages
//! - `ambient` - Confetti animation loop and background music state

pub mod ambient;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod state;
pub mod views;
