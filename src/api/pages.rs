// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTML page handlers. Access to the gallery pages is enforced by the
//! session guard layered over the router, not here.

use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::ambient::{ConfettiField, Viewport};
use crate::error::PageError;
use crate::state::AppState;
use crate::views;

pub async fn landing() -> Html<String> {
    Html(views::landing_page())
}

pub async fn photographers(State(state): State<AppState>) -> Html<String> {
    let confetti = seed_confetti();
    Html(views::photographers_page(&state.catalog, &confetti))
}

pub async fn photographer_gallery(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let entry = state
        .catalog
        .find(&slug)
        .ok_or_else(|| PageError::not_found("Photographer not found"))?;
    let confetti = seed_confetti();
    Ok(Html(views::gallery_page(entry, &confetti)))
}

pub async fn not_found() -> PageError {
    PageError::not_found("Page not found")
}

/// Initial particle layout; the page script animates it from there.
fn seed_confetti() -> ConfettiField {
    ConfettiField::seeded(Viewport::default(), &mut rand::thread_rng())
}
