// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{PassphraseVerifier, SessionPolicy};
use crate::config::{GalleryConfig, DEFAULT_ASSETS_DIR};
use crate::error::StartupError;
use crate::gallery::Catalog;

/// Shared, immutable request state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub verifier: PassphraseVerifier,
    pub session: SessionPolicy,
    pub catalog: Arc<Catalog>,
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(verifier: PassphraseVerifier, session: SessionPolicy, catalog: Catalog) -> Self {
        Self {
            verifier,
            session,
            catalog: Arc::new(catalog),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }

    /// Build state from loaded configuration: validates the passphrase hash
    /// and loads the catalog.
    pub fn from_config(config: &GalleryConfig) -> Result<Self, StartupError> {
        let verifier = PassphraseVerifier::new(config.password_hash.clone())?;
        let catalog = Catalog::load(config.catalog_path.as_deref())?;
        Ok(Self::new(verifier, SessionPolicy::from_config(config), catalog)
            .with_assets_dir(config.assets_dir.clone()))
    }

    pub fn with_verifier(mut self, verifier: PassphraseVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn with_assets_dir(mut self, assets_dir: PathBuf) -> Self {
        self.assets_dir = assets_dir;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            PassphraseVerifier::default(),
            SessionPolicy::default(),
            Catalog::builtin(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::passphrase::tests::test_hash;

    #[test]
    fn from_config_validates_hash() {
        let config = GalleryConfig {
            password_hash: Some("not-a-hash".to_string()),
            ..GalleryConfig::default()
        };
        assert!(matches!(
            AppState::from_config(&config),
            Err(StartupError::PasswordHash(_))
        ));
    }

    #[test]
    fn from_config_without_hash_still_starts() {
        let state = AppState::from_config(&GalleryConfig::default()).unwrap();
        assert!(!state.verifier.is_configured());
        assert_eq!(state.catalog.len(), 6);
    }

    #[test]
    fn from_config_carries_session_policy() {
        let config = GalleryConfig {
            password_hash: Some(test_hash("cheese")),
            environment: crate::config::Environment::Production,
            assets_dir: PathBuf::from("/srv/assets"),
            ..GalleryConfig::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert!(state.verifier.is_configured());
        assert!(state.session.secure);
        assert_eq!(state.session.ttl, config.session_ttl);
        assert_eq!(state.assets_dir, PathBuf::from("/srv/assets"));
    }
}
