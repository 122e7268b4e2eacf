// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared passphrase hashing and verification.
//!
//! The passphrase is stored as an Argon2 PHC string, for example
//! `$argon2id$v=19$m=65536,t=3,p=1$<salt>$<digest>`. The algorithm, work
//! factor and salt travel inside the string, so verification recomputes the
//! digest with exactly the parameters the hash was produced with.

use std::sync::Arc;

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, ParamsBuilder, Version,
};
use tracing::{info, warn};

use super::AuthError;

/// Default Argon2id memory cost (64 MiB).
pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
/// Default Argon2id iteration count.
pub const DEFAULT_ITERATIONS: u32 = 3;
/// Default Argon2id lanes.
pub const DEFAULT_PARALLELISM: u32 = 1;

const ARGON2_IDENTS: [&str; 3] = ["argon2id", "argon2i", "argon2d"];

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("stored hash is not an Argon2 PHC string: {0}")]
    MalformedHash(String),
    #[error("invalid Argon2 parameters: {0}")]
    InvalidParams(String),
    #[error("passphrase hashing failed: {0}")]
    Hashing(String),
}

/// Argon2id parameters used when no explicit ones are given.
pub fn default_params() -> Result<Params, HashError> {
    build_params(DEFAULT_MEMORY_KIB, DEFAULT_ITERATIONS, DEFAULT_PARALLELISM)
}

/// Build Argon2 parameters, validating the ranges.
pub fn build_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Params, HashError> {
    ParamsBuilder::new()
        .m_cost(memory_kib)
        .t_cost(iterations)
        .p_cost(parallelism)
        .build()
        .map_err(|err| HashError::InvalidParams(err.to_string()))
}

/// Hash a passphrase with Argon2id and a fresh random salt.
pub fn hash_passphrase(passphrase: &str, params: Params) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(passphrase.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| HashError::Hashing(err.to_string()))
}

/// Check that `stored` is an Argon2 PHC string whose embedded parameters
/// Argon2 accepts.
pub fn validate_hash(stored: &str) -> Result<(), HashError> {
    let parsed = PasswordHash::new(stored).map_err(|err| HashError::MalformedHash(err.to_string()))?;
    if !ARGON2_IDENTS.contains(&parsed.algorithm.as_str()) {
        return Err(HashError::MalformedHash(format!(
            "unsupported algorithm `{}`",
            parsed.algorithm
        )));
    }
    Params::try_from(&parsed).map_err(|err| HashError::InvalidParams(err.to_string()))?;
    Ok(())
}

/// Recompute the digest of `passphrase` under the parameters embedded in
/// `stored` and compare.
///
/// Only a digest mismatch yields `Ok(false)`. Any other failure means the
/// stored hash cannot be checked and is returned as an error.
pub fn passphrase_matches(passphrase: &str, stored: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(stored).map_err(|err| HashError::MalformedHash(err.to_string()))?;
    match Argon2::default().verify_password(passphrase.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(HashError::InvalidParams(err.to_string())),
    }
}

/// The access gate: verifies submitted passphrases against the stored hash.
///
/// Built once at startup from configuration and shared immutably.
#[derive(Clone, Default)]
pub struct PassphraseVerifier {
    stored_hash: Option<Arc<str>>,
}

impl std::fmt::Debug for PassphraseVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassphraseVerifier")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl PassphraseVerifier {
    /// Create a verifier. A present hash must be a valid Argon2 PHC string;
    /// an absent one is accepted and reported per request.
    pub fn new(stored_hash: Option<String>) -> Result<Self, HashError> {
        if let Some(hash) = &stored_hash {
            validate_hash(hash)?;
        }
        Ok(Self {
            stored_hash: stored_hash.map(Arc::from),
        })
    }

    /// Whether a passphrase hash is configured.
    pub fn is_configured(&self) -> bool {
        self.stored_hash.is_some()
    }

    /// Verify a submitted passphrase. `Ok(())` means access is granted and
    /// the caller should issue a session credential.
    ///
    /// Empty input is rejected before the configuration is consulted.
    pub async fn verify(&self, submitted: &str) -> Result<(), AuthError> {
        if submitted.is_empty() {
            return Err(AuthError::MissingPassphrase);
        }

        let stored = self
            .stored_hash
            .clone()
            .ok_or(AuthError::MissingConfiguration)?;

        let submitted = submitted.to_owned();
        let outcome = tokio::task::spawn_blocking(move || passphrase_matches(&submitted, &stored))
            .await
            .map_err(|err| AuthError::Internal(format!("verification task failed: {err}")))?
            .map_err(|err| AuthError::Internal(err.to_string()))?;

        if outcome {
            info!("Passphrase accepted");
            Ok(())
        } else {
            warn!("Passphrase rejected");
            Err(AuthError::InvalidPassphrase)
        }
    }
}
