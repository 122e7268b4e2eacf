// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! [`GalleryConfig`] loaded from them at startup. A `.env` file in the working
//! directory is read first (see `main.rs`), real environment variables win.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PASSWORD_HASH` | Argon2 PHC hash of the shared passphrase | Unset (verification answers 500) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `APP_ENV` | `production` marks session cookies `Secure` | `development` |
//! | `SESSION_TTL_HOURS` | Lifetime of the session cookie | `168` (7 days) |
//! | `ASSETS_DIR` | Directory served under `/assets` | `public/assets` |
//! | `GALLERY_CATALOG` | JSON file with photographer entries | Built-in catalog |
//! | `TLS_CERT_PATH` | PEM certificate chain, enables HTTPS | Optional |
//! | `TLS_KEY_PATH` | PEM private key, enables HTTPS | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the Argon2 hash of the gallery passphrase.
///
/// Produce it with the `hash-passphrase` binary. The plaintext passphrase is
/// never read from the environment.
pub const PASSWORD_HASH_ENV: &str = "PASSWORD_HASH";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const APP_ENV_ENV: &str = "APP_ENV";
pub const SESSION_TTL_HOURS_ENV: &str = "SESSION_TTL_HOURS";
pub const ASSETS_DIR_ENV: &str = "ASSETS_DIR";
pub const GALLERY_CATALOG_ENV: &str = "GALLERY_CATALOG";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Default session lifetime: 7 days.
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24 * 7;

pub const DEFAULT_ASSETS_DIR: &str = "public/assets";

/// Default tracing filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse `APP_ENV` (case-insensitive). Anything but `production`/`prod`
    /// is treated as development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Certificate and key locations for HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),

    #[error("SESSION_TTL_HOURS must be a positive whole number of hours, got {0:?}")]
    InvalidSessionTtl(String),

    #[error("HTTPS needs both TLS_CERT_PATH and TLS_KEY_PATH to be set")]
    IncompleteTls,

    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),
}

/// Process-wide configuration, loaded once and passed explicitly to the
/// components that need it.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Stored one-way hash of the passphrase, if configured.
    pub password_hash: Option<String>,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub session_ttl: Duration,
    pub assets_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            password_hash: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::Development,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            catalog_path: None,
            tls: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl GalleryConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();

        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let session_ttl = match get(SESSION_TTL_HOURS_ENV) {
            Some(raw) => match raw.parse::<u64>().ok().filter(|hours| *hours > 0) {
                Some(hours) => hours
                    .checked_mul(3600)
                    .map(Duration::from_secs)
                    .ok_or(ConfigError::InvalidSessionTtl(raw))?,
                None => return Err(ConfigError::InvalidSessionTtl(raw)),
            },
            None => defaults.session_ttl,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: PathBuf::from(cert),
                key: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        Ok(Self {
            password_hash: get(PASSWORD_HASH_ENV),
            host: get(HOST_ENV).unwrap_or(defaults.host),
            port,
            environment: get(APP_ENV_ENV)
                .map(|value| Environment::parse(&value))
                .unwrap_or_default(),
            session_ttl,
            assets_dir: get(ASSETS_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.assets_dir),
            catalog_path: get(GALLERY_CATALOG_ENV).map(PathBuf::from),
            tls,
            log_format: get(LOG_FORMAT_ENV)
                .map(|value| LogFormat::parse(&value))
                .unwrap_or_default(),
        })
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ConfigError::InvalidBindAddress(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<GalleryConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GalleryConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = load(&[]).unwrap();
        assert!(config.password_hash.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.session_ttl, Duration::from_secs(7 * 24 * 3600));
        assert_eq!(config.assets_dir, PathBuf::from(DEFAULT_ASSETS_DIR));
        assert!(config.tls.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_all_variables() {
        let config = load(&[
            (PASSWORD_HASH_ENV, "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaA"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "3000"),
            (APP_ENV_ENV, "Production"),
            (SESSION_TTL_HOURS_ENV, "24"),
            (ASSETS_DIR_ENV, "/srv/assets"),
            (GALLERY_CATALOG_ENV, "/srv/catalog.json"),
            (TLS_CERT_PATH_ENV, "/tls/cert.pem"),
            (TLS_KEY_PATH_ENV, "/tls/key.pem"),
            (LOG_FORMAT_ENV, "json"),
        ])
        .unwrap();

        assert!(config.password_hash.as_deref().unwrap().starts_with("$argon2id$"));
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert!(config.environment.is_production());
        assert_eq!(config.session_ttl, Duration::from_secs(24 * 3600));
        assert_eq!(config.assets_dir, PathBuf::from("/srv/assets"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/catalog.json")));
        assert_eq!(
            config.tls,
            Some(TlsPaths {
                cert: PathBuf::from("/tls/cert.pem"),
                key: PathBuf::from("/tls/key.pem"),
            })
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_password_hash_counts_as_unset() {
        let config = load(&[(PASSWORD_HASH_ENV, "   ")]).unwrap();
        assert!(config.password_hash.is_none());
    }

    #[test]
    fn rejects_bad_port() {
        assert!(matches!(
            load(&[(PORT_ENV, "eighty")]),
            Err(ConfigError::InvalidPort(_))
        ));
    }

    #[test]
    fn rejects_zero_session_ttl() {
        assert!(matches!(
            load(&[(SESSION_TTL_HOURS_ENV, "0")]),
            Err(ConfigError::InvalidSessionTtl(_))
        ));
    }

    #[test]
    fn rejects_overflowing_session_ttl() {
        assert!(matches!(
            load(&[(SESSION_TTL_HOURS_ENV, "6000000000000000")]),
            Err(ConfigError::InvalidSessionTtl(_))
        ));
    }

    #[test]
    fn rejects_half_configured_tls() {
        assert!(matches!(
            load(&[(TLS_CERT_PATH_ENV, "/tls/cert.pem")]),
            Err(ConfigError::IncompleteTls)
        ));
    }

    #[test]
    fn unknown_environment_is_development() {
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert_eq!(Environment::parse("prod"), Environment::Production);
    }
}
