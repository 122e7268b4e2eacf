// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Produce (or check) the `PASSWORD_HASH` value for the gallery.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use dialoguer::Password;

use grace_gallery::auth::passphrase::{
    build_params, hash_passphrase, passphrase_matches, HashError, DEFAULT_ITERATIONS,
    DEFAULT_MEMORY_KIB, DEFAULT_PARALLELISM,
};
use grace_gallery::config::PASSWORD_HASH_ENV;

#[derive(Parser)]
#[command(
    name = "hash-passphrase",
    about = "Hash the shared gallery passphrase for PASSWORD_HASH"
)]
struct Cli {
    /// Passphrase to hash. Prompted for (hidden) when omitted.
    passphrase: Option<String>,

    /// Argon2 memory cost in KiB
    #[arg(long, default_value_t = DEFAULT_MEMORY_KIB)]
    memory_kib: u32,

    /// Argon2 iteration count
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,

    /// Argon2 lanes
    #[arg(long, default_value_t = DEFAULT_PARALLELISM)]
    parallelism: u32,

    /// Check a passphrase against an existing hash instead of hashing it
    #[arg(long)]
    check: bool,

    /// Hash to check against (with --check)
    #[arg(long, env = PASSWORD_HASH_ENV, hide_env_values = true)]
    hash: Option<String>,

    /// Env file consulted for PASSWORD_HASH when --hash is not given
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("passphrase must not be empty")]
    EmptyPassphrase,

    #[error("no hash to check against: pass --hash, set {PASSWORD_HASH_ENV} or add it to {0}")]
    NoHash(String),

    #[error("failed to read passphrase: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to read {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error(transparent)]
    Hash(#[from] HashError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome = if cli.check { check(&cli) } else { hash(&cli) };
    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("hash-passphrase: {err}");
            ExitCode::FAILURE
        }
    }
}

fn hash(cli: &Cli) -> Result<ExitCode, CliError> {
    let passphrase = read_passphrase(cli.passphrase.as_deref(), true)?;
    let params = build_params(cli.memory_kib, cli.iterations, cli.parallelism)?;
    let hash = hash_passphrase(&passphrase, params)?;

    if !passphrase_matches(&passphrase, &hash)? {
        eprintln!("hash-passphrase: generated hash failed self-check");
        return Ok(ExitCode::FAILURE);
    }

    println!("{PASSWORD_HASH_ENV}={hash}");
    Ok(ExitCode::SUCCESS)
}

fn check(cli: &Cli) -> Result<ExitCode, CliError> {
    let stored = match &cli.hash {
        Some(hash) if !hash.trim().is_empty() => hash.trim().to_string(),
        _ => env_file_hash(&cli.env_file)?
            .ok_or_else(|| CliError::NoHash(cli.env_file.display().to_string()))?,
    };
    let passphrase = read_passphrase(cli.passphrase.as_deref(), false)?;

    if passphrase_matches(&passphrase, &stored)? {
        println!("match");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("no match");
        Ok(ExitCode::FAILURE)
    }
}

fn read_passphrase(given: Option<&str>, confirm: bool) -> Result<String, CliError> {
    let passphrase = match given {
        Some(passphrase) => passphrase.to_string(),
        None => {
            let prompt = Password::new().with_prompt("Gallery passphrase");
            let prompt = if confirm {
                prompt.with_confirmation("Repeat passphrase", "Passphrases do not match")
            } else {
                prompt
            };
            prompt.interact()?
        }
    };

    if passphrase.is_empty() {
        return Err(CliError::EmptyPassphrase);
    }
    Ok(passphrase)
}

fn env_file_hash(path: &Path) -> Result<Option<String>, CliError> {
    if !path.exists() {
        return Ok(None);
    }

    let env_error = |source| CliError::EnvFile {
        path: path.display().to_string(),
        source,
    };
    for entry in dotenvy::from_path_iter(path).map_err(env_error)? {
        let (key, value) = entry.map_err(env_error)?;
        if key == PASSWORD_HASH_ENV && !value.trim().is_empty() {
            return Ok(Some(value.trim().to_string()));
        }
    }

    Ok(None)
}
