//! # Service Configuration
//!
//! Read once at startup from environment variables. Every variable has a
//! default suitable for local development; a variable that is set but
//! cannot be parsed is a startup error rather than a silent fallback.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PORT` | `5000` |
//! | `DATABASE_URL` | `sqlite://data/ringboard.sqlite?mode=rwc` |
//! | `VERIFIER_BACKEND` | `external` (`mock` needs the `dev-verifier` feature) |
//! | `VERIFIER_BIN` | `./verify` |
//! | `VERIFIER_WORK_DIR` | `data/tmp` |
//! | `VERIFIER_TIMEOUT_SECS` | `30` |
//! | `MAX_AUTHORS` | `32` |
//! | `CORS_ORIGIN` | `http://localhost:3000` |
//! | `METRICS_ENABLED` | `true` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ringboard_core::DEFAULT_MAX_AUTHORS;
#[cfg(feature = "dev-verifier")]
use ringboard_zkp::MockVerifier;
use ringboard_zkp::{ExternalVerifier, ExternalVerifierConfig, VerifierBackend};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/ringboard.sqlite?mode=rwc";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which verifier the service runs submissions through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierKind {
    External,
    /// Accepts digest proofs anyone can compute. Development builds only.
    #[cfg(feature = "dev-verifier")]
    Mock,
}

impl FromStr for VerifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "external" => Ok(Self::External),
            #[cfg(feature = "dev-verifier")]
            "mock" => Ok(Self::Mock),
            #[cfg(not(feature = "dev-verifier"))]
            "mock" => Err(
                "the mock verifier is only available with the dev-verifier feature".into(),
            ),
            other => Err(format!("expected \"external\" or \"mock\", got {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub verifier_kind: VerifierKind,
    pub verifier: ExternalVerifierConfig,
    pub max_authors: usize,
    pub cors_origin: String,
    pub metrics_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            verifier_kind: VerifierKind::External,
            verifier: ExternalVerifierConfig::default(),
            max_authors: DEFAULT_MAX_AUTHORS,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            metrics_enabled: true,
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timeout_secs: u64 = parse(&lookup, "VERIFIER_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            return Err(invalid("VERIFIER_TIMEOUT_SECS", "0", "must be at least 1"));
        }
        let max_authors: usize = parse(&lookup, "MAX_AUTHORS", DEFAULT_MAX_AUTHORS)?;
        if max_authors == 0 {
            return Err(invalid("MAX_AUTHORS", "0", "must be at least 1"));
        }

        Ok(Self {
            port: parse(&lookup, "PORT", defaults.port)?,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            verifier_kind: parse(&lookup, "VERIFIER_BACKEND", defaults.verifier_kind)?,
            verifier: ExternalVerifierConfig {
                binary: lookup("VERIFIER_BIN")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.verifier.binary),
                work_dir: lookup("VERIFIER_WORK_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.verifier.work_dir),
                timeout: Duration::from_secs(timeout_secs),
            },
            max_authors,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            metrics_enabled: lookup("METRICS_ENABLED")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
        })
    }
}

impl AppConfig {
    /// Build the verifier this configuration selects.
    pub fn verifier_backend(&self) -> VerifierBackend {
        match self.verifier_kind {
            VerifierKind::External => {
                tracing::info!(
                    binary = %self.verifier.binary.display(),
                    timeout_secs = self.verifier.timeout.as_secs(),
                    "using external verifier"
                );
                VerifierBackend::External(ExternalVerifier::new(self.verifier.clone()))
            }
            #[cfg(feature = "dev-verifier")]
            VerifierKind::Mock => {
                tracing::warn!("using mock verifier: proofs are not zero-knowledge");
                VerifierBackend::Mock(MockVerifier::new())
            }
        }
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(name, &raw, &e.to_string())),
    }
}

fn invalid(name: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
