use crate::token::Permission;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Prefix for environment overrides, e.g. `RELAY__VIDEOSDK__SECRET_KEY`.
pub const ENV_PREFIX: &str = "RELAY";

pub const DEFAULT_API_ENDPOINT: &str = "https://api.videosdk.live";

/// Tokens expire 30 minutes after issuance.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 60;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub struct Config {
    pub service: ServiceConfig,
    pub videosdk: VideoSdkConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Credentials and upstream settings for the VideoSDK REST API.
///
/// The secret is only reachable through `ExposeSecret` and prints as
/// redacted in `Debug` output.
#[derive(Debug)]
pub struct VideoSdkConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub secret_key: SecretString,
    pub token_ttl: Duration,
    pub permissions: Vec<Permission>,
    pub request_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

// Shape of the settings as they come out of the `config` layers, before
// credentials are validated and wrapped.
#[derive(Deserialize)]
struct RawConfig {
    service: ServiceConfig,
    videosdk: RawVideoSdkConfig,
}

#[derive(Deserialize)]
struct RawVideoSdkConfig {
    api_endpoint: String,
    api_key: Option<String>,
    secret_key: Option<String>,
    token_ttl_secs: u64,
    permissions: Vec<Permission>,
    request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from an optional file at `path` (extension
    /// inferred) layered under `RELAY__*` environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            );

        Self::from_builder(builder)
    }

    /// Load configuration from TOML text layered over the defaults only.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let builder = Self::defaults()?.add_source(File::from_str(contents, FileFormat::Toml));

        Self::from_builder(builder)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = config::Config::builder()
            .set_default("service.name", "videosdk-relay")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 9000)?
            .set_default("videosdk.api_endpoint", DEFAULT_API_ENDPOINT)?
            .set_default("videosdk.token_ttl_secs", DEFAULT_TOKEN_TTL_SECS as i64)?
            .set_default("videosdk.permissions", vec!["allow_join", "allow_mod"])?
            .set_default(
                "videosdk.request_timeout_secs",
                DEFAULT_REQUEST_TIMEOUT_SECS as i64,
            )?;

        Ok(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let raw: RawConfig = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        Ok(Self {
            service: raw.service,
            videosdk: VideoSdkConfig::try_from(raw.videosdk)?,
        })
    }
}

impl TryFrom<RawVideoSdkConfig> for VideoSdkConfig {
    type Error = ConfigError;

    fn try_from(raw: RawVideoSdkConfig) -> Result<Self, Self::Error> {
        let api_key = required(raw.api_key, "videosdk.api_key")?;
        let secret_key = required(raw.secret_key, "videosdk.secret_key")?;

        if raw.token_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "videosdk.token_ttl_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        if raw.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "videosdk.request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        if raw.permissions.is_empty() {
            return Err(ConfigError::Invalid {
                key: "videosdk.permissions",
                reason: "at least one permission is required".to_string(),
            });
        }

        Ok(Self {
            api_endpoint: raw.api_endpoint,
            api_key,
            secret_key: SecretString::from(secret_key),
            token_ttl: Duration::from_secs(raw.token_ttl_secs),
            permissions: raw.permissions,
            request_timeout: Duration::from_secs(raw.request_timeout_secs),
        })
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawVideoSdkConfig {
        RawVideoSdkConfig {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            api_key: Some("key".to_string()),
            secret_key: Some("secret".to_string()),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            permissions: vec![Permission::AllowJoin, Permission::AllowMod],
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    #[test]
    fn test_blank_secret_is_missing() {
        let mut cfg = raw();
        cfg.secret_key = Some("   ".to_string());

        let err = VideoSdkConfig::try_from(cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("videosdk.secret_key")));
    }

    #[test]
    fn test_absent_api_key_is_missing() {
        let mut cfg = raw();
        cfg.api_key = None;

        let err = VideoSdkConfig::try_from(cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("videosdk.api_key")));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut cfg = raw();
        cfg.token_ttl_secs = 0;

        let err = VideoSdkConfig::try_from(cfg).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "videosdk.token_ttl_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let mut cfg = raw();
        cfg.request_timeout_secs = 0;

        let err = VideoSdkConfig::try_from(cfg).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "videosdk.request_timeout_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_permissions_rejected() {
        let mut cfg = raw();
        cfg.permissions.clear();

        assert!(VideoSdkConfig::try_from(cfg).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cfg = VideoSdkConfig::try_from(raw()).unwrap();
        let printed = format!("{:?}", cfg);

        assert!(!printed.contains("secret\""));
        assert!(printed.contains("REDACTED"));
    }
}
