use super::claims::{Claims, Permission};
use crate::config::VideoSdkConfig;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Token lifetime out of range: {0:?}")]
    InvalidTtl(Duration),
}

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Signs VideoSDK tokens with the account's secret key
pub struct TokenSigner {
    api_key: String,
    encoding_key: EncodingKey,
    ttl: chrono::Duration,
    permissions: Vec<Permission>,
}

impl TokenSigner {
    pub fn new(
        api_key: impl Into<String>,
        secret_key: &SecretString,
        ttl: Duration,
        permissions: Vec<Permission>,
    ) -> Result<Self, TokenError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|_| TokenError::InvalidTtl(ttl))?;

        Ok(Self {
            api_key: api_key.into(),
            encoding_key: EncodingKey::from_secret(secret_key.expose_secret().as_bytes()),
            ttl,
            permissions,
        })
    }

    pub fn from_config(config: &VideoSdkConfig) -> Result<Self, TokenError> {
        Self::new(
            config.api_key.clone(),
            &config.secret_key,
            config.token_ttl,
            config.permissions.clone(),
        )
    }

    /// Sign a token issued now
    pub fn issue(&self) -> Result<IssuedToken, TokenError> {
        self.issue_at(Utc::now())
    }

    /// Sign a token as if issued at `issued_at`
    pub fn issue_at(&self, issued_at: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let claims = Claims {
            apikey: self.api_key.clone(),
            permissions: self.permissions.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        debug!(exp = claims.exp, "Issued VideoSDK token");

        Ok(IssuedToken { token, claims })
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signer() -> TokenSigner {
        TokenSigner::new(
            "test-api-key",
            &SecretString::from("test-secret"),
            Duration::from_secs(1800),
            vec![Permission::AllowJoin, Permission::AllowMod],
        )
        .unwrap()
    }

    #[test]
    fn test_issue_at_sets_expiry_from_ttl() {
        let issued_at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let issued = signer().issue_at(issued_at).unwrap();

        assert_eq!(issued.claims.iat, issued_at.timestamp());
        assert_eq!(issued.claims.exp - issued.claims.iat, 1800);
        assert_eq!(issued.claims.apikey, "test-api-key");
    }

    #[test]
    fn test_token_is_compact_jws() {
        let issued = signer().issue().unwrap();
        assert_eq!(issued.token.split('.').count(), 3);
    }

    #[test]
    fn test_same_instant_is_deterministic() {
        let issued_at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let signer = signer();

        let a = signer.issue_at(issued_at).unwrap();
        let b = signer.issue_at(issued_at).unwrap();
        assert_eq!(a.token, b.token);
    }
}
