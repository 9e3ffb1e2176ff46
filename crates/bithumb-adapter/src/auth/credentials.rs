/*
[INPUT]:  API access key and secret (explicit or from environment)
[OUTPUT]: Immutable credential pair checked before signing
[POS]:    Auth layer - credential storage
[UPDATE]: When credential sources change
*/

use std::fmt;

use crate::http::{BithumbError, Result};

pub const ACCESS_KEY_ENV: &str = "BITHUMB_ACCESS_KEY";
pub const SECRET_KEY_ENV: &str = "BITHUMB_SECRET_KEY";

/// API key pair. Empty strings count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_key: Option<String>,
    secret: Option<String>,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            access_key: non_empty(access_key.into()),
            secret: non_empty(secret.into()),
        }
    }

    /// No credentials; only public operations will succeed
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Read `BITHUMB_ACCESS_KEY` / `BITHUMB_SECRET_KEY`. Missing variables leave the field absent.
    pub fn from_env() -> Self {
        Self {
            access_key: std::env::var(ACCESS_KEY_ENV).ok().and_then(non_empty),
            secret: std::env::var(SECRET_KEY_ENV).ok().and_then(non_empty),
        }
    }

    /// Fill absent fields from `other`
    pub fn or(self, other: Credentials) -> Self {
        Self {
            access_key: self.access_key.or(other.access_key),
            secret: self.secret.or(other.secret),
        }
    }

    pub fn access_key(&self) -> Option<&str> {
        self.access_key.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.access_key.is_some() && self.secret.is_some()
    }

    /// Both halves, or `MissingCredentials` naming the first absent one
    pub fn require(&self) -> Result<(&str, &str)> {
        let access_key = self
            .access_key
            .as_deref()
            .ok_or(BithumbError::MissingCredentials("access key"))?;
        let secret = self
            .secret
            .as_deref()
            .ok_or(BithumbError::MissingCredentials("secret"))?;
        Ok((access_key, secret))
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
