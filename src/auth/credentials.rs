use crate::error::Error;
use std::env;

/// Credential key holding the dynv6 HTTP API token.
pub const DYNV6_TOKEN_KEY: &str = "dynv6_token";

#[cfg_attr(test, mockall::automock)]
pub trait CredentialManager: Send + Sync {
    fn get(&self, key: &str) -> Result<String, Error>;
}

/// Environment-based credential provider
pub struct EnvCredentialManager;

impl EnvCredentialManager {
    fn var_for(key: &str) -> Option<&'static str> {
        match key {
            DYNV6_TOKEN_KEY => Some("DYNV6_TOKEN"),
            _ => None,
        }
    }
}

impl CredentialManager for EnvCredentialManager {
    fn get(&self, key: &str) -> Result<String, Error> {
        let Some(var) = Self::var_for(key) else {
            return Err(Error::CredentialError(format!("Unknown key: {key}")));
        };
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            Ok(_) => Err(Error::CredentialError(format!("{var} is empty"))),
            Err(e) => Err(Error::CredentialError(format!("{var}: {e}"))),
        }
    }
}
