//! JWT signing and token lifetime configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Interval between revocation registry sweeps, in seconds
    pub sweep_interval: u64,

    /// JWT issuer claim
    pub issuer: String,
}

/// Default access token lifetime: 15 minutes
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;

/// Default refresh token lifetime: 7 days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 604_800;

/// Default revocation sweep interval: 1 hour
pub const DEFAULT_SWEEP_INTERVAL: u64 = 3600;

impl JwtConfig {
    /// Create a new JWT configuration with the given secret and default lifetimes
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            issuer: String::from("courier"),
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// `JWT_SECRET` is required; every other variable falls back to its
    /// default when absent or unparseable.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let secret = std::env::var("JWT_SECRET")?;

        Ok(Self {
            secret,
            access_token_expiry: env_seconds("ACCESS_TOKEN_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY),
            refresh_token_expiry: env_seconds("REFRESH_TOKEN_EXPIRY", DEFAULT_REFRESH_TOKEN_EXPIRY),
            sweep_interval: env_u64("REVOCATION_SWEEP_INTERVAL", DEFAULT_SWEEP_INTERVAL),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "courier".to_string()),
        })
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set refresh token expiry in seconds
    pub fn with_refresh_expiry(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }
}

fn env_seconds(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// Parsed as u64 so a negative value falls back to the default instead
// of wrapping into an interval of billions of seconds.
fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_lifetimes() {
        let config = JwtConfig::new("test-secret");
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604_800);
        assert_eq!(config.sweep_interval, 3600);
    }

    #[test]
    fn negative_sweep_interval_falls_back_to_the_default() {
        std::env::set_var("JWT_SECRET", "test-secret");
        std::env::set_var("REVOCATION_SWEEP_INTERVAL", "-5");

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.sweep_interval, DEFAULT_SWEEP_INTERVAL);

        std::env::remove_var("REVOCATION_SWEEP_INTERVAL");
    }

    #[test]
    fn builder_overrides_lifetimes() {
        let config = JwtConfig::new("test-secret")
            .with_access_expiry(60)
            .with_refresh_expiry(120);
        assert_eq!(config.access_token_expiry, 60);
        assert_eq!(config.refresh_token_expiry, 120);
    }
}
