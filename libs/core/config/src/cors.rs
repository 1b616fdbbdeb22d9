use crate::{ConfigError, FromEnv, env_or_default};

/// Cross-origin settings for browser clients. Exactly one origin is allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl CorsConfig {
    pub const DEFAULT_ORIGIN: &'static str = "http://localhost:3000";

    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ORIGIN)
    }
}

impl FromEnv for CorsConfig {
    /// - CORS_ALLOWED_ORIGIN: defaults to http://localhost:3000
    fn from_env() -> Result<Self, ConfigError> {
        let origin = env_or_default("CORS_ALLOWED_ORIGIN", Self::DEFAULT_ORIGIN);
        let origin = origin.trim().trim_end_matches('/');
        if origin.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "origin must not be empty".to_string(),
            });
        }
        Ok(Self::new(origin))
    }
}
