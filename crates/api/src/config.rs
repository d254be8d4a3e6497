use std::path::PathBuf;
use std::str::FromStr;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// JSON array file holding characters.
    pub characters_file: PathBuf,
    /// JSON array file holding places.
    pub places_file: PathBuf,
    /// Root directory for uploaded character images.
    pub assets_dir: PathBuf,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CHARACTERS_FILE`      | `data/characters.json`  |
    /// | `PLACES_FILE`          | `data/places.json`      |
    /// | `ASSETS_DIR`           | `assets/images`         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: text("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 3000, "a valid port number")?,
            characters_file: text("CHARACTERS_FILE", "data/characters.json").into(),
            places_file: text("PLACES_FILE", "data/places.json").into(),
            assets_dir: text("ASSETS_DIR", "assets/images").into(),
            request_timeout_secs: parse(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                30,
                "a whole number of seconds",
            )?,
            max_upload_bytes: parse(
                &lookup,
                "MAX_UPLOAD_BYTES",
                10 * 1024 * 1024,
                "a byte count",
            )?,
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            value,
            expected,
        }),
    }
}
