//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ElasticLogConfig, HostConfig};
use crate::config::validation::{validate_config, ConfigurationError};

/// Environment variables that override `[elastic]` settings.
pub const ENV_ELASTICSEARCH_URL: &str = "ELASTICSEARCH_URL";
pub const ENV_INDEX_NAME: &str = "INDEX_NAME";
pub const ENV_API_KEY: &str = "ELASTIC_API_KEY";
pub const ENV_USERNAME: &str = "ELASTIC_USERNAME";
pub const ENV_PASSWORD: &str = "ELASTIC_PASSWORD";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Load, override from the process environment, and validate a TOML file.
pub fn load_config(path: &Path) -> Result<HostConfig, LoadError> {
    let content = fs::read_to_string(path)?;
    let mut config: HostConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config.elastic, |key| std::env::var(key).ok());
    validate_config(&config.elastic)?;

    Ok(config)
}

/// Overwrite settings with non-empty values returned by `lookup`.
///
/// Takes the lookup as a closure so callers (and tests) are not tied to the
/// process environment.
pub fn apply_env_overrides<F>(config: &mut ElasticLogConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let targets: [(&str, &mut String); 5] = [
        (ENV_ELASTICSEARCH_URL, &mut config.elasticsearch_url),
        (ENV_INDEX_NAME, &mut config.index_name),
        (ENV_API_KEY, &mut config.api_key),
        (ENV_USERNAME, &mut config.username),
        (ENV_PASSWORD, &mut config.password),
    ];

    for (key, field) in targets {
        if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
            tracing::debug!(variable = key, "Configuration overridden from environment");
            *field = value;
        }
    }
}
