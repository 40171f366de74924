//! Configuration validation.
//!
//! Checks run in a fixed order (URL, index name, message, credentials) and
//! stop at the first failure, so the error always names the earliest missing
//! setting.

use thiserror::Error;

use crate::config::schema::ElasticLogConfig;

/// A required middleware setting is missing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("missing Elasticsearch URL")]
    MissingUrl,

    #[error("missing Elasticsearch index name")]
    MissingIndexName,

    #[error("missing Elasticsearch message")]
    MissingMessage,

    /// Neither an API key nor a complete username/password pair was given.
    #[error("missing Elasticsearch credentials")]
    MissingCredentials,
}

/// Validate a middleware configuration.
pub fn validate_config(config: &ElasticLogConfig) -> Result<(), ConfigurationError> {
    if config.elasticsearch_url.is_empty() {
        return Err(ConfigurationError::MissingUrl);
    }
    if config.index_name.is_empty() {
        return Err(ConfigurationError::MissingIndexName);
    }
    if config.message.is_empty() {
        return Err(ConfigurationError::MissingMessage);
    }
    if config.api_key.is_empty() && (config.username.is_empty() || config.password.is_empty()) {
        return Err(ConfigurationError::MissingCredentials);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ElasticLogConfig {
        ElasticLogConfig {
            elasticsearch_url: "http://localhost:9200".into(),
            index_name: "test-index".into(),
            message: "Test Elasticsearch".into(),
            username: "elastic".into(),
            password: "elastic".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_basic_auth() {
        assert_eq!(validate_config(&valid()), Ok(()));
    }

    #[test]
    fn test_missing_url() {
        let config = ElasticLogConfig {
            elasticsearch_url: String::new(),
            ..valid()
        };
        assert_eq!(validate_config(&config), Err(ConfigurationError::MissingUrl));
    }

    #[test]
    fn test_missing_index_name() {
        let config = ElasticLogConfig {
            index_name: String::new(),
            ..valid()
        };
        assert_eq!(
            validate_config(&config),
            Err(ConfigurationError::MissingIndexName)
        );
    }

    #[test]
    fn test_missing_message() {
        let config = ElasticLogConfig {
            message: String::new(),
            ..valid()
        };
        assert_eq!(
            validate_config(&config),
            Err(ConfigurationError::MissingMessage)
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let config = ElasticLogConfig {
            elasticsearch_url: String::new(),
            message: String::new(),
            username: String::new(),
            ..valid()
        };
        assert_eq!(validate_config(&config), Err(ConfigurationError::MissingUrl));
    }

    #[test]
    fn test_incomplete_basic_auth() {
        let config = ElasticLogConfig {
            password: String::new(),
            ..valid()
        };
        assert_eq!(
            validate_config(&config),
            Err(ConfigurationError::MissingCredentials)
        );

        let config = ElasticLogConfig {
            username: String::new(),
            ..valid()
        };
        assert_eq!(
            validate_config(&config),
            Err(ConfigurationError::MissingCredentials)
        );
    }

    #[test]
    fn test_api_key_alone_is_enough() {
        let config = ElasticLogConfig {
            api_key: "k".into(),
            username: String::new(),
            password: String::new(),
            ..valid()
        };
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigurationError::MissingCredentials.to_string(),
            "missing Elasticsearch credentials"
        );
        assert_eq!(
            ConfigurationError::MissingUrl.to_string(),
            "missing Elasticsearch URL"
        );
    }
}
