use crate::config::types::{Config, CrawlerConfig, HttpConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates worker pool configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.threaded_workers < 1 || config.threaded_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "threaded_workers must be between 1 and 100, got {}",
            config.threaded_workers
        )));
    }

    if config.dequeue_timeout_ms < 10 {
        return Err(ConfigError::Validation(format!(
            "dequeue_timeout_ms must be >= 10ms, got {}ms",
            config.dequeue_timeout_ms
        )));
    }

    Ok(())
}

/// Validates HTTP fetcher configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_ms must be >= 1ms".to_string(),
        ));
    }

    if config.connect_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_ms must be >= 1ms".to_string(),
        ));
    }

    Ok(())
}
