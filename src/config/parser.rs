use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrainPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
threaded-workers = 4
dequeue-timeout-ms = 250
drain = "quiescent"

[http]
user-agent = "TestCrawler/1.0"
request-timeout-ms = 5000
connect-timeout-ms = 2000
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.threaded_workers, 4);
        assert_eq!(config.crawler.dequeue_timeout_ms, 250);
        assert_eq!(config.crawler.drain, DrainPolicy::Quiescent);
        assert_eq!(config.http.user_agent, "TestCrawler/1.0");
        assert_eq!(config.http.request_timeout_ms, 5000);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = create_temp_config("[http]\nuser-agent = \"Bot\"\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.threaded_workers, 10);
        assert_eq!(config.crawler.dequeue_timeout_ms, 1000);
        assert_eq!(config.crawler.drain, DrainPolicy::IdleTimeout);
        assert_eq!(config.http.user_agent, "Bot");
        assert_eq!(config.http.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.crawler.threaded_workers, 10);
        assert!(config.http.user_agent.starts_with("site-crawler/"));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/crawler.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_drain_policy_rejected() {
        let result = parse_config("[crawler]\ndrain = \"whenever\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nthreaded-workers = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
