use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_seeds(&config.seeds)?;
    validate_skip_domains(&config.skip_domains)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 || config.request_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 120, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the seed hostname list
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed hostname is required".to_string(),
        ));
    }

    for seed in seeds {
        validate_hostname(seed, "seed")?;
    }

    Ok(())
}

/// Validates the skip-domains list
fn validate_skip_domains(domains: &[String]) -> Result<(), ConfigError> {
    for domain in domains {
        validate_hostname(domain, "skip-domain")?;
    }

    Ok(())
}

/// Validates a single hostname entry: no scheme, no path, no whitespace
fn validate_hostname(value: &str, kind: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{kind} cannot be empty")));
    }

    if value.contains("://") || value.contains('/') {
        return Err(ConfigError::Validation(format!(
            "{kind} must be a bare hostname, got {value}"
        )));
    }

    if value.chars().any(|c| c.is_whitespace()) {
        return Err(ConfigError::Validation(format!(
            "{kind} cannot contain whitespace: {value}"
        )));
    }

    Ok(())
}
