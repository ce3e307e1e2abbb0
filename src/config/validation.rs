use crate::config::types::{Config, ExtractorConfig, FetchConfig, Job, OutputConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_extractor_config(&config.extractor)?;
    validate_output_config(&config.output)?;
    validate_jobs(&config.jobs)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 120, got {}",
            config.timeout_secs
        )));
    }

    if config.launch_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "launch_delay_ms must be <= 60000ms, got {}ms",
            config.launch_delay_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the stream card markers
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    validate_selector(&config.card_selector)?;
    validate_selector(&config.title_selector)?;

    if config.title_attribute.is_empty() {
        return Err(ConfigError::Validation(
            "title_attribute cannot be empty".to_string(),
        ));
    }

    if config.link_attribute.is_empty() {
        return Err(ConfigError::Validation(
            "link_attribute cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation("path cannot be empty".to_string()));
    }

    if config.relay_template.is_empty() {
        return Err(ConfigError::Validation(
            "relay_template cannot be empty".to_string(),
        ));
    }

    Url::parse(&config.relay_template).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid relay_template '{}': {}",
            config.relay_template, e
        ))
    })?;

    Ok(())
}

/// Validates the job list
fn validate_jobs(jobs: &[Job]) -> Result<(), ConfigError> {
    if jobs.is_empty() {
        return Err(ConfigError::Validation(
            "at least one job must be configured".to_string(),
        ));
    }

    for job in jobs {
        if job.category.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Job '{}' must have a non-empty category",
                job.url
            )));
        }

        let url = Url::parse(&job.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid job URL '{}': {}", job.url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Job URL '{}' must use HTTP or HTTPS scheme",
                job.url
            )));
        }
    }

    Ok(())
}
