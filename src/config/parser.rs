use crate::config::types::{Config, Job};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
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
///
/// # Example
///
/// ```
/// use douyu_playlist::config::parse_config;
///
/// let config = parse_config(r#"
/// [[job]]
/// url = "https://www.douyu.com/directory/subCate/yqk/290"
/// category = "陪看"
/// "#).unwrap();
/// assert_eq!(config.jobs[0].category, "陪看");
/// assert_eq!(config.fetch.timeout_secs, 10);
/// ```
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Fingerprints the resolved job list as hex-encoded SHA-256
///
/// Only the jobs contribute, in order, so a run from the built-in list and
/// one from a file listing the same pages share a fingerprint, while a
/// change to fetch or output settings does not alter it.
///
/// ```
/// use douyu_playlist::config::{job_list_fingerprint, Config};
///
/// let fingerprint = job_list_fingerprint(&Config::default().jobs);
/// assert_eq!(fingerprint.len(), 64);
/// ```
pub fn job_list_fingerprint(jobs: &[Job]) -> String {
    let mut hasher = Sha256::new();
    for job in jobs {
        hasher.update(job.category.as_bytes());
        hasher.update(b"\t");
        hasher.update(job.url.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}
