use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Values supplied on the command line, which take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed_url: String,
    pub max_concurrency: usize,
    pub max_pages: usize,
    pub report_path: Option<String>,
}

/// Loads and parses a configuration file from the given path
///
/// Missing sections and keys fall back to their defaults. The result is not
/// validated yet: the seed URL usually arrives later from the command line.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(ConfigError)` - Failed to read or parse the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use pagecrawl::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Timeout: {}s", config.crawler.request_timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Builds the effective configuration for a run
///
/// Starts from the file at `path` (or the defaults when `None`), applies the
/// command line overrides and validates the result.
pub fn resolve_config(path: Option<&Path>, overrides: CliOverrides) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    config.crawler.seed_url = overrides.seed_url;
    config.crawler.max_concurrency = overrides.max_concurrency;
    config.crawler.max_pages = overrides.max_pages;
    if let Some(report_path) = overrides.report_path {
        config.output.report_path = report_path;
    }

    validate(&config)?;

    Ok(config)
}
