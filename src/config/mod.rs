mod types;

pub use types::*;

use ratingforge_common::{Error, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {:?}: {e}", path)))?;

    let config = parse_config(&content)
        .map_err(|e| Error::config(format!("Failed to parse config file {:?}: {e}", path)))?;

    validate_config(&config)?;

    Ok(config)
}

/// Parse configuration from a TOML string without validating it
pub fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./ratingforge.toml",
        "~/.config/ratingforge/config.toml",
        "/etc/ratingforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    tracing::info!("No config file found; using defaults (all providers disabled)");
    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let providers = [
        ("tmdb", config.tmdb.enabled, config.tmdb.api_key.as_str()),
        ("imdb", config.imdb.enabled, config.imdb.api_key.as_str()),
        (
            "rotten_tomatoes",
            config.rotten_tomatoes.enabled,
            config.rotten_tomatoes.api_key.as_str(),
        ),
    ];

    for (name, enabled, api_key) in providers {
        if enabled && api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "Provider '{name}' is enabled but has no API key"
            )));
        }
    }

    if config.any_provider_enabled() && config.logger.log_file_path.as_os_str().is_empty() {
        return Err(Error::config(
            "logger.log_file_path is required when a provider is enabled",
        ));
    }

    if config.http.timeout_secs == 0 {
        return Err(Error::config("http.timeout_secs cannot be 0"));
    }

    if config.http.backoff_base_ms > config.http.backoff_max_ms {
        tracing::warn!(
            base = config.http.backoff_base_ms,
            max = config.http.backoff_max_ms,
            "http.backoff_base_ms exceeds backoff_max_ms; every retry waits the maximum"
        );
    }

    Ok(())
}
