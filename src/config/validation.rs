use crate::config::types::Settings;
use crate::ConfigError;
use url::Url;

/// Validates the run settings
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    validate_base_url("api-url", &settings.api_url)?;
    validate_base_url("gist-url", &settings.gist_url)?;

    if settings.workers < 1 || settings.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            settings.workers
        )));
    }

    if settings.per_page < 1 || settings.per_page > 100 {
        return Err(ConfigError::Validation(format!(
            "per-page must be between 1 and 100, got {}",
            settings.per_page
        )));
    }

    if settings.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// Base URLs are joined by string concatenation, so they must end with '/'
fn validate_base_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    if !value.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must end with '/'",
            key, value
        )));
    }

    Ok(())
}
