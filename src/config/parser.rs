use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated settings
/// * `Err(ConfigError)` - Failed to load, parse, or validate the settings
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use gistwatcher::config::load_settings;
///
/// let settings = load_settings(Path::new("gistwatcher.toml")).unwrap();
/// println!("Workers: {}", settings.workers);
/// ```
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Loads settings from `path` when given, otherwise validated defaults
pub fn load_settings_or_default(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => load_settings(path),
        None => {
            let settings = Settings::default();
            validate(&settings)?;
            Ok(settings)
        }
    }
}
