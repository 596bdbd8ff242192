//! Configuration management for the HTTP helpers.
//!
//! Configuration is read from the `"fetch-utils"` key of a settings JSON value,
//! merged with defaults and kept in a process-wide singleton. The helpers take
//! a snapshot of it for each request.

pub mod schema;

pub use schema::{ConfigError, FetchConfig};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Key under which settings are looked up.
pub const SETTINGS_KEY: &str = "fetch-utils";

static CONFIG: Lazy<RwLock<FetchConfig>> = Lazy::new(|| RwLock::new(FetchConfig::default()));

/// Loads configuration from a settings JSON value.
///
/// Settings found under [`SETTINGS_KEY`] are merged over the defaults,
/// validated and installed as the global configuration. Unparsable settings
/// are reported and the defaults kept; an invalid merged configuration is
/// rejected and the global configuration left untouched.
///
/// # Example
///
/// ```no_run
/// use fetch_utils::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "fetch-utils": {
///         "timeout": 60000,
///         "validateSsl": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<FetchConfig, ConfigError> {
    let mut config = FetchConfig::default();

    if let Some(settings) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<FetchConfig>(settings.clone()) {
            Ok(user_config) => config = config.merge(&user_config),
            Err(e) => {
                log::warn!("failed to parse {} settings: {}; using defaults", SETTINGS_KEY, e);
            }
        }
    }

    config.validate()?;

    let mut global_config = CONFIG.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *global_config = config.clone();

    Ok(config)
}

/// Parses a settings value strictly, without touching the global configuration.
///
/// Unlike [`load_config`], malformed settings are an error.
pub fn parse_config(settings: &Value) -> Result<FetchConfig, ConfigError> {
    let config = match settings.get(SETTINGS_KEY) {
        Some(section) => serde_json::from_value::<FetchConfig>(section.clone())
            .map_err(|e| ConfigError::Parse(e.to_string()))?,
        None => FetchConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Returns a clone of the current global configuration.
pub fn get_config() -> FetchConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
}

/// Applies `updater` to the global configuration.
///
/// If the result fails validation, the previous configuration is restored and
/// the error returned.
pub fn update_config<F>(updater: F) -> Result<(), ConfigError>
where
    F: FnOnce(&mut FetchConfig),
{
    let mut config = CONFIG.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    let previous = config.clone();
    updater(&mut config);

    if let Err(e) = config.validate() {
        log::warn!("configuration update rejected: {}", e);
        *config = previous;
        return Err(e);
    }

    Ok(())
}

/// Restores the global configuration to its defaults.
pub fn reset_config() {
    let mut config = CONFIG.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *config = FetchConfig::default();
}
