use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/mini_app.toml";

/// Client configuration.
///
/// `confirm_before_save` and `haptics` reconcile behavior that drifted
/// between revisions of the original page; defaults match the last
/// revision.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend endpoint receiving every action POST.
    pub endpoint: String,
    /// Ask for confirmation before saving credentials.
    pub confirm_before_save: bool,
    /// Play haptic feedback when reminder settings change.
    pub haptics: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000/api".to_string(),
            confirm_before_save: false,
            haptics: true,
        }
    }
}

pub fn load() -> Result<AppConfig> {
    load_from(DEFAULT_CONFIG_PATH)
}

/// Optional TOML file, then `MINI_APP_*` environment overrides.
pub fn load_from(path: &str) -> Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("MINI_APP"))
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = load_from("config/does_not_exist").unwrap();
        assert_eq!(settings.endpoint, AppConfig::default().endpoint);
        assert!(!settings.confirm_before_save);
        assert!(settings.haptics);
    }
}
