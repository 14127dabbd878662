use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data file used when neither --file nor IMPERA_FILE is given.
    #[serde(default)]
    pub default_data_file: Option<String>,
    #[serde(default = "default_celebrations")]
    pub celebrations: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_data_file: None,
            celebrations: default_celebrations(),
        }
    }
}

fn default_celebrations() -> bool {
    true
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/impera/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("impera/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("impera\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_data_file, None);
    }

    #[test]
    fn test_parse_config() {
        let config: AppConfig =
            toml::from_str("default_data_file = \"/tmp/impera.json\"\ncelebrations = false")
                .unwrap();
        assert_eq!(
            config.default_data_file.as_deref(),
            Some("/tmp/impera.json")
        );
        assert!(!config.celebrations);
    }

    #[test]
    fn test_celebrations_default_on() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.celebrations);
    }
}
