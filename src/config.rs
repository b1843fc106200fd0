// Configuration module for campus-search
// This module handles loading and parsing configuration from ~/.config/campus-search/config.toml

mod types;

pub use types::{BackendConfig, Config, EndpointsConfig, SuggestConfig};

use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/campus-search/config.toml
/// Returns default configuration if file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

/// Loads configuration from an explicit path with the same fallback rules
pub fn load_config_from(config_path: &Path) -> ConfigResult {
    #[cfg(debug_assertions)]
    log::debug!("Loading config from {:?}", config_path);

    // If file doesn't exist, return defaults silently
    if !config_path.exists() {
        #[cfg(debug_assertions)]
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            #[cfg(debug_assertions)]
            log::debug!("Config parsed successfully: {:?}", config.backend.base_url);
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/campus-search/config.toml on all platforms for consistency.
pub fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("campus-search")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_returns_defaults_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(&dir.path().join("config.toml"));

        assert!(result.warning.is_none());
        assert_eq!(result.config.suggest.debounce_ms, 300);
    }

    #[test]
    fn test_valid_file_is_loaded() {
        let file = write_config(
            r#"
[backend]
base_url = "https://campus.example.com/"

[suggest]
debounce_ms = 150
"#,
        );

        let result = load_config_from(file.path());
        assert!(result.warning.is_none());
        assert_eq!(result.config.backend.base_url, "https://campus.example.com/");
        assert_eq!(result.config.suggest.debounce_ms, 150);
    }

    #[test]
    fn test_malformed_file_returns_defaults_with_warning() {
        let file = write_config("[backend\nbase_url = ");

        let result = load_config_from(file.path());
        let warning = result.warning.expect("expected a warning");
        assert!(warning.starts_with("Invalid config"), "got: {}", warning);
        assert_eq!(result.config.backend.base_url, "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_unreadable_path_returns_defaults_with_warning() {
        // A directory exists but cannot be read as a file
        let dir = tempfile::tempdir().unwrap();

        let result = load_config_from(dir.path());
        let warning = result.warning.expect("expected a warning");
        assert!(warning.starts_with("Failed to read config"), "got: {}", warning);
    }

    #[test]
    fn test_config_path_is_stable() {
        let path = get_config_path();
        assert_eq!(path, get_config_path());

        let path_str = path.to_string_lossy();
        assert!(
            path_str.ends_with("campus-search/config.toml")
                || path_str.ends_with("campus-search\\config.toml"),
            "got: {}",
            path_str
        );
    }
}
