//! Application settings loaded from `config.toml`.
//!
//! Every section is optional; a missing file or section falls back to the
//! defaults below. The categories listed in the file are seeded into the
//! database at start-up.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "SKILL_DESK_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub board: BoardConfig,
    pub client: ClientConfig,
    /// Categories to create when missing
    pub categories: Vec<CategoryConfig>,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API listens on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Product list settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Products shown per page
    pub page_size: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

/// Settings for the API client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL the client sends requests to
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// A category to seed.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
}

/// Loads the configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid or
/// the page size is zero.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Parses configuration from TOML text.
///
/// # Errors
/// Returns an error if the TOML is invalid or the page size is zero.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    if config.board.page_size == 0 {
        return Err(Error::Config {
            message: "board.page_size must be at least 1".to_string(),
        });
    }
    Ok(config)
}

/// Loads the configuration named by `SKILL_DESK_CONFIG`, or `./config.toml`.
///
/// A missing file is not an error: the defaults are used instead.
pub fn load_app_configuration() -> Result<AppConfig> {
    load_or_default(std::env::var(CONFIG_PATH_VAR).ok())
}

/// Loads `path` (or `./config.toml` when unset), falling back to the defaults
/// when the file does not exist.
fn load_or_default(path: Option<String>) -> Result<AppConfig> {
    let path = path.unwrap_or_else(|| "config.toml".to_string());
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        warn!("No config file at {path}, using defaults");
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            bind = "0.0.0.0:8080"

            [board]
            page_size = 10

            [client]
            base_url = "http://localhost:8080"

            [[categories]]
            name = "Beverages"

            [[categories]]
            name = "Snacks"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.board.page_size, 10);
        assert_eq!(config.client.base_url, "http://localhost:8080");
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[1].name, "Snacks");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.board.page_size, 5);
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = parse_config("[board]\npage_size = 0\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_override_path_is_loaded() {
        let path = std::env::temp_dir().join(format!("skill-desk-{}.toml", std::process::id()));
        std::fs::write(&path, "[board]\npage_size = 8\n").unwrap();

        let config = load_or_default(Some(path.display().to_string())).unwrap();
        assert_eq!(config.board.page_size, 8);
        assert_eq!(config.server.bind, "127.0.0.1:3000");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_override_falls_back_to_defaults() {
        let config = load_or_default(Some("/definitely/not/here/config.toml".to_string())).unwrap();
        assert_eq!(config.board.page_size, 5);
        assert_eq!(config.client.base_url, "http://127.0.0.1:3000");
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
