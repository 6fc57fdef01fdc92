//! Configuration management for PressForge scripts
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with PRESSFORGE__)
//! - Configuration files (config/default, config/<env>, config/local)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseConfig,

    /// File payload storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Press-wide settings
    #[serde(default)]
    pub press: PressConfig,

    /// Script defaults
    #[serde(default)]
    pub scripts: ScriptsConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Log every SQL statement
    #[serde(default)]
    pub sql_logging: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root of the platform's file store; article payloads live under
    /// `<files_root>/articles/<article_id>/`
    #[serde(default = "default_files_root")]
    pub files_root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PressConfig {
    /// Base URL used for journals without their own domain
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Supported language codes
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScriptsConfig {
    /// Stylesheet used by `transform-abstracts`
    #[serde(default = "default_abstract_stylesheet")]
    pub abstract_stylesheet: PathBuf,

    /// Stylesheet used by `transform-titles`
    #[serde(default = "default_title_stylesheet")]
    pub title_stylesheet: PathBuf,

    /// XSLT processor executable
    #[serde(default = "default_xsltproc")]
    pub xsltproc: String,

    /// Directory that CSV exports are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error) or a full filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,
}

// Default value functions
fn default_max_connections() -> u32 { 5 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 10 }
fn default_idle_timeout() -> u64 { 300 }
fn default_files_root() -> PathBuf { PathBuf::from("files") }
fn default_base_url() -> String { "http://localhost:8000".to_string() }
fn default_languages() -> Vec<String> { vec!["en".to_string()] }
fn default_abstract_stylesheet() -> PathBuf { PathBuf::from("xsl/abstracts.xsl") }
fn default_title_stylesheet() -> PathBuf { PathBuf::from("xsl/titles.xsl") }
fn default_xsltproc() -> String { "xsltproc".to_string() }
fn default_export_dir() -> PathBuf { PathBuf::from(".") }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }

impl Default for StorageConfig {
    fn default() -> Self {
        Self { files_root: default_files_root() }
    }
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            languages: default_languages(),
        }
    }
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            abstract_stylesheet: default_abstract_stylesheet(),
            title_stylesheet: default_title_stylesheet(),
            xsltproc: default_xsltproc(),
            export_dir: default_export_dir(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
        }
    }
}

fn environment() -> Environment {
    // e.g. PRESSFORGE__DATABASE__URL=postgres://...
    //      PRESSFORGE__PRESS__LANGUAGES=en,cy
    Environment::with_prefix("PRESSFORGE")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("press.languages")
        .try_parsing(true)
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific file, still honouring environment overrides
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database.connect_timeout_secs)
    }

    /// Whether a language code is one the press supports
    pub fn supports_language(&self, code: &str) -> bool {
        self.press.languages.iter().any(|l| l == code)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgres://localhost/janeway".to_string(),
                max_connections: default_max_connections(),
                min_connections: default_min_connections(),
                connect_timeout_secs: default_connect_timeout(),
                idle_timeout_secs: default_idle_timeout(),
                sql_logging: false,
            },
            storage: StorageConfig::default(),
            press: PressConfig::default(),
            scripts: ScriptsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.files_root, PathBuf::from("files"));
        assert_eq!(config.scripts.xsltproc, "xsltproc");
        assert!(config.supports_language("en"));
        assert!(!config.supports_language("cy"));
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"sqlite::memory:\"\n\n[press]\nlanguages = [\"en\", \"cy\"]"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.supports_language("cy"));
        assert_eq!(config.press.base_url, "http://localhost:8000");
    }
}
