//! Configuration management for metadata tooling
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (dmmf.toml)
//! - Environment variables (DMMF__*)
//!
//! ## Example config file (dmmf.toml):
//! ```toml
//! [loader]
//! client_path = "./node_modules/.prisma/client"
//! dmmf_file = "dmmf.json"
//!
//! [output]
//! format = "pretty"
//!
//! [logging]
//! filter = "dmmf_document=debug"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::{ClientPackageLoader, DEFAULT_DMMF_FILE};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DmmfConfig {
    /// Where the metadata document comes from
    #[serde(default)]
    pub loader: LoaderConfig,

    /// How normalized documents are written
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Generated client package directory
    #[serde(default = "default_client_path")]
    pub client_path: PathBuf,

    /// Metadata document file inside the client package
    #[serde(default = "default_dmmf_file")]
    pub dmmf_file: String,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Logging configuration, used when RUST_LOG is unset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default value functions
fn default_client_path() -> PathBuf {
    PathBuf::from("node_modules/.prisma/client")
}

fn default_dmmf_file() -> String {
    DEFAULT_DMMF_FILE.to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            client_path: default_client_path(),
            dmmf_file: default_dmmf_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl DmmfConfig {
    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["dmmf.toml", ".dmmf.toml", "config/dmmf.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "dmmf") {
            let xdg_config = config_dir.config_dir().join("dmmf.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (DMMF__LOADER__CLIENT_PATH, ...)
        builder = builder.add_source(
            Environment::with_prefix("DMMF")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Loader reading the configured metadata file
    pub fn client_loader(&self) -> ClientPackageLoader {
        ClientPackageLoader::new(&self.loader.dmmf_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DmmfConfig::default();
        assert_eq!(config.loader.dmmf_file, "dmmf.json");
        assert_eq!(config.output.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_serialize_config() {
        let config = DmmfConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[loader]"));
        assert!(toml_str.contains("[output]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[loader]\nclient_path = \"generated/client\"\n\n[output]\nformat = \"compact\"\n",
        )
        .unwrap();

        let config = DmmfConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.loader.client_path, PathBuf::from("generated/client"));
        assert_eq!(config.loader.dmmf_file, "dmmf.json");
        assert_eq!(config.output.format, OutputFormat::Compact);
    }

    #[test]
    fn test_save_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        DmmfConfig::default().save(path.to_str().unwrap()).unwrap();

        let config = DmmfConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.logging.filter, "info");
    }
}
