//! Configuration for the schema export
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (providers-schema.toml)
//! - Environment variables (PROVIDERS_SCHEMA__*)
//!
//! ## Example config file (providers-schema.toml):
//! ```toml
//! [namespace]
//! strip_prefix = "local-registry/"
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration for the exporter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Provider identifier handling
    #[serde(default)]
    pub namespace: NamespaceConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Provider identifier handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Prefix removed from provider identifiers before they become keys
    #[serde(default = "default_strip_prefix")]
    pub strip_prefix: String,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Two-space indented
    #[default]
    Pretty,
    Compact,
}

fn default_strip_prefix() -> String {
    "local-registry/".to_string()
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            strip_prefix: default_strip_prefix(),
        }
    }
}

impl ExportConfig {
    /// Load configuration from the default locations, adding `config_path`
    /// (which must exist) on top when given
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "providers-schema.toml",
            ".providers-schema.toml",
            "config/providers-schema.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        let project_dirs = directories::ProjectDirs::from("dev", "providers", "providers-schema");
        if let Some(config_dir) = project_dirs {
            let xdg_config = config_dir.config_dir().join("providers-schema.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("PROVIDERS_SCHEMA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Provider identifier as used for the output key
    pub fn provider_key<'a>(&self, provider: &'a str) -> &'a str {
        if self.namespace.strip_prefix.is_empty() {
            return provider;
        }
        provider
            .strip_prefix(self.namespace.strip_prefix.as_str())
            .unwrap_or(provider)
    }
}
