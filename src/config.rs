//! Configuration management for the generator
//!
//! Supports loading defaults for a run from:
//! - Built-in values
//! - Config file (cppgen.toml)
//! - Environment variables (CPPGEN_*)
//!
//! Command-line flags are applied on top by [`crate::cli`].
//!
//! ## Example config file (cppgen.toml):
//! ```toml
//! template_dir = "codegen/templates"
//! output = "include/itch/messages.hpp"
//! debug = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the template every run renders
pub const TEMPLATE_NAME: &str = "cpp_file";

/// Default directory searched for templates
pub const DEFAULT_TEMPLATE_DIR: &str = "template";

/// File-level configuration for the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory holding `*.tmpl` files
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Output file; standard output when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Echo the resolved run parameters before generating
    #[serde(default)]
    pub debug: bool,
}

fn default_template_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_DIR)
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            output: None,
            debug: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["cppgen.toml", ".cppgen.toml"];

        for location in config_locations {
            builder = builder.add_source(File::from(PathBuf::from(location)).required(false));
        }

        // Load from XDG config directory
        if let Some(dirs) = directories::ProjectDirs::from("dev", "cppgen", "cppgen") {
            let xdg_config = dirs.config_dir().join("cppgen.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        // CPPGEN_TEMPLATE_DIR, CPPGEN_OUTPUT, CPPGEN_DEBUG
        builder = builder.add_source(Environment::with_prefix("CPPGEN").try_parsing(true));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
