use std::fs;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PackageSpec;

const APP_NAME: &str = "solution-scaffold";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Target framework passed to `dotnet new -f`.
    pub framework: String,
    /// Projects whose name ends with this suffix use `api_template`.
    pub api_suffix: String,
    pub api_template: String,
    pub library_template: String,
    /// Scaffolding executable.
    pub dotnet: String,
    /// File removed from every freshly scaffolded project.
    pub placeholder_file: String,
    /// Package references injected by `scaf patch`.
    pub packages: Vec<PackageSpec>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            framework: "net8.0".to_string(),
            api_suffix: ".API".to_string(),
            api_template: "webapi".to_string(),
            library_template: "classlib".to_string(),
            dotnet: "dotnet".to_string(),
            placeholder_file: "Class1.cs".to_string(),
            packages: PackageSpec::ef_core_defaults(),
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration.
    ///
    /// An explicit path must load. Without one, the user config directory is tried,
    /// and defaults are used if that file is missing or broken.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        match Self::from_file(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

fn default_config_path() -> Option<PathBuf> {
    let mut path = config_dir()?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Some(path)
}
