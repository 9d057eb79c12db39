//! Client config load/save for `~/.graphmind/config.yaml`.
//!
//! ```yaml
//! backend:
//!   base_url: "http://localhost:8000"
//! display:
//!   hyperlinks: true
//!   banner: true
//! ```

use std::path::{Path, PathBuf};

use crate::client::DEFAULT_BACKEND_URL;

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "GRAPHMIND_CONFIG";

/// Backend section (base_url).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BackendSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Display section (hyperlinks, banner).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplaySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperlinks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSection,
    #[serde(default)]
    pub display: DisplaySection,
}

impl Config {
    /// Configured backend, falling back to [`DEFAULT_BACKEND_URL`].
    pub fn backend_url(&self) -> &str {
        self.backend
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn hyperlinks_enabled(&self) -> bool {
        self.display.hyperlinks.unwrap_or(true)
    }

    pub fn banner_enabled(&self) -> bool {
        self.display.banner.unwrap_or(true)
    }
}

/// Where the config came from; decides whether a missing file is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` or `GRAPHMIND_CONFIG`.
    Explicit(PathBuf),
    /// `~/.graphmind/config.yaml`.
    Default(PathBuf),
    /// No home directory; built-in defaults only.
    None,
}

/// Returns the default config file path: `~/.graphmind/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".graphmind").join("config.yaml"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Flag, then env var, then default path.
pub fn resolve_config_source(flag: Option<&Path>, env: Option<&str>) -> ConfigSource {
    if let Some(p) = flag {
        return ConfigSource::Explicit(p.to_path_buf());
    }
    if let Some(val) = env.filter(|v| !v.is_empty()) {
        return ConfigSource::Explicit(PathBuf::from(val));
    }
    match default_config_path() {
        Some(p) => ConfigSource::Default(p),
        None => ConfigSource::None,
    }
}

/// Load the config named by `source`. A default path that does not exist yields defaults.
pub fn load_from(source: &ConfigSource) -> Result<Config, ConfigError> {
    match source {
        ConfigSource::Explicit(path) => load(path),
        ConfigSource::Default(path) if path.exists() => load(path),
        ConfigSource::Default(_) | ConfigSource::None => Ok(Config::default()),
    }
}

/// Load config from a YAML file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save config to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let contents = serde_yaml::to_string(config).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, contents).map_err(io_err)
}

/// Config load/save error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
