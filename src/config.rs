/// The config module reads the optional TOML configuration. Every key has a default, so an empty
/// file (or no file at all, via `Config::default()`) is a valid configuration. Unknown keys are
/// reported with a warning and otherwise ignored.
use crate::common::DEFAULT_HOST;
use crate::error::{ConfigError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const KNOWN_KEYS: &[&str] = &["host", "indent", "xml_declaration"];

const MAX_INDENT: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host absolute entity ids are scoped to.
    pub host: String,
    /// Spaces per nesting level in written documents. 0 writes everything on one line.
    pub indent: usize,
    pub xml_declaration: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            indent: 2,
            xml_declaration: true,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mmd").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads the configuration file at `path`, or at `default_path()` if `path` is `None`.
    pub fn parse(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path().ok_or_else(|| ConfigError::NotFound {
                path: PathBuf::from("config.toml"),
            })?,
        };

        let text = fs::read_to_string(&path).map_err(|_| ConfigError::NotFound { path: path.clone() })?;
        Self::parse_str(&text, &path.display().to_string())
    }

    /// Parses configuration text. `origin` names the source in error messages.
    pub fn parse_str(text: &str, origin: &str) -> Result<Config> {
        let decode_error = |e: toml::de::Error| ConfigError::Decode {
            path: origin.to_string(),
            message: e.to_string(),
        };

        let table: toml::Table = text.parse().map_err(decode_error)?;
        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                warn!("Ignoring unrecognized key {key} in configuration ({origin})");
            }
        }

        let config: Config = toml::Value::Table(table).try_into().map_err(decode_error)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.host.is_empty() || self.host.contains('/') || self.host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                key: "host".to_string(),
                message: format!("must be a bare host name, got {:?}", self.host),
            }
            .into());
        }
        if self.indent > MAX_INDENT {
            return Err(ConfigError::InvalidValue {
                key: "indent".to_string(),
                message: format!("must be at most {MAX_INDENT}, got {}", self.indent),
            }
            .into());
        }
        Ok(())
    }
}
