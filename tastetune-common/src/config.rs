//! Configuration loading and per-setting resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default workbook holding both sheets
pub const DEFAULT_INPUT: &str = "卒論_実装用対応表.xlsx";
/// Default document path
pub const DEFAULT_OUTPUT: &str = "data.json";
/// Default name of the food → taste sheet
pub const DEFAULT_SHEET_A: &str = "食品ー味覚";
/// Default name of the taste → mood → music sheet
pub const DEFAULT_SHEET_B: &str = "味覚ー気分ー音楽";

pub const ENV_INPUT: &str = "TASTETUNE_INPUT";
pub const ENV_OUTPUT: &str = "TASTETUNE_OUTPUT";
pub const ENV_SHEET_A: &str = "TASTETUNE_SHEET_A";
pub const ENV_SHEET_B: &str = "TASTETUNE_SHEET_B";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "tastetune.toml";

/// Settings read from the TOML config file; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub sheet_a: Option<String>,

    #[serde(default)]
    pub sheet_b: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }

    /// Load the config file
    ///
    /// An explicit path must exist and parse. Without one, `./tastetune.toml`
    /// and then `<config dir>/tastetune/config.toml` are tried; if neither
    /// exists the defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match find_config_file() {
            Some(path) => {
                debug!("Using config file {}", path.display());
                Self::from_file(&path)
            }
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|d| d.join("tastetune").join("config.toml"))
        .filter(|path| path.exists())
}

/// Command-line overrides; `None` means not given
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub sheet_a: Option<String>,
    pub sheet_b: Option<String>,
}

/// Fully resolved settings for one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sheet_a: String,
    pub sheet_b: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sheet_a: DEFAULT_SHEET_A.to_string(),
            sheet_b: DEFAULT_SHEET_B.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Resolve every setting: CLI → ENV → TOML → compiled default
    pub fn resolve(cli: &CliOverrides, toml_config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            input: pick(
                cli.input.clone(),
                env_var(ENV_INPUT).map(PathBuf::from),
                toml_config.input.clone(),
            )
            .unwrap_or(defaults.input),
            output: pick(
                cli.output.clone(),
                env_var(ENV_OUTPUT).map(PathBuf::from),
                toml_config.output.clone(),
            )
            .unwrap_or(defaults.output),
            sheet_a: pick(cli.sheet_a.clone(), env_var(ENV_SHEET_A), toml_config.sheet_a.clone())
                .unwrap_or(defaults.sheet_a),
            sheet_b: pick(cli.sheet_b.clone(), env_var(ENV_SHEET_B), toml_config.sheet_b.clone())
                .unwrap_or(defaults.sheet_b),
        }
    }
}

fn pick<T>(cli: Option<T>, env: Option<T>, toml: Option<T>) -> Option<T> {
    cli.or(env).or(toml)
}

/// Non-empty environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
