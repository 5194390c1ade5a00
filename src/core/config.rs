//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → CLI flags.
//!
//! Config lives at `~/.fe-explorer/config.toml`. It is optional: when it is
//! missing the defaults apply and nothing is written to disk.
//!
//! Loading and resolution run before the logger exists (the log file path is
//! itself a setting), so they report back as data instead of logging:
//! [`LoadedConfig::source`] and [`ResolvedConfig::warnings`]. `main` logs
//! both once the logger is up.

use serde::Deserialize;
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralConfig {
    pub data_file: Option<String>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATA_FILE: &str = "formula_e_data.json";
pub const DEFAULT_LOG_FILE: &str = "fe-explorer.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub data_file: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Settings that were ignored, in human-readable form.
    pub warnings: Vec<String>,
}

/// A parsed config plus the file it came from (`None` = built-in defaults).
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: ExplorerConfig,
    pub source: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.fe-explorer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fe-explorer").join("config.toml"))
}

/// Load config from an explicit path, or from `~/.fe-explorer/config.toml`.
///
/// A missing default file (or no home directory) yields the defaults with
/// `source: None`. An explicit path must exist. A file that exists but is
/// malformed returns `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(LoadedConfig::default()),
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    Ok(LoadedConfig {
        config: parse_config(&contents)?,
        source: Some(path),
    })
}

/// Parse a config document.
pub fn parse_config(contents: &str) -> Result<ExplorerConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → CLI.
///
/// `cli_data` is the `--data` flag (None = not specified).
pub fn resolve(config: &ExplorerConfig, cli_data: Option<&Path>) -> ResolvedConfig {
    // Dataset: CLI → config → default
    let data_file = cli_data
        .map(Path::to_path_buf)
        .or_else(|| config.general.data_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let log_file = config
        .general
        .log_file
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let mut warnings = Vec::new();
    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warnings.push(format!(
                "Unknown log level '{level}', using {DEFAULT_LOG_LEVEL}"
            ));
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        data_file,
        log_file,
        log_level,
        warnings,
    }
}
