//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tcg-browser/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::Language;
use crate::catalog::DEFAULT_TCGDEX_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tcgdex: TcgdexConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub language: Option<Language>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TcgdexConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;

fn default_user_agent() -> String {
    format!("tcg-browser/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub language: Language,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: log::LevelFilter,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub language: Option<Language>,
    pub base_url: Option<String>,
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

/// Returns the path to `~/.tcg-browser/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tcg-browser").join("config.toml"))
}

/// Load config from `~/.tcg-browser/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BrowserConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(BrowserConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(BrowserConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<BrowserConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: BrowserConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# tcg-browser Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# language = "en"                    # en, fr, es, it, pt, de (or TCG_BROWSER_LANGUAGE)
# log_level = "debug"                # off, error, warn, info, debug, trace

# [tcgdex]
# base_url = "https://api.tcgdex.net/v2"   # Or set TCGDEX_BASE_URL env var
# request_timeout_secs = 30
# user_agent = "tcg-browser"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &BrowserConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &BrowserConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Language: CLI → env → config → default
    let language = cli
        .language
        .or_else(|| {
            env("TCG_BROWSER_LANGUAGE").and_then(|code| match Language::from_code(&code) {
                Some(language) => Some(language),
                None => {
                    warn!("Ignoring unknown TCG_BROWSER_LANGUAGE={:?}", code);
                    None
                }
            })
        })
        .or(config.general.language)
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("TCGDEX_BASE_URL"))
        .or_else(|| config.tcgdex.base_url.clone())
        .unwrap_or_else(|| DEFAULT_TCGDEX_BASE_URL.to_string());

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|level| match log::LevelFilter::from_str(level) {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Ignoring unknown log_level {:?}", level);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        language,
        base_url,
        request_timeout_secs: config
            .tcgdex
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        user_agent: config
            .tcgdex
            .user_agent
            .clone()
            .unwrap_or_else(default_user_agent),
        log_level,
    }
}
