//! Configuration loading and resolution
//!
//! Every setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The remote store endpoint URL and API key have no compiled default;
//! resolution fails with a configuration error when neither the CLI,
//! environment nor config file supplies them.

use crate::fade::FadeCurve;
use crate::model::DEFAULT_TABLE;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable names read during resolution
pub const ENV_ENDPOINT_URL: &str = "MOLDPICK_SUPABASE_URL";
pub const ENV_API_KEY: &str = "MOLDPICK_SUPABASE_KEY";
pub const ENV_TABLE: &str = "MOLDPICK_TABLE";
pub const ENV_PORT: &str = "MOLDPICK_PORT";

/// Compiled defaults
const DEFAULT_PORT: u16 = 5760;
const DEFAULT_CONTENT_FADE_MS: u64 = 200;
const DEFAULT_IMAGE_FADE_MS: u64 = 1000;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote store endpoint URL (e.g. `https://xyz.supabase.co`)
    pub endpoint_url: String,
    /// Remote store API key, opaque to the core
    pub api_key: String,
    /// Catalog table name
    pub table: String,
    /// HTTP listen port
    pub port: u16,
    /// Duration of each content transition segment (fade-out, fade-in)
    pub content_fade_ms: u64,
    /// Duration of the per-image fade-in
    pub image_fade_ms: u64,
    /// Easing curve for both fades
    pub curve: FadeCurve,
}

/// Settings supplied on the command line (already parsed by the binary)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint_url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub port: Option<u16>,
    /// Explicit config file path, replacing the platform search
    pub config_file: Option<PathBuf>,
}

/// TOML config file schema; every field optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    endpoint_url: Option<String>,
    api_key: Option<String>,
    table: Option<String>,
    port: Option<u16>,
    #[serde(default)]
    fade: FadeSection,
}

#[derive(Debug, Default, Deserialize)]
struct FadeSection {
    content_ms: Option<u64>,
    image_ms: Option<u64>,
    curve: Option<String>,
}

impl Config {
    /// Resolve configuration from overrides, environment, the platform
    /// config file and defaults.
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let file_path = match &overrides.config_file {
            Some(path) => Some(path.clone()),
            None => find_config_file(),
        };
        Self::resolve_with_file(overrides, file_path.as_deref())
    }

    /// Resolution against an explicit (or absent) config file; the entry
    /// point used by tests.
    pub fn resolve_with_file(overrides: Overrides, file: Option<&Path>) -> Result<Self> {
        let file_config = match file {
            Some(path) => load_file_config(path)?,
            None => FileConfig::default(),
        };

        let endpoint_url = overrides
            .endpoint_url
            .or_else(|| std::env::var(ENV_ENDPOINT_URL).ok())
            .or(file_config.endpoint_url)
            .ok_or_else(|| {
                Error::Config(format!(
                    "store endpoint URL not configured (set --supabase-url, {} or endpoint_url in the config file)",
                    ENV_ENDPOINT_URL
                ))
            })?;

        let api_key = overrides
            .api_key
            .or_else(|| std::env::var(ENV_API_KEY).ok())
            .or(file_config.api_key)
            .ok_or_else(|| {
                Error::Config(format!(
                    "store API key not configured (set --supabase-key, {} or api_key in the config file)",
                    ENV_API_KEY
                ))
            })?;

        let table = overrides
            .table
            .or_else(|| std::env::var(ENV_TABLE).ok())
            .or(file_config.table)
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let port = match overrides.port {
            Some(p) => p,
            None => match std::env::var(ENV_PORT) {
                Ok(raw) => raw.parse::<u16>().map_err(|_| {
                    Error::Config(format!("{} is not a valid port: {:?}", ENV_PORT, raw))
                })?,
                Err(_) => file_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let content_fade_ms = file_config
            .fade
            .content_ms
            .unwrap_or(DEFAULT_CONTENT_FADE_MS);
        let image_fade_ms = file_config.fade.image_ms.unwrap_or(DEFAULT_IMAGE_FADE_MS);

        let curve = match file_config.fade.curve.as_deref() {
            Some(raw) => FadeCurve::parse(raw)
                .ok_or_else(|| Error::Config(format!("unknown fade curve: {:?}", raw)))?,
            None => FadeCurve::default(),
        };

        if content_fade_ms == 0 {
            return Err(Error::Config("fade.content_ms must be positive".into()));
        }
        if image_fade_ms == 0 {
            return Err(Error::Config("fade.image_ms must be positive".into()));
        }

        Ok(Config {
            endpoint_url: endpoint_url.trim_end_matches('/').to_string(),
            api_key,
            table,
            port,
            content_fade_ms,
            image_fade_ms,
            curve,
        })
    }
}

/// Parse a TOML config file, failing loudly on malformed content
fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("cannot parse {}: {}", path.display(), e)))
}

/// Locate the platform config file, if any
///
/// Checks `~/.config/moldpick/config.toml` first, then
/// `/etc/moldpick/config.toml` on Linux. A missing file is not an error;
/// resolution simply falls through to environment and defaults.
fn find_config_file() -> Option<PathBuf> {
    if let Some(dir) = dirs::config_dir() {
        let user_config = dir.join("moldpick").join("config.toml");
        if user_config.exists() {
            return Some(user_config);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/moldpick/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    tracing::debug!("no config file found, using environment and defaults");
    None
}
