// config.rs — `satchel.toml` configuration.
//
// Every section is optional; a missing file yields defaults. Flags and env
// vars override at the CLI layer, not here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::table::Style;

/// Cache settings (`[cache]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding cache files (default: `.satchel`).
    pub dir: PathBuf,
    /// LRU capacity for in-memory caches. 0 = unbounded.
    pub capacity: usize,
    /// Default TTL in seconds applied by `set`. 0 = no expiry.
    pub default_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from(".satchel"), capacity: 0, default_ttl_secs: 0 }
    }
}

/// Locale settings (`[locale]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Directory of `<locale>.toml` catalogs (default: `locales`).
    pub dir: PathBuf,
    /// Fallback-of-last-resort locale (default: `en`).
    pub default: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { dir: PathBuf::from("locales"), default: "en".to_string() }
    }
}

/// Table rendering (`[table]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    /// Cells wider than this are truncated with `…`. 0 = never truncate.
    pub max_col_width: usize,
    /// `plain` or `ascii`.
    pub style: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { max_col_width: 0, style: "plain".to_string() }
    }
}

impl TableConfig {
    pub fn render_style(&self) -> Style {
        match self.style.as_str() {
            "ascii" => Style::Ascii,
            _ => Style::Plain,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub cache: CacheConfig,
    pub locale: LocaleConfig,
    pub table: TableConfig,
}

impl ToolkitConfig {
    /// Load from `path`, or defaults when the file does not exist.
    /// A present-but-malformed file is an error, never silently defaulted.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
