use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of table rows buffered per read.
pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

/// Configuration for palimpsest.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (PALIMPSEST_* prefix)
/// 3. Config file (~/.config/palimpsest/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one extracted sub-directory per corpus.
    ///
    /// Can be set via:
    /// - CLI: --data-dir /path/to/corpus
    /// - ENV: PALIMPSEST_DATA_DIR
    /// - Config: data_dir = "/path/to/corpora"
    /// - Default: ~/.local/share/palimpsest/corpora
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Rows read per chunk from delimited tables.
    ///
    /// Can be set via:
    /// - CLI: --chunk-size 10000
    /// - Config: chunk_size = 10000
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/palimpsest/config.toml
    /// Reads environment variables with PALIMPSEST_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("palimpsest");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config.sanitized())
    }

    /// Directory of one corpus under [`Config::data_dir`].
    pub fn corpus_dir(&self, corpus: &str) -> PathBuf {
        self.data_dir.join(corpus)
    }

    fn sanitized(mut self) -> Self {
        if self.chunk_size == 0 {
            log::warn!(
                "chunk_size of 0 is not usable, falling back to {}",
                DEFAULT_CHUNK_SIZE
            );
            self.chunk_size = DEFAULT_CHUNK_SIZE;
        }
        self
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("palimpsest")
        .join("corpora")
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/palimpsest/config.toml
/// - macOS: ~/Library/Application Support/palimpsest/config.toml
/// - Windows: %APPDATA%\palimpsest\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("palimpsest")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Palimpsest Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (PALIMPSEST_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Directory holding the extracted corpora, one sub-directory per corpus
# (hansard/, clmet/, lampeter/, ...).
#
# Can also be set via:
# - CLI: palimpsest build clmet --data-dir /custom/clmet
# - Environment: PALIMPSEST_DATA_DIR=/custom/corpora
#
# Default: Platform-specific data directory
#data_dir = "/path/to/corpora"

# Rows read per chunk from delimited tables (hansard, animacy, contentious).
chunk_size = 50000
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
