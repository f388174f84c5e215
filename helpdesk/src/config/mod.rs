//! Configuration system for the `HelpDesk` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/helpdesk/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use crate::feed::FeedSettings;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    feed: FeedFileConfig,
    assistant: AssistantFileConfig,
    ui: UiFileConfig,
    paths: PathsFileConfig,
}

/// `[feed]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct FeedFileConfig {
    page_size: Option<usize>,
    load_latency_ms: Option<u64>,
    reply_delay_ms: Option<u64>,
    follow_threshold: Option<usize>,
}

/// `[assistant]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct AssistantFileConfig {
    reply_delay_ms: Option<u64>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    poll_timeout_ms: Option<u64>,
    inbox_loading_ms: Option<u64>,
    timestamp_format: Option<String>,
}

/// `[paths]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct PathsFileConfig {
    fixtures: Option<PathBuf>,
    theme_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- Feed --
    /// Messages materialized per page.
    pub page_size: usize,
    /// Simulated latency of loading older history.
    pub load_latency: Duration,
    /// Delay before the simulated customer reply.
    pub reply_delay: Duration,
    /// Rows from the bottom that still count as following the conversation.
    pub follow_threshold: usize,

    // -- Assistant --
    /// Delay before the assistant answers.
    pub assistant_reply_delay: Duration,

    // -- UI --
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
    /// How long the inbox shows its loading placeholder.
    pub inbox_loading: Duration,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,

    // -- Paths --
    /// Fixture file replacing the built-in data.
    pub fixtures: Option<PathBuf>,
    /// Theme preference file (default: `<data dir>/helpdesk/theme.json`).
    pub theme_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            load_latency: Duration::from_millis(500),
            reply_delay: Duration::from_millis(2000),
            follow_threshold: 1,
            assistant_reply_delay: Duration::from_millis(800),
            poll_timeout: Duration::from_millis(50),
            inbox_loading: Duration::from_millis(1000),
            timestamp_format: "%H:%M".to_string(),
            fixtures: None,
            theme_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// CLI args and env vars are parsed via `clap`. If `--config` is given
    /// and the file does not exist, returns an error. If no `--config` is
    /// given, the default path (`~/.config/helpdesk/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            page_size: cli
                .page_size
                .or(file.feed.page_size)
                .unwrap_or(defaults.page_size),
            load_latency: file
                .feed
                .load_latency_ms
                .map_or(defaults.load_latency, Duration::from_millis),
            reply_delay: file
                .feed
                .reply_delay_ms
                .map_or(defaults.reply_delay, Duration::from_millis),
            follow_threshold: file
                .feed
                .follow_threshold
                .unwrap_or(defaults.follow_threshold),
            assistant_reply_delay: file
                .assistant
                .reply_delay_ms
                .map_or(defaults.assistant_reply_delay, Duration::from_millis),
            poll_timeout: file
                .ui
                .poll_timeout_ms
                .map_or(defaults.poll_timeout, Duration::from_millis),
            inbox_loading: file
                .ui
                .inbox_loading_ms
                .map_or(defaults.inbox_loading, Duration::from_millis),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.ui.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
            fixtures: cli
                .fixtures
                .clone()
                .or_else(|| file.paths.fixtures.clone()),
            theme_file: cli
                .theme_file
                .clone()
                .or_else(|| file.paths.theme_file.clone()),
        }
    }

    /// Feed tunables for chat sessions.
    #[must_use]
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            page_size: self.page_size,
            load_latency: self.load_latency,
            reply_delay: self.reply_delay,
            follow_threshold: self.follow_threshold,
            timestamp_format: self.timestamp_format.clone(),
            ..FeedSettings::default()
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(
    version,
    about = "Terminal support inbox with live chat and an assistant panel"
)]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/helpdesk/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fixture file (TOML) replacing the built-in inbox and conversations.
    #[arg(long, env = "HELPDESK_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Theme preference file.
    #[arg(long)]
    pub theme_file: Option<PathBuf>,

    /// Messages loaded per page of chat history.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Timestamp display format (chrono format string).
    #[arg(long)]
    pub timestamp_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "HELPDESK_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/helpdesk.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("helpdesk").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
