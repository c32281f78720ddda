//! Configuration management for reelfeed.
//!
//! Configuration is read from `~/.config/reelfeed/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use crate::domain::FeedLimits;
use crate::gateway::{DEFAULT_BASE_URL, DEFAULT_CATEGORY};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub feed: FeedLimits,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Where and how to reach the video API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub category: String,
    /// Per-request timeout, surfaced to the feed as an ordinary failure.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            timeout_secs: 10,
            user_agent: concat!("reelfeed/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.feed.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/reelfeed/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("reelfeed").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# reelfeed configuration

[api]
base_url = "https://interesnoitochka.ru"
category = "shorts"
# Requests slower than this fail and show up as a feed error
timeout_secs = 10

[feed]
# Items requested per page
page_size = 10
# Fetch the next page when this many items (or fewer) remain below the visible one
prefetch_threshold = 2
# Items kept in memory around the visible one
max_cache_size = 5

# Colors: named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB", "#RGB")
[colors]
active_border = "Cyan"
inactive_border = "DarkGray"
selection_bg = "Cyan"
selection_fg = "Black"
locked_item = "DarkGray"
metadata_channel = "Yellow"
metadata_date = "Yellow"
metadata_link = "Blue"
error_fg = "White"
error_bg = "Red"
status_fg = "White"
status_bg = "DarkGray"

# Keys: single characters ("a", "R"), special keys (Enter, Tab, BackTab,
# Backspace, Delete, Home, End, PageUp, PageDown, Up, Down, Left, Right,
# Esc, Space, F1-F12), optionally with modifiers ("Ctrl+c", "Shift+Tab")
[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]
open_stream = ["o", "Enter"]
refresh = ["R"]
dismiss_error = ["x", "Esc"]
toggle_maximize = ["m"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid [feed] settings in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}
