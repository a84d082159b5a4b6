//! Configuration for notepane.
//!
//! Configuration is a single TOML file. Every section is optional and a
//! missing file yields [`Config::default`]. Resolution order for the file
//! path is: explicit path, `$NOTEPANE_CONFIG`, then
//! `<config_dir>/notepane/config.toml`.

mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub use error::{ConfigError, Result};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "NOTEPANE_CONFIG";

/// Upper bound for [`HistoryConfig::capacity`].
pub const MAX_HISTORY_CAPACITY: usize = 1000;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Directory holding `notes.json`, `folders.json`, `trash.json` and
	/// `settings.json`. Defaults to `<data_dir>/notepane`.
	pub data_dir: Option<PathBuf>,
	pub history: HistoryConfig,
	pub windows: WindowsConfig,
	pub layout: LayoutConfig,
	pub log: LogConfig,
}

/// Undo history tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
	/// Maximum entries kept per note; the oldest is evicted on overflow.
	pub capacity: usize,
	/// Idle period after free typing before a deferred commit fires.
	pub idle_commit_ms: u64,
}

impl Default for HistoryConfig {
	fn default() -> Self {
		Self {
			capacity: 50,
			idle_commit_ms: 1500,
		}
	}
}

impl HistoryConfig {
	pub fn idle_commit(&self) -> Duration {
		Duration::from_millis(self.idle_commit_ms)
	}
}

/// Floating window policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowPolicy {
	/// Opening a window for one note closes any window showing another.
	#[default]
	Single,
	/// Any number of notes may float at once, still one window per note.
	Multiple,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowsConfig {
	pub policy: WindowPolicy,
}

/// Pane behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
	/// Opening a note from the sidebar while the left pane shows a different
	/// note sends it to the right pane and enables split mode.
	pub auto_split: bool,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self { auto_split: true }
	}
}

/// Logging defaults, overridable by `NOTEPANE_LOG`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
	pub filter: String,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			filter: "info".to_owned(),
		}
	}
}

impl Config {
	/// Parses and validates configuration from a TOML string.
	///
	/// `origin` is only used for error messages.
	pub fn from_toml(src: &str, origin: &Path) -> Result<Self> {
		let config: Config = toml::from_str(src).map_err(|error| ConfigError::Parse {
			path: origin.to_path_buf(),
			error,
		})?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from `path`, returning defaults when the file
	/// does not exist.
	pub fn load(path: &Path) -> Result<Self> {
		match std::fs::read_to_string(path) {
			Ok(src) => Self::from_toml(&src, path),
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
			Err(error) => Err(ConfigError::Io {
				path: path.to_path_buf(),
				error,
			}),
		}
	}

	/// Loads configuration from the explicit path if given, otherwise from
	/// [`default_config_path`].
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		match explicit.map(Path::to_path_buf).or_else(default_config_path) {
			Some(path) => Self::load(&path),
			None => Ok(Self::default()),
		}
	}

	/// Checks value ranges that serde cannot express.
	pub fn validate(&self) -> Result<()> {
		if self.history.capacity == 0 || self.history.capacity > MAX_HISTORY_CAPACITY {
			return Err(ConfigError::Invalid {
				key: "history.capacity",
				reason: format!("must be between 1 and {MAX_HISTORY_CAPACITY}, got {}", self.history.capacity),
			});
		}
		if self.log.filter.trim().is_empty() {
			return Err(ConfigError::Invalid {
				key: "log.filter",
				reason: "must not be empty".to_owned(),
			});
		}
		Ok(())
	}

	/// Returns the configured data directory or the platform default.
	pub fn resolve_data_dir(&self) -> Result<PathBuf> {
		if let Some(dir) = &self.data_dir {
			return Ok(dir.clone());
		}
		dirs::data_dir().map(|dir| dir.join("notepane")).ok_or(ConfigError::NoDataDir)
	}
}

/// Returns `$NOTEPANE_CONFIG` or `<config_dir>/notepane/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
	if let Some(path) = std::env::var_os(CONFIG_ENV) {
		return Some(PathBuf::from(path));
	}
	dirs::config_dir().map(|dir| dir.join("notepane").join("config.toml"))
}
