//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or mapping it onto the schema.
	#[error("invalid config {path}: {error}")]
	Parse {
		/// Path to the offending file.
		path: PathBuf,
		/// The underlying TOML error.
		error: toml::de::Error,
	},

	/// A value parsed but is outside its accepted range.
	#[error("invalid value for '{key}': {reason}")]
	Invalid {
		/// Dotted key of the offending option.
		key: &'static str,
		/// Human-readable explanation.
		reason: String,
	},

	/// No platform data directory could be determined and none was configured.
	#[error("no data directory available; set 'data_dir' in the config file")]
	NoDataDir,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
