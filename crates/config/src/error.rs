//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The same toolbar was declared twice.
	#[error("duplicate toolbar: {0}")]
	DuplicateToolbar(String),

	/// A menu or toolbar name was empty.
	#[error("empty {0} name")]
	EmptyName(&'static str),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
