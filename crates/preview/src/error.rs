//! Error types for the preview controller.

use std::path::PathBuf;

use mathpeek_primitives::Range;
use thiserror::Error;

/// Errors returned by preview session operations.
#[derive(Debug, Error)]
pub enum PreviewError {
	/// The requested range starts after it ends.
	#[error("cannot preview inverted range {0}")]
	InvertedRange(Range),
}

/// Errors that can occur when loading preview configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A value parsed but is out of its accepted range.
	#[error("invalid configuration: {0}")]
	Invalid(String),
}

/// Errors reported by a typesetting engine for a single render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesetError {
	/// The markup could not be typeset (usually incomplete input mid-edit).
	#[error("markup error: {0}")]
	Markup(String),

	/// The engine itself failed.
	#[error("engine failure: {0}")]
	Engine(String),
}

/// Result type for preview operations.
pub type Result<T> = std::result::Result<T, PreviewError>;
