//! Preview controller configuration.
//!
//! Configuration is plain TOML; every field is optional and falls back to
//! the defaults below:
//!
//! ```toml
//! debounce_ms = 300
//!
//! [popup_offset]
//! x = 10
//! y = 10
//! ```

use std::path::Path;
use std::time::Duration;

use mathpeek_primitives::PixelOffset;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Longest accepted debounce before a config is rejected.
pub const MAX_DEBOUNCE: Duration = Duration::from_secs(10);

/// Configuration for a [`RenderCoordinator`](crate::RenderCoordinator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewConfig {
	/// Quiet period after a cursor move before re-rendering, in milliseconds.
	#[serde(default = "default_debounce_ms")]
	pub debounce_ms: u64,
	/// Offset applied to the captured anchor point when the popup is placed.
	#[serde(default = "default_popup_offset")]
	pub popup_offset: PixelOffset,
}

fn default_debounce_ms() -> u64 {
	300
}

fn default_popup_offset() -> PixelOffset {
	PixelOffset::new(10, 10)
}

impl Default for PreviewConfig {
	fn default() -> Self {
		Self {
			debounce_ms: default_debounce_ms(),
			popup_offset: default_popup_offset(),
		}
	}
}

impl PreviewConfig {
	/// Returns the debounce delay as a [`Duration`].
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	/// Parses and validates a TOML string.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Rejects values outside their accepted ranges.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.debounce() > MAX_DEBOUNCE {
			return Err(ConfigError::Invalid(format!(
				"debounce_ms = {} exceeds the {} ms limit",
				self.debounce_ms,
				MAX_DEBOUNCE.as_millis()
			)));
		}
		Ok(())
	}
}
