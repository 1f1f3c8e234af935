use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// User-tunable rename behavior.
///
/// Loaded from TOML; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameConfig {
	/// Grace period before the progress indicator appears while edits are
	/// being computed.
	pub progress_delay_ms: u64,
	/// Announce the apply summary through the accessibility notifier.
	pub announce_summary: bool,
	/// Strip surrounding whitespace from the confirmed name.
	pub trim_new_name: bool,
}

impl Default for RenameConfig {
	fn default() -> Self {
		Self {
			progress_delay_ms: 250,
			announce_summary: true,
			trim_new_name: true,
		}
	}
}

impl RenameConfig {
	/// Parses a config from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn progress_delay(&self) -> Duration {
		Duration::from_millis(self.progress_delay_ms)
	}
}
