//! Router settings
//!
//! Settings can be built in code or loaded from a TOML document:
//!
//! ```
//! use bitwatch_signals::RouterSettings;
//!
//! let settings = RouterSettings::from_toml_str(
//! 	r#"
//! 	name = "gpio_bank_a"
//! 	initial_state = 0x81
//! 	log_observer_failures = false
//! 	"#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.name.as_deref(), Some("gpio_bank_a"));
//! assert_eq!(settings.initial_state, 0x81);
//! assert!(!settings.log_observer_failures);
//! ```

use crate::error::{SignalError, SignalResult};
use serde::{Deserialize, Serialize};

/// Configuration for an [`EdgeRouter`](crate::EdgeRouter)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Name reported in log events
	pub name: Option<String>,

	/// Per-bit state assumed before the first sample, truncated to the word width
	pub initial_state: u64,

	/// Emit a warning for every contained observer failure
	pub log_observer_failures: bool,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			name: None,
			initial_state: 0,
			log_observer_failures: true,
		}
	}
}

impl RouterSettings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse settings from a TOML document. Missing keys take their defaults.
	///
	/// # Errors
	///
	/// Returns [`SignalError::Settings`] if the document is not valid TOML or
	/// a key has the wrong type.
	pub fn from_toml_str(source: &str) -> SignalResult<Self> {
		toml::from_str(source).map_err(|e| SignalError::Settings(e.to_string()))
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_initial_state(mut self, initial_state: u64) -> Self {
		self.initial_state = initial_state;
		self
	}

	pub fn with_log_observer_failures(mut self, enabled: bool) -> Self {
		self.log_observer_failures = enabled;
		self
	}
}
