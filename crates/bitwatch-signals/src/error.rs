//! Error types for bit signal routing

use crate::router::ObserverId;
use thiserror::Error;

/// Errors that can occur while managing observers or loading settings.
///
/// Sampling itself never fails: observer failures are contained at the
/// dispatch boundary and reported as [`ObserverError`] values instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
	/// The handle does not refer to a registered observer.
	#[error("Observer not found: {0}")]
	ObserverNotFound(ObserverId),

	/// A bit index outside the word width was requested.
	#[error("Bit {bit} is out of range for a {width}-bit word")]
	BitOutOfRange {
		/// Requested bit index.
		bit: u32,
		/// Width of the sampled word.
		width: u32,
	},

	/// Settings could not be parsed.
	#[error("Settings error: {0}")]
	Settings(String),
}

/// Failure raised by a single observer during dispatch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObserverError {
	/// The observer returned an error.
	#[error("Observer failed: {0}")]
	Failed(String),

	/// The observer panicked.
	#[error("Observer panicked: {0}")]
	Panicked(String),
}

impl ObserverError {
	/// Create a failure with a message
	pub fn new(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}

	/// Build an error from a panic payload captured by `catch_unwind`.
	pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
		let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
			(*s).to_string()
		} else if let Some(s) = payload.downcast_ref::<String>() {
			s.clone()
		} else {
			"non-string panic payload".to_string()
		};
		Self::Panicked(message)
	}
}

/// Result type alias for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;
