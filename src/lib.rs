//! # Bitwatch
//!
//! Selective edge detection for multi-bit digital values.
//!
//! A sampled integer (a GPIO register, a status word, a hardware flag bank) is
//! treated as a vector of independent boolean signals. Observers register
//! interest in a subset of bits through a mask and are notified only when a
//! bit they care about actually flips.
//!
//! ## Feature Flags
//!
//! - `shared` (default) - `SharedEdgeRouter`, a mutex-guarded router handle
//!   for samplers running on several threads
//!
//! ## Quick Example
//!
//! ```rust
//! use bitwatch::prelude::*;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//!
//! // Single mask: did bit 0 or bit 1 move?
//! let mut detector = EdgeDetector::new(0b0000_0011_u8);
//! assert!(!detector.sample(0b0000_0000));
//! assert!(detector.sample(0b0000_0010));
//!
//! // Many observers, each with its own mask
//! let fired = Arc::new(AtomicBool::new(false));
//! let flag = fired.clone();
//! let mut router = EdgeRouter::<u8>::new();
//! router.add(0b1000_0001, move |_value| flag.store(true, Ordering::SeqCst));
//!
//! router.sample(0b1000_0000);
//! assert!(fired.load(Ordering::SeqCst));
//! ```
//!
//! Sampling is synchronous and never fails. Observers that panic or return an
//! error are contained at the dispatch boundary; see
//! [`EdgeRouter::sample_with_report`](signals::EdgeRouter::sample_with_report).

pub mod signals;

pub use signals::{
	BitWord, DispatchReport, EdgeDetector, EdgeRouter, ObserverError, ObserverFailure, ObserverId,
	RouterSettings, SignalError, SignalResult,
};

#[cfg(feature = "shared")]
pub use signals::SharedEdgeRouter;

/// Commonly used types
pub mod prelude {
	pub use crate::{
		BitWord, DispatchReport, EdgeDetector, EdgeRouter, ObserverError, ObserverId,
		RouterSettings,
	};

	#[cfg(feature = "shared")]
	pub use crate::SharedEdgeRouter;
}
