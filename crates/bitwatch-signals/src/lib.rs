//! # Bitwatch Signals
//!
//! Edge detection for multi-bit digital values such as GPIO registers,
//! status words or hardware flag banks. A sampled integer is treated as a
//! vector of independent boolean signals.
//!
//! ## Overview
//!
//! - [`EdgeDetector`]: reports whether any bit under a single mask changed
//!   since the previous sample.
//! - [`EdgeRouter`]: tracks the last state of every bit and notifies each
//!   observer whose mask overlaps the flipped bits, exactly once per sample.
//! - `SharedEdgeRouter`: the same router behind a mutex, for callers that
//!   sample from several threads (`shared` feature, enabled by default).
//!
//! ## Architecture
//!
//! ```text
//! caller ─ sample(value) ─→ per-bit state ─→ changed bits ─→ pending set ─→ observers
//!                                                             (deduplicated)
//! ```
//!
//! Nothing here polls hardware: every operation is a pure step over the
//! samples supplied by the caller.
//!
//! ## Observer failures
//!
//! A panicking or failing observer never stops the fan-out to the other
//! observers of the same sample and never reaches the caller of
//! [`EdgeRouter::sample`]. Failures are logged through `tracing` and are
//! available from [`EdgeRouter::sample_with_report`].

pub mod bits;
pub mod detector;
pub mod error;
pub mod router;
pub mod settings;
#[cfg(feature = "shared")]
pub mod shared;

pub use bits::{BitWord, SetBits};
pub use detector::EdgeDetector;
pub use error::{ObserverError, SignalError, SignalResult};
pub use router::{DispatchReport, EdgeRouter, ObserverFailure, ObserverFn, ObserverId};
pub use settings::RouterSettings;
#[cfg(feature = "shared")]
pub use shared::SharedEdgeRouter;
