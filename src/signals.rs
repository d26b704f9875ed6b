//! Edge detection and observer routing module.
//!
//! This module provides access to the detector, the router and their
//! settings and error types.
//!
//! # Examples
//!
//! ```rust
//! use bitwatch::signals::{EdgeRouter, RouterSettings};
//!
//! let router = EdgeRouter::<u16>::from_settings(&RouterSettings::new().with_name("status"));
//! assert_eq!(router.name(), Some("status"));
//! ```

pub use bitwatch_signals::*;
