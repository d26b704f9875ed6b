//! Multi-observer transition routing
//!
//! [`EdgeRouter`] keeps the last observed state of every bit of a word and a
//! registry of observers, each interested in its own subset of bits. Every
//! sample computes the flipped bits once and notifies each affected observer
//! exactly once.
//!
//! Observers are identified by the [`ObserverId`] handle returned on
//! registration, never by comparing closures. Registering the same observer
//! for more bits goes through [`EdgeRouter::extend`].
//!
//! # Examples
//!
//! ```
//! use bitwatch_signals::EdgeRouter;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let counter = hits.clone();
//!
//! let mut router = EdgeRouter::<u8>::new();
//! router.add(0b0000_0011, move |_value| {
//! 	counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! router.sample(0b0000_0011); // both watched bits flip, one notification
//! router.sample(0b1000_0011); // unwatched bit only
//!
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! ```

use crate::bits::BitWord;
use crate::error::{ObserverError, SignalError, SignalResult};
use crate::settings::RouterSettings;
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

const DEFAULT_ROUTER_NAME: &str = "edge_router";

/// Stable handle for a registered observer.
///
/// Handles are allocated in increasing order, so comparing two handles
/// compares their registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Display for ObserverId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Observer callback type
pub type ObserverFn<T> = Box<dyn FnMut(T) -> Result<(), ObserverError> + Send>;

struct ObserverEntry<T: BitWord> {
	callback: ObserverFn<T>,
	mask: T,
}

#[derive(Debug, Default, Clone)]
struct BitSlot {
	last: bool,
	observers: IndexSet<ObserverId>,
}

/// An observer failure contained during dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverFailure {
	pub id: ObserverId,
	pub error: ObserverError,
}

/// Outcome of a single dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport<T: BitWord> {
	/// The sampled value, as passed to every observer
	pub value: T,
	/// Bits that flipped relative to the previous sample
	pub changed: T,
	/// Observers that completed successfully, in invocation order
	pub notified: Vec<ObserverId>,
	/// Observers that returned an error or panicked
	pub failures: Vec<ObserverFailure>,
}

impl<T: BitWord> DispatchReport<T> {
	/// Number of observers invoked, successful or not
	pub fn invoked_count(&self) -> usize {
		self.notified.len() + self.failures.len()
	}

	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}
}

/// Routes bit transitions of successive samples to interested observers.
///
/// The per-bit state starts as all `false` unless seeded through
/// [`EdgeRouter::with_initial`] or [`RouterSettings::initial_state`].
pub struct EdgeRouter<T: BitWord> {
	bits: Vec<BitSlot>,
	observers: IndexMap<ObserverId, ObserverEntry<T>>,
	next_id: u64,
	name: Option<String>,
	log_observer_failures: bool,
}

impl<T: BitWord> EdgeRouter<T> {
	/// Create a router with every bit assumed low
	pub fn new() -> Self {
		Self {
			bits: vec![BitSlot::default(); T::BITS as usize],
			observers: IndexMap::new(),
			next_id: 0,
			name: None,
			log_observer_failures: true,
		}
	}

	/// Create a router whose per-bit state is seeded from `initial`
	pub fn with_initial(initial: T) -> Self {
		let mut router = Self::new();
		for (index, slot) in router.bits.iter_mut().enumerate() {
			slot.last = initial.bit(index as u32);
		}
		router
	}

	/// Create a router from settings
	///
	/// # Examples
	///
	/// ```
	/// use bitwatch_signals::{EdgeRouter, RouterSettings};
	///
	/// let settings = RouterSettings::new().with_name("status").with_initial_state(0x1FF);
	/// let router = EdgeRouter::<u8>::from_settings(&settings);
	///
	/// assert_eq!(router.name(), Some("status"));
	/// assert_eq!(router.last_value(), 0xFF);
	/// ```
	pub fn from_settings(settings: &RouterSettings) -> Self {
		let mut router = Self::with_initial(T::from_u64_truncating(settings.initial_state));
		router.name = settings.name.clone();
		router.log_observer_failures = settings.log_observer_failures;
		router
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Number of registered observers
	pub fn observer_count(&self) -> usize {
		self.observers.len()
	}

	/// The last observed state of every bit, reassembled into a word
	pub fn last_value(&self) -> T {
		self.bits
			.iter()
			.enumerate()
			.filter(|(_, slot)| slot.last)
			.fold(T::ZERO, |word, (index, _)| word | T::single(index as u32))
	}

	/// Combined mask an observer is registered under
	pub fn mask_of(&self, id: ObserverId) -> Option<T> {
		self.observers.get(&id).map(|entry| entry.mask)
	}

	/// Observers registered at a bit position, in registration order
	///
	/// # Errors
	///
	/// Returns [`SignalError::BitOutOfRange`] if `bit` is not below the word width.
	pub fn observers_at(&self, bit: u32) -> SignalResult<Vec<ObserverId>> {
		let slot = self.bits.get(bit as usize).ok_or(SignalError::BitOutOfRange {
			bit,
			width: T::BITS,
		})?;
		let mut ids: Vec<ObserverId> = slot.observers.iter().copied().collect();
		ids.sort_unstable();
		Ok(ids)
	}

	/// Register an observer for every bit set in `mask`
	///
	/// Each call registers a new, distinct observer. Use [`EdgeRouter::extend`]
	/// to widen the interest of an observer that is already registered.
	pub fn add<F>(&mut self, mask: T, mut observer: F) -> ObserverId
	where
		F: FnMut(T) + Send + 'static,
	{
		self.add_fallible(mask, move |value| {
			observer(value);
			Ok(())
		})
	}

	/// Register an observer that may report failure
	///
	/// Errors returned by the observer are contained like panics: they are
	/// collected into the [`DispatchReport`] and never reach the caller of
	/// [`EdgeRouter::sample`].
	pub fn add_fallible<F>(&mut self, mask: T, observer: F) -> ObserverId
	where
		F: FnMut(T) -> Result<(), ObserverError> + Send + 'static,
	{
		let id = ObserverId(self.next_id);
		self.next_id += 1;
		self.observers.insert(
			id,
			ObserverEntry {
				callback: Box::new(observer),
				mask: T::ZERO,
			},
		);
		self.attach(id, mask);

		tracing::trace!(
			router = self.display_name(),
			observer = %id,
			mask = mask.to_u64(),
			"observer registered"
		);
		id
	}

	/// Associate an existing observer with the additional bits in `mask`
	///
	/// Registrations are additive: the observer ends up watching the union
	/// of all of its masks and is still notified at most once per sample.
	///
	/// # Errors
	///
	/// Returns [`SignalError::ObserverNotFound`] if `id` is not registered.
	pub fn extend(&mut self, id: ObserverId, mask: T) -> SignalResult<()> {
		if !self.observers.contains_key(&id) {
			return Err(SignalError::ObserverNotFound(id));
		}
		self.attach(id, mask);
		Ok(())
	}

	/// Unregister an observer from every bit
	///
	/// The per-bit state is not affected.
	///
	/// # Errors
	///
	/// Returns [`SignalError::ObserverNotFound`] if `id` is not registered.
	pub fn remove(&mut self, id: ObserverId) -> SignalResult<()> {
		let entry = self
			.observers
			.shift_remove(&id)
			.ok_or(SignalError::ObserverNotFound(id))?;
		for bit in entry.mask.set_bits() {
			self.bits[bit as usize].observers.swap_remove(&id);
		}
		Ok(())
	}

	/// Feed a new sample and notify every observer watching a flipped bit
	pub fn sample(&mut self, value: T) {
		self.sample_with_report(value);
	}

	/// Feed a new sample and report what was dispatched
	///
	/// All flipped bits are resolved into the pending notification set before
	/// the first observer runs. Each pending observer is then invoked once,
	/// in registration order, with the full unmasked `value`.
	pub fn sample_with_report(&mut self, value: T) -> DispatchReport<T> {
		let mut changed = T::ZERO;
		let mut pending: IndexSet<ObserverId> = IndexSet::new();

		for (index, slot) in self.bits.iter_mut().enumerate() {
			let bit = index as u32;
			let new_value = value.bit(bit);
			if slot.last != new_value {
				pending.extend(slot.observers.iter().copied());
				slot.last = new_value;
				changed = changed | T::single(bit);
			}
		}
		pending.sort();

		if !changed.is_zero() {
			tracing::debug!(
				router = self.display_name(),
				value = value.to_u64(),
				changed = changed.to_u64(),
				observers = pending.len(),
				"dispatching bit transitions"
			);
		}

		let mut report = DispatchReport {
			value,
			changed,
			notified: Vec::with_capacity(pending.len()),
			failures: Vec::new(),
		};

		for id in pending {
			let Some(entry) = self.observers.get_mut(&id) else {
				continue;
			};
			match invoke(&mut entry.callback, value) {
				Ok(()) => report.notified.push(id),
				Err(error) => {
					if self.log_observer_failures {
						tracing::warn!(
							router = self.name.as_deref().unwrap_or(DEFAULT_ROUTER_NAME),
							observer = %id,
							error = %error,
							"observer failed during dispatch"
						);
					}
					report.failures.push(ObserverFailure { id, error });
				}
			}
		}

		report
	}

	fn attach(&mut self, id: ObserverId, mask: T) {
		for bit in mask.set_bits() {
			self.bits[bit as usize].observers.insert(id);
		}
		if let Some(entry) = self.observers.get_mut(&id) {
			entry.mask = entry.mask | mask;
		}
	}

	fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or(DEFAULT_ROUTER_NAME)
	}
}

/// Run one observer inside a failure boundary
fn invoke<T: BitWord>(callback: &mut ObserverFn<T>, value: T) -> Result<(), ObserverError> {
	match catch_unwind(AssertUnwindSafe(|| callback(value))) {
		Ok(result) => result,
		Err(payload) => Err(ObserverError::from_panic(payload)),
	}
}

impl<T: BitWord> Default for EdgeRouter<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: BitWord> fmt::Debug for EdgeRouter<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EdgeRouter")
			.field("name", &self.name)
			.field("last_value", &self.last_value())
			.field("observers", &self.observers.keys().collect::<Vec<_>>())
			.finish()
	}
}
