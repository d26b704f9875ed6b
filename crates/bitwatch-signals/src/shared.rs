//! Mutex-guarded router for use from several threads

use crate::bits::BitWord;
use crate::error::{ObserverError, SignalResult};
use crate::router::{DispatchReport, EdgeRouter, ObserverId};
use crate::settings::RouterSettings;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, thread-safe handle to an [`EdgeRouter`]
///
/// Every operation takes the lock for its whole duration, so observers run
/// while the lock is held. An observer must not call back into the same
/// shared router.
///
/// # Examples
///
/// ```
/// use bitwatch_signals::SharedEdgeRouter;
/// use std::thread;
///
/// let router = SharedEdgeRouter::<u32>::new();
/// router.add(0x1, |_| {});
///
/// let worker = router.clone();
/// thread::spawn(move || worker.sample(0x1)).join().unwrap();
///
/// assert_eq!(router.last_value(), 0x1);
/// ```
pub struct SharedEdgeRouter<T: BitWord> {
	inner: Arc<Mutex<EdgeRouter<T>>>,
}

impl<T: BitWord> Clone for SharedEdgeRouter<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T: BitWord> SharedEdgeRouter<T> {
	pub fn new() -> Self {
		Self::from_router(EdgeRouter::new())
	}

	pub fn from_settings(settings: &RouterSettings) -> Self {
		Self::from_router(EdgeRouter::from_settings(settings))
	}

	/// Wrap an existing router
	pub fn from_router(router: EdgeRouter<T>) -> Self {
		Self {
			inner: Arc::new(Mutex::new(router)),
		}
	}

	pub fn add<F>(&self, mask: T, observer: F) -> ObserverId
	where
		F: FnMut(T) + Send + 'static,
	{
		self.inner.lock().add(mask, observer)
	}

	pub fn add_fallible<F>(&self, mask: T, observer: F) -> ObserverId
	where
		F: FnMut(T) -> Result<(), ObserverError> + Send + 'static,
	{
		self.inner.lock().add_fallible(mask, observer)
	}

	pub fn extend(&self, id: ObserverId, mask: T) -> SignalResult<()> {
		self.inner.lock().extend(id, mask)
	}

	pub fn remove(&self, id: ObserverId) -> SignalResult<()> {
		self.inner.lock().remove(id)
	}

	pub fn sample(&self, value: T) {
		self.inner.lock().sample(value);
	}

	pub fn sample_with_report(&self, value: T) -> DispatchReport<T> {
		self.inner.lock().sample_with_report(value)
	}

	pub fn observer_count(&self) -> usize {
		self.inner.lock().observer_count()
	}

	pub fn last_value(&self) -> T {
		self.inner.lock().last_value()
	}
}

impl<T: BitWord> Default for SharedEdgeRouter<T> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::thread;

	#[rstest]
	fn test_clones_share_state() {
		// Arrange
		let router = SharedEdgeRouter::<u8>::new();
		let other = router.clone();

		// Act
		let id = other.add(0b1, |_| {});
		router.sample(0b1);

		// Assert
		assert_eq!(router.observer_count(), 1);
		assert_eq!(other.last_value(), 0b1);
		assert!(router.remove(id).is_ok());
		assert_eq!(other.observer_count(), 0);
	}

	#[rstest]
	fn test_concurrent_samples_keep_state_consistent() {
		// Arrange
		let hits = Arc::new(AtomicUsize::new(0));
		let router = SharedEdgeRouter::<u16>::new();
		router.add(0x0001, {
			let hits = hits.clone();
			move |_| {
				hits.fetch_add(1, Ordering::SeqCst);
			}
		});

		// Act
		let handles: Vec<_> = (0..4)
			.map(|_| {
				let router = router.clone();
				thread::spawn(move || {
					for i in 0..100_u16 {
						router.sample(i & 1);
					}
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		// Assert
		let last = router.last_value();
		let expected_parity = if hits.load(Ordering::SeqCst) % 2 == 1 { 1 } else { 0 };
		assert_eq!(last, expected_parity);
	}

	#[rstest]
	fn test_settings_are_applied() {
		// Arrange
		let settings = RouterSettings::new().with_initial_state(0x80);

		// Act
		let router = SharedEdgeRouter::<u8>::from_settings(&settings);

		// Assert
		assert_eq!(router.last_value(), 0x80);
	}

	#[rstest]
	fn test_fallible_observer_through_shared_handle() {
		// Arrange
		let router = SharedEdgeRouter::<u8>::new();
		let id = router.add_fallible(0b10, |_| Err(ObserverError::new("rejected")));
		router.extend(id, 0b01).unwrap();

		// Act
		let report = router.sample_with_report(0b11);

		// Assert
		assert_eq!(report.failures.len(), 1);
		assert_eq!(report.failures[0].id, id);
	}
}
