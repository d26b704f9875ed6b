//! Single-mask transition detection

use crate::bits::BitWord;

/// Reports whether any bit under a fixed mask changed since the previous sample.
///
/// The detector only ever remembers the masked part of the last sample, so
/// unmasked bits never influence the result.
///
/// # Examples
///
/// ```
/// use bitwatch_signals::EdgeDetector;
///
/// let mut detector = EdgeDetector::new(0b0000_0011_u8);
///
/// assert!(!detector.sample(0b0000_0000));
/// assert!(detector.sample(0b0000_0010));
/// assert!(!detector.sample(0b0000_0010));
/// assert!(!detector.sample(0b1111_0010)); // only unmasked bits moved
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDetector<T: BitWord> {
	mask: T,
	last_value: T,
}

impl<T: BitWord> EdgeDetector<T> {
	/// Create a detector seeded with an all-zero previous sample
	pub fn new(mask: T) -> Self {
		Self::with_initial(mask, T::ZERO)
	}

	/// Create a detector seeded with `initial` as the previous sample
	pub fn with_initial(mask: T, initial: T) -> Self {
		Self {
			mask,
			last_value: initial & mask,
		}
	}

	pub fn mask(&self) -> T {
		self.mask
	}

	/// The most recent sample, masked
	pub fn last_value(&self) -> T {
		self.last_value
	}

	/// Feed a new sample; returns `true` if any masked bit differs from the
	/// previous sample.
	pub fn sample(&mut self, value: T) -> bool {
		!self.changed_bits(value).is_zero()
	}

	/// Feed a new sample and return exactly which masked bits flipped.
	///
	/// State is updated the same way as [`EdgeDetector::sample`].
	pub fn changed_bits(&mut self, value: T) -> T {
		let masked = value & self.mask;
		let changed = self.last_value ^ masked;
		self.last_value = masked;
		changed
	}

	/// Reseed the previous sample without reporting a transition
	pub fn reset(&mut self, initial: T) {
		self.last_value = initial & self.mask;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_reference_sequence() {
		// Arrange
		let mut detector = EdgeDetector::new(0b0000_0011_u8);
		let samples = [0b0000_0000, 0b0000_0010, 0b0000_0010, 0b0000_0000, 0b0000_0001];

		// Act
		let results: Vec<bool> = samples.iter().map(|&v| detector.sample(v)).collect();

		// Assert
		assert_eq!(results, vec![false, true, false, true, true]);
	}

	#[rstest]
	fn test_initial_value_is_masked() {
		// Arrange & Act
		let detector = EdgeDetector::with_initial(0b0000_1111_u8, 0b1010_1010);

		// Assert
		assert_eq!(detector.last_value(), 0b0000_1010);
		assert_eq!(detector.last_value() & detector.mask(), detector.last_value());
	}

	#[rstest]
	fn test_first_sample_matching_initial_reports_no_change() {
		// Arrange
		let mut detector = EdgeDetector::with_initial(0xF0_u8, 0x30);

		// Act
		let changed = detector.sample(0x3F);

		// Assert
		assert!(!changed);
	}

	#[rstest]
	fn test_zero_mask_never_reports_change() {
		// Arrange
		let mut detector = EdgeDetector::new(0_u32);

		// Act
		let any_change = [0, u32::MAX, 0, 0x1234_5678]
			.into_iter()
			.any(|v| detector.sample(v));

		// Assert
		assert!(!any_change);
		assert_eq!(detector.last_value(), 0);
	}

	#[rstest]
	fn test_changed_bits_reports_flipped_positions() {
		// Arrange
		let mut detector = EdgeDetector::with_initial(0b0000_1111_u8, 0b0000_0101);

		// Act
		let changed = detector.changed_bits(0b1111_0110);

		// Assert
		assert_eq!(changed, 0b0000_0011);
		assert_eq!(detector.last_value(), 0b0000_0110);
	}

	#[rstest]
	fn test_reset_suppresses_transition() {
		// Arrange
		let mut detector = EdgeDetector::new(0xFF_u16);
		detector.sample(0x00);

		// Act
		detector.reset(0x0F);

		// Assert
		assert!(!detector.sample(0x0F));
		assert!(detector.sample(0x00));
	}
}
