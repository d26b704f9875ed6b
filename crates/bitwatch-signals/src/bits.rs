//! Fixed-width words treated as vectors of independent bits

use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// A fixed-width unsigned integer sampled as a bank of boolean signals.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. The width is derived from
/// the size of the type.
///
/// # Examples
///
/// ```
/// use bitwatch_signals::BitWord;
///
/// assert_eq!(<u8 as BitWord>::BITS, 8);
/// assert!(0b0000_0100_u8.bit(2));
/// assert_eq!(0b1000_0001_u8.set_bits().collect::<Vec<_>>(), vec![0, 7]);
/// ```
pub trait BitWord:
	Copy
	+ Eq
	+ Hash
	+ fmt::Debug
	+ fmt::Binary
	+ Send
	+ 'static
	+ BitAnd<Output = Self>
	+ BitOr<Output = Self>
	+ BitXor<Output = Self>
	+ Not<Output = Self>
{
	/// Number of bits in the word
	const BITS: u32;

	/// The all-zero word
	const ZERO: Self;

	/// Widen to `u64`
	fn to_u64(self) -> u64;

	/// Narrow from `u64`, dropping bits above the word width
	fn from_u64_truncating(value: u64) -> Self;

	/// Whether bit `index` is set. Indices at or beyond `BITS` read as unset.
	fn bit(self, index: u32) -> bool {
		index < Self::BITS && (self.to_u64() >> index) & 1 == 1
	}

	/// Word with only bit `index` set. Indices at or beyond `BITS` yield zero.
	fn single(index: u32) -> Self {
		if index < Self::BITS {
			Self::from_u64_truncating(1_u64 << index)
		} else {
			Self::ZERO
		}
	}

	fn is_zero(self) -> bool {
		self == Self::ZERO
	}

	/// Indices of the set bits, least significant first.
	fn set_bits(self) -> SetBits {
		SetBits {
			remaining: self.to_u64(),
		}
	}
}

/// Iterator over set bit indices of a word, see [`BitWord::set_bits`].
#[derive(Debug, Clone)]
pub struct SetBits {
	remaining: u64,
}

impl Iterator for SetBits {
	type Item = u32;

	fn next(&mut self) -> Option<u32> {
		if self.remaining == 0 {
			return None;
		}
		let index = self.remaining.trailing_zeros();
		self.remaining &= self.remaining - 1;
		Some(index)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let count = self.remaining.count_ones() as usize;
		(count, Some(count))
	}
}

impl ExactSizeIterator for SetBits {}

macro_rules! impl_bit_word {
	($($ty:ty),* $(,)?) => {
		$(
			impl BitWord for $ty {
				const BITS: u32 = <$ty>::BITS;
				const ZERO: Self = 0;

				fn to_u64(self) -> u64 {
					u64::from(self)
				}

				fn from_u64_truncating(value: u64) -> Self {
					value as $ty
				}
			}
		)*
	};
}

impl_bit_word!(u8, u16, u32, u64);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case::byte(<u8 as BitWord>::BITS, 8)]
	#[case::half(<u16 as BitWord>::BITS, 16)]
	#[case::word(<u32 as BitWord>::BITS, 32)]
	#[case::wide(<u64 as BitWord>::BITS, 64)]
	fn test_width_matches_type_size(#[case] bits: u32, #[case] expected: u32) {
		assert_eq!(bits, expected);
	}

	#[rstest]
	fn test_set_bits_least_significant_first() {
		// Arrange
		let word: u16 = 0b1000_0000_0010_0101;

		// Act
		let bits: Vec<u32> = word.set_bits().collect();

		// Assert
		assert_eq!(bits, vec![0, 2, 5, 15]);
		assert_eq!(word.set_bits().len(), 4);
	}

	#[rstest]
	fn test_set_bits_of_zero_is_empty() {
		assert_eq!(0_u32.set_bits().next(), None);
	}

	#[rstest]
	fn test_bit_beyond_width_reads_unset() {
		// Arrange
		let word = u8::MAX;

		// Act & Assert
		assert!(word.bit(7));
		assert!(!word.bit(8));
		assert_eq!(<u8 as BitWord>::single(8), 0);
	}

	#[rstest]
	fn test_top_bit_of_u64() {
		// Arrange
		let word = <u64 as BitWord>::single(63);

		// Act
		let bits: Vec<u32> = word.set_bits().collect();

		// Assert
		assert_eq!(word, 1_u64 << 63);
		assert_eq!(bits, vec![63]);
	}

	#[rstest]
	fn test_truncating_conversion() {
		assert_eq!(<u8 as BitWord>::from_u64_truncating(0x1_0F), 0x0F);
		assert_eq!(<u16 as BitWord>::from_u64_truncating(0xABCD_1234), 0x1234);
	}
}
