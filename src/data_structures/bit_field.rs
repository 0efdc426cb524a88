use std::hash::{Hash, Hasher};
use std::cmp::Ordering;
use std::iter::repeat;
use std::fmt;

const BITS: usize = 32;
const FIRST_BIT: u32 = 1 << (BITS - 1);

/// A dynamically sized bit-field.
///
/// Bits past the end of the backing storage read as unset, so two [BitFields](BitField)
/// holding the same raised bits compare equal regardless of their capacity.
#[derive(Default, Clone)]
pub struct BitField {
	values: Vec<u32>,
}

impl BitField {
	/// Create a new [BitField].
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new [BitField] with the specified capacity.
	///
	/// # Arguments
	/// * `capacity` - A usize representing the container's target capacity in bits
	pub fn with_capacity(capacity: usize) -> Self {
		let mut instance = Self { values: Vec::new() };
		instance.ensure_capacity(capacity);
		instance
	}

	/// Get the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to retrieve
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		let (position, shift) = Self::pos_shift(i);
		match self.values.get(position) {
			Some(value) => (value & (FIRST_BIT >> shift)) != 0,
			None => false,
		}
	}

	/// Set the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to modify
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) {
		let (position, shift) = Self::pos_shift(i);
		let bit = FIRST_BIT >> shift;

		match value {
			true => {
				if self.values.len() <= position {
					self.extend_to_position(position);
				}
				self.values[position] |= bit;
			},

			false => {
				if let Some(bit_value) = self.values.get_mut(position) {
					*bit_value &= !bit;
				}
			},
		}
	}

	/// Check if every bit raised in this [BitField] is also raised in `other`.
	/// An empty [BitField] is a subset of anything.
	///
	/// # Arguments
	/// * `other` - The bitfield to check against
	pub fn is_subset_of(&self, other: &BitField) -> bool {
		self.values.iter().enumerate().all(|(i, mask)| {
			let bits = other.values.get(i).copied().unwrap_or(0);
			(bits & *mask) == *mask
		})
	}

	/// Check if at least one bit is raised in both bitfields.
	///
	/// # Arguments
	/// * `other` - The bitfield to check against
	pub fn intersects(&self, other: &BitField) -> bool {
		self.values.iter().zip(other.values.iter()).any(|(a, b)| (*a & *b) != 0)
	}

	/// Check if no bit is raised.
	pub fn is_empty(&self) -> bool {
		self.values.iter().all(|i| *i == 0)
	}

	/// Number of raised bits.
	pub fn count_ones(&self) -> usize {
		self.values.iter().map(|i| i.count_ones() as usize).sum()
	}

	/// Iterates over the indices of the raised bits in ascending order.
	pub fn iter_ones(&self) -> BitFieldIterator<'_> {
		BitFieldIterator {
			index: 0,
			current: self.values.first().copied().unwrap_or(0),
			values: &self.values,
		}
	}

	/// Set all bits to 0.
	pub fn clear(&mut self) {
		self.values.fill(0);
	}

	/// Set the minimum capacity of the [BitField].
	/// # Arguments
	/// * `capacity` - A usize representing the container's minimum capacity in bits
	pub fn ensure_capacity(&mut self, capacity: usize) {
		if self.values.len() * BITS < capacity {
			let mut count = capacity / BITS;
			if count * BITS < capacity {
				count += 1;
			}
			count -= self.values.len();

			self.values.extend(repeat(0).take(count));
		}
	}

	/// Get the [BitField]'s capacity in bits.
	pub fn capacity(&self) -> usize {
		self.values.len() * BITS
	}

	#[inline(never)]
	fn extend_to_position(&mut self, position: usize) {
		let count = position - self.values.len() + 1;
		self.values.extend(repeat(0).take(count));
	}

	#[inline(always)]
	fn pos_shift(a: usize) -> (usize, usize) {
		(a / BITS, a % BITS)
	}

	fn significant_len(&self) -> usize {
		self.values.iter().rposition(|i| *i != 0).map_or(0, |i| i + 1)
	}
}

impl Eq for BitField {}

impl PartialEq<Self> for BitField {
	fn eq(&self, other: &Self) -> bool {
		let (short, long) = match self.values.len().cmp(&other.values.len()) {
			Ordering::Greater => (&other.values, &self.values),
			_ => (&self.values, &other.values),
		};

		long[0..short.len()].eq(short.as_slice()) && long[short.len()..].iter().all(|i| *i == 0)
	}
}

impl Hash for BitField {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.values[0..self.significant_len()].hash(state);
	}
}

impl fmt::Debug for BitField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter_ones()).finish()
	}
}

/// Iterates over the indices of the raised bits of a [BitField].
pub struct BitFieldIterator<'l> {
	index: usize,
	current: u32,
	values: &'l [u32],
}

impl Iterator for BitFieldIterator<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.current == 0 {
			self.index += 1;
			self.current = *self.values.get(self.index)?;
		}

		let shift = self.current.leading_zeros() as usize;
		self.current &= !(FIRST_BIT >> shift);
		Some(self.index * BITS + shift)
	}
}
