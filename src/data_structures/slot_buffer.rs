/// A growable list whose entries can be vacated in place.
///
/// Vacating leaves a tombstone behind instead of shifting the following entries,
/// so positions handed out by [push](SlotBuffer::push) stay valid while the buffer is
/// being walked, even if the walk itself appends or vacates entries.
/// Tombstones are only reclaimed by [compact](SlotBuffer::compact).
pub struct SlotBuffer<T> {
	slots: Vec<Option<T>>,
	occupied: usize,
}

impl<T> SlotBuffer<T> {
	pub fn new() -> Self {
		Self {
			slots: Vec::new(),
			occupied: 0,
		}
	}

	/// Appends a value and returns its position.
	pub fn push(&mut self, value: T) -> usize {
		self.slots.push(Some(value));
		self.occupied += 1;
		self.slots.len() - 1
	}

	/// Gets the value at `index`, or [None] if the slot was vacated or never existed.
	pub fn get(&self, index: usize) -> Option<&T> {
		self.slots.get(index)?.as_ref()
	}

	/// Vacates the slot at `index` and returns its value.
	pub fn take(&mut self, index: usize) -> Option<T> {
		let value = self.slots.get_mut(index)?.take()?;
		self.occupied -= 1;
		Some(value)
	}

	/// Vacates the slot at `index` if its value satisfies `predicate`.
	pub fn take_if(&mut self, index: usize, predicate: impl FnOnce(&T) -> bool) -> Option<T> {
		match self.get(index) {
			Some(value) if predicate(value) => self.take(index),
			_ => None,
		}
	}

	/// Vacates every slot whose value satisfies `predicate` and returns how many were vacated.
	pub fn vacate_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
		let mut vacated = 0;
		for slot in self.slots.iter_mut() {
			if slot.as_ref().map_or(false, &mut predicate) {
				*slot = None;
				vacated += 1;
			}
		}

		self.occupied -= vacated;
		vacated
	}

	/// Drops every tombstone, preserving the order of the remaining values.
	pub fn compact(&mut self) {
		if self.occupied != self.slots.len() {
			self.slots.retain(Option::is_some);
		}
	}

	/// Number of slots, including vacated ones.
	pub fn slot_count(&self) -> usize {
		self.slots.len()
	}

	/// Number of occupied slots.
	pub fn len(&self) -> usize {
		self.occupied
	}

	pub fn is_empty(&self) -> bool {
		self.occupied == 0
	}

	/// Iterates over the occupied slots in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &T> {
		self.slots.iter().flatten()
	}
}

impl<T> Default for SlotBuffer<T> {
	fn default() -> Self {
		Self::new()
	}
}
