use crate::data_structures::BitField;
use std::iter::repeat;

/// A unique handle to an `Entity`.
///
/// Handles are generational: once an entity is destroyed its index may be recycled,
/// but handles to the destroyed entity keep their old version and are rejected.
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Entity {
	pub(crate) index: u32,
	pub(crate) version: u32,
}

impl Entity {
	#[inline(always)]
	pub fn index(&self) -> u32 {
		self.index
	}

	#[inline(always)]
	pub fn version(&self) -> u32 {
		self.version
	}
}

/// Per-entity bookkeeping, stored as parallel columns indexed by [Entity::index].
#[derive(Default)]
pub(crate) struct EntityInstanceVec {
	pub(crate) versions: Vec<u32>,
	pub(crate) alive: BitField,
	/// Components that are both attached and enabled.
	pub(crate) active: Vec<BitField>,
}

impl EntityInstanceVec {
	pub fn len(&self) -> usize {
		self.versions.len()
	}

	pub fn entity(&self, index: usize) -> Entity {
		Entity {
			index: index as u32,
			version: self.versions[index],
		}
	}

	/// Returns the index of `entity` if the handle still refers to a living entity.
	#[inline(always)]
	pub fn index_of(&self, entity: Entity) -> Option<usize> {
		let index = entity.index as usize;
		let alive = self.alive.get(index) && self.versions.get(index) == Some(&entity.version);
		alive.then_some(index)
	}

	pub fn reserve(&mut self, count: usize) {
		self.versions.extend(repeat(1).take(count));
		self.active.extend(repeat(BitField::new()).take(count));
		self.alive.ensure_capacity(self.versions.len());
	}
}
