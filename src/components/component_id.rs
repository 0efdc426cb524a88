//! A unique runtime identifier tied to a [Component] type.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! [Component ids](ComponentId) are generally used for populating the
//! [bitfields](crate::data_structures::BitField) that track which components an
//! [entity](crate::entities::Entity) currently holds.

use std::sync::atomic::Ordering::Relaxed;
use crate::data_structures::BitField;
use std::sync::atomic::AtomicUsize;
use crate::components::Component;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::fmt;

const UNKNOWN: &str = "<unknown>";

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

lazy_static! {
	static ref NAMES: RwLock<Vec<&'static str>> = RwLock::new(Vec::new());
}

/// A globally unique identifier for a type implementing the [`Component`] trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub struct ComponentId {
	value: usize,
}

impl nohash_hasher::IsEnabled for ComponentId {}

impl ComponentId {
	/// Get the [ComponentId] of the type `T`.
	#[inline(always)]
	pub fn of<T: Component>() -> ComponentId {
		T::component_id()
	}

	/// Allocates a new [ComponentId]. **Should not be called from user code.**
	///
	/// Called once per type by the code generated from #\[derive([Component])].
	#[doc(hidden)]
	pub fn register(name: &'static str) -> ComponentId {
		let value = NEXT_ID.fetch_add(1, Relaxed);
		debug_assert!(
			value <= u32::MAX as usize,
			"This is an insane number of components. Please seek help."
		);

		let mut names = NAMES.write();
		if names.len() <= value {
			names.resize(value + 1, UNKNOWN);
		}
		names[value] = name;

		ComponentId { value }
	}

	/// The name of the component type this id was allocated for.
	pub fn name(&self) -> &'static str {
		NAMES.read().get(self.value).copied().unwrap_or(UNKNOWN)
	}

	#[inline(always)]
	pub(crate) const fn value(&self) -> usize {
		self.value
	}

	#[inline(always)]
	pub(crate) const fn from_value(value: usize) -> Self {
		Self { value }
	}
}

impl fmt::Debug for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}#{}", self.name(), self.value)
	}
}

impl From<&[ComponentId]> for BitField {
	fn from(ids: &[ComponentId]) -> Self {
		let mut bitfield = BitField::new();
		for id in ids {
			bitfield.set(id.value(), true);
		}

		bitfield
	}
}
