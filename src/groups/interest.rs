use crate::components::{Component, ComponentId, ComponentSet};
use crate::events::{ComponentEvent, EventKind, Listener};
use crate::data_structures::BitField;
use std::rc::Rc;
use std::fmt;

/// How the component kinds of an [InterestConfig] take part in matching.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum InterestType {
	/// At least one of the kinds must be active on the entity.
	#[default]
	Required,
	/// None of the kinds may be active on the entity.
	Exclude,
	/// The kinds never affect membership, but the owning system is told when they are
	/// added to or removed from a member entity.
	Unessential,
}

/// A listener that is subscribed for as long as the owning system is initialized.
#[derive(Clone)]
pub struct ListenerConfig {
	pub kind: EventKind,
	pub listener: Listener,
}

/// One slot of an [Interest]: a component kind, or a set of alternative kinds,
/// plus the listeners to subscribe for them.
#[derive(Clone)]
pub struct InterestConfig {
	components: Vec<ComponentId>,
	mask: BitField,
	interest_type: InterestType,
	listeners: Vec<ListenerConfig>,
}

impl InterestConfig {
	/// Requires a single [component](Component) kind.
	pub fn of<T: Component>() -> Self {
		Self::from_ids(vec![T::component_id()])
	}

	/// Requires any one of the kinds in `S`.
	pub fn any_of<S: ComponentSet>() -> Self {
		Self::from_ids(S::component_ids())
	}

	pub fn from_ids(mut components: Vec<ComponentId>) -> Self {
		components.sort();
		components.dedup();

		Self {
			mask: BitField::from(components.as_slice()),
			components,
			interest_type: InterestType::Required,
			listeners: Vec::new(),
		}
	}

	pub fn with_type(mut self, interest_type: InterestType) -> Self {
		self.interest_type = interest_type;
		self
	}

	/// Shorthand for [`with_type(InterestType::Exclude)`](InterestConfig::with_type).
	pub fn exclude(self) -> Self {
		self.with_type(InterestType::Exclude)
	}

	/// Shorthand for [`with_type(InterestType::Unessential)`](InterestConfig::with_type).
	pub fn unessential(self) -> Self {
		self.with_type(InterestType::Unessential)
	}

	/// Adds a listener for `kind` events about every kind of this config.
	pub fn listen(mut self, kind: EventKind, listener: impl Fn(&ComponentEvent<'_>) + 'static) -> Self {
		self.listeners.push(ListenerConfig {
			kind,
			listener: Rc::new(listener),
		});
		self
	}

	pub fn components(&self) -> &[ComponentId] {
		&self.components
	}

	pub fn interest_type(&self) -> InterestType {
		self.interest_type
	}

	pub fn listeners(&self) -> &[ListenerConfig] {
		&self.listeners
	}

	/// Checks the slot against a mask of active components.
	pub fn matches(&self, active: &BitField) -> bool {
		match self.interest_type {
			InterestType::Required => self.mask.intersects(active),
			InterestType::Exclude => !self.mask.intersects(active),
			InterestType::Unessential => true,
		}
	}
}

impl fmt::Debug for InterestConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InterestConfig")
			.field("components", &self.components)
			.field("interest_type", &self.interest_type)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

/// An AND-combined list of [InterestConfigs](InterestConfig). Each interest is tracked by one
/// [InterestGroup](crate::groups::InterestGroup).
///
/// An interest without any [Required](InterestType::Required) config matches no entity.
#[derive(Clone, Debug, Default)]
pub struct Interest {
	configs: Vec<InterestConfig>,
	kinds: Vec<ComponentId>,
	unessential: BitField,
}

impl Interest {
	pub fn new(configs: Vec<InterestConfig>) -> Self {
		let mut kinds: Vec<ComponentId> = configs.iter().flat_map(|c| c.components.iter().copied()).collect();
		kinds.sort();
		kinds.dedup();

		let mut unessential = BitField::new();
		for config in configs.iter().filter(|c| c.interest_type == InterestType::Unessential) {
			for id in &config.components {
				unessential.set(id.value(), true);
			}
		}

		Self { configs, kinds, unessential }
	}

	pub fn configs(&self) -> &[InterestConfig] {
		&self.configs
	}

	/// Every component kind mentioned by any config, without duplicates.
	pub fn component_kinds(&self) -> &[ComponentId] {
		&self.kinds
	}

	pub fn is_unessential(&self, component: ComponentId) -> bool {
		self.unessential.get(component.value())
	}

	/// The [Unessential](InterestType::Unessential) kinds raised in `active`.
	pub(crate) fn unessential_in<'l>(&'l self, active: &'l BitField) -> impl Iterator<Item = ComponentId> + 'l {
		self.unessential.iter_ones().filter(|i| active.get(*i)).map(ComponentId::from_value)
	}

	/// Checks whether an entity with the `active` components belongs to the interest.
	pub fn matches(&self, active: &BitField) -> bool {
		self.configs.iter().any(|c| c.interest_type == InterestType::Required)
			&& self.configs.iter().all(|c| c.matches(active))
	}
}

/// Everything a system is interested in: zero or more [Interests](Interest), each matched
/// independently (OR-combined across groups).
#[derive(Clone, Debug, Default)]
pub struct Interests {
	interests: Vec<Interest>,
}

impl Interests {
	/// No interest at all; the system will own no groups.
	pub fn none() -> Self {
		Self::default()
	}

	/// A single AND-combined list, normalized into a one-element list of lists.
	pub fn single(configs: Vec<InterestConfig>) -> Self {
		Self::any(vec![configs])
	}

	/// Several independent lists, one group each.
	pub fn any(lists: Vec<Vec<InterestConfig>>) -> Self {
		Self {
			interests: lists.into_iter().map(Interest::new).collect(),
		}
	}

	pub fn len(&self) -> usize {
		self.interests.len()
	}

	pub fn is_empty(&self) -> bool {
		self.interests.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Interest> {
		self.interests.iter()
	}
}

impl IntoIterator for Interests {
	type Item = Interest;
	type IntoIter = std::vec::IntoIter<Interest>;

	fn into_iter(self) -> Self::IntoIter {
		self.interests.into_iter()
	}
}

impl From<Vec<InterestConfig>> for Interests {
	fn from(configs: Vec<InterestConfig>) -> Self {
		match configs.is_empty() {
			true => Self::none(),
			false => Self::single(configs),
		}
	}
}

impl From<Vec<Vec<InterestConfig>>> for Interests {
	fn from(lists: Vec<Vec<InterestConfig>>) -> Self {
		Self::any(lists)
	}
}
