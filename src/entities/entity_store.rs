use crate::events::{ComponentEvent, EventKind, EventRegistry};
use crate::components::{Component, ComponentId, ComponentSet};
use crate::data_structures::BitField;
use crate::entities::{Entity, EntityInstanceVec};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use crate::error::EcsError;
use crate::clock::Clock;
use std::any::Any;

type Hasher = BuildHasherDefault<NoHashHasher<usize>>;

/// Type-erased storage for every instance of one [component](Component) type, indexed by entity index.
#[derive(Default)]
struct ComponentColumn {
	values: Vec<Option<Box<dyn Any>>>,
	disabled: BitField,
}

impl ComponentColumn {
	fn get(&self, index: usize) -> Option<&dyn Any> {
		self.values.get(index)?.as_deref()
	}

	fn contains(&self, index: usize) -> bool {
		self.get(index).is_some()
	}
}

/// A container for [entities](Entity) and their [components](Component).
///
/// Every mutation is reported synchronously through the store's [EventRegistry]
/// at the point where it happens.
pub struct EntityStore {
	instances: EntityInstanceVec,
	free: Vec<u32>,
	alive: usize,
	columns: HashMap<ComponentId, ComponentColumn, Hasher>,
	events: EventRegistry,
	clock: Clock,
}

impl EntityStore {
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	/// Creates a store with room for `capacity` entities.
	pub fn with_capacity(capacity: usize) -> Self {
		let mut store = Self {
			instances: EntityInstanceVec::default(),
			free: Vec::with_capacity(capacity),
			alive: 0,
			columns: HashMap::default(),
			events: EventRegistry::new(),
			clock: Clock::new(),
		};

		store.reserve_entity_space(capacity);
		store
	}

	pub(crate) fn with_clock(capacity: usize, clock: Clock) -> Self {
		Self {
			clock,
			..Self::with_capacity(capacity)
		}
	}

	/// Creates a single [entity](Entity) with no [components](Component) attached.
	pub fn create_entity(&mut self) -> Entity {
		let index = match self.free.pop() {
			Some(index) => index as usize,
			None => {
				let capacity = usize::max(1, self.instances.len());
				self.reserve_entity_space(capacity);
				self.free.pop().map_or(0, |index| index as usize)
			},
		};

		self.instances.alive.set(index, true);
		self.alive += 1;
		self.instances.entity(index)
	}

	/// Destroys an [entity](Entity), detaching each of its [components](Component) in ascending id order first.
	/// Every detached component raises [EventKind::Detached].
	pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
		let index = self.index_of(entity)?;

		let mut attached: Vec<ComponentId> = self
			.columns
			.iter()
			.filter(|(_, column)| column.contains(index))
			.map(|(id, _)| *id)
			.collect();
		attached.sort();

		for id in attached {
			self.detach(entity, index, id);
		}

		self.instances.versions[index] = self.instances.versions[index].wrapping_add(1);
		self.instances.alive.set(index, false);
		self.instances.active[index].clear();
		self.free.push(index as u32);
		self.alive -= 1;
		Ok(())
	}

	/// Checks if `entity` still refers to a living [entity](Entity).
	#[inline(always)]
	pub fn is_alive(&self, entity: Entity) -> bool {
		self.instances.index_of(entity).is_some()
	}

	/// Number of living entities.
	pub fn len(&self) -> usize {
		self.alive
	}

	pub fn is_empty(&self) -> bool {
		self.alive == 0
	}

	/// Iterates over every living [entity](Entity) in index order.
	pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
		self.instances.alive.iter_ones().map(|index| self.instances.entity(index))
	}

	/// Attaches a new [component](Component) to the specified [entity](Entity) and raises [EventKind::Attached].
	/// Returns *false*, leaving the existing value untouched, if a component of the same type is already attached.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<bool, EcsError> {
		let index = self.index_of(entity)?;
		let id = T::component_id();

		let column = self.columns.entry(id).or_default();
		if column.contains(index) {
			return Ok(false);
		}

		if column.values.len() <= index {
			column.values.resize_with(index + 1, || None);
		}
		column.values[index] = Some(Box::new(value));
		column.disabled.set(index, false);

		self.instances.active[index].set(id.value(), true);
		self.raise(EventKind::Attached, entity, id, true);
		Ok(true)
	}

	/// Detaches a [component](Component) from the specified [entity](Entity) and returns it.
	/// [EventKind::Detached] is raised while the value can still be read through the store.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<Option<T>, EcsError> {
		let index = self.index_of(entity)?;
		let value = self.detach(entity, index, T::component_id());
		Ok(value.and_then(|value| value.downcast::<T>().ok()).map(|value| *value))
	}

	/// Gets a reference to a [component](Component) bound to a specific [entity](Entity),
	/// whether it is enabled or not.
	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
		let index = self.instances.index_of(entity)?;
		self.columns.get(&T::component_id())?.get(index)?.downcast_ref()
	}

	/// Gets a mutable reference to a [component](Component) bound to a specific [entity](Entity).
	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		let index = self.instances.index_of(entity)?;
		let column = self.columns.get_mut(&T::component_id())?;
		column.values.get_mut(index)?.as_deref_mut()?.downcast_mut()
	}

	/// Checks if a [component](Component) of type `T` is attached, enabled or not.
	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		match self.instances.index_of(entity) {
			Some(index) => self.columns.get(&T::component_id()).map_or(false, |column| column.contains(index)),
			None => false,
		}
	}

	/// Checks if every [component](Component) in `S` is attached and enabled.
	pub fn has_components<S: ComponentSet>(&self, entity: Entity) -> bool {
		match self.active_components(entity) {
			Some(active) => S::get_bitfield().is_subset_of(active),
			None => false,
		}
	}

	/// Enables or disables an attached [component](Component), raising [EventKind::Enabled] or
	/// [EventKind::Disabled] if its state changed. Disabled components are kept but stop counting
	/// towards [interests](crate::groups::Interest).
	///
	/// Returns *false* if no component of type `T` is attached.
	pub fn set_component_enabled<T: Component>(&mut self, entity: Entity, enabled: bool) -> Result<bool, EcsError> {
		let index = self.index_of(entity)?;
		let id = T::component_id();

		let column = match self.columns.get_mut(&id) {
			Some(column) if column.contains(index) => column,
			_ => return Ok(false),
		};

		if column.disabled.get(index) != enabled {
			return Ok(true);
		}

		column.disabled.set(index, !enabled);
		self.instances.active[index].set(id.value(), enabled);

		let kind = if enabled { EventKind::Enabled } else { EventKind::Disabled };
		self.raise(kind, entity, id, true);
		Ok(true)
	}

	/// Checks if a [component](Component) of type `T` is attached and enabled.
	pub fn is_component_enabled<T: Component>(&self, entity: Entity) -> bool {
		match self.active_components(entity) {
			Some(active) => active.get(T::component_id().value()),
			None => false,
		}
	}

	/// The mask of components currently attached to and enabled on `entity`.
	pub fn active_components(&self, entity: Entity) -> Option<&BitField> {
		let index = self.instances.index_of(entity)?;
		Some(&self.instances.active[index])
	}

	pub fn clock(&self) -> &Clock {
		&self.clock
	}

	/// Only the frame driver should advance the clock.
	pub fn clock_mut(&mut self) -> &mut Clock {
		&mut self.clock
	}

	pub fn events(&self) -> &EventRegistry {
		&self.events
	}

	pub fn events_mut(&mut self) -> &mut EventRegistry {
		&mut self.events
	}

	fn index_of(&self, entity: Entity) -> Result<usize, EcsError> {
		self.instances.index_of(entity).ok_or(EcsError::DeadEntity(entity))
	}

	fn detach(&mut self, entity: Entity, index: usize, id: ComponentId) -> Option<Box<dyn Any>> {
		if !self.columns.get(&id)?.contains(index) {
			return None;
		}

		let active = &mut self.instances.active[index];
		let was_active = active.get(id.value());
		active.set(id.value(), false);

		self.raise(EventKind::Detached, entity, id, was_active);

		let column = self.columns.get_mut(&id)?;
		column.disabled.set(index, false);
		column.values[index].take()
	}

	fn raise(&self, kind: EventKind, entity: Entity, component: ComponentId, active_changed: bool) {
		let event = ComponentEvent {
			kind,
			entity,
			component,
			active_changed,
			store: self,
		};

		self.events.dispatch(&event);
	}

	fn reserve_entity_space(&mut self, count: usize) {
		let start = self.instances.len();
		self.instances.reserve(count);
		self.free.extend((start..start + count).rev().map(|index| index as u32));
	}
}

impl Default for EntityStore {
	fn default() -> Self {
		Self::new()
	}
}
