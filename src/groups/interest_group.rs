use crate::components::{ComponentId, ComponentRef};
use crate::data_structures::{BitField, SlotBuffer};
use crate::entities::{Entity, EntityStore};
use crate::events::ComponentEvent;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use crate::groups::Interest;
use std::cell::RefCell;
use std::rc::Rc;

type Hasher = BuildHasherDefault<NoHashHasher<u32>>;

/// A buffered addition, stamped with the frame it happened in.
struct Pending<T> {
	value: T,
	frame: u64,
}

/// A membership loss that the owning system has to be told about.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Removal {
	Entity(Entity),
	Component(ComponentRef),
}

struct GroupState {
	index: usize,
	interest: Interest,
	entities: HashMap<u32, Entity, Hasher>,
	added_entities: SlotBuffer<Pending<Entity>>,
	added_components: SlotBuffer<Pending<ComponentRef>>,
	deferred: Vec<Removal>,
	/// Set while the owning system walks the add buffers by slot position.
	draining: bool,
}

/// The live set of [entities](Entity) matching one [Interest].
///
/// Membership is updated from [component events](ComponentEvent) as they happen. Additions are
/// also buffered, and only handed to the owning [system](crate::systems::System) by an update
/// running in a later frame than the one they happened in. An entity that leaves the group before
/// its addition was handed over is forgotten without any notification.
#[derive(Clone)]
pub struct InterestGroup {
	inner: Rc<RefCell<GroupState>>,
}

impl InterestGroup {
	/// Creates a group seeded with every entity of `store` that already matches `interest`.
	pub(crate) fn new(index: usize, interest: Interest, store: &EntityStore) -> Self {
		let frame = store.clock().frame_count();
		let mut state = GroupState {
			index,
			interest,
			entities: HashMap::default(),
			added_entities: SlotBuffer::new(),
			added_components: SlotBuffer::new(),
			deferred: Vec::new(),
			draining: false,
		};

		for entity in store.entities() {
			if let Some(active) = store.active_components(entity) {
				if state.interest.matches(active) {
					state.join(entity, active, frame);
				}
			}
		}

		log::trace!("group {} created with {} entities", index, state.entities.len());
		Self {
			inner: Rc::new(RefCell::new(state)),
		}
	}

	/// Position of the group among the groups of its system, in declaration order.
	pub fn index(&self) -> usize {
		self.inner.borrow().index
	}

	/// Checks if `entity` currently matches the group's [Interest].
	pub fn contains(&self, entity: Entity) -> bool {
		self.inner.borrow().contains(entity)
	}

	pub fn len(&self) -> usize {
		self.inner.borrow().entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The current members, in index order.
	pub fn entities(&self) -> Vec<Entity> {
		let mut entities: Vec<Entity> = self.inner.borrow().entities.values().copied().collect();
		entities.sort();
		entities
	}

	/// Number of entity additions not yet handed to the owning system.
	pub fn pending_entities(&self) -> usize {
		self.inner.borrow().added_entities.len()
	}

	/// Number of [unessential](crate::groups::InterestType::Unessential) component additions not yet
	/// handed to the owning system.
	pub fn pending_components(&self) -> usize {
		self.inner.borrow().added_components.len()
	}

	pub(crate) fn component_kinds(&self) -> Vec<ComponentId> {
		self.inner.borrow().interest.component_kinds().to_vec()
	}

	/// Re-evaluates the entity named by `event` and returns the removals to report.
	pub(crate) fn handle_event(&self, event: &ComponentEvent<'_>) -> Vec<Removal> {
		let mut state = self.inner.borrow_mut();
		let entity = event.entity();
		let component = event.component();

		let Some(active) = event.store().active_components(entity) else {
			return Vec::new();
		};

		let was_member = state.contains(entity);
		let is_member = state.interest.matches(active);

		let removals = match (was_member, is_member) {
			(false, true) => {
				state.join(entity, active, event.frame());
				Vec::new()
			},

			(true, false) => {
				let mut previous = active.clone();
				if event.active_changed() {
					previous.set(component.value(), !event.kind().is_activation());
				}
				state.leave(entity, &previous)
			},

			(true, true) if event.active_changed() && state.interest.is_unessential(component) => {
				let component = ComponentRef::new(entity, component);
				if event.kind().is_activation() {
					state.added_components.push(Pending {
						value: component,
						frame: event.frame(),
					});
					return Vec::new();
				}

				match state.added_components.vacate_where(|p| p.value == component) {
					0 => vec![Removal::Component(component)],
					_ => Vec::new(),
				}
			},

			_ => Vec::new(),
		};

		if !state.draining {
			state.compact();
		}
		removals
	}

	/// Queues removals that could not be reported because the owning system was busy.
	pub(crate) fn defer(&self, removals: Vec<Removal>) {
		self.inner.borrow_mut().deferred.extend(removals);
	}

	pub(crate) fn take_deferred(&self) -> Vec<Removal> {
		std::mem::take(&mut self.inner.borrow_mut().deferred)
	}

	pub(crate) fn added_entity_slots(&self) -> usize {
		self.inner.borrow().added_entities.slot_count()
	}

	/// Hands over the entity buffered at `slot` if it was added before `frame`.
	pub(crate) fn take_added_entity(&self, slot: usize, frame: u64) -> Option<Entity> {
		let mut state = self.inner.borrow_mut();
		state.added_entities.take_if(slot, |p| p.frame < frame).map(|p| p.value)
	}

	pub(crate) fn added_component_slots(&self) -> usize {
		self.inner.borrow().added_components.slot_count()
	}

	/// Hands over the component buffered at `slot` if it was added before `frame`.
	pub(crate) fn take_added_component(&self, slot: usize, frame: u64) -> Option<ComponentRef> {
		let mut state = self.inner.borrow_mut();
		state.added_components.take_if(slot, |p| p.frame < frame).map(|p| p.value)
	}

	/// While set, vacated slots are left in place so that slot positions stay valid.
	pub(crate) fn set_draining(&self, draining: bool) {
		self.inner.borrow_mut().draining = draining;
	}

	/// Reclaims the slots vacated since the last call.
	pub(crate) fn compact(&self) {
		self.inner.borrow_mut().compact();
	}
}

impl GroupState {
	fn compact(&mut self) {
		self.added_entities.compact();
		self.added_components.compact();
	}

	fn contains(&self, entity: Entity) -> bool {
		self.entities.get(&entity.index) == Some(&entity)
	}

	fn join(&mut self, entity: Entity, active: &BitField, frame: u64) {
		log::trace!("{:?} joined group {}", entity, self.index);
		self.entities.insert(entity.index, entity);
		self.added_entities.push(Pending { value: entity, frame });

		for component in self.interest.unessential_in(active) {
			self.added_components.push(Pending {
				value: ComponentRef::new(entity, component),
				frame,
			});
		}
	}

	fn leave(&mut self, entity: Entity, previous: &BitField) -> Vec<Removal> {
		log::trace!("{:?} left group {}", entity, self.index);
		self.entities.remove(&entity.index);

		if self.added_entities.vacate_where(|p| p.value == entity) > 0 {
			self.added_components.vacate_where(|p| p.value.entity == entity);
			return Vec::new();
		}

		let mut removals = Vec::new();
		for component in self.interest.unessential_in(previous) {
			let component = ComponentRef::new(entity, component);
			if self.added_components.vacate_where(|p| p.value == component) == 0 {
				removals.push(Removal::Component(component));
			}
		}

		removals.push(Removal::Entity(entity));
		removals
	}
}
