use crate::components::{ComponentId, ComponentRef};
use crate::entities::{Entity, EntityStore};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::rc::Rc;

type Hasher = BuildHasherDefault<NoHashHasher<usize>>;

const EVENT_KINDS: usize = 4;

/// The kind of change a [ComponentEvent] reports.
#[repr(usize)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
	Attached = 0,
	Detached = 1,
	Enabled = 2,
	Disabled = 3,
}

impl EventKind {
	pub const ALL: [EventKind; EVENT_KINDS] =
		[EventKind::Attached, EventKind::Detached, EventKind::Enabled, EventKind::Disabled];

	/// Whether this kind of event can make a component count towards an interest.
	pub const fn is_activation(self) -> bool {
		matches!(self, EventKind::Attached | EventKind::Enabled)
	}
}

/// A change to one [component](crate::components::Component) of one [entity](Entity),
/// delivered synchronously to every matching listener.
pub struct ComponentEvent<'l> {
	pub(crate) kind: EventKind,
	pub(crate) entity: Entity,
	pub(crate) component: ComponentId,
	pub(crate) active_changed: bool,
	pub(crate) store: &'l EntityStore,
}

impl<'l> ComponentEvent<'l> {
	pub fn kind(&self) -> EventKind {
		self.kind
	}

	pub fn entity(&self) -> Entity {
		self.entity
	}

	pub fn component(&self) -> ComponentId {
		self.component
	}

	pub fn component_ref(&self) -> ComponentRef {
		ComponentRef::new(self.entity, self.component)
	}

	/// The frame during which the change happened.
	pub fn frame(&self) -> u64 {
		self.store.clock().frame_count()
	}

	/// Whether the component went from counting towards interests to not counting, or back.
	/// Detaching a disabled component is the one change that does not.
	pub fn active_changed(&self) -> bool {
		self.active_changed
	}

	/// The store the change happened in. A detached component is still readable from here.
	pub fn store(&self) -> &'l EntityStore {
		self.store
	}
}

/// A callback invoked for every matching [ComponentEvent].
pub type Listener = Rc<dyn Fn(&ComponentEvent<'_>)>;

/// Identifies a listener registered on an [EventRegistry].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SubscriptionId(u64);

/// Everything needed to remove a listener from an [EventRegistry] later on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
	pub kind: EventKind,
	pub component: ComponentId,
	pub id: SubscriptionId,
}

type ListenerList = Vec<(SubscriptionId, Listener)>;

/// Indexes listeners by ([EventKind], [ComponentId]).
///
/// The registry only indexes listeners; whoever subscribes owns the subscription and is
/// expected to unsubscribe it.
#[derive(Default)]
pub struct EventRegistry {
	next_id: u64,
	listeners: HashMap<ComponentId, [ListenerList; EVENT_KINDS], Hasher>,
}

impl EventRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` for events of `kind` about `component`.
	pub fn subscribe(
		&mut self, kind: EventKind, component: ComponentId, listener: impl Fn(&ComponentEvent<'_>) + 'static,
	) -> Subscription {
		self.subscribe_shared(kind, component, Rc::new(listener))
	}

	/// Registers an already shared `listener`, so that one closure can serve several keys.
	pub fn subscribe_shared(&mut self, kind: EventKind, component: ComponentId, listener: Listener) -> Subscription {
		let id = SubscriptionId(self.next_id);
		self.next_id += 1;

		self.listeners.entry(component).or_default()[kind as usize].push((id, listener));
		Subscription { kind, component, id }
	}

	/// Removes a listener. Returns *false* if it was not registered.
	pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
		let Some(lists) = self.listeners.get_mut(&subscription.component) else {
			return false;
		};

		let list = &mut lists[subscription.kind as usize];
		match list.iter().position(|(id, _)| *id == subscription.id) {
			Some(position) => {
				list.remove(position);
				true
			},
			None => false,
		}
	}

	/// Number of listeners registered for `kind` events about `component`.
	pub fn listener_count(&self, kind: EventKind, component: ComponentId) -> usize {
		self.listeners.get(&component).map_or(0, |lists| lists[kind as usize].len())
	}

	/// Total number of registered listeners.
	pub fn len(&self) -> usize {
		self.listeners.values().flat_map(|lists| lists.iter()).map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Invokes every listener registered for the event's kind and component, in subscription order.
	pub(crate) fn dispatch(&self, event: &ComponentEvent<'_>) {
		let Some(lists) = self.listeners.get(&event.component) else {
			return;
		};

		let list = &lists[event.kind as usize];
		log::trace!("dispatching {:?} of {:?} on {:?} to {} listeners", event.kind, event.component, event.entity, list.len());

		for (_, listener) in list {
			listener(event);
		}
	}
}
