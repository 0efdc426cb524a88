use crate::systems::{System, SystemContext, SystemOrder};
use crate::groups::{InterestGroup, Removal};
use crate::events::{ComponentEvent, EventKind, Listener, Subscription};
use crate::entities::EntityStore;
use std::cell::{Cell, RefCell};
use crate::error::EcsError;
use std::rc::{Rc, Weak};
use std::any::TypeId;

/// Where a [SystemInstance] is in its lifecycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SystemState {
	Created,
	Initialized,
	Uninitialized,
}

struct SystemInner {
	name: &'static str,
	type_id: TypeId,
	order: SystemOrder,
	state: Cell<SystemState>,
	enabled: Cell<bool>,
	locked: Cell<bool>,
	groups: RefCell<Vec<InterestGroup>>,
	subscriptions: RefCell<Vec<Subscription>>,
	behaviour: RefCell<Box<dyn System>>,
}

/// A [System] together with the bookkeeping needed to schedule it.
///
/// [SystemInstance::create] is the only way to get one:
///
/// ```compile_fail
/// use frame_ecs::systems::SystemInstance;
///
/// let instance = SystemInstance { inner: todo!() };
/// ```
pub struct SystemInstance {
	inner: Rc<SystemInner>,
}

impl SystemInstance {
	/// Wraps `system`, using `order` unless the system declares its own.
	pub fn create<S: System>(system: S, order: SystemOrder) -> Self {
		let order = system.order().unwrap_or(order);
		let name = system.name();

		Self {
			inner: Rc::new(SystemInner {
				name,
				type_id: TypeId::of::<S>(),
				order,
				state: Cell::new(SystemState::Created),
				enabled: Cell::new(true),
				locked: Cell::new(false),
				groups: RefCell::default(),
				subscriptions: RefCell::default(),
				behaviour: RefCell::new(Box::new(system)),
			}),
		}
	}

	pub fn name(&self) -> &'static str {
		self.inner.name
	}

	pub fn order(&self) -> SystemOrder {
		self.inner.order
	}

	pub fn state(&self) -> SystemState {
		self.inner.state.get()
	}

	pub fn is_enabled(&self) -> bool {
		self.inner.enabled.get()
	}

	/// Checks if the system is inside its own update or late update.
	pub fn is_locked(&self) -> bool {
		self.inner.locked.get()
	}

	pub(crate) fn type_id(&self) -> TypeId {
		self.inner.type_id
	}

	/// The groups built from the system's interests, in declaration order.
	/// Empty unless the system is initialized.
	pub fn groups(&self) -> Vec<InterestGroup> {
		self.inner.groups.borrow().clone()
	}

	/// Number of event subscriptions currently held by the system.
	pub fn subscription_count(&self) -> usize {
		self.inner.subscriptions.borrow().len()
	}

	/// Enables or disables the system, calling [System::on_enable] or [System::on_disable]
	/// if it is initialized.
	///
	/// Setting the current value does nothing. Changing it while one of the system's own hooks
	/// is running is rejected and leaves the value unchanged.
	pub fn set_enabled(&self, enabled: bool) -> Result<(), EcsError> {
		let inner = &self.inner;
		if inner.enabled.get() == enabled {
			return Ok(());
		}

		let mut behaviour = match inner.behaviour.try_borrow_mut() {
			Ok(behaviour) if !inner.locked.get() => behaviour,
			_ => {
				log::warn!("`{}` cannot change its enabled state while it is running", inner.name);
				return Err(EcsError::MutationWhileLocked { system: inner.name });
			},
		};

		inner.enabled.set(enabled);
		if inner.state.get() == SystemState::Initialized {
			match enabled {
				true => behaviour.on_enable(),
				false => behaviour.on_disable(),
			}
		}

		Ok(())
	}

	/// Gives access to the wrapped system as its concrete type, alongside `store`.
	/// Returns [None] if the type does not match or the system is running one of its hooks.
	///
	/// Removals the closure causes on the system's groups are reported before this returns.
	pub fn with_system<S: System, R>(
		&self, store: &mut EntityStore, f: impl FnOnce(&S, &mut EntityStore) -> R,
	) -> Option<R> {
		let result = {
			let behaviour = self.inner.behaviour.try_borrow().ok()?;
			let system: &dyn System = &**behaviour;
			system.as_any().downcast_ref::<S>().map(|system| f(system, &mut *store))
		};

		self.inner.flush_deferred(store);
		result
	}

	pub fn with_system_mut<S: System, R>(
		&self, store: &mut EntityStore, f: impl FnOnce(&mut S, &mut EntityStore) -> R,
	) -> Option<R> {
		let result = {
			let mut behaviour = self.inner.behaviour.try_borrow_mut().ok()?;
			let system: &mut dyn System = &mut **behaviour;
			system.as_any_mut().downcast_mut::<S>().map(|system| f(system, &mut *store))
		};

		self.inner.flush_deferred(store);
		result
	}

	/// Builds the system's groups, subscribes their listeners and calls
	/// [System::on_awake] followed by [System::on_enable].
	pub fn initialize(&self, store: &mut EntityStore) -> Result<(), EcsError> {
		self.expect_state(SystemState::Created)?;
		let interests = self.inner.behaviour.try_borrow().map_err(|_| self.busy())?.interests();

		let mut groups = Vec::with_capacity(interests.len());
		let mut subscriptions = Vec::new();

		for (index, interest) in interests.into_iter().enumerate() {
			for config in interest.configs() {
				for listener in config.listeners() {
					for &component in config.components() {
						let subscription =
							store.events_mut().subscribe_shared(listener.kind, component, listener.listener.clone());
						subscriptions.push(subscription);
					}
				}
			}

			let group = InterestGroup::new(index, interest, store);
			for component in group.component_kinds() {
				for kind in EventKind::ALL {
					let listener = self.group_listener(&group);
					subscriptions.push(store.events_mut().subscribe_shared(kind, component, listener));
				}
			}

			groups.push(group);
		}

		log::debug!(
			"initializing `{}` with {} groups and {} subscriptions",
			self.inner.name,
			groups.len(),
			subscriptions.len()
		);

		*self.inner.groups.borrow_mut() = groups;
		*self.inner.subscriptions.borrow_mut() = subscriptions;
		self.inner.state.set(SystemState::Initialized);

		let delta_time = store.clock().delta_time();
		self.run_hook(store, delta_time, |system, ctx| system.on_awake(ctx))?;
		self.inner.behaviour.try_borrow_mut().map_err(|_| self.busy())?.on_enable();
		Ok(())
	}

	/// Calls [System::on_destroy], then drops the system's subscriptions, in the order they were
	/// made, and its groups.
	pub fn uninitialize(&self, store: &mut EntityStore) -> Result<(), EcsError> {
		self.expect_state(SystemState::Initialized)?;
		log::debug!("uninitializing `{}`", self.inner.name);

		let delta_time = store.clock().delta_time();
		self.run_hook(store, delta_time, |system, ctx| system.on_destroy(ctx))?;

		for subscription in self.inner.subscriptions.take() {
			store.events_mut().unsubscribe(subscription);
		}

		self.inner.groups.take();
		self.inner.state.set(SystemState::Uninitialized);
		Ok(())
	}

	/// Hands the additions buffered before the current frame to the system, group by group,
	/// then calls [System::on_update]. Does nothing while the system is disabled.
	pub fn update(&self, store: &mut EntityStore) -> Result<(), EcsError> {
		self.expect_state(SystemState::Initialized)?;
		if !self.is_enabled() {
			return Ok(());
		}

		self.inner.locked.set(true);
		let result = self.drain_and_update(store);
		self.inner.locked.set(false);
		result
	}

	/// Calls [System::on_late_update]. Does nothing while the system is disabled.
	pub fn late_update(&self, store: &mut EntityStore) -> Result<(), EcsError> {
		self.expect_state(SystemState::Initialized)?;
		if !self.is_enabled() {
			return Ok(());
		}

		self.inner.locked.set(true);
		let delta_time = store.clock().delta_time();
		let result = self.run_hook(store, delta_time, |system, ctx| system.on_late_update(ctx));
		self.inner.locked.set(false);
		result
	}

	fn drain_and_update(&self, store: &mut EntityStore) -> Result<(), EcsError> {
		let delta_time = store.clock().delta_time();
		let groups = self.groups();

		groups.iter().for_each(|group| group.set_draining(true));
		let drained = self.drain(store, &groups);
		groups.iter().for_each(|group| group.set_draining(false));
		drained?;

		self.run_hook(store, delta_time, |system, ctx| system.on_update(ctx))?;
		groups.iter().for_each(InterestGroup::compact);
		Ok(())
	}

	fn drain(&self, store: &mut EntityStore, groups: &[InterestGroup]) -> Result<(), EcsError> {
		let frame = store.clock().frame_count();
		let delta_time = store.clock().delta_time();

		for group in groups {
			for slot in 0..group.added_entity_slots() {
				if let Some(entity) = group.take_added_entity(slot, frame) {
					self.run_hook(store, delta_time, |system, ctx| system.on_add_entity(ctx, entity, group))?;
				}
			}

			for slot in 0..group.added_component_slots() {
				if let Some(component) = group.take_added_component(slot, frame) {
					self.run_hook(store, delta_time, |system, ctx| system.on_add_component(ctx, component, group))?;
				}
			}
		}

		Ok(())
	}

	/// Runs a hook, then reports the removals it caused on the system's own groups.
	fn run_hook(
		&self, store: &mut EntityStore, delta_time: f32,
		hook: impl FnOnce(&mut dyn System, &mut SystemContext),
	) -> Result<(), EcsError> {
		{
			let mut behaviour = self.inner.behaviour.try_borrow_mut().map_err(|_| self.busy())?;
			let mut ctx = SystemContext {
				store: &mut *store,
				delta_time,
				system: self,
			};

			hook(&mut **behaviour, &mut ctx);
		}

		self.inner.flush_deferred(store);
		Ok(())
	}

	fn group_listener(&self, group: &InterestGroup) -> Listener {
		let group = group.clone();
		let system: Weak<SystemInner> = Rc::downgrade(&self.inner);

		Rc::new(move |event: &ComponentEvent<'_>| {
			let removals = group.handle_event(event);
			if removals.is_empty() {
				return;
			}

			if let Some(system) = system.upgrade() {
				system.report(event.store(), &group, removals);
			}
		})
	}

	fn expect_state(&self, expected: SystemState) -> Result<(), EcsError> {
		match self.inner.state.get() {
			found if found == expected => Ok(()),
			found => Err(EcsError::InvalidLifecycle {
				system: self.inner.name,
				expected,
				found,
			}),
		}
	}

	fn busy(&self) -> EcsError {
		EcsError::SystemBusy(self.inner.name)
	}
}

impl SystemInner {
	/// Calls the removal hooks, or queues the removals on `group` while the system is borrowed by
	/// one of its hooks or accessors. Whoever holds the borrow flushes the queue once it is released.
	fn report(&self, store: &EntityStore, group: &InterestGroup, removals: Vec<Removal>) {
		let mut behaviour = match self.behaviour.try_borrow_mut() {
			Ok(behaviour) => behaviour,
			Err(_) => return group.defer(removals),
		};

		for removal in removals {
			match removal {
				Removal::Component(component) => behaviour.on_remove_component(store, component, group),
				Removal::Entity(entity) => behaviour.on_remove_entity(store, entity, group),
			}
		}
	}

	fn flush_deferred(&self, store: &EntityStore) {
		let groups = self.groups.borrow().clone();
		for group in &groups {
			let removals = group.take_deferred();
			if !removals.is_empty() {
				self.report(store, group, removals);
			}
		}
	}
}

impl std::fmt::Debug for SystemInstance {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SystemInstance")
			.field("name", &self.inner.name)
			.field("order", &self.inner.order)
			.field("state", &self.inner.state.get())
			.field("enabled", &self.inner.enabled.get())
			.finish()
	}
}
