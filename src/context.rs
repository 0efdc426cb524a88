use crate::systems::{System, SystemInstance, SystemOrder, SystemStore};
use crate::entities::EntityStore;
use std::ops::{Deref, DerefMut};
use crate::config::EcsConfig;
use crate::error::EcsError;
use crate::clock::Clock;

/// A container for [entities](crate::entities::Entity) and [systems](System).
///
/// It dereferences to its [EntityStore], and [EcsContext::tick] drives one frame.
pub struct EcsContext {
	entity_store: EntityStore,
	system_store: SystemStore,
}

impl EcsContext {
	pub fn new() -> Self {
		Self::with_config(EcsConfig::default())
	}

	pub fn with_config(config: EcsConfig) -> Self {
		Self {
			entity_store: EntityStore::with_clock(config.entity_capacity, Clock::with_config(&config)),
			system_store: SystemStore::with_default_order(config.default_order),
		}
	}

	/// Add a new [system](System) to the [EcsContext] and initialize it.
	pub fn register_system<T: System>(&mut self, system: T) -> Result<&SystemInstance, EcsError> {
		self.system_store.register(system, &mut self.entity_store)
	}

	/// Add a new [system](System) to the [EcsContext] with a fallback order and initialize it.
	pub fn register_system_with_order<T: System>(
		&mut self, system: T, order: SystemOrder,
	) -> Result<&SystemInstance, EcsError> {
		self.system_store.register_with_order(system, order, &mut self.entity_store)
	}

	/// Uninitialize and remove the [system](System) of type `T`.
	pub fn unregister_system<T: System>(&mut self) -> Result<(), EcsError> {
		self.system_store.unregister::<T>(&mut self.entity_store)
	}

	pub fn system<T: System>(&self) -> Option<&SystemInstance> {
		self.system_store.get::<T>()
	}

	/// Runs `f` on the [system](System) of type `T` and the entity store.
	/// See [SystemInstance::with_system].
	pub fn with_system<T: System, R>(&mut self, f: impl FnOnce(&T, &mut EntityStore) -> R) -> Option<R> {
		self.system_store.get::<T>()?.with_system(&mut self.entity_store, f)
	}

	pub fn with_system_mut<T: System, R>(
		&mut self, f: impl FnOnce(&mut T, &mut EntityStore) -> R,
	) -> Option<R> {
		self.system_store.get::<T>()?.with_system_mut(&mut self.entity_store, f)
	}

	/// All [systems](System), in execution order.
	pub fn systems(&self) -> &[SystemInstance] {
		self.system_store.systems()
	}

	/// Advance the clock by `delta_time` seconds and run every [system](System) once.
	pub fn tick(&mut self, delta_time: f32) -> Result<(), EcsError> {
		self.entity_store.clock_mut().advance(delta_time);
		self.system_store.update(&mut self.entity_store)
	}

	/// Uninitialize every [system](System).
	pub fn clear_systems(&mut self) -> Result<(), EcsError> {
		self.system_store.clear(&mut self.entity_store)
	}
}

impl Default for EcsContext {
	fn default() -> Self {
		Self::new()
	}
}

impl Deref for EcsContext {
	type Target = EntityStore;

	#[inline(always)]
	fn deref(&self) -> &Self::Target {
		&self.entity_store
	}
}

impl DerefMut for EcsContext {
	#[inline(always)]
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.entity_store
	}
}
