use crate::systems::{System, SystemInstance, SystemOrder};
use crate::entities::EntityStore;
use std::collections::HashSet;
use crate::error::EcsError;
use std::any::TypeId;

/// Holds at most one [SystemInstance] per system type, sorted by [SystemOrder],
/// and drives them through each frame.
pub struct SystemStore {
	types: HashSet<TypeId>,
	systems: Vec<SystemInstance>,
	default_order: SystemOrder,
}

impl SystemStore {
	pub fn new() -> Self {
		Self::with_default_order(SystemOrder::default())
	}

	/// Creates a store that gives `default_order` to systems registered without one.
	pub fn with_default_order(default_order: SystemOrder) -> Self {
		Self {
			types: HashSet::default(),
			systems: Vec::default(),
			default_order,
		}
	}

	/// Creates and initializes an instance of `system`.
	pub fn register<T: System>(&mut self, system: T, store: &mut EntityStore) -> Result<&SystemInstance, EcsError> {
		self.register_with_order(system, self.default_order, store)
	}

	/// Creates and initializes an instance of `system`.
	/// `order` is only used if the system does not declare its own.
	pub fn register_with_order<T: System>(
		&mut self, system: T, order: SystemOrder, store: &mut EntityStore,
	) -> Result<&SystemInstance, EcsError> {
		let instance = SystemInstance::create(system, order);
		if self.types.contains(&TypeId::of::<T>()) {
			return Err(EcsError::SystemAlreadyRegistered(instance.name()));
		}

		instance.initialize(store)?;
		log::debug!("registered `{}` at {:?}", instance.name(), instance.order());

		let position = self.systems.partition_point(|s| s.order() <= instance.order());
		self.types.insert(TypeId::of::<T>());
		self.systems.insert(position, instance);
		Ok(&self.systems[position])
	}

	/// Uninitializes and drops the instance of `T`.
	pub fn unregister<T: System>(&mut self, store: &mut EntityStore) -> Result<(), EcsError> {
		let position = self
			.systems
			.iter()
			.position(|s| s.type_id() == TypeId::of::<T>())
			.ok_or_else(|| EcsError::SystemNotRegistered(std::any::type_name::<T>()))?;

		let instance = self.systems.remove(position);
		self.types.remove(&TypeId::of::<T>());
		log::debug!("unregistered `{}`", instance.name());
		instance.uninitialize(store)
	}

	pub fn get<T: System>(&self) -> Option<&SystemInstance> {
		self.systems.iter().find(|s| s.type_id() == TypeId::of::<T>())
	}

	/// The registered systems, in execution order.
	pub fn systems(&self) -> &[SystemInstance] {
		&self.systems
	}

	pub fn len(&self) -> usize {
		self.systems.len()
	}

	pub fn is_empty(&self) -> bool {
		self.systems.is_empty()
	}

	/// Runs the update of every system, then the late update of every system.
	pub fn update(&self, store: &mut EntityStore) -> Result<(), EcsError> {
		for system in &self.systems {
			system.update(store)?;
		}

		for system in &self.systems {
			system.late_update(store)?;
		}

		Ok(())
	}

	/// Uninitializes every system, last to first.
	pub fn clear(&mut self, store: &mut EntityStore) -> Result<(), EcsError> {
		self.types.clear();
		while let Some(system) = self.systems.pop() {
			system.uninitialize(store)?;
		}

		Ok(())
	}
}

impl Default for SystemStore {
	fn default() -> Self {
		Self::new()
	}
}
