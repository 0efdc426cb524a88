use crate::components::ComponentRef;
use crate::entities::{Entity, EntityStore};
use crate::groups::{InterestGroup, Interests};
use crate::systems::SystemInstance;
use crate::error::EcsError;
use std::any::Any;

/// The ordering key of a [System].
///
/// Systems run in ascending order; systems with the same order run in registration order.
/// The named phases leave room for fine-grained keys in between, see [SystemOrder::offset].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SystemOrder(u32);

impl SystemOrder {
	pub const BEGIN: Self = Self(0);
	pub const INPUT: Self = Self(1000);
	pub const UPDATE: Self = Self(4000);
	pub const ANIMATION: Self = Self(5000);
	pub const RENDER_PREPARE: Self = Self(5500);
	pub const RENDER: Self = Self(6000);
	pub const CLEANUP: Self = Self(9000);
	pub const END: Self = Self(10000);

	pub const fn new(value: u32) -> Self {
		Self(value)
	}

	pub const fn value(self) -> u32 {
		self.0
	}

	/// Returns the order `amount` steps after this one.
	pub const fn offset(self, amount: u32) -> Self {
		Self(self.0.saturating_add(amount))
	}
}

impl Default for SystemOrder {
	fn default() -> Self {
		Self::UPDATE
	}
}

/// What a [System] hook gets to work with.
pub struct SystemContext<'l> {
	pub store: &'l mut EntityStore,
	/// The scaled delta time of the current frame.
	pub delta_time: f32,
	pub(crate) system: &'l SystemInstance,
}

impl<'l> SystemContext<'l> {
	/// The instance running the current hook.
	pub fn system(&self) -> &SystemInstance {
		self.system
	}

	/// The groups of the running system, in declaration order.
	pub fn groups(&self) -> Vec<InterestGroup> {
		self.system.groups()
	}

	pub fn frame(&self) -> u64 {
		self.store.clock().frame_count()
	}

	/// Rejected unless the value is unchanged: a system cannot change its own enabled state
	/// while one of its hooks runs.
	pub fn set_enabled(&self, enabled: bool) -> Result<(), EcsError> {
		self.system.set_enabled(enabled)
	}
}

/// Type-erased access to a [System], used to get the concrete type back out of a [SystemInstance].
pub trait AsAny: Any {
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// A unit of per-frame logic.
///
/// Every hook is optional. A system must be wrapped by [SystemInstance::create] before it can be
/// initialized or scheduled.
///
/// ```
/// use frame_ecs::prelude::*;
///
/// #[derive(Component)]
/// struct Position(f32);
///
/// #[derive(Component)]
/// struct Velocity(f32);
///
/// struct Movement;
///
/// impl System for Movement {
/// 	fn interests(&self) -> Interests {
/// 		vec![InterestConfig::of::<Position>(), InterestConfig::of::<Velocity>()].into()
/// 	}
///
/// 	fn on_update(&mut self, ctx: &mut SystemContext) {
/// 		for group in ctx.groups() {
/// 			for entity in group.entities() {
/// 				let velocity = ctx.store.get_component::<Velocity>(entity).map(|v| v.0).unwrap_or(0.0);
/// 				if let Some(position) = ctx.store.get_component_mut::<Position>(entity) {
/// 					position.0 += velocity * ctx.delta_time;
/// 				}
/// 			}
/// 		}
/// 	}
/// }
///
/// let mut context = EcsContext::new();
/// context.register_system(Movement).unwrap();
///
/// let entity = context.create_entity();
/// context.add_component(entity, Position(0.0)).unwrap();
/// context.add_component(entity, Velocity(2.0)).unwrap();
///
/// context.tick(0.5).unwrap();
/// assert_eq!(context.get_component::<Position>(entity).map(|p| p.0), Some(1.0));
/// ```
#[allow(unused_variables)]
pub trait System: AsAny {
	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	/// An order declared here wins over the one passed to the factory.
	fn order(&self) -> Option<SystemOrder> {
		None
	}

	/// The interests to build groups for. Read once, on initialization.
	fn interests(&self) -> Interests {
		Interests::none()
	}

	fn on_awake(&mut self, ctx: &mut SystemContext) {}

	fn on_enable(&mut self) {}

	fn on_disable(&mut self) {}

	fn on_destroy(&mut self, ctx: &mut SystemContext) {}

	/// Called from the first update running after `entity` joined `group`.
	fn on_add_entity(&mut self, ctx: &mut SystemContext, entity: Entity, group: &InterestGroup) {}

	/// Called from the first update running after an unessential component became active
	/// on a member of `group`.
	fn on_add_component(&mut self, ctx: &mut SystemContext, component: ComponentRef, group: &InterestGroup) {}

	/// Called as soon as an unessential component of a member stops being active.
	/// The component can still be read from `store`.
	fn on_remove_component(&mut self, store: &EntityStore, component: ComponentRef, group: &InterestGroup) {}

	/// Called as soon as `entity` stops matching `group`.
	fn on_remove_entity(&mut self, store: &EntityStore, entity: Entity, group: &InterestGroup) {}

	fn on_update(&mut self, ctx: &mut SystemContext) {}

	fn on_late_update(&mut self, ctx: &mut SystemContext) {}
}
