use crate::components::ComponentId;
use crate::entities::Entity;

/// Data that can be attached to an [entity](Entity).
///
/// Implement it with #\[derive([`Component`](frame_ecs_derive::Component))],
/// which allocates the type's [ComponentId] on first use.
pub trait Component: 'static {
	fn component_id() -> ComponentId;
}

/// Identifies one component slot: a [component](Component) kind on a specific [entity](Entity).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ComponentRef {
	pub entity: Entity,
	pub component: ComponentId,
}

impl ComponentRef {
	pub const fn new(entity: Entity, component: ComponentId) -> Self {
		Self { entity, component }
	}
}
