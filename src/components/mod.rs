//! [Components](Component) are the plain data attached to [entities](crate::entities::Entity).
//!
//! Every component type owns a process-wide [ComponentId] used to build the masks
//! that [interests](crate::groups::Interest) are matched against.

mod component_id;
mod component_set;
mod component_type;

pub use component_id::*;
pub use component_set::*;
pub use component_type::*;
pub use frame_ecs_derive::Component;
