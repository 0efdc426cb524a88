//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A [System] must be registered with an [EcsContext](crate::context::EcsContext), or wrapped by
//! [SystemInstance::create] and driven by hand, for it to run.

mod system;
mod system_store;
mod system_instance;

pub use system::*;
pub use system_store::*;
pub use system_instance::*;
