//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//! The [EntityStore] owns that data and raises a [ComponentEvent](crate::events::ComponentEvent)
//! for every change to it.

mod entity_store;
mod entity_instance;

pub use entity_store::*;
pub use entity_instance::Entity;

pub(crate) use entity_instance::*;
