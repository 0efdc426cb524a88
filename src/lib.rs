//! A single-threaded entity component system built around interest groups.
//!
//! [Systems](systems::System) declare [interests](groups::Interests) over component kinds.
//! Each interest becomes an [InterestGroup](groups::InterestGroup) that is kept current from the
//! [events](events::EventKind) raised by the [EntityStore](entities::EntityStore), so no system
//! has to rescan the store to find the entities it cares about.

extern crate self as frame_ecs;

pub mod data_structures;
pub mod components;
pub mod entities;
pub mod systems;
pub mod events;
pub mod groups;
pub mod config;
pub mod clock;
pub mod error;
mod context;

pub use lazy_static::lazy_static;

pub mod prelude {
	pub use crate::systems::*;
	pub use crate::groups::*;
	pub use crate::clock::Clock;
	pub use crate::components::*;
	pub use crate::error::EcsError;
	pub use crate::config::EcsConfig;
	pub use crate::context::EcsContext;
	pub use crate::entities::{Entity, EntityStore};
	pub use crate::events::{ComponentEvent, EventKind, EventRegistry, Subscription};
}

pub use context::EcsContext;

#[cfg(test)]
mod tests;
