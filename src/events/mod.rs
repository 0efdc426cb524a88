//! Synchronous notifications about [component](crate::components::Component) mutations.
//!
//! The [EntityStore](crate::entities::EntityStore) raises a [ComponentEvent] whenever a
//! component is attached, detached, enabled or disabled. Listeners only ever receive a
//! shared reference to the store, so they can observe a mutation but never start a new one.

mod event_registry;

pub use event_registry::*;
