use crate::tests::{new_log, Frozen, Health, Position, Velocity};
use crate::events::{ComponentEvent, EventKind};
use crate::components::{Component, ComponentId};
use crate::entities::EntityStore;
use crate::error::EcsError;
use crate::clock::Clock;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
pub fn create_and_destroy_entities() {
	let mut store = EntityStore::with_capacity(2);
	let a = store.create_entity();
	let b = store.create_entity();
	let c = store.create_entity();

	assert_eq!(store.len(), 3);
	assert_eq!(store.entities().collect::<Vec<_>>(), vec![a, b, c]);

	store.destroy_entity(b).unwrap();
	assert!(!store.is_alive(b));
	assert_eq!(store.destroy_entity(b), Err(EcsError::DeadEntity(b)));
	assert_eq!(store.len(), 2);

	let d = store.create_entity();
	assert_eq!(d.index(), b.index(), "Destroyed indices are recycled");
	assert_ne!(d.version(), b.version());
	assert!(store.is_alive(d));
	assert!(!store.is_alive(b));
}

#[test]
pub fn add_get_and_remove_components() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	assert_eq!(store.add_component(entity, Position(1.0)), Ok(true));
	assert_eq!(store.add_component(entity, Position(2.0)), Ok(false));
	assert_eq!(store.get_component::<Position>(entity), Some(&Position(1.0)));

	if let Some(position) = store.get_component_mut::<Position>(entity) {
		position.0 = 3.0;
	}

	store.add_component(entity, Velocity(1.0)).unwrap();
	assert!(store.has_components::<(Position, Velocity)>(entity));
	assert!(!store.has_components::<(Position, Health)>(entity));

	assert_eq!(store.remove_component::<Position>(entity), Ok(Some(Position(3.0))));
	assert_eq!(store.remove_component::<Position>(entity), Ok(None));
	assert!(!store.has_component::<Position>(entity));

	store.destroy_entity(entity).unwrap();
	assert_eq!(store.add_component(entity, Health(1)), Err(EcsError::DeadEntity(entity)));
	assert_eq!(store.get_component::<Velocity>(entity), None);
}

#[test]
pub fn disabled_components_are_inactive() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();
	store.add_component(entity, Health(10)).unwrap();

	assert_eq!(store.set_component_enabled::<Health>(entity, false), Ok(true));
	assert!(store.has_component::<Health>(entity));
	assert!(!store.is_component_enabled::<Health>(entity));
	assert!(!store.has_components::<(Health,)>(entity));
	assert_eq!(store.get_component::<Health>(entity), Some(&Health(10)));

	assert_eq!(store.set_component_enabled::<Frozen>(entity, true), Ok(false));
	assert_eq!(store.set_component_enabled::<Health>(entity, true), Ok(true));
	assert!(store.is_component_enabled::<Health>(entity));
}

#[test]
pub fn mutations_raise_events() {
	let mut store = EntityStore::new();
	let log = new_log();

	for kind in EventKind::ALL {
		let log = log.clone();
		store.events_mut().subscribe(kind, Health::component_id(), move |event: &ComponentEvent| {
			let value = event.store().get_component::<Health>(event.entity()).map(|h| h.0);
			log.borrow_mut().push(format!("{:?} {} {:?}", event.kind(), event.active_changed(), value));
		});
	}

	let entity = store.create_entity();
	store.add_component(entity, Health(5)).unwrap();
	store.set_component_enabled::<Health>(entity, true).unwrap();
	store.set_component_enabled::<Health>(entity, false).unwrap();
	store.set_component_enabled::<Health>(entity, false).unwrap();
	store.remove_component::<Health>(entity).unwrap();

	assert_eq!(
		*log.borrow(),
		vec![
			"Attached true Some(5)",
			"Disabled true Some(5)",
			"Detached false Some(5)",
		],
		"Events must only be raised on actual changes, and a detached value must still be readable"
	);
}

#[test]
pub fn destroy_detaches_in_id_order() {
	let mut store = EntityStore::new();
	let log = Rc::new(RefCell::new(Vec::new()));

	let mut ids = vec![Velocity::component_id(), Position::component_id(), Health::component_id()];
	for &id in &ids {
		let log = log.clone();
		store.events_mut().subscribe(EventKind::Detached, id, move |event: &ComponentEvent| {
			assert!(event.store().is_alive(event.entity()));
			log.borrow_mut().push(event.component());
		});
	}

	let entity = store.create_entity();
	store.add_component(entity, Velocity(0.0)).unwrap();
	store.add_component(entity, Health(0)).unwrap();
	store.add_component(entity, Position(0.0)).unwrap();
	store.destroy_entity(entity).unwrap();

	ids.sort();
	assert_eq!(*log.borrow(), ids);
	assert!(store.is_empty());
}

#[test]
pub fn clock_advances_frames() {
	let mut clock = Clock::new();
	clock.set_time_scale(2.0);
	clock.advance(0.25);
	clock.advance(-1.0);

	assert_eq!(clock.frame_count(), 2);
	assert_eq!(clock.delta_time(), 0.0);
	assert_eq!(clock.total_time(), 0.5);

	let mut store = EntityStore::new();
	store.clock_mut().advance(0.1);
	assert_eq!(store.clock().frame_count(), 1);
	assert_eq!(ComponentId::of::<Health>().name(), "Health");
}
