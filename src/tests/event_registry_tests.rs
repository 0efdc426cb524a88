use crate::tests::{new_log, Health, Position};
use crate::events::{ComponentEvent, EventKind, EventRegistry};
use crate::components::Component;
use crate::entities::EntityStore;

#[test]
pub fn subscribe_and_unsubscribe() {
	let mut registry = EventRegistry::new();
	let health = Health::component_id();

	let a = registry.subscribe(EventKind::Attached, health, |_| {});
	let b = registry.subscribe(EventKind::Attached, health, |_| {});
	registry.subscribe(EventKind::Detached, health, |_| {});

	assert_eq!(registry.listener_count(EventKind::Attached, health), 2);
	assert_eq!(registry.listener_count(EventKind::Attached, Position::component_id()), 0);
	assert_eq!(registry.len(), 3);

	assert!(registry.unsubscribe(a));
	assert!(!registry.unsubscribe(a), "A listener can only be removed once");
	assert!(registry.unsubscribe(b));
	assert_eq!(registry.listener_count(EventKind::Attached, health), 0);
	assert!(!registry.is_empty());
}

#[test]
pub fn listeners_run_in_subscription_order() {
	let mut store = EntityStore::new();
	let log = new_log();

	for name in ["first", "second", "third"] {
		let log = log.clone();
		store.events_mut().subscribe(EventKind::Attached, Position::component_id(), move |event: &ComponentEvent| {
			log.borrow_mut().push(format!("{} {:?}", name, event.component_ref().entity));
		});
	}

	let entity = store.create_entity();
	store.add_component(entity, Health(1)).unwrap();
	assert!(log.borrow().is_empty(), "Listeners are keyed by component kind");

	store.add_component(entity, Position(0.0)).unwrap();
	assert_eq!(
		*log.borrow(),
		vec![
			format!("first {:?}", entity),
			format!("second {:?}", entity),
			format!("third {:?}", entity),
		]
	);
}
