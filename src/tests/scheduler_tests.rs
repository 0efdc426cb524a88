use crate::tests::{drain, new_log, Probe};
use crate::systems::{SystemContext, SystemOrder, SystemStore};
use crate::entities::EntityStore;
use crate::context::EcsContext;
use crate::config::EcsConfig;
use crate::groups::Interests;
use crate::error::EcsError;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
pub fn systems_run_by_order_then_registration() {
	let mut context = EcsContext::new();
	let log = new_log();

	context.register_system(Probe::<0>::new(&log, Interests::none())).unwrap();
	context
		.register_system(Probe::<1>::new(&log, Interests::none()).with_order(SystemOrder::RENDER))
		.unwrap();
	context
		.register_system_with_order(Probe::<2>::new(&log, Interests::none()), SystemOrder::INPUT)
		.unwrap();
	context.register_system(Probe::<3>::new(&log, Interests::none())).unwrap();
	drain(&log);

	let orders: Vec<_> = context.systems().iter().map(|s| s.order()).collect();
	assert_eq!(
		orders,
		vec![SystemOrder::INPUT, SystemOrder::UPDATE, SystemOrder::UPDATE, SystemOrder::RENDER]
	);

	context.tick(0.016).unwrap();
	assert_eq!(
		drain(&log),
		vec![
			"2:update",
			"0:update",
			"3:update",
			"1:update",
			"2:late_update",
			"0:late_update",
			"3:late_update",
			"1:late_update",
		],
		"Every update must run before any late update"
	);
}

#[test]
pub fn one_instance_per_system_type() {
	let mut store = EntityStore::new();
	let mut systems = SystemStore::new();
	let log = new_log();

	systems.register(Probe::<0>::new(&log, Interests::none()), &mut store).unwrap();
	let result = systems.register(Probe::<0>::new(&log, Interests::none()), &mut store);
	assert!(matches!(result, Err(EcsError::SystemAlreadyRegistered(_))));
	assert_eq!(systems.len(), 1);
	assert_eq!(drain(&log), vec!["0:awake", "0:enable"], "A rejected system is never initialized");
	assert!(systems.get::<Probe<1>>().is_none());
}

#[test]
pub fn clear_uninitializes_in_reverse_order() {
	let mut store = EntityStore::new();
	let mut systems = SystemStore::with_default_order(SystemOrder::ANIMATION);
	let log = new_log();

	systems.register(Probe::<0>::new(&log, Interests::none()), &mut store).unwrap();
	systems
		.register(Probe::<1>::new(&log, Interests::none()).with_order(SystemOrder::BEGIN), &mut store)
		.unwrap();
	drain(&log);

	systems.clear(&mut store).unwrap();
	assert!(systems.is_empty());
	assert_eq!(drain(&log), vec!["0:destroy", "1:destroy"]);
}

#[test]
pub fn systems_read_the_frame_delta() {
	let config = EcsConfig::new().with_time_scale(0.5).with_max_delta_time(0.1);
	let mut context = EcsContext::with_config(config);
	let log = new_log();
	let deltas = Rc::new(RefCell::new(Vec::new()));

	let probe = Probe::<0>::new(&log, Interests::none()).with_update({
		let deltas = deltas.clone();
		move |ctx: &mut SystemContext| deltas.borrow_mut().push(ctx.delta_time)
	});
	context.register_system(probe).unwrap();

	context.tick(0.1).unwrap();
	context.tick(1.0).unwrap();
	context.tick(-1.0).unwrap();

	assert_eq!(*deltas.borrow(), vec![0.05, 0.05, 0.0]);
	assert_eq!(context.clock().frame_count(), 3);
	assert_eq!(context.clock().unscaled_delta_time(), 0.0);
}
