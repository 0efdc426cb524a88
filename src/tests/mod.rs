use crate::components::{Component, ComponentRef};
use crate::entities::{Entity, EntityStore};
use crate::groups::{InterestGroup, Interests};
use crate::systems::{System, SystemContext, SystemOrder};
use std::cell::RefCell;
use std::rc::Rc;

mod bit_field_tests;
mod entity_store_tests;
mod event_registry_tests;
mod scheduler_tests;

#[derive(Component, Debug, Default, PartialEq)]
pub struct Position(pub f32);

#[derive(Component, Debug, Default, PartialEq)]
pub struct Velocity(pub f32);

#[derive(Component, Debug, Default, PartialEq)]
pub struct Health(pub u32);

#[derive(Component, Debug, Default)]
pub struct Frozen;

#[derive(Component, Debug, Default)]
pub struct Sprite;

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

pub fn new_log() -> Log {
	Rc::new(RefCell::new(Vec::new()))
}

/// Returns every entry recorded since the last call.
pub fn drain(log: &Log) -> Vec<String> {
	std::mem::take(&mut *log.borrow_mut())
}

pub type UpdateHook = Box<dyn FnMut(&mut SystemContext)>;

/// A system that records every hook call as `"<N>:<hook> ..."`.
/// `N` only exists so that several probes can be registered side by side.
pub struct Probe<const N: usize> {
	pub log: Log,
	pub interests: Interests,
	pub order: Option<SystemOrder>,
	pub on_update: Option<UpdateHook>,
}

impl<const N: usize> Probe<N> {
	pub fn new(log: &Log, interests: impl Into<Interests>) -> Self {
		Self {
			log: log.clone(),
			interests: interests.into(),
			order: None,
			on_update: None,
		}
	}

	pub fn with_order(mut self, order: SystemOrder) -> Self {
		self.order = Some(order);
		self
	}

	pub fn with_update(mut self, hook: impl FnMut(&mut SystemContext) + 'static) -> Self {
		self.on_update = Some(Box::new(hook));
		self
	}

	fn record(&self, entry: String) {
		self.log.borrow_mut().push(format!("{}:{}", N, entry));
	}
}

fn component_name(component: ComponentRef) -> &'static str {
	component.component.name()
}

impl<const N: usize> System for Probe<N> {
	fn order(&self) -> Option<SystemOrder> {
		self.order
	}

	fn interests(&self) -> Interests {
		self.interests.clone()
	}

	fn on_awake(&mut self, _: &mut SystemContext) {
		self.record("awake".into());
	}

	fn on_enable(&mut self) {
		self.record("enable".into());
	}

	fn on_disable(&mut self) {
		self.record("disable".into());
	}

	fn on_destroy(&mut self, _: &mut SystemContext) {
		self.record("destroy".into());
	}

	fn on_add_entity(&mut self, _: &mut SystemContext, entity: Entity, group: &InterestGroup) {
		self.record(format!("add {}/{}", group.index(), entity.index()));
	}

	fn on_add_component(&mut self, _: &mut SystemContext, component: ComponentRef, group: &InterestGroup) {
		self.record(format!(
			"add_component {}/{} {}",
			group.index(),
			component.entity.index(),
			component_name(component)
		));
	}

	fn on_remove_component(&mut self, _: &EntityStore, component: ComponentRef, group: &InterestGroup) {
		self.record(format!(
			"remove_component {}/{} {}",
			group.index(),
			component.entity.index(),
			component_name(component)
		));
	}

	fn on_remove_entity(&mut self, _: &EntityStore, entity: Entity, group: &InterestGroup) {
		self.record(format!("remove {}/{}", group.index(), entity.index()));
	}

	fn on_update(&mut self, ctx: &mut SystemContext) {
		self.record("update".into());
		if let Some(hook) = self.on_update.as_mut() {
			hook(ctx);
		}
	}

	fn on_late_update(&mut self, _: &mut SystemContext) {
		self.record("late_update".into());
	}
}
