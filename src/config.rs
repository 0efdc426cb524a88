use crate::systems::SystemOrder;

/// Settings used to build an [EcsContext](crate::context::EcsContext).
#[derive(Debug, Clone)]
pub struct EcsConfig {
	/// Number of entities to reserve space for up front.
	pub entity_capacity: usize,
	/// Order given to systems that neither declare their own nor are registered with one.
	pub default_order: SystemOrder,
	/// Multiplier applied to every frame's delta time.
	pub time_scale: f32,
	/// Upper bound for a single frame's unscaled delta time, in seconds.
	pub max_delta_time: Option<f32>,
}

impl EcsConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_entity_capacity(mut self, entity_capacity: usize) -> Self {
		self.entity_capacity = entity_capacity;
		self
	}

	pub fn with_default_order(mut self, default_order: SystemOrder) -> Self {
		self.default_order = default_order;
		self
	}

	pub fn with_time_scale(mut self, time_scale: f32) -> Self {
		self.time_scale = time_scale;
		self
	}

	pub fn with_max_delta_time(mut self, max_delta_time: f32) -> Self {
		self.max_delta_time = Some(max_delta_time);
		self
	}
}

impl Default for EcsConfig {
	fn default() -> Self {
		Self {
			entity_capacity: 0,
			default_order: SystemOrder::default(),
			time_scale: 1.0,
			max_delta_time: None,
		}
	}
}
