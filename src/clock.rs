//! Frame timing shared by every [system](crate::systems::System).

use crate::config::EcsConfig;

/// Supplies the delta time and frame counter of the current frame.
///
/// Only the frame driver advances the clock, once per frame, before any system runs.
/// Systems and listeners only ever read it.
#[derive(Debug, Clone)]
pub struct Clock {
	frame_count: u64,
	delta_time: f32,
	unscaled_delta_time: f32,
	total_time: f64,
	time_scale: f32,
	max_delta_time: Option<f32>,
}

impl Clock {
	pub fn new() -> Self {
		Self {
			frame_count: 0,
			delta_time: 0.0,
			unscaled_delta_time: 0.0,
			total_time: 0.0,
			time_scale: 1.0,
			max_delta_time: None,
		}
	}

	pub fn with_config(config: &EcsConfig) -> Self {
		Self {
			time_scale: config.time_scale.max(0.0),
			max_delta_time: config.max_delta_time,
			..Self::new()
		}
	}

	/// Starts a new frame that lasted `raw_delta` seconds.
	///
	/// Negative deltas count as zero; the delta is clamped to the configured maximum
	/// before the time scale is applied.
	pub fn advance(&mut self, raw_delta: f32) {
		let mut delta = raw_delta.max(0.0);
		if let Some(max) = self.max_delta_time {
			delta = delta.min(max);
		}

		self.unscaled_delta_time = delta;
		self.delta_time = delta * self.time_scale;
		self.total_time += self.delta_time as f64;
		self.frame_count += 1;
	}

	/// Scaled seconds elapsed during the current frame.
	#[inline(always)]
	pub fn delta_time(&self) -> f32 {
		self.delta_time
	}

	#[inline(always)]
	pub fn unscaled_delta_time(&self) -> f32 {
		self.unscaled_delta_time
	}

	/// Scaled seconds elapsed since the clock was created.
	pub fn total_time(&self) -> f64 {
		self.total_time
	}

	/// Number of frames started so far. Mutations made before the first frame belong to frame 0.
	#[inline(always)]
	pub fn frame_count(&self) -> u64 {
		self.frame_count
	}

	pub fn time_scale(&self) -> f32 {
		self.time_scale
	}

	/// Takes effect from the next call to [advance](Clock::advance).
	pub fn set_time_scale(&mut self, time_scale: f32) {
		self.time_scale = time_scale.max(0.0);
	}
}

impl Default for Clock {
	fn default() -> Self {
		Self::new()
	}
}
