use crate::systems::SystemState;
use crate::entities::Entity;
use thiserror::Error;

/// Errors raised by the entity store and the system lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
	#[error("entity {0:?} has already been destroyed")]
	DeadEntity(Entity),

	/// A system tried to change its own enabled state from inside one of its hooks.
	/// The state is left untouched.
	#[error("cannot change the enabled value of system `{system}` while it is updating")]
	MutationWhileLocked { system: &'static str },

	/// A lifecycle step was requested while the system was already running one of its hooks.
	#[error("system `{0}` is busy running one of its hooks")]
	SystemBusy(&'static str),

	#[error("system `{0}` is already registered")]
	SystemAlreadyRegistered(&'static str),

	#[error("system `{0}` is not registered")]
	SystemNotRegistered(&'static str),

	#[error("system `{system}` is {found:?}, expected {expected:?}")]
	InvalidLifecycle {
		system: &'static str,
		expected: SystemState,
		found: SystemState,
	},
}
