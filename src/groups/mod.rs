//! [Interests](Interest) declare which [entities](crate::entities::Entity) a system cares about,
//! and [InterestGroups](InterestGroup) keep the matching set current without rescanning the store.

mod interest;
mod interest_group;

pub use interest::*;
pub use interest_group::InterestGroup;

pub(crate) use interest_group::Removal;
