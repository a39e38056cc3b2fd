//! Domain entities held by the actor store.

pub mod activity;
pub mod actor;

pub use activity::{Activity, ActivityType};
pub use actor::Actor;
