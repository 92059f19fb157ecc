//! Match telemetry analysis

pub mod analyzer;
pub mod events;
pub mod teams;

pub use analyzer::{hostile_kills, HostileKill};
pub use events::kill_events;
pub use teams::TeamIndex;
