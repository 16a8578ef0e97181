//! Chamber Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Request-Verarbeitung, Geräte-Registry, Status-Serialisierung und
//! Refresh-Scheduling als Pure Logic; Hardware nur hinter Traits.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod registry;
pub mod request;
pub mod scheduler;
pub mod status;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use command::{RouteDecision, STATUS_ROUTE_TOKEN, apply, contains_token, last_switch_match};
pub use registry::{Device, DeviceRegistry};
pub use request::{FeedOutcome, RequestBuffer};
pub use scheduler::{RefreshError, RefreshScheduler, SampleStore, run_refresh};
pub use status::render;
pub use telemetry::{DEVICE_COUNT, TelemetrySnapshot};
pub use traits::{DisplayAdapter, DisplayError, RelayError, RelayLine, SensorError, SensorProbe};
pub use types::{SensorReading, SensorSample};
