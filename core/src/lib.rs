//! Orientation, projection, and selection core for the Rust Wi-Fi radar scope.
//!
//! State lives in owned objects the host drives one frame at a time; every
//! module hands the renderer plain snapshots instead of holding callbacks
//! into it.

pub mod feed;
pub mod math;
pub mod orientation;
pub mod prelude;
pub mod projection;
pub mod scan;
pub mod selection;
pub mod telemetry;

pub use prelude::{FrameSnapshot, PanelView, ScopeError, ScopeResult};
