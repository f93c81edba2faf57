pub mod filter;

pub use filter::{OrientationFilter, SensorKind};
