pub mod bearing;
pub mod projector;

pub use bearing::bearing_for;
pub use projector::{RadarProjector, TargetProjection, Viewport};
