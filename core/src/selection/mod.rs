pub mod controller;

pub use controller::{PanelGeometry, PanelRect, SelectionController};
