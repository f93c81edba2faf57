use serde::{Deserialize, Serialize};

/// Press event forwarded by the renderer, in viewport coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TapRequest {
    pub x: f32,
    pub y: f32,
}

/// Outcome of a press: the selected id, if any survived the hit test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapResponse {
    pub status: String,
    pub selected: Option<String>,
}
