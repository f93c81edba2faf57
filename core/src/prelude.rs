use crate::projection::projector::TargetProjection;
use crate::scan::observation::{Observation, Security};
use crate::scan::vendor::VendorDb;
use crate::selection::controller::PanelRect;
use serde::{Deserialize, Serialize};

/// SSID character budget for the detail-panel header.
pub const PANEL_SSID_CHARS: usize = 18;

/// Per-frame state handed to the renderer: heading, beam, the projection
/// list, the pings fired this frame, and the detail panel when a target is
/// selected.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FrameSnapshot {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub heading_deg: f32,
    pub compass_point: String,
    pub beam_deg: f32,
    pub target_count: usize,
    pub targets: Vec<TargetProjection>,
    pub pings: Vec<String>,
    pub panel: Option<PanelView>,
}

/// Detail rows for the selected target, refreshed from the freshest scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelView {
    pub rect: PanelRect,
    pub ssid: String,
    pub bssid: String,
    pub signal_dbm: i32,
    pub frequency_mhz: u32,
    pub channel: u32,
    pub security: Security,
    pub vendor: String,
    pub channel_width: String,
    pub range_m: f64,
    pub wps: bool,
}

impl PanelView {
    /// Assembles the detail rows for one observation.
    pub fn for_observation(rect: PanelRect, observation: &Observation, vendors: &VendorDb) -> Self {
        Self {
            rect,
            ssid: observation.display_name(PANEL_SSID_CHARS),
            bssid: observation.bssid.clone(),
            signal_dbm: observation.signal_dbm,
            frequency_mhz: observation.frequency_mhz,
            channel: observation.channel(),
            security: observation.security(),
            vendor: vendors.lookup(&observation.bssid).to_string(),
            channel_width: observation.channel_width_label().to_string(),
            range_m: observation.estimated_range_m(),
            wps: observation.supports_wps(),
        }
    }
}

/// Common error type for scope construction and data loading.
#[derive(thiserror::Error, Debug)]
pub enum ScopeError {
    #[error("vendor database: {0}")]
    VendorDb(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type ScopeResult<T> = Result<T, ScopeError>;
