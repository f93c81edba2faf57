use crate::math::angles::AngleHelper;
use crate::math::matrix::MatrixHelper;
use serde::{Deserialize, Serialize};

/// EMA smoothing factor applied to each raw vector stream. Rejects
/// high-frequency vibration while tracking slow device rotation.
pub const VECTOR_SMOOTHING: f32 = 0.97;

/// Gain of the second smoothing pass over the heading itself.
pub const HEADING_GAIN: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    Accelerometer,
    Magnetometer,
}

/// Turns raw, noisy accelerometer and magnetometer samples into a stable
/// compass heading. Purely synchronous; one mutation per incoming sample.
#[derive(Debug, Clone, Default)]
pub struct OrientationFilter {
    gravity: [f32; 3],
    geomagnetic: [f32; 3],
    heading_deg: f32,
}

impl OrientationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one raw 3-axis sample and refreshes the smoothed heading.
    /// Degenerate geometry leaves the previous heading unchanged.
    pub fn update(&mut self, kind: SensorKind, raw: [f32; 3]) {
        let stream = match kind {
            SensorKind::Accelerometer => &mut self.gravity,
            SensorKind::Magnetometer => &mut self.geomagnetic,
        };
        for (smoothed, value) in stream.iter_mut().zip(raw) {
            *smoothed = VECTOR_SMOOTHING * *smoothed + (1.0 - VECTOR_SMOOTHING) * value;
        }

        if let Some(azimuth) = MatrixHelper::rotation_matrix(&self.gravity, &self.geomagnetic)
            .as_ref()
            .and_then(MatrixHelper::azimuth_deg)
        {
            self.steer_toward(azimuth);
        }
    }

    /// Current smoothed heading, always in `[0, 360)`.
    pub fn heading_deg(&self) -> f32 {
        self.heading_deg
    }

    /// 16-point compass name for the current heading.
    pub fn compass_point(&self) -> &'static str {
        AngleHelper::compass_point(self.heading_deg)
    }

    /// Slow second pass over the heading. Advances by a tenth of the signed
    /// shortest difference so the visible heading never snaps across the
    /// 0/360 discontinuity.
    fn steer_toward(&mut self, azimuth_deg: f32) {
        let diff = AngleHelper::wrap180(azimuth_deg - self.heading_deg);
        self.heading_deg = AngleHelper::normalize_deg(self.heading_deg + HEADING_GAIN * diff);
    }
}
