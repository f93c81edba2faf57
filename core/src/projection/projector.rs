use crate::math::angles::AngleHelper;
use crate::prelude::{ScopeError, ScopeResult};
use crate::projection::bearing::bearing_for;
use crate::scan::observation::{Observation, Security};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Trailing-fade window behind the beam; a target brightens sharply as the
/// beam arrives, then fades over most of a revolution.
pub const FADE_WINDOW_DEG: f32 = 310.0;
/// A ping fires while the beam sits within this lead band of a target.
pub const PING_FIRE_DEG: f32 = 4.0;
/// The ping re-arms once the beam has moved this far past the target.
pub const PING_RESET_DEG: f32 = 10.0;
/// Alpha below which a target is not drawn and not hit-testable.
pub const VISIBLE_ALPHA: u8 = 15;
/// Signal level separating the strong and weak blip colors.
pub const STRONG_SIGNAL_DBM: i32 = -65;
/// Strength floor preventing asymptotic blow-up at very weak signal.
pub const STRENGTH_FLOOR: f32 = 0.1;
/// Blips swell while the beam is within this lead window.
const BLIP_NEAR_DEG: f32 = 20.0;
const BLIP_LARGE: f32 = 14.0;
const BLIP_SMALL: f32 = 10.0;
/// SSID character budget for on-radar labels.
const BLIP_LABEL_CHARS: usize = 12;
/// Inset of the outer ring from the shorter viewport edge.
const RING_INSET: f32 = 140.0;

/// Viewport the projections are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Validating constructor for host-supplied dimensions.
    pub fn checked(width: f32, height: f32) -> ScopeResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ScopeError::InvalidInput(format!(
                "viewport {width}x{height} is not drawable"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Outer-ring radius, inset from the shorter viewport edge.
    pub fn radius(&self) -> f32 {
        (self.width.min(self.height) / 2.0 - RING_INSET).max(1.0)
    }
}

/// Derived, per-observation, per-frame projection. Recomputed every frame;
/// the screen position is retained only to serve the next hit test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProjection {
    pub bssid: String,
    pub label: String,
    pub bearing_deg: f32,
    pub screen_angle_deg: f32,
    pub distance_fraction: f32,
    pub x: f32,
    pub y: f32,
    pub angular_delta_deg: f32,
    pub alpha: u8,
    pub blip_size: f32,
    pub strong: bool,
    pub distance_label_m: u32,
    pub security: Security,
    pub visible: bool,
}

/// Rotating sweep beam plus the per-pass ping memory. The beam advances a
/// fixed angular step once per rendered frame.
#[derive(Debug, Clone, Default)]
pub struct RadarProjector {
    beam_deg: f32,
    beam_step_deg: f32,
    pinged: HashSet<String>,
}

impl RadarProjector {
    pub fn new(beam_step_deg: f32) -> Self {
        Self {
            beam_deg: 0.0,
            beam_step_deg,
            pinged: HashSet::new(),
        }
    }

    pub fn beam_deg(&self) -> f32 {
        self.beam_deg
    }

    /// Identifiers that already pinged during the current beam pass.
    pub fn ping_memory(&self) -> &HashSet<String> {
        &self.pinged
    }

    /// Advances the beam one frame step, modulo 360.
    pub fn advance_beam(&mut self) -> f32 {
        self.beam_deg = AngleHelper::normalize_deg(self.beam_deg + self.beam_step_deg);
        self.beam_deg
    }

    /// Projects the latest observation set against the current heading and
    /// beam angle. Returns one projection per observation plus the ids that
    /// pinged this frame. An empty set yields an empty list, never an error.
    pub fn project(
        &mut self,
        observations: &[Observation],
        heading_deg: f32,
        viewport: &Viewport,
    ) -> (Vec<TargetProjection>, Vec<String>) {
        let (cx, cy) = viewport.center();
        let radius = viewport.radius();
        let mut targets = Vec::with_capacity(observations.len());
        let mut pings = Vec::new();

        for observation in observations {
            let bearing = bearing_for(&observation.bssid);
            let screen_angle = AngleHelper::normalize_deg(bearing - heading_deg);
            let delta = AngleHelper::normalize_deg(self.beam_deg - screen_angle);

            // Asymmetric hysteresis band: one ping per sweep pass per id.
            if delta < PING_FIRE_DEG {
                if self.pinged.insert(observation.bssid.clone()) {
                    pings.push(observation.bssid.clone());
                }
            } else if delta > PING_RESET_DEG {
                self.pinged.remove(&observation.bssid);
            }

            let alpha = if delta < FADE_WINDOW_DEG {
                (255.0 * (1.0 - delta / FADE_WINDOW_DEG)) as u8
            } else {
                0
            };

            let strength =
                ((100 + observation.signal_dbm) as f32 / 70.0).clamp(STRENGTH_FLOOR, 1.0);
            let distance_fraction = 1.0 - strength;
            let distance = distance_fraction * radius;
            let (x, y) = AngleHelper::polar_to_screen(screen_angle, distance, cx, cy);

            targets.push(TargetProjection {
                bssid: observation.bssid.clone(),
                label: observation.display_name(BLIP_LABEL_CHARS),
                bearing_deg: bearing,
                screen_angle_deg: screen_angle,
                distance_fraction,
                x,
                y,
                angular_delta_deg: delta,
                alpha,
                blip_size: if delta < BLIP_NEAR_DEG {
                    BLIP_LARGE
                } else {
                    BLIP_SMALL
                },
                strong: observation.signal_dbm > STRONG_SIGNAL_DBM,
                distance_label_m: (distance / 10.0) as u32,
                security: observation.security(),
                visible: alpha > VISIBLE_ALPHA,
            });
        }

        (targets, pings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(bssid: &str, signal_dbm: i32) -> Observation {
        Observation {
            bssid: bssid.into(),
            ssid: "net".into(),
            signal_dbm,
            frequency_mhz: 2437,
            capabilities: "[WPA2-PSK-CCMP][ESS]".into(),
            wide_channel: false,
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(1080.0, 1920.0)
    }

    #[test]
    fn beam_is_periodic_after_a_full_revolution() {
        let mut projector = RadarProjector::new(1.0);
        let start = projector.beam_deg();
        for _ in 0..360 {
            projector.advance_beam();
        }
        assert_eq!(projector.beam_deg(), start);
    }

    #[test]
    fn viewport_rejects_degenerate_dimensions() {
        assert!(Viewport::checked(1080.0, 1920.0).is_ok());
        assert!(Viewport::checked(0.0, 1920.0).is_err());
        assert!(Viewport::checked(f32::NAN, 100.0).is_err());
    }

    #[test]
    fn empty_observation_set_projects_to_nothing() {
        let mut projector = RadarProjector::new(1.0);
        let (targets, pings) = projector.project(&[], 0.0, &viewport());
        assert!(targets.is_empty());
        assert!(pings.is_empty());
    }

    #[test]
    fn weak_hidden_network_clamps_to_outer_ring() {
        let mut observation = observation("AA:BB:CC:11:22:33", -90);
        observation.ssid.clear();
        let mut projector = RadarProjector::new(1.0);
        let (targets, _) = projector.project(&[observation], 0.0, &viewport());
        let target = &targets[0];
        assert_eq!(target.label, "HIDDEN");
        assert!((target.distance_fraction - 0.9).abs() < 1e-6);
        assert!(!target.strong);
    }

    #[test]
    fn saturated_signal_clamps_to_center() {
        let mut projector = RadarProjector::new(1.0);
        let (targets, _) = projector.project(&[observation("AA:BB:CC:11:22:33", -10)], 0.0, &viewport());
        assert_eq!(targets[0].distance_fraction, 0.0);
        assert!(targets[0].strong);
    }

    #[test]
    fn exactly_one_ping_per_revolution() {
        let parked = observation("AA:BB:CC:11:22:33", -55);
        let mut projector = RadarProjector::new(1.0);
        let mut fired = 0;
        for _ in 0..720 {
            projector.advance_beam();
            let (_, pings) = projector.project(std::slice::from_ref(&parked), 0.0, &viewport());
            fired += pings.len();
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn colliding_bearings_keep_independent_ping_memory() {
        // Both ids hash to the same 206-degree bearing.
        let first = observation("94:0B:D5:33:5F:97", -50);
        let second = observation("1E:98:40:6C:18:9C", -70);
        assert_eq!(
            bearing_for(&first.bssid),
            bearing_for(&second.bssid)
        );

        let mut projector = RadarProjector::new(1.0);
        let pair = [first, second];
        let mut fired: Vec<String> = Vec::new();
        for _ in 0..360 {
            projector.advance_beam();
            let (_, pings) = projector.project(&pair, 0.0, &viewport());
            fired.extend(pings);
        }
        assert_eq!(fired.len(), 2);
        assert!(fired.contains(&"94:0B:D5:33:5F:97".to_string()));
        assert!(fired.contains(&"1E:98:40:6C:18:9C".to_string()));
    }

    #[test]
    fn projection_is_deterministic_for_identical_state() {
        let set = [
            observation("AA:BB:CC:11:22:33", -48),
            observation("00:11:22:33:44:55", -82),
        ];
        let mut left = RadarProjector::new(1.0);
        let mut right = RadarProjector::new(1.0);
        for _ in 0..37 {
            left.advance_beam();
            right.advance_beam();
        }
        let (targets_left, pings_left) = left.project(&set, 123.4, &viewport());
        let (targets_right, pings_right) = right.project(&set, 123.4, &viewport());
        assert_eq!(targets_left, targets_right);
        assert_eq!(pings_left, pings_right);
        assert_eq!(left.ping_memory(), right.ping_memory());
    }

    #[test]
    fn alpha_decreases_monotonically_behind_the_beam() {
        let target = observation("AA:BB:CC:11:22:33", -55);
        let mut projector = RadarProjector::new(1.0);
        let mut previous: Option<u8> = None;
        // Walk the beam away from the target and watch the trail fade.
        for _ in 0..300 {
            projector.advance_beam();
            let (targets, _) = projector.project(std::slice::from_ref(&target), 0.0, &viewport());
            let delta = targets[0].angular_delta_deg;
            if delta > 0.0 && delta < FADE_WINDOW_DEG {
                if let Some(previous) = previous {
                    assert!(targets[0].alpha <= previous);
                }
                previous = Some(targets[0].alpha);
            } else {
                previous = None;
            }
        }
    }

    #[test]
    fn field_counter_rotates_against_heading() {
        let target = observation("AA:BB:CC:11:22:33", -55);
        let mut projector = RadarProjector::new(1.0);
        let (at_north, _) = projector.project(std::slice::from_ref(&target), 0.0, &viewport());
        let (turned, _) = projector.project(std::slice::from_ref(&target), 90.0, &viewport());
        assert_eq!(at_north[0].bearing_deg, turned[0].bearing_deg);
        assert_eq!(
            AngleHelper::normalize_deg(at_north[0].screen_angle_deg - 90.0),
            turned[0].screen_angle_deg
        );
    }
}
