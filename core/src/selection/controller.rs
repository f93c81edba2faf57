use crate::projection::projector::{TargetProjection, Viewport};
use crate::scan::observation::Observation;
use serde::{Deserialize, Serialize};

/// Generous fixed hit radius around a blip, independent of blip size.
pub const DEFAULT_TOUCH_RADIUS: f32 = 60.0;

/// Axis-aligned detail-panel rectangle, already clamped into the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Panel dimensions and placement margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Side of the square close control anchored at the panel's top-right.
    pub close_size: f32,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            width: 550.0,
            height: 750.0,
            margin: 20.0,
            close_size: 80.0,
        }
    }
}

/// Resolves presses against the last projected targets and keeps the detail
/// panel on screen wherever the press landed. The anchor is captured once
/// at selection time and never recomputed; only the clamped rectangle is.
#[derive(Debug, Clone)]
pub struct SelectionController {
    geometry: PanelGeometry,
    touch_radius: f32,
    selected: Option<String>,
    anchor: (f32, f32),
}

impl SelectionController {
    pub fn new(geometry: PanelGeometry, touch_radius: f32) -> Self {
        Self {
            geometry,
            touch_radius,
            selected: None,
            anchor: (0.0, 0.0),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn anchor(&self) -> (f32, f32) {
        self.anchor
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Handles one press. A press on the open panel's close control clears
    /// the selection; any other press re-runs the target hit test, keeping
    /// the nearest visible target inside the touch radius. A miss leaves
    /// the current selection alone.
    pub fn on_tap(
        &mut self,
        x: f32,
        y: f32,
        targets: &[TargetProjection],
        viewport: &Viewport,
    ) -> Option<String> {
        if self.selected.is_some() {
            let rect = self.place(viewport);
            let in_close = x > rect.right() - self.geometry.close_size
                && x < rect.right()
                && y > rect.top
                && y < rect.top + self.geometry.close_size;
            if in_close {
                self.selected = None;
                return None;
            }
        }

        let mut best: Option<(&TargetProjection, f32)> = None;
        for target in targets.iter().filter(|t| t.visible) {
            let distance = (x - target.x).hypot(y - target.y);
            // Strict comparison keeps the first of an exact tie.
            if distance < self.touch_radius && best.map_or(true, |(_, d)| distance < d) {
                best = Some((target, distance));
            }
        }
        if let Some((target, _)) = best {
            self.selected = Some(target.bssid.clone());
            self.anchor = (x, y);
        }

        self.selected.clone()
    }

    /// Drops the selection once its id has left the freshest scan.
    pub fn retain(&mut self, observations: &[Observation]) {
        if let Some(id) = &self.selected {
            if !observations.iter().any(|obs| &obs.bssid == id) {
                self.selected = None;
            }
        }
    }

    /// Clamped panel rectangle for the current anchor, or `None` without a
    /// selection.
    pub fn panel_rect(&self, viewport: &Viewport) -> Option<PanelRect> {
        self.selected.as_ref().map(|_| self.place(viewport))
    }

    fn place(&self, viewport: &Viewport) -> PanelRect {
        Self::place_at(self.anchor.0, self.anchor.1, &self.geometry, viewport)
    }

    /// Smart placement: the top-left anchor starts at the press point, the
    /// right/bottom edges are pulled inside the margin first, then the
    /// left/top edges, so a corner press settles fully on screen.
    pub fn place_at(x: f32, y: f32, geometry: &PanelGeometry, viewport: &Viewport) -> PanelRect {
        let mut left = x;
        let mut top = y;
        if left + geometry.width > viewport.width {
            left = viewport.width - geometry.width - geometry.margin;
        }
        if top + geometry.height > viewport.height {
            top = viewport.height - geometry.height - geometry.margin;
        }
        if left < geometry.margin {
            left = geometry.margin;
        }
        if top < geometry.margin {
            top = geometry.margin;
        }
        PanelRect {
            left,
            top,
            width: geometry.width,
            height: geometry.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::observation::Security;

    fn target(bssid: &str, x: f32, y: f32, visible: bool) -> TargetProjection {
        TargetProjection {
            bssid: bssid.into(),
            label: "net".into(),
            bearing_deg: 0.0,
            screen_angle_deg: 0.0,
            distance_fraction: 0.5,
            x,
            y,
            angular_delta_deg: 0.0,
            alpha: if visible { 200 } else { 0 },
            blip_size: 10.0,
            strong: true,
            distance_label_m: 12,
            security: Security::Wpa2,
            visible,
        }
    }

    fn controller() -> SelectionController {
        SelectionController::new(PanelGeometry::default(), DEFAULT_TOUCH_RADIUS)
    }

    fn viewport() -> Viewport {
        Viewport::new(1080.0, 1920.0)
    }

    #[test]
    fn nearest_target_within_radius_wins() {
        let mut selection = controller();
        let targets = [
            target("far", 400.0, 400.0, true),
            target("near", 310.0, 300.0, true),
        ];
        let selected = selection.on_tap(300.0, 300.0, &targets, &viewport());
        assert_eq!(selected.as_deref(), Some("near"));
        assert_eq!(selection.anchor(), (300.0, 300.0));
    }

    #[test]
    fn invisible_targets_are_not_hit_testable() {
        let mut selection = controller();
        let targets = [target("faded", 300.0, 300.0, false)];
        assert!(selection.on_tap(300.0, 300.0, &targets, &viewport()).is_none());
    }

    #[test]
    fn miss_keeps_the_current_selection() {
        let mut selection = controller();
        let targets = [target("kept", 300.0, 300.0, true)];
        selection.on_tap(300.0, 300.0, &targets, &viewport());
        let still = selection.on_tap(900.0, 300.0, &targets, &viewport());
        assert_eq!(still.as_deref(), Some("kept"));
    }

    #[test]
    fn close_control_clears_the_selection() {
        let mut selection = controller();
        let targets = [target("open", 300.0, 300.0, true)];
        selection.on_tap(300.0, 300.0, &targets, &viewport());
        let rect = selection.panel_rect(&viewport()).unwrap();
        let cleared = selection.on_tap(rect.right() - 10.0, rect.top + 10.0, &targets, &viewport());
        assert!(cleared.is_none());
        assert!(selection.selected_id().is_none());
    }

    #[test]
    fn tap_on_another_target_switches_without_dismissing() {
        let mut selection = controller();
        let targets = [
            target("first", 300.0, 300.0, true),
            target("second", 300.0, 900.0, true),
        ];
        selection.on_tap(300.0, 300.0, &targets, &viewport());
        let switched = selection.on_tap(300.0, 900.0, &targets, &viewport());
        assert_eq!(switched.as_deref(), Some("second"));
    }

    #[test]
    fn stale_selection_is_cleared_by_retain() {
        let mut selection = controller();
        let targets = [target("gone", 300.0, 300.0, true)];
        selection.on_tap(300.0, 300.0, &targets, &viewport());
        selection.retain(&[]);
        assert!(selection.selected_id().is_none());
    }

    #[test]
    fn corner_tap_is_pulled_fully_on_screen() {
        let geometry = PanelGeometry::default();
        let rect = SelectionController::place_at(1060.0, 1900.0, &geometry, &viewport());
        assert_eq!(rect.left, 510.0);
        assert_eq!(rect.top, 1150.0);
        assert_eq!(rect.right(), 1060.0);
        assert_eq!(rect.bottom(), 1900.0);
    }

    #[test]
    fn placement_respects_margins_everywhere() {
        let geometry = PanelGeometry::default();
        let viewport = viewport();
        for x in [0.0, 5.0, 540.0, 1075.0, 1080.0] {
            for y in [0.0, 19.0, 960.0, 1915.0, 1920.0] {
                let rect = SelectionController::place_at(x, y, &geometry, &viewport);
                assert!(rect.left >= geometry.margin);
                assert!(rect.top >= geometry.margin);
                assert!(rect.right() <= viewport.width - geometry.margin);
                assert!(rect.bottom() <= viewport.height - geometry.margin);
            }
        }
    }
}
