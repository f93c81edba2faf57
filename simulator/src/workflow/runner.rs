use crate::generator::profile::SensorFrame;
use crate::workflow::config::WorkflowConfig;
use scopecore::feed::FeedReader;
use scopecore::orientation::{OrientationFilter, SensorKind};
use scopecore::prelude::{FrameSnapshot, PanelView};
use scopecore::projection::{RadarProjector, TargetProjection, Viewport};
use scopecore::scan::{Observation, VendorDb};
use scopecore::selection::SelectionController;
use scopecore::telemetry::metrics::MetricsSnapshot;
use scopecore::telemetry::{LogManager, MetricsRecorder};

/// Composes the three core components into the per-frame cycle the host
/// renderer pulls. One `tick` per rendered frame; presses arrive between
/// ticks and resolve against the last frame's target positions.
pub struct Runner {
    viewport: Viewport,
    filter: OrientationFilter,
    projector: RadarProjector,
    selection: SelectionController,
    vendors: VendorDb,
    observations: Vec<Observation>,
    last_targets: Vec<TargetProjection>,
    scan_feed: FeedReader<Vec<Observation>>,
    sensor_feed: FeedReader<SensorFrame>,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl Runner {
    pub fn new(
        config: &WorkflowConfig,
        vendors: VendorDb,
        scan_feed: FeedReader<Vec<Observation>>,
        sensor_feed: FeedReader<SensorFrame>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            viewport: config.viewport()?,
            filter: OrientationFilter::new(),
            projector: RadarProjector::new(config.beam_step_deg),
            selection: SelectionController::new(config.panel_geometry(), config.touch_radius),
            vendors,
            observations: Vec::new(),
            last_targets: Vec::new(),
            scan_feed,
            sensor_feed,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("runner"),
        })
    }

    /// One frame: drain the feeds, advance the beam, project, and re-clamp
    /// the panel. Always yields a renderable snapshot, including before any
    /// sensor or scan data has arrived.
    pub fn tick(&mut self) -> FrameSnapshot {
        if let Some(scan) = self.scan_feed.take_latest() {
            self.logger
                .record(&format!("scan replaced: {} observations", scan.len()));
            self.observations = scan;
            self.selection.retain(&self.observations);
            self.metrics.record_scan();
        }
        if let Some(frame) = self.sensor_feed.take_latest() {
            self.filter
                .update(SensorKind::Accelerometer, frame.accelerometer);
            self.filter
                .update(SensorKind::Magnetometer, frame.magnetometer);
        }

        self.projector.advance_beam();
        let (targets, pings) = self.projector.project(
            &self.observations,
            self.filter.heading_deg(),
            &self.viewport,
        );
        self.metrics.record_frame();
        if !pings.is_empty() {
            self.metrics.record_pings(pings.len());
        }

        let panel = self.selection.panel_rect(&self.viewport).and_then(|rect| {
            let id = self.selection.selected_id()?;
            let observation = self.observations.iter().find(|obs| obs.bssid == id)?;
            Some(PanelView::for_observation(rect, observation, &self.vendors))
        });

        self.last_targets = targets.clone();
        FrameSnapshot {
            viewport_width: self.viewport.width,
            viewport_height: self.viewport.height,
            heading_deg: self.filter.heading_deg(),
            compass_point: self.filter.compass_point().to_string(),
            beam_deg: self.projector.beam_deg(),
            target_count: self.observations.len(),
            targets,
            pings,
            panel,
        }
    }

    /// Press event from the renderer, in viewport coordinates.
    pub fn tap(&mut self, x: f32, y: f32) -> Option<String> {
        self.selection
            .on_tap(x, y, &self.last_targets, &self.viewport)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_scan, GeneratorConfig, SensorRig};
    use scopecore::feed::latest_value;

    fn harness() -> (
        Runner,
        scopecore::feed::FeedPublisher<Vec<Observation>>,
        scopecore::feed::FeedPublisher<SensorFrame>,
    ) {
        let (scan_publisher, scan_feed) = latest_value();
        let (sensor_publisher, sensor_feed) = latest_value();
        let runner = Runner::new(
            &WorkflowConfig::default(),
            VendorDb::empty(),
            scan_feed,
            sensor_feed,
        )
        .unwrap();
        (runner, scan_publisher, sensor_publisher)
    }

    #[test]
    fn tick_is_renderable_before_any_input() {
        let (mut runner, _scan, _sensor) = harness();
        let frame = runner.tick();
        assert_eq!(frame.target_count, 0);
        assert_eq!(frame.beam_deg, 1.0);
        assert!(frame.panel.is_none());
    }

    #[test]
    fn scan_replacement_reaches_the_next_frame() {
        let (mut runner, scan_publisher, sensor_publisher) = harness();
        let generator = GeneratorConfig::default();
        scan_publisher.publish(build_scan(&generator, 0));
        sensor_publisher.publish(SensorRig::new(&generator).advance(0.02));

        let frame = runner.tick();
        assert_eq!(frame.target_count, generator.network_count);
        assert_eq!(frame.targets.len(), generator.network_count);
        assert_eq!(runner.metrics().scans, 1);
    }

    #[test]
    fn tap_selects_and_scan_loss_clears() {
        let (mut runner, scan_publisher, _sensor) = harness();
        let generator = GeneratorConfig::default();
        scan_publisher.publish(build_scan(&generator, 0));

        let mut chosen = None;
        for _ in 0..360 {
            let frame = runner.tick();
            if let Some(target) = frame.targets.iter().find(|t| t.visible) {
                chosen = Some(target.clone());
                break;
            }
        }
        let target = chosen.expect("a full sweep lights up some target");
        let selected = runner.tap(target.x, target.y);
        assert_eq!(selected.as_deref(), Some(target.bssid.as_str()));

        let with_panel = runner.tick();
        let panel = with_panel.panel.expect("panel for live selection");
        assert_eq!(panel.bssid, target.bssid);
        assert_eq!(panel.vendor, "Unknown");

        scan_publisher.publish(Vec::new());
        let after_loss = runner.tick();
        assert!(after_loss.panel.is_none());
    }
}
