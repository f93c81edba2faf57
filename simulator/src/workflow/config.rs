use anyhow::Context;
use scopecore::projection::Viewport;
use scopecore::selection::PanelGeometry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub margin: f32,
    pub panel_width: f32,
    pub panel_height: f32,
    pub close_size: f32,
    pub touch_radius: f32,
    pub beam_step_deg: f32,
    pub vendor_db: Option<PathBuf>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1080.0,
            viewport_height: 1920.0,
            margin: 20.0,
            panel_width: 550.0,
            panel_height: 750.0,
            close_size: 80.0,
            touch_radius: 60.0,
            beam_step_deg: 1.0,
            vendor_db: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(viewport_width: f32, viewport_height: f32, beam_step_deg: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            beam_step_deg,
            ..Default::default()
        }
    }

    pub fn viewport(&self) -> anyhow::Result<Viewport> {
        Viewport::checked(self.viewport_width, self.viewport_height)
            .context("validating workflow viewport")
    }

    pub fn panel_geometry(&self) -> PanelGeometry {
        PanelGeometry {
            width: self.panel_width,
            height: self.panel_height,
            margin: self.margin,
            close_size: self.close_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_produces_a_viewport() {
        let cfg = WorkflowConfig::default();
        let viewport = cfg.viewport().unwrap();
        assert_eq!(viewport.width, 1080.0);
        assert_eq!(cfg.panel_geometry().margin, 20.0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"viewport_width: 720.0\nviewport_height: 1280.0\nbeam_step_deg: 2.0\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.viewport_width, 720.0);
        assert_eq!(cfg.beam_step_deg, 2.0);
        // Unlisted fields fall back to defaults.
        assert_eq!(cfg.panel_width, 550.0);
    }

    #[test]
    fn degenerate_viewport_is_rejected() {
        let cfg = WorkflowConfig::from_args(0.0, 1920.0, 1.0);
        assert!(cfg.viewport().is_err());
    }
}
