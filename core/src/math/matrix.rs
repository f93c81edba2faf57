use crate::math::angles::AngleHelper;
use ndarray::{arr2, Array2};

/// Threshold under which the east axis (field x gravity) is considered
/// degenerate. Field is in microtesla and gravity in m/s^2, so any usable
/// geometry sits far above this.
const MIN_EAST_NORM: f32 = 0.1;
const MIN_GRAVITY_NORM: f32 = 1e-4;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Fused attitude matrix from a gravity reference and a magnetic-field
    /// reference. Rows are the device-frame east, north, and up axes.
    /// Returns `None` when the vectors are degenerate (zero gravity or a
    /// field near-parallel to it) instead of producing garbage.
    pub fn rotation_matrix(gravity: &[f32; 3], geomagnetic: &[f32; 3]) -> Option<Array2<f32>> {
        let gravity_norm = norm(gravity);
        if !gravity_norm.is_finite() || gravity_norm < MIN_GRAVITY_NORM {
            return None;
        }
        let east = cross(geomagnetic, gravity);
        let east_norm = norm(&east);
        if !east_norm.is_finite() || east_norm < MIN_EAST_NORM {
            return None;
        }
        let east = scale(&east, 1.0 / east_norm);
        let up = scale(gravity, 1.0 / gravity_norm);
        let north = cross(&up, &east);
        Some(arr2(&[
            [east[0], east[1], east[2]],
            [north[0], north[1], north[2]],
            [up[0], up[1], up[2]],
        ]))
    }

    /// Azimuth (yaw) component of an attitude matrix, in `[0, 360)`.
    pub fn azimuth_deg(rotation: &Array2<f32>) -> Option<f32> {
        let azimuth = rotation[[0, 1]].atan2(rotation[[1, 1]]).to_degrees();
        if azimuth.is_finite() {
            Some(AngleHelper::normalize_deg(azimuth))
        } else {
            None
        }
    }
}

fn cross(lhs: &[f32; 3], rhs: &[f32; 3]) -> [f32; 3] {
    [
        lhs[1] * rhs[2] - lhs[2] * rhs[1],
        lhs[2] * rhs[0] - lhs[0] * rhs[2],
        lhs[0] * rhs[1] - lhs[1] * rhs[0],
    ]
}

fn norm(v: &[f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn scale(v: &[f32; 3], factor: f32) -> [f32; 3] {
    [v[0] * factor, v[1] * factor, v[2] * factor]
}
