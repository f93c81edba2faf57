/// 16-point compass rose, clockwise from north.
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub struct AngleHelper;

impl AngleHelper {
    /// Normalizes an angle into `[0, 360)`.
    pub fn normalize_deg(angle_deg: f32) -> f32 {
        let wrapped = angle_deg.rem_euclid(360.0);
        if wrapped >= 360.0 {
            0.0
        } else {
            wrapped
        }
    }

    /// Signed shortest angular difference, wrapped into `[-180, 180)`.
    pub fn wrap180(diff_deg: f32) -> f32 {
        (diff_deg + 180.0).rem_euclid(360.0) - 180.0
    }

    /// Polar offset from a screen-space center point. Zero degrees points
    /// along +x, angles grow clockwise in screen coordinates (+y is down).
    pub fn polar_to_screen(angle_deg: f32, distance: f32, cx: f32, cy: f32) -> (f32, f32) {
        let rad = angle_deg.to_radians();
        (cx + rad.cos() * distance, cy + rad.sin() * distance)
    }

    /// Nearest 16-point compass name for a heading.
    pub fn compass_point(heading_deg: f32) -> &'static str {
        let index = (Self::normalize_deg(heading_deg) / 22.5).round() as usize % 16;
        COMPASS_POINTS[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_negative_angles() {
        assert_eq!(AngleHelper::normalize_deg(-1.0), 359.0);
        assert_eq!(AngleHelper::normalize_deg(360.0), 0.0);
        assert_eq!(AngleHelper::normalize_deg(725.0), 5.0);
    }

    #[test]
    fn wrap180_finds_shortest_path_across_north() {
        assert_eq!(AngleHelper::wrap180(350.0 - 0.0), -10.0);
        assert_eq!(AngleHelper::wrap180(10.0 - 350.0), 20.0);
        assert_eq!(AngleHelper::wrap180(-180.0), -180.0);
    }

    #[test]
    fn compass_points_cover_the_rose() {
        assert_eq!(AngleHelper::compass_point(0.0), "N");
        assert_eq!(AngleHelper::compass_point(22.5), "NNE");
        assert_eq!(AngleHelper::compass_point(90.0), "E");
        assert_eq!(AngleHelper::compass_point(359.0), "N");
        assert_eq!(AngleHelper::compass_point(247.0), "WSW");
    }
}
