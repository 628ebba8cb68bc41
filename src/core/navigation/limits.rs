/// Step sizes and clamping bounds for view mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationLimits {
    /// Zoom multiplier per frame while a zoom key is held.
    pub zoom_step: f64,
    /// Pan distance per frame at zoom 1, divided by the current zoom.
    pub pan_step: f64,
    /// Factor applied by the sample count commands.
    pub sample_step: u32,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub max_iterations_cap: u32,
    pub max_sample_count: u32,
}

impl Default for NavigationLimits {
    fn default() -> Self {
        Self {
            zoom_step: 1.1,
            pan_step: 0.1,
            sample_step: 4,
            min_zoom: 1e-9,
            max_zoom: 1e15,
            max_iterations_cap: 1 << 20,
            max_sample_count: 256,
        }
    }
}

impl NavigationLimits {
    /// Clamps `zoom` into `[min_zoom, max_zoom]`, mapping non-finite values
    /// to the nearest bound.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationLimits;

    #[test]
    fn default_limits_are_finite_and_consistent() {
        let limits = NavigationLimits::default();

        assert!(limits.zoom_step > 1.0);
        assert!(limits.pan_step > 0.0);
        assert!(limits.sample_step > 1);
        assert!(limits.min_zoom > 0.0);
        assert!(limits.max_zoom.is_finite());
        assert!(limits.max_zoom > limits.min_zoom);
        assert!(limits.max_iterations_cap >= 64);
        assert!(limits.max_sample_count >= 4);
    }

    #[test]
    fn clamp_zoom_keeps_zoom_positive() {
        let limits = NavigationLimits::default();

        assert_eq!(limits.clamp_zoom(0.0), limits.min_zoom);
        assert_eq!(limits.clamp_zoom(-3.0), limits.min_zoom);
        assert_eq!(limits.clamp_zoom(f64::NAN), limits.min_zoom);
        assert_eq!(limits.clamp_zoom(f64::INFINITY), limits.max_zoom);
        assert_eq!(limits.clamp_zoom(2.5), 2.5);
    }
}
