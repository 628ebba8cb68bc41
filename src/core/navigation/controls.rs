/// Keys held down during one frame. Applied once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldControls {
    pub pan_left: bool,
    pub pan_right: bool,
    pub pan_up: bool,
    pub pan_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl HeldControls {
    /// Net pan direction as `(real, imag)` unit steps; opposite keys cancel.
    #[must_use]
    pub fn pan_direction(&self) -> (f64, f64) {
        (
            axis(self.pan_right, self.pan_left),
            axis(self.pan_up, self.pan_down),
        )
    }

    /// Screen heading of the pan in degrees, 0 up and 90 right, or `None`
    /// while the view is not moving.
    #[must_use]
    pub fn pan_heading(&self) -> Option<f64> {
        let (real, imag) = self.pan_direction();
        if real == 0.0 && imag == 0.0 {
            return None;
        }
        Some(real.atan2(imag).to_degrees())
    }
}

fn axis(positive: bool, negative: bool) -> f64 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Discrete actions triggered on key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewCommand {
    DoubleIterations,
    HalveIterations,
    ToggleMode,
    Reset,
    MultiplySamples,
    DivideSamples,
    NextBatchWidth,
    PreviousBatchWidth,
    ToggleOverlay,
}
