use crate::core::navigation::controls::{HeldControls, ViewCommand};

/// Everything the host collected since the previous frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position in canvas pixels, if the cursor is known.
    pub cursor: Option<(f64, f64)>,
    /// Key presses in the order they arrived.
    pub commands: Vec<ViewCommand>,
    pub held: HeldControls,
    /// Latest canvas size requested by the host.
    pub resize: Option<(u32, u32)>,
}
