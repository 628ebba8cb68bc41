use crate::core::data::canvas::Canvas;
use crate::core::data::view_state::ViewState;
use std::ops::Range;

/// One column band of one pass, with everything needed to render it.
///
/// Units are snapshots: the view and canvas are copied at dispatch time and
/// never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkUnit {
    pub column_start: u32,
    pub band_width: u32,
    pub view: ViewState,
    pub canvas: Canvas,
}

impl WorkUnit {
    #[must_use]
    pub fn column_end(&self) -> u32 {
        self.column_start + self.band_width
    }

    #[must_use]
    pub fn columns(&self) -> Range<u32> {
        self.column_start..self.column_end()
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.band_width as usize * self.canvas.height() as usize
    }
}
