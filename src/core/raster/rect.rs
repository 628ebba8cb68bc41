use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;

impl PixelBuffer {
    /// One-pixel border of the `width` x `height` rectangle at `(x, y)`.
    ///
    /// Lines include both endpoints, so the far edges sit at `x + width - 1`
    /// and `y + height - 1`.
    pub fn rect_outline(&self, x: i32, y: i32, width: i32, height: i32, colour: Colour) {
        if width <= 0 || height <= 0 {
            return;
        }

        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);

        self.line(x, y, right, y, colour);
        self.line(x, y, x, bottom, colour);
        self.line(x, bottom, right, bottom, colour);
        self.line(right, y, right, bottom, colour);
    }

    /// Fills the rectangle one row span at a time.
    pub fn rect_fill(&self, x: i32, y: i32, width: i32, height: i32, colour: Colour) {
        if width <= 0 || height <= 0 {
            return;
        }

        let top = y.max(0);
        let bottom = (i64::from(y) + i64::from(height)).min(i64::from(self.height())) as i32;

        for row in top..bottom {
            self.plot_span(x, row, width, colour);
        }
    }
}
