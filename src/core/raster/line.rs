use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;

impl PixelBuffer {
    /// Bresenham line from `(x1, y1)` to `(x2, y2)`, both endpoints included.
    ///
    /// Axis-aligned lines are written directly. Otherwise the shallow or steep
    /// walk is picked by comparing `|dy|` to `|dx|`, with endpoints ordered so
    /// the walk always moves forward along the major axis.
    pub fn line(&self, x1: i32, y1: i32, x2: i32, y2: i32, colour: Colour) {
        if x1 == x2 {
            self.vertical_line(x1, y1.min(y2), y1.max(y2), colour);
            return;
        }

        if y1 == y2 {
            self.horizontal_line(x1.min(x2), x1.max(x2), y1, colour);
            return;
        }

        let (x1, y1, x2, y2) = (i64::from(x1), i64::from(y1), i64::from(x2), i64::from(y2));

        if (y2 - y1).abs() < (x2 - x1).abs() {
            if x1 > x2 {
                self.line_low(x2, y2, x1, y1, colour);
            } else {
                self.line_low(x1, y1, x2, y2, colour);
            }
        } else if y1 > y2 {
            self.line_high(x2, y2, x1, y1, colour);
        } else {
            self.line_high(x1, y1, x2, y2, colour);
        }
    }

    fn vertical_line(&self, x: i32, top: i32, bottom: i32, colour: Colour) {
        let top = top.max(0);
        let bottom = bottom.min(self.height() as i32 - 1);

        for y in top..=bottom {
            self.plot(x, y, colour);
        }
    }

    fn horizontal_line(&self, left: i32, right: i32, y: i32, colour: Colour) {
        let left = left.max(0);
        let right = right.min(self.width() as i32 - 1);

        if left <= right {
            self.plot_span(left, y, right - left + 1, colour);
        }
    }

    /// |slope| < 1, walking x forward.
    fn line_low(&self, x1: i64, y1: i64, x2: i64, y2: i64, colour: Colour) {
        let dx = x2 - x1;
        let (dy, step) = if y2 < y1 { (y1 - y2, -1) } else { (y2 - y1, 1) };
        let mut d = 2 * dy - dx;
        let mut y = y1;

        for x in x1..=x2 {
            self.plot_wide(x, y, colour);
            if d > 0 {
                y += step;
                d += 2 * (dy - dx);
            } else {
                d += 2 * dy;
            }
        }
    }

    /// |slope| >= 1, walking y forward.
    fn line_high(&self, x1: i64, y1: i64, x2: i64, y2: i64, colour: Colour) {
        let dy = y2 - y1;
        let (dx, step) = if x2 < x1 { (x1 - x2, -1) } else { (x2 - x1, 1) };
        let mut d = 2 * dx - dy;
        let mut x = x1;

        for y in y1..=y2 {
            self.plot_wide(x, y, colour);
            if d > 0 {
                x += step;
                d += 2 * (dx - dy);
            } else {
                d += 2 * dx;
            }
        }
    }

    /// Plots a point given in wide coordinates; anything outside `i32`
    /// is off the canvas anyway.
    #[inline]
    pub(super) fn plot_wide(&self, x: i64, y: i64, colour: Colour) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.plot(x, y, colour);
        }
    }
}
