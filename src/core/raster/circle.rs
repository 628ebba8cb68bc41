use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::f64::consts::SQRT_2;

/// Whether the inclusive box `[left, right] x [top, bottom]` touches the
/// canvas.
fn touches_canvas(buffer: &PixelBuffer, left: i64, top: i64, right: i64, bottom: i64) -> bool {
    right >= 0
        && bottom >= 0
        && left < i64::from(buffer.width())
        && top < i64::from(buffer.height())
}

impl PixelBuffer {
    /// Midpoint circle of radius `radius` centred on `(xc, yc)`.
    pub fn circle_outline(&self, xc: i32, yc: i32, radius: i32, colour: Colour) {
        if radius < 0 {
            return;
        }

        let (xc, yc, radius) = (i64::from(xc), i64::from(yc), i64::from(radius));
        if !touches_canvas(self, xc - radius, yc - radius, xc + radius, yc + radius) {
            return;
        }

        let mut x = 0;
        let mut y = radius;
        let mut d = 3 - 2 * radius;

        self.plot_octants(xc, yc, x, y, colour);
        while y >= x {
            x += 1;
            if d > 0 {
                y -= 1;
                d += 4 * (x - y) + 10;
            } else {
                d += 4 * x + 6;
            }
            self.plot_octants(xc, yc, x, y, colour);
        }
    }

    fn plot_octants(&self, xc: i64, yc: i64, x: i64, y: i64, colour: Colour) {
        self.plot_wide(xc + x, yc + y, colour);
        self.plot_wide(xc - x, yc + y, colour);
        self.plot_wide(xc + x, yc - y, colour);
        self.plot_wide(xc - x, yc - y, colour);
        self.plot_wide(xc + y, yc + x, colour);
        self.plot_wide(xc - y, yc + x, colour);
        self.plot_wide(xc + y, yc - x, colour);
        self.plot_wide(xc - y, yc - x, colour);
    }

    /// Fills every pixel with `x² + y² <= radius²` around `(xc, yc)`.
    ///
    /// The inscribed square is written as row spans while the four strips
    /// between the square and the rim are tested pixel by pixel in parallel.
    /// Strips and square overlap on their shared edges. Only the part of
    /// each strip that lies on the canvas is visited.
    pub fn circle_fill(&self, xc: i32, yc: i32, radius: i32, colour: Colour) {
        if radius < 0 {
            return;
        }

        let (xc, yc, radius) = (i64::from(xc), i64::from(yc), i64::from(radius));
        if !touches_canvas(self, xc - radius, yc - radius, xc + radius, yc + radius) {
            return;
        }

        let width = i64::from(self.width());
        let height = i64::from(self.height());
        let side = (radius as f64 * SQRT_2) as i64 / 2;
        let radius_squared = i128::from(radius) * i128::from(radius);

        let strip = |xs: (i64, i64), ys: (i64, i64)| {
            let (x_first, x_last) = (xs.0.max(-xc), xs.1.min(width - 1 - xc));
            let (y_first, y_last) = (ys.0.max(-yc), ys.1.min(height - 1 - yc));

            for x in x_first..=x_last {
                for y in y_first..=y_last {
                    let (wx, wy) = (i128::from(x), i128::from(y));
                    if wx * wx + wy * wy <= radius_squared {
                        self.plot_wide(xc + x, yc + y, colour);
                    }
                }
            }
        };

        rayon::scope(|scope| {
            scope.spawn(|_| strip((-radius, -side), (-side, side)));
            scope.spawn(|_| strip((side, radius), (-side, side)));
            scope.spawn(|_| strip((-side, side), (-radius, -side)));
            scope.spawn(|_| strip((-side, side), (side, radius)));

            let left = (xc - side).max(0);
            let right = (xc + side).min(width);
            let top = (yc - side).max(0);
            let bottom = (yc + side).min(height);

            if left < right {
                for row in top..bottom {
                    self.plot_span(left as i32, row as i32, (right - left) as i32, colour);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::core::data::canvas::Canvas;
    use crate::core::data::colour::Colour;
    use crate::core::data::pixel_buffer::PixelBuffer;

    const RED: Colour = Colour { r: 255, g: 0, b: 0 };

    fn buffer(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::new(Canvas::new(width, height).unwrap())
    }

    #[test]
    fn test_circle_fill_matches_the_disk() {
        for radius in 0..=24 {
            let b = buffer(64, 64);
            b.circle_fill(32, 32, radius, RED);

            for y in 0..64 {
                for x in 0..64 {
                    let (dx, dy) = (x - 32, y - 32);
                    let inside = dx * dx + dy * dy <= radius * radius;
                    let expected = if inside { RED } else { Colour::BLACK };
                    assert_eq!(b.get(x, y), Some(expected), "radius {} at ({}, {})", radius, x, y);
                }
            }
        }
    }

    #[test]
    fn test_circle_fill_clips_at_the_edge() {
        let b = buffer(10, 10);
        b.circle_fill(0, 0, 6, RED);

        assert_eq!(b.get(0, 0), Some(RED));
        assert_eq!(b.get(6, 0), Some(RED));
        assert_eq!(b.get(5, 5), Some(Colour::BLACK));
    }

    #[test]
    fn test_negative_radius_draws_nothing() {
        let b = buffer(10, 10);
        b.circle_fill(5, 5, -1, RED);
        b.circle_outline(5, 5, -1, RED);

        assert!(b.colours().all(|colour| colour == Colour::BLACK));
    }

    #[test]
    fn test_circle_outline_touches_the_axes() {
        let b = buffer(30, 30);
        b.circle_outline(15, 15, 10, RED);

        for (x, y) in [(25, 15), (5, 15), (15, 25), (15, 5)] {
            assert_eq!(b.get(x, y), Some(RED));
        }
        assert_eq!(b.get(15, 15), Some(Colour::BLACK));
    }

    #[test]
    fn test_circle_outline_is_symmetric() {
        let b = buffer(41, 41);
        b.circle_outline(20, 20, 13, RED);

        for y in 0..41 {
            for x in 0..41 {
                let colour = b.get(x, y);
                assert_eq!(colour, b.get(40 - x, y));
                assert_eq!(colour, b.get(x, 40 - y));
                assert_eq!(colour, b.get(y, x));
            }
        }
    }

    #[test]
    fn test_circle_outline_stays_near_the_radius() {
        let b = buffer(41, 41);
        b.circle_outline(20, 20, 13, RED);

        for y in 0..41 {
            for x in 0..41 {
                if b.get(x, y) == Some(RED) {
                    let distance = f64::from((x - 20) * (x - 20) + (y - 20) * (y - 20)).sqrt();
                    assert!((distance - 13.0).abs() < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_extreme_centres_clip_without_overflow() {
        let b = buffer(16, 16);

        b.circle_outline(i32::MAX - 1, 0, 4, RED);
        b.circle_outline(i32::MIN, i32::MIN, i32::MAX, RED);
        b.circle_fill(i32::MAX, i32::MAX, 8, RED);
        b.circle_fill(i32::MIN, 8, 3, RED);
        assert!(b.colours().all(|colour| colour == Colour::BLACK));

        b.circle_fill(1 << 30, 8, i32::MAX, RED);
        assert!(b.colours().all(|colour| colour == RED));
    }

    #[test]
    fn test_zero_radius_outline_is_the_centre() {
        let b = buffer(5, 5);
        b.circle_outline(2, 2, 0, RED);

        assert_eq!(b.get(2, 2), Some(RED));
    }
}
