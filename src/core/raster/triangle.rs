use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::util::calculate_worker_threads::calculate_worker_threads;
use rayon::prelude::*;

/// Column tasks per hardware thread for [`PixelBuffer::triangle_fill`].
pub const TRIANGLE_TASKS_PER_THREAD: usize = 5;

/// Strict left-of test for the directed edge `v0 -> v1`.
///
/// Products of two `i32` spans can exceed `i64`, hence `i128`.
#[inline]
fn left_of(v0: Point, v1: Point, x: i64, y: i64) -> bool {
    let (x0, y0) = (i128::from(v0.x), i128::from(v0.y));
    let (x1, y1) = (i128::from(v1.x), i128::from(v1.y));
    let (x, y) = (i128::from(x), i128::from(y));

    (x1 - x0) * (y - y0) - (y1 - y0) * (x - x0) > 0
}

impl PixelBuffer {
    pub fn triangle_outline(&self, a: Point, b: Point, c: Point, colour: Colour) {
        self.line(a.x, a.y, b.x, b.y, colour);
        self.line(a.x, a.y, c.x, c.y, colour);
        self.line(b.x, b.y, c.x, c.y, colour);
    }

    /// Fills the pixels strictly inside the triangle.
    ///
    /// Vertices are reordered to a fixed winding, then every pixel of the
    /// half-open bounding box is tested against the three edges. Columns are
    /// split into contiguous ranges handled by parallel tasks. Collinear
    /// vertices have no interior and plot nothing.
    pub fn triangle_fill(&self, a: Point, b: Point, c: Point, colour: Colour) {
        let (mut v1, mut v2, v3) = (a, b, c);

        let (x1, y1) = (i128::from(v1.x), i128::from(v1.y));
        let (x2, y2) = (i128::from(v2.x), i128::from(v2.y));
        let (x3, y3) = (i128::from(v3.x), i128::from(v3.y));
        let clockwise = (y2 - y1) * (x3 - x2) - (x2 - x1) * (y3 - y2) > 0;
        if clockwise {
            std::mem::swap(&mut v1, &mut v2);
        }

        let x_min = i64::from(v1.x.min(v2.x).min(v3.x)).max(0);
        let x_max = i64::from(v1.x.max(v2.x).max(v3.x)).min(i64::from(self.width()));
        let y_min = i64::from(v1.y.min(v2.y).min(v3.y)).max(0);
        let y_max = i64::from(v1.y.max(v2.y).max(v3.y)).min(i64::from(self.height()));

        if x_min >= x_max || y_min >= y_max {
            return;
        }

        let tasks = (calculate_worker_threads().get() * TRIANGLE_TASKS_PER_THREAD) as i64;
        let job_width = (x_max - x_min + tasks - 1) / tasks;

        (0..tasks).into_par_iter().for_each(|task| {
            let start = x_min + job_width * task;
            let end = (start + job_width).min(x_max);

            for x in start..end {
                for y in y_min..y_max {
                    if left_of(v1, v2, x, y) && left_of(v2, v3, x, y) && left_of(v3, v1, x, y) {
                        self.plot(x as i32, y as i32, colour);
                    }
                }
            }
        });
    }
}
