use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;

// Arrow outline at heading 0, relative to its centre. Screen y points down.
const TIP: (f64, f64) = (0.0, -9.0);
const LEFT_CORNER: (f64, f64) = (-5.0, 6.0);
const RIGHT_CORNER: (f64, f64) = (5.0, 6.0);
const DIVOT: (f64, f64) = (0.0, 3.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArrowPoints {
    tip: Point,
    left: Point,
    right: Point,
    divot: Point,
}

impl ArrowPoints {
    /// Rotates the template clockwise by `heading` degrees and centres it on
    /// `centre`. Heading 0 points up, 90 points right.
    fn new(centre: Point, heading: f64) -> Self {
        let (sin, cos) = heading.to_radians().sin_cos();
        let place = |(x, y): (f64, f64)| Point {
            x: (f64::from(centre.x) + x * cos - y * sin).round() as i32,
            y: (f64::from(centre.y) + x * sin + y * cos).round() as i32,
        };

        Self {
            tip: place(TIP),
            left: place(LEFT_CORNER),
            right: place(RIGHT_CORNER),
            divot: place(DIVOT),
        }
    }
}

impl PixelBuffer {
    pub fn arrow_outline(&self, x: i32, y: i32, heading: f64, colour: Colour) {
        let ArrowPoints {
            tip,
            left,
            right,
            divot,
        } = ArrowPoints::new(Point { x, y }, heading);

        self.line(tip.x, tip.y, left.x, left.y, colour);
        self.line(tip.x, tip.y, right.x, right.y, colour);
        self.line(left.x, left.y, divot.x, divot.y, colour);
        self.line(divot.x, divot.y, right.x, right.y, colour);
        self.plot(x, y, colour);
    }

    pub fn arrow_fill(&self, x: i32, y: i32, heading: f64, colour: Colour) {
        let ArrowPoints {
            tip,
            left,
            right,
            divot,
        } = ArrowPoints::new(Point { x, y }, heading);

        self.triangle_fill(tip, left, divot, colour);
        self.triangle_fill(tip, right, divot, colour);
        self.line(tip.x, tip.y, divot.x, divot.y, colour);
    }
}
