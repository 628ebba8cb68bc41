use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;

pub const PROGRESS_BAR_WIDTH: i32 = 180;
pub const PROGRESS_BAR_HEIGHT: i32 = 10;
pub const OVERLAY_MARGIN: i32 = 12;

const CROSSHAIR_GAP: i32 = 3;
const CROSSHAIR_ARM: i32 = 8;

/// Diagnostic marks drawn over a copy of the rendered fractal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overlay {
    /// Fraction of the running refine pass that has settled.
    pub refine_progress: Option<f64>,
    /// Pan heading in degrees while a pan key is held.
    pub pan_heading: Option<f64>,
}

impl Overlay {
    pub fn draw(&self, display: &PixelBuffer) {
        let width = display.width() as i32;
        let height = display.height() as i32;

        draw_crosshair(display, width / 2, height / 2);

        if let Some(fraction) = self.refine_progress {
            draw_progress_bar(display, width - PROGRESS_BAR_WIDTH - OVERLAY_MARGIN, OVERLAY_MARGIN, fraction);
        }

        if let Some(heading) = self.pan_heading {
            let x = width - OVERLAY_MARGIN * 2;
            let y = height - OVERLAY_MARGIN * 2;
            display.circle_fill(x, y, OVERLAY_MARGIN, Colour::BLACK);
            display.arrow_fill(x, y, heading, Colour::WHITE);
        }
    }
}

fn draw_crosshair(display: &PixelBuffer, x: i32, y: i32) {
    let near = CROSSHAIR_GAP;
    let far = CROSSHAIR_GAP + CROSSHAIR_ARM;

    display.line(x - far, y, x - near, y, Colour::WHITE);
    display.line(x + near, y, x + far, y, Colour::WHITE);
    display.line(x, y - far, x, y - near, Colour::WHITE);
    display.line(x, y + near, x, y + far, Colour::WHITE);
    display.circle_outline(x, y, CROSSHAIR_GAP + CROSSHAIR_ARM / 2, Colour::LIGHT_GRAY);
}

fn draw_progress_bar(display: &PixelBuffer, x: i32, y: i32, fraction: f64) {
    let inner = PROGRESS_BAR_WIDTH - 2;
    let filled = (f64::from(inner) * fraction.clamp(0.0, 1.0)) as i32;

    display.rect_fill(x, y, PROGRESS_BAR_WIDTH, PROGRESS_BAR_HEIGHT, Colour::BLACK);
    display.rect_outline(x, y, PROGRESS_BAR_WIDTH, PROGRESS_BAR_HEIGHT, Colour::WHITE);
    display.rect_fill(x + 1, y + 1, filled, PROGRESS_BAR_HEIGHT - 2, Colour::LIGHT_GRAY);
}
