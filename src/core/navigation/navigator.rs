use crate::core::data::canvas::Canvas;
use crate::core::data::complex::Complex;
use crate::core::data::view_state::ViewState;
use crate::core::navigation::controls::{HeldControls, ViewCommand};
use crate::core::navigation::limits::NavigationLimits;
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;

/// What a frame of input did to the view, as seen by the render controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewChange {
    /// The preview image is stale: geometry, mode, iterations, or the Julia
    /// parameter changed.
    pub invalidated: bool,
    /// Only the sample count changed.
    pub quality_changed: bool,
}

impl ViewChange {
    #[must_use]
    pub fn between(previous: &ViewState, current: &ViewState) -> Self {
        Self {
            invalidated: current.invalidates(previous),
            quality_changed: current.sample_count != previous.sample_count,
        }
    }
}

/// Maps a cursor position to the Julia parameter.
///
/// The cursor always reads the home window (zoom 1, no offset) so the
/// parameter does not jump while panning or zooming. Positions outside the
/// window are pulled onto its edge.
#[must_use]
pub fn cursor_to_parameter(x: f64, y: f64, canvas: Canvas) -> Complex {
    let x = if x.is_finite() { x } else { 0.0 };
    let y = if y.is_finite() { y } else { 0.0 };
    let x = x.clamp(0.0, f64::from(canvas.width() - 1));
    let y = y.clamp(0.0, f64::from(canvas.height() - 1));

    pixel_to_complex_coords(x, y, canvas, 1.0, Complex::ZERO).unwrap_or(Complex::ZERO)
}

/// Applies one frame of held keys: zoom first, then pan scaled by the new
/// zoom.
pub fn apply_held(view: &mut ViewState, held: HeldControls, limits: &NavigationLimits) {
    let mut zoom = view.zoom;
    if held.zoom_in {
        zoom *= limits.zoom_step;
    }
    if held.zoom_out {
        zoom /= limits.zoom_step;
    }

    let clamped = limits.clamp_zoom(zoom);
    if clamped != zoom {
        log::warn!("zoom {} clamped to {}", zoom, clamped);
    }
    view.zoom = clamped;

    let (real, imag) = held.pan_direction();
    let step = limits.pan_step / view.zoom;
    view.offset += Complex::new(real * step, imag * step);
}

/// Applies a discrete command to the view. Commands that do not touch the
/// view are ignored here.
pub fn apply_command(view: &mut ViewState, command: ViewCommand, limits: &NavigationLimits) {
    match command {
        ViewCommand::DoubleIterations => {
            let doubled = view.max_iterations.saturating_mul(2);
            if view.max_iterations < limits.max_iterations_cap
                && doubled > limits.max_iterations_cap
            {
                log::warn!(
                    "iterations capped at {}",
                    limits.max_iterations_cap
                );
            }
            view.max_iterations = doubled.min(limits.max_iterations_cap).max(1);
        }
        ViewCommand::HalveIterations => {
            view.max_iterations = (view.max_iterations / 2).max(1);
        }
        ViewCommand::ToggleMode => {
            view.mode = view.mode.toggled();
            log::info!("switched to {} mode", view.mode);
        }
        ViewCommand::Reset => view.reset(),
        ViewCommand::MultiplySamples => {
            let multiplied = view.sample_count.saturating_mul(limits.sample_step);
            if multiplied > limits.max_sample_count {
                log::warn!("sample count capped at {}", limits.max_sample_count);
            }
            view.sample_count = multiplied.min(limits.max_sample_count).max(1);
        }
        ViewCommand::DivideSamples => {
            view.sample_count = (view.sample_count / limits.sample_step.max(1)).max(1);
        }
        ViewCommand::NextBatchWidth
        | ViewCommand::PreviousBatchWidth
        | ViewCommand::ToggleOverlay => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fractals::fractal_kinds::FractalKinds;

    fn canvas() -> Canvas {
        Canvas::new(1440, 720).unwrap()
    }

    #[test]
    fn cursor_reads_the_home_window() {
        assert_eq!(cursor_to_parameter(0.0, 0.0, canvas()), Complex::new(-4.0, 2.0));
        assert_eq!(cursor_to_parameter(720.0, 360.0, canvas()), Complex::ZERO);
    }

    #[test]
    fn cursor_outside_window_is_clamped() {
        let inside = cursor_to_parameter(0.0, 0.0, canvas());

        assert_eq!(cursor_to_parameter(-50.0, -10.0, canvas()), inside);
        assert_eq!(cursor_to_parameter(f64::NAN, 0.0, canvas()), inside);
        assert_eq!(
            cursor_to_parameter(5000.0, 360.0, canvas()),
            cursor_to_parameter(1439.0, 360.0, canvas())
        );
    }

    #[test]
    fn zoom_applies_before_pan() {
        let limits = NavigationLimits::default();
        let mut view = ViewState::default();
        let held = HeldControls {
            zoom_in: true,
            pan_right: true,
            ..HeldControls::default()
        };

        apply_held(&mut view, held, &limits);

        assert!((view.zoom - 1.1).abs() < 1e-12);
        assert!((view.offset.real - 0.1 / 1.1).abs() < 1e-12);
        assert_eq!(view.offset.imag, 0.0);
    }

    #[test]
    fn pan_directions_move_the_offset() {
        let limits = NavigationLimits::default();
        let mut view = ViewState::default();

        apply_held(
            &mut view,
            HeldControls {
                pan_up: true,
                pan_left: true,
                ..HeldControls::default()
            },
            &limits,
        );

        assert!((view.offset.real + 0.1).abs() < 1e-12);
        assert!((view.offset.imag - 0.1).abs() < 1e-12);
    }

    #[test]
    fn zoom_never_reaches_zero() {
        let limits = NavigationLimits::default();
        let mut view = ViewState::default();
        let held = HeldControls {
            zoom_out: true,
            ..HeldControls::default()
        };

        for _ in 0..1000 {
            apply_held(&mut view, held, &limits);
        }

        assert_eq!(view.zoom, limits.min_zoom);
    }

    #[test]
    fn iteration_commands_double_halve_and_clamp() {
        let limits = NavigationLimits::default();
        let mut view = ViewState::default();

        apply_command(&mut view, ViewCommand::DoubleIterations, &limits);
        assert_eq!(view.max_iterations, 128);

        for _ in 0..20 {
            apply_command(&mut view, ViewCommand::HalveIterations, &limits);
        }
        assert_eq!(view.max_iterations, 1);

        for _ in 0..40 {
            apply_command(&mut view, ViewCommand::DoubleIterations, &limits);
        }
        assert_eq!(view.max_iterations, limits.max_iterations_cap);
    }

    #[test]
    fn doubling_at_the_cap_is_not_a_change() {
        let limits = NavigationLimits::default();
        let mut view = ViewState {
            max_iterations: limits.max_iterations_cap,
            ..ViewState::default()
        };
        let previous = view;

        apply_command(&mut view, ViewCommand::DoubleIterations, &limits);

        assert_eq!(view, previous);
        assert_eq!(ViewChange::between(&previous, &view), ViewChange::default());
    }

    #[test]
    fn sample_commands_scale_by_four_and_clamp() {
        let limits = NavigationLimits::default();
        let mut view = ViewState::default();

        apply_command(&mut view, ViewCommand::MultiplySamples, &limits);
        assert_eq!(view.sample_count, 16);

        for _ in 0..10 {
            apply_command(&mut view, ViewCommand::MultiplySamples, &limits);
        }
        assert_eq!(view.sample_count, limits.max_sample_count);

        for _ in 0..10 {
            apply_command(&mut view, ViewCommand::DivideSamples, &limits);
        }
        assert_eq!(view.sample_count, 1);
    }

    #[test]
    fn toggle_and_reset() {
        let limits = NavigationLimits::default();
        let mut view = ViewState {
            zoom: 8.0,
            ..ViewState::default()
        };

        apply_command(&mut view, ViewCommand::ToggleMode, &limits);
        assert_eq!(view.mode, FractalKinds::Mandelbrot);

        apply_command(&mut view, ViewCommand::Reset, &limits);
        assert_eq!(view.zoom, 1.0);
        assert_eq!(view.sample_count, 1);
        assert_eq!(view.mode, FractalKinds::Mandelbrot);
    }

    #[test]
    fn view_change_separates_quality_from_invalidation() {
        let previous = ViewState::default();

        assert_eq!(
            ViewChange::between(&previous, &previous.with_sample_count(16)),
            ViewChange {
                invalidated: false,
                quality_changed: true
            }
        );
        assert_eq!(
            ViewChange::between(&previous, &ViewState { zoom: 2.0, ..previous }),
            ViewChange {
                invalidated: true,
                quality_changed: false
            }
        );
        assert_eq!(ViewChange::between(&previous, &previous), ViewChange::default());
    }

    #[test]
    fn non_view_commands_leave_view_untouched() {
        let limits = NavigationLimits::default();
        let mut view = ViewState::default();

        for command in [
            ViewCommand::NextBatchWidth,
            ViewCommand::PreviousBatchWidth,
            ViewCommand::ToggleOverlay,
        ] {
            apply_command(&mut view, command, &limits);
        }

        assert_eq!(view, ViewState::default());
    }
}
