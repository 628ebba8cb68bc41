use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::render_band::ports::colour_map::ColourMap;
use crate::core::actions::render_band::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::canvas::Canvas;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::fractals::escape_time::algorithm::EscapeTimeAlgorithm;
use crate::core::fractals::escape_time::colour_map::EscapeTimeColourMap;
use crate::core::fractals::escape_time::errors::EscapeTimeError;
use crate::core::scheduler::ports::unit_executor::UnitExecutor;
use crate::core::scheduler::work_unit::WorkUnit;
use std::error::Error;
use std::fmt;
use std::ops::Range;

#[derive(Debug)]
pub enum RenderBandError {
    /// The band was cancelled before any pixel was written.
    Cancelled(Cancelled),
    BandOutsideCanvas { columns: Range<u32>, canvas_width: u32 },
    CanvasMismatch { unit: Canvas, target: Canvas },
    Setup(EscapeTimeError),
    Algorithm(Box<dyn Error + Send + Sync>),
    ColourMap(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for RenderBandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::BandOutsideCanvas {
                columns,
                canvas_width,
            } => write!(
                f,
                "columns {:?} fall outside a canvas {} pixels wide",
                columns, canvas_width
            ),
            Self::CanvasMismatch { unit, target } => write!(
                f,
                "unit was cut for a {}x{} canvas but the target is {}x{}",
                unit.width(),
                unit.height(),
                target.width(),
                target.height()
            ),
            Self::Setup(err) => write!(f, "invalid view: {}", err),
            Self::Algorithm(err) => write!(f, "algorithm error: {}", err),
            Self::ColourMap(err) => write!(f, "colour map error: {}", err),
        }
    }
}

impl Error for RenderBandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::Setup(err) => Some(err),
            Self::Algorithm(err) | Self::ColourMap(err) => Some(err.as_ref()),
            Self::BandOutsideCanvas { .. } | Self::CanvasMismatch { .. } => None,
        }
    }
}

impl From<EscapeTimeError> for RenderBandError {
    fn from(err: EscapeTimeError) -> Self {
        Self::Setup(err)
    }
}

/// Renders the column band `columns` of `target`, row by row.
///
/// Cancellation is checked once, before the first write. Writes never leave
/// the band.
pub fn render_band<Alg, CMap, C>(
    columns: Range<u32>,
    algorithm: &Alg,
    colour_map: &CMap,
    target: &PixelBuffer,
    cancel: &C,
) -> Result<(), RenderBandError>
where
    Alg: FractalAlgorithm,
    Alg::Failure: Send + Sync + 'static,
    CMap: ColourMap<T = Alg::Success>,
    CMap::Failure: Send + Sync + 'static,
    C: CancelToken,
{
    if columns.end > target.width() || columns.start > columns.end {
        return Err(RenderBandError::BandOutsideCanvas {
            columns,
            canvas_width: target.width(),
        });
    }

    if cancel.is_cancelled() {
        return Err(RenderBandError::Cancelled(Cancelled));
    }

    for y in 0..target.height() as i32 {
        for x in columns.clone() {
            let pixel = Point { x: x as i32, y };
            let value = algorithm
                .compute(pixel)
                .map_err(|err| RenderBandError::Algorithm(Box::new(err)))?;
            let colour = colour_map
                .map(value)
                .map_err(|err| RenderBandError::ColourMap(Box::new(err)))?;
            target.plot(pixel.x, pixel.y, colour);
        }
    }

    Ok(())
}

/// Renders work units with the escape-time algorithm and colour map.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeTimeBandRenderer;

impl UnitExecutor for EscapeTimeBandRenderer {
    type Failure = RenderBandError;

    fn execute<C: CancelToken>(
        &self,
        unit: &WorkUnit,
        target: &PixelBuffer,
        cancel: &C,
    ) -> Result<(), Self::Failure> {
        if unit.canvas != target.canvas() {
            return Err(RenderBandError::CanvasMismatch {
                unit: unit.canvas,
                target: target.canvas(),
            });
        }

        let algorithm = EscapeTimeAlgorithm::new(unit.canvas, unit.view)?;
        let colour_map = EscapeTimeColourMap::new(unit.view.max_iterations)?;

        render_band(unit.columns(), &algorithm, &colour_map, target, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::colour::Colour;
    use crate::core::data::view_state::ViewState;
    use crate::core::scheduler::partition::partition;

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    struct StubSuccessAlgorithm {}

    impl FractalAlgorithm for StubSuccessAlgorithm {
        type Success = u8;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok((pixel.x + pixel.y) as u8)
        }
    }

    struct StubFailureAlgorithm {}

    impl FractalAlgorithm for StubFailureAlgorithm {
        type Success = u8;
        type Failure = StubError;

        fn compute(&self, _: Point) -> Result<Self::Success, Self::Failure> {
            Err(StubError {})
        }
    }

    struct GreyMap {}

    impl ColourMap for GreyMap {
        type T = u8;
        type Failure = StubError;

        fn map(&self, value: u8) -> Result<Colour, Self::Failure> {
            Ok(Colour {
                r: value,
                g: value,
                b: value,
            })
        }
    }

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas::new(width, height).unwrap()
    }

    #[test]
    fn test_band_writes_only_its_columns() {
        let target = PixelBuffer::filled(canvas(6, 3), Colour::WHITE);

        render_band(2..4, &StubSuccessAlgorithm {}, &GreyMap {}, &target, &NeverCancel).unwrap();

        for y in 0..3 {
            for x in 0..6 {
                let expected = if (2..4).contains(&x) {
                    let v = (x + y) as u8;
                    Colour { r: v, g: v, b: v }
                } else {
                    Colour::WHITE
                };
                assert_eq!(target.get(x, y), Some(expected));
            }
        }
    }

    #[test]
    fn test_cancelled_band_writes_nothing() {
        let target = PixelBuffer::filled(canvas(4, 4), Colour::WHITE);
        let cancel = || true;

        let result = render_band(0..4, &StubSuccessAlgorithm {}, &GreyMap {}, &target, &cancel);

        assert!(matches!(result, Err(RenderBandError::Cancelled(_))));
        assert!(target.colours().all(|colour| colour == Colour::WHITE));
    }

    #[test]
    fn test_algorithm_failure_propagates() {
        let target = PixelBuffer::new(canvas(4, 4));

        let result = render_band(0..2, &StubFailureAlgorithm {}, &GreyMap {}, &target, &NeverCancel);

        assert!(matches!(result, Err(RenderBandError::Algorithm(_))));
    }

    #[test]
    fn test_band_outside_canvas_is_rejected() {
        let target = PixelBuffer::new(canvas(4, 4));

        let result = render_band(3..5, &StubSuccessAlgorithm {}, &GreyMap {}, &target, &NeverCancel);

        assert!(matches!(
            result,
            Err(RenderBandError::BandOutsideCanvas { canvas_width: 4, .. })
        ));
    }

    #[test]
    fn test_escape_time_units_cover_the_canvas_deterministically() {
        let c = canvas(24, 12);
        let view = ViewState::default();
        let first = PixelBuffer::new(c);
        let second = PixelBuffer::new(c);

        for unit in partition(c, view, 6).unwrap() {
            EscapeTimeBandRenderer.execute(&unit, &first, &NeverCancel).unwrap();
        }
        for unit in partition(c, view, 4).unwrap().iter().rev() {
            EscapeTimeBandRenderer.execute(unit, &second, &NeverCancel).unwrap();
        }

        assert_eq!(first.snapshot(), second.snapshot());
        // Centre of the default Julia view is interior.
        assert_eq!(
            first.get(12, 6),
            Some(Colour {
                r: 255,
                g: 255,
                b: 180
            })
        );
    }

    #[test]
    fn test_rerun_over_same_buffer_is_idempotent() {
        let c = canvas(16, 8);
        let target = PixelBuffer::new(c);
        let units = partition(c, ViewState::default().with_sample_count(4), 4).unwrap();

        for unit in &units {
            EscapeTimeBandRenderer.execute(unit, &target, &NeverCancel).unwrap();
        }
        let before = target.snapshot();
        for unit in &units {
            EscapeTimeBandRenderer.execute(unit, &target, &NeverCancel).unwrap();
        }

        assert_eq!(target.snapshot(), before);
    }

    #[test]
    fn test_unit_for_other_canvas_is_rejected() {
        let unit = partition(canvas(8, 8), ViewState::default(), 8).unwrap()[0];
        let target = PixelBuffer::new(canvas(8, 4));

        assert!(matches!(
            EscapeTimeBandRenderer.execute(&unit, &target, &NeverCancel),
            Err(RenderBandError::CanvasMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_view_is_rejected() {
        let view = ViewState {
            max_iterations: 0,
            ..ViewState::default()
        };
        let unit = partition(canvas(4, 4), view, 4).unwrap()[0];
        let target = PixelBuffer::new(canvas(4, 4));

        assert!(matches!(
            EscapeTimeBandRenderer.execute(&unit, &target, &NeverCancel),
            Err(RenderBandError::Setup(EscapeTimeError::ZeroMaxIterationsError))
        ));
    }
}
