use crate::core::data::canvas::Canvas;
use crate::core::data::view_state::ViewState;
use crate::core::scheduler::work_unit::WorkUnit;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionError {
    ZeroBatchWidth,
    NotADivisor { batch_width: u32, canvas_width: u32 },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBatchWidth => write!(f, "batch width must be positive"),
            Self::NotADivisor {
                batch_width,
                canvas_width,
            } => write!(
                f,
                "batch width {} does not divide canvas width {}",
                batch_width, canvas_width
            ),
        }
    }
}

impl Error for PartitionError {}

/// Splits the canvas into `width / batch_width` contiguous column bands.
///
/// Bands are emitted left to right and exactly cover `[0, width)`.
pub fn partition(
    canvas: Canvas,
    view: ViewState,
    batch_width: u32,
) -> Result<Vec<WorkUnit>, PartitionError> {
    if batch_width == 0 {
        return Err(PartitionError::ZeroBatchWidth);
    }

    if canvas.width() % batch_width != 0 {
        return Err(PartitionError::NotADivisor {
            batch_width,
            canvas_width: canvas.width(),
        });
    }

    Ok((0..canvas.width() / batch_width)
        .map(|band| WorkUnit {
            column_start: band * batch_width,
            band_width: batch_width,
            view,
            canvas,
        })
        .collect())
}
