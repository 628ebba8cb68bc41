use crate::core::actions::cancellation::CancelToken;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::scheduler::work_unit::WorkUnit;
use std::error::Error;

/// Runs one work unit against the shared render target.
///
/// Implementations must confine their writes to the unit's column range and
/// must check `cancel` before writing anything, so a stale unit is either
/// fully rendered or not rendered at all.
pub trait UnitExecutor: Send + Sync + 'static {
    type Failure: Error + Send + 'static;

    fn execute<C: CancelToken>(
        &self,
        unit: &WorkUnit,
        target: &PixelBuffer,
        cancel: &C,
    ) -> Result<(), Self::Failure>;
}
