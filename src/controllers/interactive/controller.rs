use crate::controllers::interactive::data::render_config::RenderConfig;
use crate::controllers::interactive::types::{FrameAction, RenderPassState};
use crate::core::actions::render_band::render_band::EscapeTimeBandRenderer;
use crate::core::data::canvas::{Canvas, CanvasError};
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::view_state::ViewState;
use crate::core::navigation::navigator::ViewChange;
use crate::core::scheduler::partition::{PartitionError, partition};
use crate::core::scheduler::pass::{PassHandle, PassProgress};
use crate::core::scheduler::ports::unit_executor::UnitExecutor;
use crate::core::scheduler::worker_pool::{WorkerPool, WorkerPoolError};
use crate::core::util::batch_widths::BatchWidths;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum RenderControllerError {
    Canvas(CanvasError),
    Partition(PartitionError),
    Pool(WorkerPoolError),
    Display(PixelBufferError),
}

impl fmt::Display for RenderControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas(err) => write!(f, "canvas error: {}", err),
            Self::Partition(err) => write!(f, "partition error: {}", err),
            Self::Pool(err) => write!(f, "worker pool error: {}", err),
            Self::Display(err) => write!(f, "display error: {}", err),
        }
    }
}

impl Error for RenderControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Canvas(err) => Some(err),
            Self::Partition(err) => Some(err),
            Self::Pool(err) => Some(err),
            Self::Display(err) => Some(err),
        }
    }
}

impl From<CanvasError> for RenderControllerError {
    fn from(err: CanvasError) -> Self {
        Self::Canvas(err)
    }
}

impl From<PartitionError> for RenderControllerError {
    fn from(err: PartitionError) -> Self {
        Self::Partition(err)
    }
}

impl From<WorkerPoolError> for RenderControllerError {
    fn from(err: WorkerPoolError) -> Self {
        Self::Pool(err)
    }
}

impl From<PixelBufferError> for RenderControllerError {
    fn from(err: PixelBufferError) -> Self {
        Self::Display(err)
    }
}

/// Drives progressive refinement over a shared render target.
///
/// Invalidating input gets a blocking single-sample pass on the calling
/// thread. Once input has been quiet for `refine_delay_frames`, a
/// supersampled pass runs in the background and is polled each frame.
pub struct RenderController<E: UnitExecutor = EscapeTimeBandRenderer> {
    pool: WorkerPool<E>,
    target: Arc<PixelBuffer>,
    batch_widths: BatchWidths,
    config: RenderConfig,
    state: RenderPassState,
    frame: u64,
    last_fast_pass_frame: Option<u64>,
    last_fast_pass_duration: Option<Duration>,
    needs_refine: bool,
    pending_invalidation: bool,
    refine: Option<PassHandle>,
    refine_cancelled: bool,
    last_refine_duration: Option<Duration>,
}

impl RenderController<EscapeTimeBandRenderer> {
    pub fn new(canvas: Canvas, config: RenderConfig) -> Result<Self, RenderControllerError> {
        Self::with_executor(EscapeTimeBandRenderer, canvas, config)
    }
}

impl<E: UnitExecutor> RenderController<E> {
    pub fn with_executor(
        executor: E,
        canvas: Canvas,
        config: RenderConfig,
    ) -> Result<Self, RenderControllerError> {
        let pool = WorkerPool::new(executor, config.worker_threads, config.queue_capacity)?;

        Ok(Self {
            pool,
            target: Arc::new(PixelBuffer::new(canvas)),
            batch_widths: BatchWidths::for_width(canvas.width(), config.worker_threads),
            config,
            state: RenderPassState::Idle,
            frame: 0,
            last_fast_pass_frame: None,
            last_fast_pass_duration: None,
            needs_refine: false,
            pending_invalidation: true,
            refine: None,
            refine_cancelled: false,
            last_refine_duration: None,
        })
    }

    /// Advances one frame.
    ///
    /// The first frame and the first frame after a resize are treated as
    /// invalidated.
    pub fn on_frame(
        &mut self,
        view: &ViewState,
        change: ViewChange,
    ) -> Result<FrameAction, RenderControllerError> {
        let frame = self.frame;
        self.frame += 1;

        self.poll_refine();

        let pending = std::mem::take(&mut self.pending_invalidation);
        let invalidated = change.invalidated || pending;

        if invalidated {
            return self.run_fast_pass(view, frame);
        }

        if change.quality_changed {
            let drained = self.cancel_refine();
            self.needs_refine = true;
            self.state = RenderPassState::StableWait;
            return Ok(FrameAction::QualityChanged { drained });
        }

        if self.should_refine(frame) {
            return self.launch_refine(view);
        }

        Ok(FrameAction::Nothing)
    }

    /// Reallocates the target for a new canvas size.
    ///
    /// Units still executing keep writing into the previous target, which is
    /// released once they finish.
    pub fn resize(&mut self, canvas: Canvas) {
        if canvas == self.target.canvas() {
            return;
        }

        self.cancel_refine();
        self.target = Arc::new(PixelBuffer::new(canvas));
        self.batch_widths = BatchWidths::for_width(canvas.width(), self.config.worker_threads);
        self.pending_invalidation = true;

        log::info!(
            "canvas resized to {}x{}, batch width {}",
            canvas.width(),
            canvas.height(),
            self.batch_widths.current()
        );
    }

    fn run_fast_pass(
        &mut self,
        view: &ViewState,
        frame: u64,
    ) -> Result<FrameAction, RenderControllerError> {
        self.cancel_refine();
        self.state = RenderPassState::FastPreviewInFlight;

        let preview = view.with_sample_count(self.config.preview_sample_count);
        let units = partition(self.target.canvas(), preview, self.batch_widths.current())?;

        let started = Instant::now();
        let progress = self.pool.dispatch_sync(units, &self.target)?;
        let elapsed = started.elapsed();

        self.last_fast_pass_frame = Some(frame);
        self.last_fast_pass_duration = Some(elapsed);
        self.needs_refine = true;
        self.state = RenderPassState::StableWait;

        Ok(FrameAction::FastPreview { progress, elapsed })
    }

    fn should_refine(&self, frame: u64) -> bool {
        let settled = self.last_fast_pass_frame.is_none_or(|fast| {
            frame.saturating_sub(fast) >= self.config.refine_delay_frames
        });

        self.needs_refine && self.refine.is_none() && settled
    }

    fn launch_refine(&mut self, view: &ViewState) -> Result<FrameAction, RenderControllerError> {
        let units = partition(self.target.canvas(), *view, self.batch_widths.current())?;
        let total = units.len();

        let handle = self.pool.dispatch_background(units, &self.target)?;
        let pass_id = handle.id();

        log::debug!(
            "refining at {} samples per pixel as pass {}",
            view.sample_count,
            pass_id
        );

        self.refine = Some(handle);
        self.refine_cancelled = false;
        self.needs_refine = false;
        self.state = RenderPassState::BackgroundRefineInFlight;

        Ok(FrameAction::RefineLaunched {
            pass_id,
            units: total,
        })
    }

    /// Drops queued work. A running refine is marked cancelled but its
    /// handle is kept until its executing units finish, so no second
    /// background pass can overlap it.
    fn cancel_refine(&mut self) -> usize {
        let drained = self.pool.drain();
        if self.refine.is_some() {
            self.refine_cancelled = true;
        }
        if self.state == RenderPassState::BackgroundRefineInFlight {
            self.state = RenderPassState::StableWait;
        }
        drained
    }

    fn poll_refine(&mut self) {
        let finished = self.refine.as_ref().is_some_and(PassHandle::is_finished);
        if !finished {
            return;
        }

        if let Some(handle) = self.refine.take() {
            if !self.refine_cancelled {
                self.last_refine_duration = Some(handle.elapsed());
                self.state = RenderPassState::Idle;
            }
            self.refine_cancelled = false;
        }
    }

    #[must_use]
    pub fn state(&self) -> RenderPassState {
        self.state
    }

    /// Frames processed so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn needs_refine(&self) -> bool {
        self.needs_refine
    }

    #[must_use]
    pub fn target(&self) -> &Arc<PixelBuffer> {
        &self.target
    }

    #[must_use]
    pub fn canvas(&self) -> Canvas {
        self.target.canvas()
    }

    #[must_use]
    pub fn batch_widths(&self) -> &BatchWidths {
        &self.batch_widths
    }

    /// Band width changes take effect from the next pass.
    pub fn batch_widths_mut(&mut self) -> &mut BatchWidths {
        &mut self.batch_widths
    }

    #[must_use]
    pub fn refine_progress(&self) -> Option<PassProgress> {
        self.refine
            .as_ref()
            .filter(|_| !self.refine_cancelled)
            .map(PassHandle::progress)
    }

    /// Running time of the current refine, or the duration of the last one.
    #[must_use]
    pub fn refine_elapsed(&self) -> Option<Duration> {
        self.refine
            .as_ref()
            .filter(|_| !self.refine_cancelled)
            .map(PassHandle::elapsed)
            .or(self.last_refine_duration)
    }

    #[must_use]
    pub fn last_fast_pass_duration(&self) -> Option<Duration> {
        self.last_fast_pass_duration
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    #[must_use]
    pub fn active_jobs(&self) -> usize {
        self.pool.active_jobs()
    }

    #[must_use]
    pub fn queued_jobs(&self) -> usize {
        self.pool.queued_jobs()
    }

    #[cfg(test)]
    fn executor(&self) -> &E {
        self.pool.executor()
    }
}
