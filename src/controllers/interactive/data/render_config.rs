use crate::core::util::calculate_worker_threads::calculate_worker_threads;
use std::num::NonZeroUsize;

/// Queue slots per worker thread in the default configuration.
pub const DEFAULT_QUEUE_SLOTS_PER_WORKER: usize = 4;

/// Frames of stable input before the supersampled pass starts.
pub const DEFAULT_REFINE_DELAY_FRAMES: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub worker_threads: NonZeroUsize,
    pub queue_capacity: usize,
    pub refine_delay_frames: u64,
    /// Samples per pixel for the blocking preview pass.
    pub preview_sample_count: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::with_worker_threads(calculate_worker_threads())
    }
}

impl RenderConfig {
    #[must_use]
    pub fn with_worker_threads(worker_threads: NonZeroUsize) -> Self {
        Self {
            worker_threads,
            queue_capacity: worker_threads.get() * DEFAULT_QUEUE_SLOTS_PER_WORKER,
            refine_delay_frames: DEFAULT_REFINE_DELAY_FRAMES,
            preview_sample_count: 1,
        }
    }
}
