use std::num::NonZeroUsize;

/// One render worker per hardware thread, or a single worker when the
/// platform cannot say.
#[must_use]
pub fn calculate_worker_threads() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
