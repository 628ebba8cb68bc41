use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

#[cfg(test)]
impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Monotonic cancellation watermark over numbered passes.
///
/// Pass ids start at 1. Every pass with an id at or below the watermark is
/// cancelled; raising the watermark never revives an earlier pass.
#[derive(Debug, Default)]
pub struct CancelEpoch {
    watermark: AtomicU64,
}

impl CancelEpoch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels `pass_id` and every pass issued before it.
    pub fn cancel_through(&self, pass_id: u64) {
        self.watermark.fetch_max(pass_id, Ordering::AcqRel);
    }

    /// Cancels every pass, including ones not yet issued.
    pub fn cancel_all(&self) {
        self.watermark.store(u64::MAX, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self, pass_id: u64) -> bool {
        pass_id <= self.watermark.load(Ordering::Acquire)
    }

    pub fn token(&self, pass_id: u64) -> impl CancelToken + '_ {
        move || self.is_cancelled(pass_id)
    }
}
