use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant};

/// How a single work unit left the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOutcome {
    Completed,
    /// Cancelled before execution started.
    Discarded,
    /// The executor returned an error or panicked.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassProgress {
    pub total: usize,
    pub completed: usize,
    pub discarded: usize,
    pub failed: usize,
}

impl PassProgress {
    #[must_use]
    pub fn settled(&self) -> usize {
        self.completed + self.discarded + self.failed
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.settled() >= self.total
    }

    /// Fraction of units settled, in `[0, 1]`. An empty pass is complete.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.settled() as f64 / self.total as f64
    }
}

#[derive(Debug)]
pub(crate) struct PassTracker {
    id: u64,
    started: Instant,
    progress: Mutex<PassProgress>,
    settled: Condvar,
    duration: OnceLock<Duration>,
}

impl PassTracker {
    pub(crate) fn new(id: u64, total: usize) -> Self {
        let tracker = Self {
            id,
            started: Instant::now(),
            progress: Mutex::new(PassProgress {
                total,
                ..PassProgress::default()
            }),
            settled: Condvar::new(),
            duration: OnceLock::new(),
        };
        if total == 0 {
            let _ = tracker.duration.set(Duration::ZERO);
        }
        tracker
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, PassProgress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn record(&self, outcome: UnitOutcome) {
        let mut progress = self.lock();
        match outcome {
            UnitOutcome::Completed => progress.completed += 1,
            UnitOutcome::Discarded => progress.discarded += 1,
            UnitOutcome::Failed => progress.failed += 1,
        }

        if progress.is_finished() {
            let _ = self.duration.set(self.started.elapsed());
            log::debug!(
                "pass {} settled in {:?}: {} completed, {} discarded, {} failed",
                self.id,
                self.started.elapsed(),
                progress.completed,
                progress.discarded,
                progress.failed
            );
            self.settled.notify_all();
        }
    }

    /// Marks `count` units that were never queued as discarded.
    pub(crate) fn discard_remaining(&self, count: usize) {
        for _ in 0..count {
            self.record(UnitOutcome::Discarded);
        }
    }

    pub(crate) fn progress(&self) -> PassProgress {
        *self.lock()
    }

    pub(crate) fn wait(&self) -> PassProgress {
        let mut progress = self.lock();
        while !progress.is_finished() {
            progress = self
                .settled
                .wait(progress)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *progress
    }
}

/// Caller-side view of a dispatched pass.
#[derive(Debug, Clone)]
pub struct PassHandle {
    tracker: Arc<PassTracker>,
}

impl PassHandle {
    pub(crate) fn new(tracker: Arc<PassTracker>) -> Self {
        Self { tracker }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.tracker.id()
    }

    #[must_use]
    pub fn progress(&self) -> PassProgress {
        self.tracker.progress()
    }

    /// Non-blocking completion check; every unit completed, discarded or failed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress().is_finished()
    }

    /// Time since dispatch, frozen once the pass has settled.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.tracker
            .duration
            .get()
            .copied()
            .unwrap_or_else(|| self.tracker.started.elapsed())
    }

    /// Blocks until every unit of the pass has settled.
    #[cfg(test)]
    pub fn wait(&self) -> PassProgress {
        self.tracker.wait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_empty_pass_is_finished() {
        let handle = PassHandle::new(Arc::new(PassTracker::new(1, 0)));

        assert!(handle.is_finished());
        assert_eq!(handle.elapsed(), Duration::ZERO);
        assert_eq!(handle.progress().fraction(), 1.0);
        assert_eq!(handle.wait().total, 0);
    }

    #[test]
    fn test_outcomes_are_counted() {
        let tracker = PassTracker::new(3, 4);

        tracker.record(UnitOutcome::Completed);
        tracker.record(UnitOutcome::Failed);
        tracker.discard_remaining(1);

        let progress = tracker.progress();
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.failed, 1);
        assert_eq!(progress.discarded, 1);
        assert!(!progress.is_finished());
        assert_eq!(progress.fraction(), 0.75);

        tracker.record(UnitOutcome::Completed);
        assert!(tracker.progress().is_finished());

        let handle = PassHandle::new(Arc::new(tracker));
        let frozen = handle.elapsed();
        thread::sleep(Duration::from_millis(5));
        assert_eq!(handle.elapsed(), frozen);
    }

    #[test]
    fn test_wait_returns_once_all_units_settle() {
        let tracker = Arc::new(PassTracker::new(9, 8));
        let handle = PassHandle::new(Arc::clone(&tracker));

        let worker = thread::spawn(move || {
            for _ in 0..8 {
                tracker.record(UnitOutcome::Completed);
            }
        });

        let progress = handle.wait();
        worker.join().unwrap();

        assert_eq!(progress.completed, 8);
        assert_eq!(handle.id(), 9);
    }
}
