use crate::core::actions::cancellation::{CancelEpoch, CancelToken};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::scheduler::pass::{PassHandle, PassProgress, PassTracker, UnitOutcome};
use crate::core::scheduler::ports::unit_executor::UnitExecutor;
use crate::core::scheduler::work_unit::WorkUnit;
use crossbeam::channel::{self, Receiver, Sender};
use std::error::Error;
use std::fmt;
use std::io;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

#[derive(Debug)]
pub enum WorkerPoolError {
    ZeroQueueCapacity,
    Spawn(io::Error),
    Disconnected,
}

impl fmt::Display for WorkerPoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroQueueCapacity => write!(f, "work queue capacity must be positive"),
            Self::Spawn(err) => write!(f, "failed to spawn render thread: {}", err),
            Self::Disconnected => write!(f, "work queue is disconnected"),
        }
    }
}

impl Error for WorkerPoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for WorkerPoolError {
    fn from(err: io::Error) -> Self {
        Self::Spawn(err)
    }
}

struct Job {
    unit: WorkUnit,
    pass: Arc<PassTracker>,
    target: Arc<PixelBuffer>,
}

struct PoolShared<E> {
    executor: E,
    epoch: CancelEpoch,
    active: AtomicUsize,
}

impl<E: UnitExecutor> PoolShared<E> {
    fn run(&self, job: &Job) -> UnitOutcome {
        let token = self.epoch.token(job.pass.id());
        if token.is_cancelled() {
            return UnitOutcome::Discarded;
        }

        self.active.fetch_add(1, Ordering::AcqRel);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.executor.execute(&job.unit, &job.target, &token)
        }));
        self.active.fetch_sub(1, Ordering::AcqRel);

        match result {
            Ok(Ok(())) => {
                log::trace!(
                    "pass {} columns {:?} rendered",
                    job.pass.id(),
                    job.unit.columns()
                );
                UnitOutcome::Completed
            }
            Ok(Err(_)) if token.is_cancelled() => UnitOutcome::Discarded,
            Ok(Err(err)) => {
                log::warn!(
                    "pass {} columns {:?} dropped: {}",
                    job.pass.id(),
                    job.unit.columns(),
                    err
                );
                UnitOutcome::Failed
            }
            Err(_) => {
                log::warn!(
                    "pass {} columns {:?} dropped: worker panicked",
                    job.pass.id(),
                    job.unit.columns()
                );
                UnitOutcome::Failed
            }
        }
    }
}

/// Fixed set of render threads fed from one bounded queue.
///
/// Passes are numbered in dispatch order. Draining removes every queued unit
/// and cancels every pass issued so far; units already executing run to the
/// end and their writes land.
pub struct WorkerPool<E: UnitExecutor> {
    sender: Option<Sender<Job>>,
    receiver: Receiver<Job>,
    shared: Arc<PoolShared<E>>,
    workers: Vec<JoinHandle<()>>,
    feeders: Vec<JoinHandle<()>>,
    last_pass_id: AtomicU64,
}

impl<E: UnitExecutor> WorkerPool<E> {
    pub fn new(
        executor: E,
        worker_threads: NonZeroUsize,
        queue_capacity: usize,
    ) -> Result<Self, WorkerPoolError> {
        if queue_capacity == 0 {
            return Err(WorkerPoolError::ZeroQueueCapacity);
        }

        let (sender, receiver) = channel::bounded::<Job>(queue_capacity);
        let shared = Arc::new(PoolShared {
            executor,
            epoch: CancelEpoch::new(),
            active: AtomicUsize::new(0),
        });

        let mut pool = Self {
            sender: Some(sender),
            receiver,
            shared,
            workers: Vec::with_capacity(worker_threads.get()),
            feeders: Vec::new(),
            last_pass_id: AtomicU64::new(0),
        };

        // On a spawn failure the partially built pool is dropped, which joins
        // the threads already started.
        for index in 0..worker_threads.get() {
            let receiver = pool.receiver.clone();
            let shared = Arc::clone(&pool.shared);
            let handle = thread::Builder::new()
                .name(format!("render-worker-{}", index))
                .spawn(move || {
                    for job in receiver.iter() {
                        let outcome = shared.run(&job);
                        job.pass.record(outcome);
                    }
                })?;
            pool.workers.push(handle);
        }

        log::info!(
            "started {} render workers with queue capacity {}",
            worker_threads,
            queue_capacity
        );

        Ok(pool)
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Units currently executing on a worker.
    #[must_use]
    pub fn active_jobs(&self) -> usize {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Units waiting in the queue.
    #[must_use]
    pub fn queued_jobs(&self) -> usize {
        self.receiver.len()
    }

    #[cfg(test)]
    pub fn executor(&self) -> &E {
        &self.shared.executor
    }

    fn sender(&self) -> Result<&Sender<Job>, WorkerPoolError> {
        self.sender.as_ref().ok_or(WorkerPoolError::Disconnected)
    }

    fn begin_pass(&self, total: usize) -> Arc<PassTracker> {
        let id = self.last_pass_id.fetch_add(1, Ordering::AcqRel) + 1;
        log::debug!("dispatching pass {} with {} units", id, total);
        Arc::new(PassTracker::new(id, total))
    }

    /// Queues every unit and blocks until the whole pass has settled.
    ///
    /// A full queue blocks the caller until a worker frees a slot.
    pub fn dispatch_sync(
        &self,
        units: Vec<WorkUnit>,
        target: &Arc<PixelBuffer>,
    ) -> Result<PassProgress, WorkerPoolError> {
        let sender = self.sender()?;
        let pass = self.begin_pass(units.len());
        let total = units.len();

        for (sent, unit) in units.into_iter().enumerate() {
            let job = Job {
                unit,
                pass: Arc::clone(&pass),
                target: Arc::clone(target),
            };
            if sender.send(job).is_err() {
                pass.discard_remaining(total - sent);
                return Err(WorkerPoolError::Disconnected);
            }
        }

        Ok(pass.wait())
    }

    /// Queues every unit from a feeder thread and returns immediately.
    ///
    /// The feeder stops handing out units as soon as the pass is cancelled
    /// and marks the remainder discarded.
    pub fn dispatch_background(
        &mut self,
        units: Vec<WorkUnit>,
        target: &Arc<PixelBuffer>,
    ) -> Result<PassHandle, WorkerPoolError> {
        self.reap_feeders();

        let sender = self.sender()?.clone();
        let pass = self.begin_pass(units.len());
        let handle = PassHandle::new(Arc::clone(&pass));
        let shared = Arc::clone(&self.shared);
        let target = Arc::clone(target);

        let feeder = thread::Builder::new()
            .name(format!("render-feeder-{}", pass.id()))
            .spawn(move || {
                let total = units.len();
                for (sent, unit) in units.into_iter().enumerate() {
                    if shared.epoch.is_cancelled(pass.id()) {
                        pass.discard_remaining(total - sent);
                        return;
                    }

                    let job = Job {
                        unit,
                        pass: Arc::clone(&pass),
                        target: Arc::clone(&target),
                    };
                    if sender.send(job).is_err() {
                        pass.discard_remaining(total - sent);
                        return;
                    }
                }
            })?;
        self.feeders.push(feeder);

        Ok(handle)
    }

    /// Removes every queued unit and cancels all passes issued so far.
    ///
    /// Returns the number of units pulled from the queue. Units already
    /// executing are not interrupted.
    pub fn drain(&self) -> usize {
        self.shared
            .epoch
            .cancel_through(self.last_pass_id.load(Ordering::Acquire));

        let mut drained = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job.pass.record(UnitOutcome::Discarded);
            drained += 1;
        }

        if drained > 0 {
            log::debug!("drained {} queued units", drained);
        }
        drained
    }

    fn reap_feeders(&mut self) {
        let (finished, running): (Vec<_>, Vec<_>) =
            self.feeders.drain(..).partition(|feeder| feeder.is_finished());
        self.feeders = running;

        for feeder in finished {
            if feeder.join().is_err() {
                log::warn!("render feeder thread panicked");
            }
        }
    }
}

impl<E: UnitExecutor> Drop for WorkerPool<E> {
    fn drop(&mut self) {
        self.shared.epoch.cancel_all();
        self.sender = None;

        for feeder in self.feeders.drain(..) {
            if feeder.join().is_err() {
                log::warn!("render feeder thread panicked");
            }
        }

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                log::warn!("render worker thread panicked");
            }
        }

        log::info!("render workers stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::canvas::Canvas;
    use crate::core::data::colour::Colour;
    use crate::core::data::view_state::ViewState;
    use crate::core::scheduler::partition::partition;
    use std::sync::{Condvar, Mutex};
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    /// Paints each unit's columns with a colour derived from its start column.
    struct PaintExecutor;

    fn band_colour(column_start: u32) -> Colour {
        Colour {
            r: column_start as u8,
            g: 1,
            b: 2,
        }
    }

    impl UnitExecutor for PaintExecutor {
        type Failure = StubError;

        fn execute<C: CancelToken>(
            &self,
            unit: &WorkUnit,
            target: &PixelBuffer,
            cancel: &C,
        ) -> Result<(), Self::Failure> {
            if cancel.is_cancelled() {
                return Err(StubError {});
            }
            for y in 0..unit.canvas.height() as i32 {
                for x in unit.columns() {
                    target.plot(x as i32, y, band_colour(unit.column_start));
                }
            }
            Ok(())
        }
    }

    /// Fails every unit starting at an odd column and panics on column 0.
    struct FlakyExecutor;

    impl UnitExecutor for FlakyExecutor {
        type Failure = StubError;

        fn execute<C: CancelToken>(
            &self,
            unit: &WorkUnit,
            _: &PixelBuffer,
            _: &C,
        ) -> Result<(), Self::Failure> {
            if unit.column_start == 0 {
                panic!("stub panic");
            }
            if unit.column_start % 2 == 1 {
                return Err(StubError {});
            }
            Ok(())
        }
    }

    /// Blocks every unit until the gate opens.
    #[derive(Default)]
    struct GatedExecutor {
        open: Mutex<bool>,
        changed: Condvar,
        started: AtomicUsize,
    }

    impl GatedExecutor {
        fn open(&self) {
            *self.open.lock().unwrap() = true;
            self.changed.notify_all();
        }
    }

    impl UnitExecutor for GatedExecutor {
        type Failure = StubError;

        fn execute<C: CancelToken>(
            &self,
            _: &WorkUnit,
            _: &PixelBuffer,
            _: &C,
        ) -> Result<(), Self::Failure> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let mut open = self.open.lock().unwrap();
            while !*open {
                open = self.changed.wait(open).unwrap();
            }
            Ok(())
        }
    }

    fn workers(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    fn units(width: u32, batch_width: u32) -> (Canvas, Vec<WorkUnit>) {
        let canvas = Canvas::new(width, 4).unwrap();
        (
            canvas,
            partition(canvas, ViewState::default(), batch_width).unwrap(),
        )
    }

    fn wait_until(condition: impl Fn() -> bool) {
        for _ in 0..500 {
            if condition() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("condition not reached in time");
    }

    #[test]
    fn test_zero_queue_capacity_is_rejected() {
        assert!(matches!(
            WorkerPool::new(PaintExecutor, workers(1), 0),
            Err(WorkerPoolError::ZeroQueueCapacity)
        ));
    }

    #[test]
    fn test_sync_dispatch_renders_every_band() {
        let pool = WorkerPool::new(PaintExecutor, workers(4), 3).unwrap();
        let (canvas, units) = units(24, 2);
        let target = Arc::new(PixelBuffer::new(canvas));

        let progress = pool.dispatch_sync(units, &target).unwrap();

        assert_eq!(progress.total, 12);
        assert_eq!(progress.completed, 12);
        for x in 0..24 {
            for y in 0..4 {
                assert_eq!(target.get(x, y), Some(band_colour((x as u32 / 2) * 2)));
            }
        }
        assert_eq!(pool.worker_count(), 4);
        assert_eq!(pool.queued_jobs(), 0);
    }

    #[test]
    fn test_empty_sync_pass_returns_immediately() {
        let pool = WorkerPool::new(PaintExecutor, workers(1), 1).unwrap();
        let target = Arc::new(PixelBuffer::new(Canvas::new(1, 1).unwrap()));

        let progress = pool.dispatch_sync(Vec::new(), &target).unwrap();

        assert_eq!(progress, PassProgress::default());
    }

    #[test]
    fn test_failures_and_panics_do_not_stop_the_pool() {
        let pool = WorkerPool::new(FlakyExecutor, workers(2), 2).unwrap();
        let (canvas, units) = units(8, 1);
        let target = Arc::new(PixelBuffer::new(canvas));

        let progress = pool.dispatch_sync(units.clone(), &target).unwrap();
        assert_eq!(progress.completed, 3);
        assert_eq!(progress.failed, 5);

        let again = pool.dispatch_sync(units, &target).unwrap();
        assert_eq!(again.settled(), 8);
    }

    #[test]
    fn test_background_dispatch_completes() {
        let mut pool = WorkerPool::new(PaintExecutor, workers(2), 2).unwrap();
        let (canvas, units) = units(16, 4);
        let target = Arc::new(PixelBuffer::new(canvas));

        let handle = pool.dispatch_background(units, &target).unwrap();
        let progress = handle.wait();

        assert!(handle.is_finished());
        assert_eq!(progress.completed, 4);
        assert_eq!(target.get(15, 3), Some(band_colour(12)));
    }

    #[test]
    fn test_drain_discards_queued_units_and_keeps_running_ones() {
        let mut pool = WorkerPool::new(GatedExecutor::default(), workers(1), 4).unwrap();
        let (canvas, units) = units(6, 1);
        let target = Arc::new(PixelBuffer::new(canvas));

        let handle = pool.dispatch_background(units, &target).unwrap();
        wait_until(|| pool.executor().started.load(Ordering::SeqCst) == 1);
        wait_until(|| pool.queued_jobs() == 4);

        let drained = pool.drain();
        pool.executor().open();
        let progress = handle.wait();

        assert!(drained >= 4);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.discarded, 5);
        assert_eq!(pool.executor().started.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pass_after_drain_is_not_cancelled() {
        let mut pool = WorkerPool::new(PaintExecutor, workers(2), 2).unwrap();
        let (canvas, units) = units(8, 2);
        let target = Arc::new(PixelBuffer::new(canvas));

        let stale = pool.dispatch_background(units.clone(), &target).unwrap();
        pool.drain();
        stale.wait();

        let fresh = pool.dispatch_sync(units, &target).unwrap();
        assert_eq!(fresh.completed, 4);
        assert_eq!(target.get(7, 0), Some(band_colour(6)));
    }

    #[test]
    fn test_drop_stops_workers_with_pending_background_work() {
        let mut pool = WorkerPool::new(PaintExecutor, workers(2), 1).unwrap();
        let (canvas, units) = units(64, 1);
        let target = Arc::new(PixelBuffer::new(canvas));

        let handle = pool.dispatch_background(units, &target).unwrap();
        drop(pool);

        assert!(handle.wait().settled() == 64);
    }
}
