use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owner of the single outstanding countdown task.
///
/// Every armed task gets a fresh generation number. The task passes it back
/// with each tick so the owner can reject ticks from a task that was replaced
/// while the tick was already queued behind the session lock.
#[derive(Debug, Default)]
pub struct Countdown {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recently armed task.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// True when `generation` belongs to the task currently armed.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && self.generation == generation
    }

    /// Stop the outstanding task, if any. Later ticks from it are rejected.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Forget the outstanding task without aborting it.
    ///
    /// For use by the task itself once it has delivered its final tick.
    pub fn disarm(&mut self) {
        self.task = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Cancel any outstanding task, then spawn `make_task(generation)`.
    ///
    /// The previous task is aborted before the new one exists, so at most one
    /// task is ever outstanding.
    pub fn arm<F, Fut>(&mut self, make_task: F) -> u64
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        self.task = Some(tokio::spawn(make_task(generation)));
        generation
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Tick stream starting one period from now, delaying rather than bursting
/// when the runtime falls behind.
#[must_use]
pub fn tick_interval(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
