use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use chrono::NaiveDateTime;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::utils::clock::{self, Clock};

pub type TaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
pub type Task = Arc<dyn Fn() -> TaskFuture + Send + Sync>;

pub fn task<F, Fut>(f: F) -> Task
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move || Box::pin(f()))
}

/// Cancels the timer it was returned for. Dropping the handle leaves the
/// timer running.
#[derive(Debug, Clone)]
pub struct ScheduleHandle {
    token: CancellationToken,
}

impl ScheduleHandle {
    fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

pub trait Scheduler: Send + Sync {
    fn clock(&self) -> Clock;

    /// Runs `task` once at the wall-clock time `at`, or right away if `at`
    /// already passed.
    fn schedule_at(&self, at: NaiveDateTime, task: Task) -> ScheduleHandle;

    /// Runs `task` every `interval`, first after one full interval.
    fn schedule_every(&self, interval: Duration, task: Task) -> ScheduleHandle;
}

/// Timers backed by tokio tasks. Must be used from within a runtime.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    clock: Clock,
}

impl TokioScheduler {
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }
}

impl Scheduler for TokioScheduler {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn schedule_at(&self, at: NaiveDateTime, task: Task) -> ScheduleHandle {
        let delay = clock::until(self.clock.now(), at);
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tracing::trace!(?delay, "one-shot timer armed");
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => task().await,
            }
        });

        ScheduleHandle::new(token)
    }

    fn schedule_every(&self, interval: Duration, task: Task) -> ScheduleHandle {
        let period = interval.max(Duration::from_millis(1));
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tracing::trace!(?period, "recurring timer armed");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => task().await,
                }
            }
        });

        ScheduleHandle::new(token)
    }
}
