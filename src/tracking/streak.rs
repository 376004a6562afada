use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chrono::NaiveDate;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::{
    api::{ApiResult, StudyApi, endpoints},
    cache::CacheHandle,
    error::log_error,
    model::{DailyProgress, ProgressSnapshot, StreakState, StudyMode, next_milestone},
    tracking::{
        notify::{Notification, Notifier},
        schedule::{ScheduleHandle, Scheduler, task},
    },
    utils::clock::next_midnight,
};

pub const DEFAULT_VALIDATE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakReport {
    pub current_streak: u32,
    pub last_active_date: Option<NaiveDate>,
    pub requirements_met_today: bool,
    pub remaining_today: Vec<StudyMode>,
    pub overall_progress: f64,
    pub next_milestone: Option<u8>,
    pub distance_to_next_milestone: Option<f64>,
}

impl StreakReport {
    fn derive(streak: StreakState, daily: &DailyProgress, progress: &ProgressSnapshot) -> Self {
        let next = next_milestone(progress.overall_progress);

        Self {
            current_streak: streak.current_streak,
            last_active_date: streak.last_active_date,
            requirements_met_today: daily.is_completed(),
            remaining_today: daily.remaining(),
            overall_progress: progress.overall_progress,
            next_milestone: next,
            distance_to_next_milestone: next.map(|m| f64::from(m) - progress.overall_progress),
        }
    }
}

/// Keeps the server-side streak fresh: once on mount, then at every local
/// midnight.
pub struct StreakEvaluator {
    api: Arc<dyn StudyApi>,
    cache: Arc<dyn CacheHandle>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
    interval: Duration,
    last_seen: Mutex<Option<StreakState>>,
}

impl StreakEvaluator {
    pub fn new(
        api: Arc<dyn StudyApi>,
        cache: Arc<dyn CacheHandle>,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            api,
            cache,
            notifier,
            scheduler,
            interval: DEFAULT_VALIDATE_INTERVAL,
            last_seen: Mutex::new(None),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Asks the server to recompute the streak. The cached streak is dropped
    /// on every success, changed or not.
    #[tracing::instrument(skip(self))]
    pub async fn validate(&self) -> ApiResult<()> {
        if let Err(e) = self.api.validate_streak().await {
            log_error(&e);
            return Err(e);
        }

        self.cache.invalidate(endpoints::STREAK);
        tracing::debug!("streak validated");
        Ok(())
    }

    pub async fn streak(&self) -> ApiResult<StreakState> {
        let state = self
            .cache
            .get_or_fetch(endpoints::STREAK, || self.api.streak())
            .await?;

        let mut last = self.last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = last.as_ref() {
            if went_down_same_day(prev, &state) {
                tracing::warn!(
                    previous = prev.current_streak,
                    current = state.current_streak,
                    "streak went down within the same day"
                );
            }
        }
        *last = Some(state.clone());

        Ok(state)
    }

    #[tracing::instrument(skip(self))]
    pub async fn evaluate(&self) -> ApiResult<StreakReport> {
        self.validate().await?;

        let streak = self.streak().await?;
        let daily = self
            .cache
            .get_or_fetch(endpoints::DAILY_PROGRESS_TODAY, || self.api.daily_progress())
            .await?;
        let progress = self
            .cache
            .get_or_fetch(endpoints::OVERALL_PROGRESS, || self.api.overall_progress())
            .await?;

        Ok(StreakReport::derive(streak, &daily, &progress))
    }

    async fn validate_in_background(&self) {
        if let Err(e) = self.validate().await {
            self.notifier.notify(Notification::SyncFailed {
                message: e.client_display(),
            });
        }
    }

    /// Mounts the evaluator: validates right away and arms the midnight
    /// rollover, which re-arms itself as a recurring interval once it fired.
    pub fn start(self: &Arc<Self>) -> StreakWatch {
        let root = CancellationToken::new();
        let handles: Arc<Mutex<Vec<ScheduleHandle>>> = Arc::default();
        let now = self.scheduler.clock().now();

        let this = self.clone();
        let immediate = self.scheduler.schedule_at(
            now,
            task(move || {
                let this = this.clone();
                async move { this.validate_in_background().await }
            }),
        );

        let midnight = next_midnight(now);
        tracing::debug!(%midnight, "midnight rollover armed");

        let this = self.clone();
        let rollover_handles = handles.clone();
        let rollover_root = root.clone();
        let rollover = self.scheduler.schedule_at(
            midnight,
            task(move || {
                let this = this.clone();
                let handles = rollover_handles.clone();
                let root = rollover_root.clone();
                async move {
                    this.validate_in_background().await;

                    let every = this.clone();
                    let recurring = this.scheduler.schedule_every(
                        this.interval,
                        task(move || {
                            let every = every.clone();
                            async move { every.validate_in_background().await }
                        }),
                    );

                    let mut handles = handles.lock().unwrap_or_else(PoisonError::into_inner);
                    if root.is_cancelled() {
                        recurring.cancel();
                    } else {
                        handles.push(recurring);
                    }
                }
            }),
        );

        handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend([immediate, rollover]);

        StreakWatch { root, handles }
    }
}

fn went_down_same_day(previous: &StreakState, current: &StreakState) -> bool {
    previous.last_active_date == current.last_active_date
        && current.current_streak < previous.current_streak
}

/// Timers of a mounted [`StreakEvaluator`]. Stopping or dropping it clears
/// them all.
#[derive(Debug)]
pub struct StreakWatch {
    root: CancellationToken,
    handles: Arc<Mutex<Vec<ScheduleHandle>>>,
}

impl StreakWatch {
    pub fn stop(&self) {
        self.root.cancel();

        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        for handle in handles.drain(..) {
            handle.cancel();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.root.is_cancelled()
    }

    pub fn active_timers(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|h| !h.is_cancelled())
            .count()
    }
}

impl Drop for StreakWatch {
    fn drop(&mut self) {
        self.stop();
    }
}
