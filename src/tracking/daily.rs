use std::sync::Arc;

use crate::{
    api::{ApiResult, StudyApi, endpoints},
    cache::CacheHandle,
    error::log_error,
    model::{DailyProgress, StudyMode},
    tracking::notify::{Notification, Notifier},
};

#[derive(Clone)]
pub struct DailyProgressTracker {
    api: Arc<dyn StudyApi>,
    cache: Arc<dyn CacheHandle>,
    notifier: Arc<dyn Notifier>,
}

impl DailyProgressTracker {
    pub fn new(
        api: Arc<dyn StudyApi>,
        cache: Arc<dyn CacheHandle>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            cache,
            notifier,
        }
    }

    pub async fn today(&self) -> ApiResult<DailyProgress> {
        self.cache
            .get_or_fetch(endpoints::DAILY_PROGRESS_TODAY, || self.api.daily_progress())
            .await
    }

    /// Marks one of today's requirements as done.
    #[tracing::instrument(skip(self))]
    pub async fn complete_mode(&self, mode: StudyMode) -> ApiResult<DailyProgress> {
        let before: Option<DailyProgress> = self.cache.get(endpoints::DAILY_PROGRESS_TODAY);

        let after = match self.api.complete_daily_mode(mode).await {
            Ok(day) => day,
            Err(e) => {
                log_error(&e);
                return Err(e);
            }
        };

        self.cache.invalidate(endpoints::DAILY_PROGRESS);
        self.cache.invalidate(endpoints::STREAK);
        self.cache.set(endpoints::DAILY_PROGRESS_TODAY, &after);

        let was_complete = before.is_some_and(|d| d.is_completed());
        if after.is_completed() && !was_complete {
            tracing::info!("daily goal complete");
            self.notifier.notify(Notification::DailyGoalComplete);
        }

        Ok(after)
    }
}
