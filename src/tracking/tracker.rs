use std::sync::Arc;

use crate::{
    api::{StudyApi, endpoints},
    cache::CacheHandle,
    error::log_error,
    model::{ActivityRecord, TrackResult},
    tracking::error::TrackingResult,
};

/// Keys a recorded activity makes stale.
pub static INVALIDATED_BY_ACTIVITY: [&str; 5] = [
    endpoints::OVERVIEW,
    endpoints::CATEGORY_STATS,
    endpoints::OVERALL_PROGRESS,
    endpoints::STREAK,
    endpoints::USER,
];

#[derive(Debug, Clone, PartialEq)]
pub enum TrackOutcome {
    Tracked(TrackResult),
    /// Nothing was answered, so nothing was sent.
    Skipped,
}

impl TrackOutcome {
    pub fn is_tracked(&self) -> bool {
        matches!(self, Self::Tracked(_))
    }
}

#[derive(Clone)]
pub struct ActivityTracker {
    api: Arc<dyn StudyApi>,
    cache: Arc<dyn CacheHandle>,
}

impl ActivityTracker {
    pub fn new(api: Arc<dyn StudyApi>, cache: Arc<dyn CacheHandle>) -> Self {
        Self { api, cache }
    }

    /// Posts one study activity. Submissions are not idempotent, so a failure
    /// is returned as-is and never retried.
    #[tracing::instrument(skip(self, record), fields(activity = %record.activity_type()))]
    pub async fn track(&self, record: &ActivityRecord) -> TrackingResult<TrackOutcome> {
        if !record.is_trackable() {
            tracing::debug!("no questions answered, skipping");
            return Ok(TrackOutcome::Skipped);
        }

        record.validate()?;

        let result = match self.api.track_activity(record).await {
            Ok(r) => r,
            Err(e) => {
                log_error(&e);
                return Err(e.into());
            }
        };

        for key in INVALIDATED_BY_ACTIVITY {
            self.cache.invalidate(key);
        }

        tracing::info!(new_badges = result.new_badges.len(), "activity tracked");
        Ok(TrackOutcome::Tracked(result))
    }
}
