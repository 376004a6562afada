use std::sync::Arc;

use crate::{
    api::{ApiResult, StudyApi, endpoints},
    cache::CacheHandle,
    error::log_error,
    model::{ActivityRecord, ProgressSnapshot},
    tracking::{
        error::TrackingResult,
        milestone::MilestoneNotifier,
        notify::{Notification, Notifier},
        tracker::{ActivityTracker, TrackOutcome},
    },
};

/// What a completed study action ended up triggering.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityReport {
    pub outcome: TrackOutcome,
    pub achievement: Option<&'static str>,
    pub new_badges: Vec<String>,
    pub milestone: Option<u8>,
    pub progress: Option<ProgressSnapshot>,
}

impl ActivityReport {
    fn skipped() -> Self {
        Self {
            outcome: TrackOutcome::Skipped,
            achievement: None,
            new_badges: vec![],
            milestone: None,
            progress: None,
        }
    }
}

/// Runs a completed study action through tracking, badges and milestones.
#[derive(Clone)]
pub struct StudyFlow {
    api: Arc<dyn StudyApi>,
    cache: Arc<dyn CacheHandle>,
    notifier: Arc<dyn Notifier>,
    tracker: ActivityTracker,
    milestones: MilestoneNotifier,
}

impl StudyFlow {
    pub fn new(
        api: Arc<dyn StudyApi>,
        cache: Arc<dyn CacheHandle>,
        notifier: Arc<dyn Notifier>,
        milestones: MilestoneNotifier,
    ) -> Self {
        let tracker = ActivityTracker::new(api.clone(), cache.clone());
        Self {
            api,
            cache,
            notifier,
            tracker,
            milestones,
        }
    }

    /// Overall progress, through the cache. Loading it before an activity
    /// gives the milestone check its baseline.
    pub async fn progress(&self) -> ApiResult<ProgressSnapshot> {
        self.cache
            .get_or_fetch(endpoints::OVERALL_PROGRESS, || self.api.overall_progress())
            .await
    }

    /// Track, then achievements, then badge check, then milestone diff and
    /// the UI callback. Only a tracking failure fails the whole action.
    #[tracing::instrument(skip(self, record), fields(activity = %record.activity_type()))]
    pub async fn complete_activity(&self, record: &ActivityRecord) -> TrackingResult<ActivityReport> {
        let previous = self
            .cache
            .get::<ProgressSnapshot>(endpoints::OVERALL_PROGRESS)
            .map(|p| p.overall_progress);

        let outcome = match self.tracker.track(record).await {
            Ok(TrackOutcome::Skipped) => return Ok(ActivityReport::skipped()),
            Ok(outcome) => outcome,
            Err(e) => {
                self.notifier.notify(Notification::ActivityFailed {
                    message: e.client_display(),
                });
                return Err(e);
            }
        };

        let achievement = self.milestones.check_achievements(record).map(|a| a.title);

        let new_badges = match self.api.check_badges().await {
            Ok(check) => check.new_badges,
            Err(e) => {
                log_error(&e);
                vec![]
            }
        };
        self.milestones.announce_badges(&new_badges);

        let (progress, milestone) = match self.progress().await {
            Ok(snapshot) => {
                let milestone = self
                    .milestones
                    .check_progress(previous, snapshot.overall_progress)
                    .await;
                (Some(snapshot), milestone)
            }
            Err(e) => {
                log_error(&e);
                (None, None)
            }
        };

        Ok(ActivityReport {
            outcome,
            achievement,
            new_badges,
            milestone,
            progress,
        })
    }
}
