use std::sync::Arc;

use crate::{
    Config,
    api::{ApiClient, StudyApi},
    cache::{CacheHandle, QueryCache},
    error::AppResult,
    tracking::{
        DailyProgressTracker, LogNotifier, MilestoneCallback, MilestoneNotifier, Notifier,
        Scheduler, StreakEvaluator, StudyFlow, TokioScheduler,
    },
    utils::clock::Clock,
};

/// Shared handles every component is built from.
#[derive(Clone)]
pub struct AppState {
    api: Arc<dyn StudyApi>,
    cache: Arc<dyn CacheHandle>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
    config: Config,
}

impl AppState {
    pub fn new(
        api: Arc<dyn StudyApi>,
        cache: Arc<dyn CacheHandle>,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn Scheduler>,
        config: Config,
    ) -> Self {
        Self {
            api,
            cache,
            notifier,
            scheduler,
            config,
        }
    }

    /// Real API client, fresh cache, system clock.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        let api = ApiClient::new(config.api())?;
        tracing::debug!(base_url = %api.base_url(), "api client ready");

        Ok(Self::new(
            Arc::new(api),
            Arc::new(QueryCache::new()),
            notifier,
            Arc::new(TokioScheduler::new(Clock::System)),
            config.clone(),
        ))
    }

    pub fn with_log_notifier(config: &Config) -> AppResult<Self> {
        Self::from_config(config, Arc::new(LogNotifier))
    }

    pub fn api(&self) -> &Arc<dyn StudyApi> {
        &self.api
    }

    pub fn cache(&self) -> &Arc<dyn CacheHandle> {
        &self.cache
    }

    pub fn milestones(&self) -> MilestoneNotifier {
        MilestoneNotifier::new(self.notifier.clone(), self.config.notify().presentation_delay())
    }

    pub fn study_flow(&self) -> StudyFlow {
        self.study_flow_with(None)
    }

    pub fn study_flow_with(&self, on_milestone: Option<MilestoneCallback>) -> StudyFlow {
        let mut milestones = self.milestones();
        if let Some(callback) = on_milestone {
            milestones = milestones.with_callback(callback);
        }

        StudyFlow::new(
            self.api.clone(),
            self.cache.clone(),
            self.notifier.clone(),
            milestones,
        )
    }

    pub fn streak_evaluator(&self) -> Arc<StreakEvaluator> {
        Arc::new(
            StreakEvaluator::new(
                self.api.clone(),
                self.cache.clone(),
                self.notifier.clone(),
                self.scheduler.clone(),
            )
            .with_interval(self.config.streak().validate_interval()),
        )
    }

    pub fn daily_progress(&self) -> DailyProgressTracker {
        DailyProgressTracker::new(self.api.clone(), self.cache.clone(), self.notifier.clone())
    }
}
