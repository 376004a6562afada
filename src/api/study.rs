use async_trait::async_trait;

use crate::{
    api::{ApiClient, ApiResult, endpoints},
    model::{
        ActivityRecord, BadgeCheck, CategoryStats, DailyProgress, ProgressSnapshot, StreakState,
        StudyMode, TrackResult,
    },
};

/// The slice of the exam-prep API the tracking components talk to.
#[async_trait]
pub trait StudyApi: Send + Sync {
    async fn track_activity(&self, record: &ActivityRecord) -> ApiResult<TrackResult>;
    async fn check_badges(&self) -> ApiResult<BadgeCheck>;

    async fn overview(&self) -> ApiResult<ProgressSnapshot>;
    async fn overall_progress(&self) -> ApiResult<ProgressSnapshot>;
    async fn category_stats(&self) -> ApiResult<Vec<CategoryStats>>;

    async fn validate_streak(&self) -> ApiResult<()>;
    async fn streak(&self) -> ApiResult<StreakState>;

    async fn daily_progress(&self) -> ApiResult<DailyProgress>;
    async fn complete_daily_mode(&self, mode: StudyMode) -> ApiResult<DailyProgress>;
}

#[async_trait]
impl StudyApi for ApiClient {
    async fn track_activity(&self, record: &ActivityRecord) -> ApiResult<TrackResult> {
        self.post_json(endpoints::TRACK_ACTIVITY, record).await
    }

    async fn check_badges(&self) -> ApiResult<BadgeCheck> {
        self.post_for(endpoints::CHECK_BADGES).await
    }

    async fn overview(&self) -> ApiResult<ProgressSnapshot> {
        self.get_json(endpoints::OVERVIEW).await
    }

    async fn overall_progress(&self) -> ApiResult<ProgressSnapshot> {
        self.get_json(endpoints::OVERALL_PROGRESS).await
    }

    async fn category_stats(&self) -> ApiResult<Vec<CategoryStats>> {
        self.get_json(endpoints::CATEGORY_STATS).await
    }

    async fn validate_streak(&self) -> ApiResult<()> {
        self.post_empty(endpoints::VALIDATE_STREAK).await
    }

    async fn streak(&self) -> ApiResult<StreakState> {
        self.get_json(endpoints::STREAK).await
    }

    async fn daily_progress(&self) -> ApiResult<DailyProgress> {
        self.get_json(endpoints::DAILY_PROGRESS_TODAY).await
    }

    async fn complete_daily_mode(&self, mode: StudyMode) -> ApiResult<DailyProgress> {
        self.post_for(&endpoints::daily_progress_mode(mode)).await
    }
}
