use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    api::{ApiError, ApiResult, StudyApi, endpoints},
    cache::{CacheHandle, QueryCache},
    model::{
        ActivityRecord, BadgeCheck, CategoryStats, DailyProgress, ProgressSnapshot, StreakState,
        StudyMode, TrackResult,
    },
    tracking::notify::{Notification, Notifier},
};

/// Lets every ready task run without letting a paused clock auto-advance.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn http(status: u16) -> ApiError {
    ApiError::Http {
        status,
        body: String::from("stub failure"),
    }
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<String>,
    tracked: Vec<ActivityRecord>,
    track_badges: Vec<String>,
    check_badges: Vec<String>,
    fail_track: Option<u16>,
    fail_validate: Option<u16>,
    fail_check_badges: Option<u16>,
    progress: ProgressSnapshot,
    /// Applied to `progress` once an activity is tracked.
    progress_after_track: Option<f64>,
    streak: StreakState,
    daily: DailyProgress,
}

/// In-memory stand-in for the exam-prep API.
#[derive(Debug, Default)]
pub struct FakeStudyApi {
    state: Mutex<FakeState>,
}

impl FakeStudyApi {
    fn with_state<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    fn record(&self, endpoint: &str) {
        self.with_state(|s| s.calls.push(endpoint.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.with_state(|s| s.calls.iter().filter(|c| *c == endpoint).count())
    }

    pub fn tracked(&self) -> Vec<ActivityRecord> {
        self.with_state(|s| s.tracked.clone())
    }

    pub fn fail_track_with(&self, status: u16) {
        self.with_state(|s| s.fail_track = Some(status));
    }

    pub fn fail_validate_with(&self, status: Option<u16>) {
        self.with_state(|s| s.fail_validate = status);
    }

    pub fn fail_check_badges_with(&self, status: u16) {
        self.with_state(|s| s.fail_check_badges = Some(status));
    }

    pub fn set_track_badges(&self, badges: &[&str]) {
        self.with_state(|s| s.track_badges = badges.iter().map(|b| b.to_string()).collect());
    }

    pub fn set_check_badges(&self, badges: &[&str]) {
        self.with_state(|s| s.check_badges = badges.iter().map(|b| b.to_string()).collect());
    }

    pub fn set_progress(&self, overall: f64) {
        self.with_state(|s| s.progress.overall_progress = overall);
    }

    pub fn set_progress_after_track(&self, overall: f64) {
        self.with_state(|s| s.progress_after_track = Some(overall));
    }

    pub fn set_streak(&self, streak: StreakState) {
        self.with_state(|s| s.streak = streak);
    }

    pub fn set_daily(&self, daily: DailyProgress) {
        self.with_state(|s| s.daily = daily);
    }
}

#[async_trait]
impl StudyApi for FakeStudyApi {
    async fn track_activity(&self, record: &ActivityRecord) -> ApiResult<TrackResult> {
        self.record(endpoints::TRACK_ACTIVITY);
        self.with_state(|s| {
            if let Some(status) = s.fail_track {
                return Err(http(status));
            }
            s.tracked.push(record.clone());
            if let Some(next) = s.progress_after_track.take() {
                s.progress.overall_progress = next;
            }
            Ok(TrackResult {
                new_badges: s.track_badges.clone(),
            })
        })
    }

    async fn check_badges(&self) -> ApiResult<BadgeCheck> {
        self.record(endpoints::CHECK_BADGES);
        self.with_state(|s| match s.fail_check_badges {
            Some(status) => Err(http(status)),
            None => Ok(BadgeCheck {
                new_badges: s.check_badges.clone(),
            }),
        })
    }

    async fn overview(&self) -> ApiResult<ProgressSnapshot> {
        self.record(endpoints::OVERVIEW);
        Ok(self.with_state(|s| s.progress.clone()))
    }

    async fn overall_progress(&self) -> ApiResult<ProgressSnapshot> {
        self.record(endpoints::OVERALL_PROGRESS);
        Ok(self.with_state(|s| s.progress.clone()))
    }

    async fn category_stats(&self) -> ApiResult<Vec<CategoryStats>> {
        self.record(endpoints::CATEGORY_STATS);
        Ok(vec![])
    }

    async fn validate_streak(&self) -> ApiResult<()> {
        self.record(endpoints::VALIDATE_STREAK);
        self.with_state(|s| match s.fail_validate {
            Some(status) => Err(http(status)),
            None => Ok(()),
        })
    }

    async fn streak(&self) -> ApiResult<StreakState> {
        self.record(endpoints::STREAK);
        Ok(self.with_state(|s| s.streak.clone()))
    }

    async fn daily_progress(&self) -> ApiResult<DailyProgress> {
        self.record(endpoints::DAILY_PROGRESS_TODAY);
        Ok(self.with_state(|s| s.daily.clone()))
    }

    async fn complete_daily_mode(&self, mode: StudyMode) -> ApiResult<DailyProgress> {
        self.record(&endpoints::daily_progress_mode(mode));
        Ok(self.with_state(|s| {
            match mode {
                StudyMode::Quiz => s.daily.quiz_completed = true,
                StudyMode::Review => s.daily.review_time_completed = true,
                StudyMode::Practice => s.daily.practice_completed = true,
            }
            s.daily.clone()
        }))
    }
}

/// Real cache that also records every invalidation in order.
#[derive(Debug, Default)]
pub struct SpyCache {
    inner: QueryCache,
    invalidated: Mutex<Vec<String>>,
}

impl SpyCache {
    pub fn invalidations(&self) -> Vec<String> {
        self.invalidated.lock().unwrap().clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }
}

impl CacheHandle for SpyCache {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.inner.get_value(key)
    }

    fn set_value(&self, key: &str, value: Value) {
        self.inner.set_value(key, value)
    }

    fn invalidate(&self, prefix: &str) {
        self.invalidated.lock().unwrap().push(prefix.to_string());
        self.inner.invalidate(prefix)
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// Records milestone callback invocations.
#[derive(Debug, Default, Clone)]
pub struct CallbackLog {
    fired: Arc<Mutex<Vec<u8>>>,
}

impl CallbackLog {
    pub fn callback(&self) -> crate::tracking::MilestoneCallback {
        let fired = self.fired.clone();
        Arc::new(move |m| fired.lock().unwrap().push(m))
    }

    pub fn fired(&self) -> Vec<u8> {
        self.fired.lock().unwrap().clone()
    }
}
