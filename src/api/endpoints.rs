//! Paths consumed from the exam-prep API. These double as query-cache keys.

pub static TRACK_ACTIVITY: &str = "/api/analytics/track-activity";
pub static CHECK_BADGES: &str = "/api/analytics/check-badges";
pub static OVERVIEW: &str = "/api/analytics/overview";
pub static OVERALL_PROGRESS: &str = "/api/analytics/overall-progress";
pub static CATEGORY_STATS: &str = "/api/analytics/category-stats";

pub static VALIDATE_STREAK: &str = "/api/study-sessions/validate-streak";
pub static STREAK: &str = "/api/study-sessions/streak";

pub static DAILY_PROGRESS: &str = "/api/daily-progress";
pub static DAILY_PROGRESS_TODAY: &str = "/api/daily-progress/today";

pub static USER: &str = "/api/user";

pub fn daily_progress_mode(mode: crate::model::StudyMode) -> String {
    format!("{DAILY_PROGRESS}/{}", mode.as_path())
}
