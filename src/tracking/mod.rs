//! Client-side study tracking: activity submission, streak upkeep and the
//! notifications derived from server counters.

mod daily;
pub use daily::DailyProgressTracker;

mod error;
pub use error::{TrackingError, TrackingResult};

mod flow;
pub use flow::{ActivityReport, StudyFlow};

mod milestone;
pub use milestone::{ACHIEVEMENTS, Achievement, MilestoneCallback, MilestoneNotifier, first_achievement};

mod notify;
pub use notify::{LogNotifier, Notification, Notifier};

pub mod schedule;
pub use schedule::{ScheduleHandle, Scheduler, TokioScheduler};

mod streak;
pub use streak::{DEFAULT_VALIDATE_INTERVAL, StreakEvaluator, StreakReport, StreakWatch};

mod tracker;
pub use tracker::{ActivityTracker, INVALIDATED_BY_ACTIVITY, TrackOutcome};

#[cfg(test)]
pub(crate) mod test_support;
