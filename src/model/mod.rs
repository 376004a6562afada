mod activity;
pub use activity::{ActivityRecord, ActivityType, BadgeCheck, TrackResult};

mod daily;
pub use daily::{DailyProgress, StudyMode};

mod error;
pub use error::{ValidationError, ValidationResult};

mod milestone;
pub use milestone::{MILESTONE_THRESHOLDS, crossed_milestone, next_milestone};

mod progress;
pub use progress::{CategoryStats, ProgressSnapshot};

mod streak;
pub use streak::StreakState;
