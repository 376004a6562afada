use std::fmt;

/// Something the user should see as a toast or dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    MilestoneAchieved {
        threshold: u8,
    },
    Achievement {
        title: &'static str,
        description: &'static str,
    },
    BadgesEarned {
        badges: Vec<String>,
    },
    DailyGoalComplete,
    ActivityFailed {
        message: String,
    },
    SyncFailed {
        message: String,
    },
}

impl Notification {
    pub fn title(&self) -> &str {
        match self {
            Self::MilestoneAchieved { .. } => "Milestone achieved!",
            Self::Achievement { title, .. } => *title,
            Self::BadgesEarned { badges } if badges.len() == 1 => "New badge earned!",
            Self::BadgesEarned { .. } => "New badges earned!",
            Self::DailyGoalComplete => "Daily goal complete!",
            Self::ActivityFailed { .. } => "Could not save your progress",
            Self::SyncFailed { .. } => "Could not refresh your streak",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MilestoneAchieved { threshold } => {
                format!("You've reached {threshold}% overall progress.")
            }
            Self::Achievement { description, .. } => description.to_string(),
            Self::BadgesEarned { badges } => badges.join(", "),
            Self::DailyGoalComplete => {
                String::from("Quiz, review and practice are all done for today.")
            }
            Self::ActivityFailed { message } | Self::SyncFailed { message } => message.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ActivityFailed { .. } | Self::SyncFailed { .. })
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// Sink for user-facing notifications. Must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits notifications as tracing events on the `wrenchprep::toast` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!(target: "wrenchprep::toast", "{notification}");
        } else {
            tracing::info!(target: "wrenchprep::toast", "{notification}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn badge_titles_follow_count() {
        let one = Notification::BadgesEarned {
            badges: vec![String::from("Rookie Wrencher")],
        };
        assert_eq!(one.to_string(), "New badge earned!: Rookie Wrencher");

        let two = Notification::BadgesEarned {
            badges: vec![String::from("Rookie Wrencher"), String::from("Torque Master")],
        };
        assert_eq!(two.title(), "New badges earned!");
        assert_eq!(two.message(), "Rookie Wrencher, Torque Master");
    }

    #[test]
    fn milestone_message_names_threshold() {
        let n = Notification::MilestoneAchieved { threshold: 25 };
        assert_eq!(n.message(), "You've reached 25% overall progress.");
        assert!(!n.is_error());
    }
}
