use std::{sync::Arc, time::Duration};

use crate::{
    model::{ActivityRecord, ActivityType, crossed_milestone},
    tracking::notify::{Notification, Notifier},
};

/// Invoked with the crossed threshold once its notification had time to show.
pub type MilestoneCallback = Arc<dyn Fn(u8) + Send + Sync>;

#[derive(Debug)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    matches: fn(&ActivityRecord) -> bool,
}

impl Achievement {
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        (self.matches)(record)
    }
}

/// Checked in order; only the first match is announced.
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        title: "Perfect Quiz Score",
        description: "Outstanding! You scored 90% or higher on a quiz.",
        matches: |r| r.activity_type() == ActivityType::Quiz && r.score().is_some_and(|s| s >= 90.0),
    },
    Achievement {
        title: "Study Marathon",
        description: "You answered 20 or more questions in one session.",
        matches: |r| r.questions_answered().is_some_and(|n| n >= 20),
    },
    Achievement {
        title: "Mock Exam Passed",
        description: "You passed a full mock exam. You're ready for the real thing.",
        matches: |r| r.activity_type() == ActivityType::MockExam && r.is_passed(),
    },
];

pub fn first_achievement(record: &ActivityRecord) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.matches(record))
}

#[derive(Clone)]
pub struct MilestoneNotifier {
    notifier: Arc<dyn Notifier>,
    on_milestone: Option<MilestoneCallback>,
    presentation_delay: Duration,
}

impl MilestoneNotifier {
    pub fn new(notifier: Arc<dyn Notifier>, presentation_delay: Duration) -> Self {
        Self {
            notifier,
            on_milestone: None,
            presentation_delay,
        }
    }

    pub fn with_callback(mut self, callback: MilestoneCallback) -> Self {
        self.on_milestone = Some(callback);
        self
    }

    /// Announces the lowest threshold crossed between two progress readings,
    /// then runs the callback after the presentation delay. Without a
    /// registered callback nothing is announced.
    pub async fn check_progress(&self, previous: Option<f64>, current: f64) -> Option<u8> {
        let callback = self.on_milestone.as_ref()?;
        let threshold = crossed_milestone(previous, current)?;

        tracing::info!(threshold, ?previous, current, "milestone crossed");
        self.notifier
            .notify(Notification::MilestoneAchieved { threshold });

        tokio::time::sleep(self.presentation_delay).await;
        callback(threshold);

        Some(threshold)
    }

    pub fn check_achievements(&self, record: &ActivityRecord) -> Option<&'static Achievement> {
        let achievement = first_achievement(record)?;

        self.notifier.notify(Notification::Achievement {
            title: achievement.title,
            description: achievement.description,
        });
        Some(achievement)
    }

    /// One notification listing every badge; nothing for an empty list.
    pub fn announce_badges(&self, badges: &[String]) -> bool {
        if badges.is_empty() {
            return false;
        }

        self.notifier.notify(Notification::BadgesEarned {
            badges: badges.to_vec(),
        });
        true
    }
}
