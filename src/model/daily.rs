use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three activity kinds a day needs before it counts as complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    Quiz,
    Review,
    Practice,
}

impl StudyMode {
    pub fn as_path(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Review => "review",
            Self::Practice => "practice",
        }
    }
}

impl std::fmt::Display for StudyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyProgress {
    pub date: Option<NaiveDate>,
    pub quiz_completed: bool,
    pub review_time_completed: bool,
    pub practice_completed: bool,
}

impl DailyProgress {
    pub fn is_completed(&self) -> bool {
        self.quiz_completed && self.review_time_completed && self.practice_completed
    }

    pub fn is_mode_completed(&self, mode: StudyMode) -> bool {
        match mode {
            StudyMode::Quiz => self.quiz_completed,
            StudyMode::Review => self.review_time_completed,
            StudyMode::Practice => self.practice_completed,
        }
    }

    pub fn remaining(&self) -> Vec<StudyMode> {
        [StudyMode::Quiz, StudyMode::Review, StudyMode::Practice]
            .into_iter()
            .filter(|m| !self.is_mode_completed(*m))
            .collect()
    }
}
