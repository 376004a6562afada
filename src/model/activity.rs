use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Review,
    Practice,
    Quiz,
    MockExam,
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Review => write!(f, "review"),
            Self::Practice => write!(f, "practice"),
            Self::Quiz => write!(f, "quiz"),
            Self::MockExam => write!(f, "mock_exam"),
        }
    }
}

/// One completed study action, as posted to `track-activity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    activity_type: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtopic_ids: Option<BTreeSet<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    questions_answered: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct_answers: Option<i64>,
    /// Seconds spent on the activity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_spent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_passed: Option<bool>,
}

impl ActivityRecord {
    pub fn new(activity_type: ActivityType) -> Self {
        Self {
            activity_type,
            subtopic_ids: None,
            category_id: None,
            score: None,
            questions_answered: None,
            correct_answers: None,
            time_spent: None,
            is_passed: None,
        }
    }

    pub fn with_subtopics<I: IntoIterator<Item = i64>>(mut self, ids: I) -> Self {
        self.subtopic_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_questions(mut self, answered: i64, correct: i64) -> Self {
        self.questions_answered = Some(answered);
        self.correct_answers = Some(correct);
        self
    }

    pub fn with_questions_answered(mut self, answered: i64) -> Self {
        self.questions_answered = Some(answered);
        self
    }

    pub fn with_time_spent(mut self, seconds: u64) -> Self {
        self.time_spent = Some(seconds);
        self
    }

    pub fn with_passed(mut self, passed: bool) -> Self {
        self.is_passed = Some(passed);
        self
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn subtopic_ids(&self) -> Option<&BTreeSet<i64>> {
        self.subtopic_ids.as_ref()
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn questions_answered(&self) -> Option<i64> {
        self.questions_answered
    }

    pub fn correct_answers(&self) -> Option<i64> {
        self.correct_answers
    }

    pub fn time_spent(&self) -> Option<u64> {
        self.time_spent
    }

    pub fn is_passed(&self) -> bool {
        self.is_passed.unwrap_or(false)
    }

    /// Whether this record carries anything worth sending. Records without
    /// answered questions are dropped silently by the tracker.
    pub fn is_trackable(&self) -> bool {
        matches!(self.questions_answered, Some(n) if n > 0)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(score) = self.score {
            if !(0.0..=100.0).contains(&score) {
                return Err(ValidationError::ScoreOutOfRange { score });
            }
        }

        if let Some(correct) = self.correct_answers {
            if correct < 0 {
                return Err(ValidationError::NegativeCorrectAnswers { correct });
            }

            if let Some(answered) = self.questions_answered {
                if correct > answered {
                    return Err(ValidationError::CorrectExceedsAnswered { correct, answered });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResult {
    #[serde(default)]
    pub new_badges: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeCheck {
    #[serde(default)]
    pub new_badges: Vec<String>,
}
