use thiserror::Error;

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("score {score} is outside 0..=100")]
    ScoreOutOfRange { score: f64 },
    #[error("correct answers ({correct}) exceed questions answered ({answered})")]
    CorrectExceedsAnswered { correct: i64, answered: i64 },
    #[error("negative correct answers: {correct}")]
    NegativeCorrectAnswers { correct: i64 },
}
