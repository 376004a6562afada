use serde::{Deserialize, Serialize};

/// Server-computed progress counters. Never derived locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressSnapshot {
    /// Percent, 0–100
    pub overall_progress: f64,
    /// Seconds
    pub total_study_time: u64,
    pub questions_answered: u64,
    pub correct_answers: u64,
    pub battle_wins: u32,
    pub battle_losses: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryStats {
    pub category_id: i64,
    pub name: String,
    /// Percent, 0–100
    pub progress: f64,
    pub questions_answered: u64,
    pub correct_answers: u64,
}
