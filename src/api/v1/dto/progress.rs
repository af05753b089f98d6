/*
 * Responsibility
 * - Progress response DTOs (camelCase on the wire)
 * - XP / streak rules are not implemented; handlers return the zero state
 */
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub current_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl ProgressSummary {
    /// A user with no completed tasks.
    pub fn initial() -> Self {
        Self {
            total_xp: 0,
            current_level: 1,
            current_streak: 0,
            longest_streak: 0,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub completion_rate: f64,
    pub total_tasks: u64,
    pub completed_tasks: u64,
}

impl CompletionStats {
    pub fn empty() -> Self {
        Self {
            completion_rate: 0.0,
            total_tasks: 0,
            completed_tasks: 0,
        }
    }
}
