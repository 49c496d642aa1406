// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::quiz::AnswerMap;

/// Result of grading one answer set against one quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeOutcome {
    pub score: u32,
    pub max_score: u32,
}

impl GradeOutcome {
    /// Score as a percentage, guarding the zero-question quiz.
    pub fn percentage(&self) -> f64 {
        if self.max_score == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.max_score) * 100.0
    }
}

/// A recorded quiz submission.
///
/// At most one attempt exists per (student, quiz); a resubmission
/// overwrites the previous record. Attempts survive deletion of the quiz
/// they reference — grading only touches the quiz at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub student_id: String,
    pub quiz_id: String,
    pub answers: AnswerMap,
    pub score: u32,
    pub max_score: u32,
    pub submitted_at: DateTime<Utc>,
}

/// One row of the teacher-facing results view for a quiz.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResultEntry {
    pub student_id: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub submitted_at: DateTime<Utc>,
}
