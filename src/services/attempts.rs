// src/services/attempts.rs

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::error::AppError;
use crate::grading;
use crate::models::attempt::{Attempt, GradeOutcome, QuizResultEntry};
use crate::models::quiz::AnswerMap;
use crate::services::quizzes::QuizCatalog;

/// In-memory record of per-student, per-quiz submissions.
///
/// Attempts are created exclusively through [`AttemptLedger::submit`],
/// which grades against the catalog, and are never mutated afterward
/// except by a later submission for the same (student, quiz) pair
/// overwriting the earlier one.
pub struct AttemptLedger {
    catalog: Arc<QuizCatalog>,
    attempts: RwLock<HashMap<(String, String), Attempt>>,
}

impl AttemptLedger {
    pub fn new(catalog: Arc<QuizCatalog>) -> Self {
        Self {
            catalog,
            attempts: RwLock::new(HashMap::new()),
        }
    }

    /// Grades and records a submission, overwriting any prior attempt for
    /// the same (student, quiz) pair.
    ///
    /// Submitting against an unknown quiz id is a contract violation:
    /// callers are expected to have resolved the quiz before ever reaching
    /// submission, so this fails instead of recording a zero-credit attempt.
    pub fn submit(
        &self,
        student_id: &str,
        quiz_id: &str,
        answers: AnswerMap,
    ) -> Result<GradeOutcome, AppError> {
        let quiz = self.catalog.by_id(quiz_id).ok_or_else(|| {
            tracing::error!("Attempt submitted for unknown quiz {}", quiz_id);
            AppError::GradingPrecondition(format!("Quiz '{}' does not exist", quiz_id))
        })?;

        let outcome = grading::grade(&quiz, &answers);

        let attempt = Attempt {
            student_id: student_id.to_string(),
            quiz_id: quiz_id.to_string(),
            answers,
            score: outcome.score,
            max_score: outcome.max_score,
            submitted_at: Utc::now(),
        };

        tracing::info!(
            "Recorded attempt: student {} scored {}/{} on quiz {}",
            student_id,
            outcome.score,
            outcome.max_score,
            quiz_id
        );

        self.attempts
            .write()
            .expect("attempt ledger lock poisoned")
            .insert((student_id.to_string(), quiz_id.to_string()), attempt);

        Ok(outcome)
    }

    pub fn attempt(&self, student_id: &str, quiz_id: &str) -> Option<Attempt> {
        self.attempts
            .read()
            .expect("attempt ledger lock poisoned")
            .get(&(student_id.to_string(), quiz_id.to_string()))
            .cloned()
    }

    pub fn attempts_for_student(&self, student_id: &str) -> Vec<Attempt> {
        self.attempts
            .read()
            .expect("attempt ledger lock poisoned")
            .values()
            .filter(|attempt| attempt.student_id == student_id)
            .cloned()
            .collect()
    }

    /// Result rows for the teacher-facing view of one quiz, with the score
    /// expressed as a percentage. Ordered by student id for stable display.
    pub fn results_for_quiz(&self, quiz_id: &str) -> Vec<QuizResultEntry> {
        let mut results: Vec<QuizResultEntry> = self
            .attempts
            .read()
            .expect("attempt ledger lock poisoned")
            .values()
            .filter(|attempt| attempt.quiz_id == quiz_id)
            .map(|attempt| QuizResultEntry {
                student_id: attempt.student_id.clone(),
                score: attempt.score,
                max_score: attempt.max_score,
                percentage: GradeOutcome {
                    score: attempt.score,
                    max_score: attempt.max_score,
                }
                .percentage(),
                submitted_at: attempt.submitted_at,
            })
            .collect();

        results.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        results
    }

    pub fn has_attempted(&self, student_id: &str, quiz_id: &str) -> bool {
        self.attempts
            .read()
            .expect("attempt ledger lock poisoned")
            .contains_key(&(student_id.to_string(), quiz_id.to_string()))
    }
}
