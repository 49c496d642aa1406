// src/session.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::AppError;
use crate::models::attempt::GradeOutcome;
use crate::models::quiz::{AnswerMap, AnswerValue, Question, Quiz};
use crate::services::attempts::AttemptLedger;
use crate::services::quizzes::QuizCatalog;

/// Where a running session currently stands.
///
/// `Submitted` is terminal; the attempt has been recorded and no further
/// mutation of the session is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Confirming,
    Submitted,
}

/// What a single countdown tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_secs: u32 },
    Submitted(GradeOutcome),
}

/// The stateful flow of one student taking one quiz.
///
/// Construction plays the role of the loading state: it resolves the quiz
/// through the catalog and fails with `NotFound` when the id does not
/// resolve — the caller terminates the flow, there is no retry. On
/// success the session seeds the full time allowance and a blank answer per
/// question, and starts in [`SessionPhase::InProgress`].
pub struct QuizSession {
    quiz: Quiz,
    student_id: String,
    ledger: Arc<AttemptLedger>,
    current_index: usize,
    answers: AnswerMap,
    remaining_secs: u32,
    phase: SessionPhase,
    outcome: Option<GradeOutcome>,
}

impl QuizSession {
    pub fn start(
        catalog: &QuizCatalog,
        ledger: Arc<AttemptLedger>,
        student_id: &str,
        quiz_id: &str,
    ) -> Result<Self, AppError> {
        let quiz = catalog.by_id(quiz_id).ok_or_else(|| {
            AppError::NotFound(format!("The requested quiz '{}' could not be found", quiz_id))
        })?;

        let answers: AnswerMap = quiz
            .questions
            .iter()
            .map(|question| (question.id.clone(), AnswerValue::Text(String::new())))
            .collect();

        tracing::info!(
            "Student {} started quiz '{}' ({} questions, {} min)",
            student_id,
            quiz.title,
            quiz.questions.len(),
            quiz.time_limit
        );

        Ok(Self {
            remaining_secs: quiz.time_limit * 60,
            quiz,
            student_id: student_id.to_string(),
            ledger,
            current_index: 0,
            answers,
            phase: SessionPhase::InProgress,
            outcome: None,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question at the displayed index, or `None` for a quiz whose
    /// question list was emptied after authoring.
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current_index)
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Grade recorded at submission, once the session is terminal.
    pub fn outcome(&self) -> Option<GradeOutcome> {
        self.outcome
    }

    /// Remaining time formatted as m:ss for the timer display.
    pub fn remaining_display(&self) -> String {
        format!("{}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Sets or overwrites the answer for the currently displayed question.
    /// Ignored outside `InProgress`.
    pub fn answer_current(&mut self, value: impl Into<AnswerValue>) {
        if self.phase != SessionPhase::InProgress {
            return;
        }
        let Some(question) = self.quiz.questions.get(self.current_index) else {
            return;
        };
        self.answers.insert(question.id.clone(), value.into());
    }

    /// Moves to the next question. A no-op on the last question, where the
    /// submit control replaces "next".
    pub fn next(&mut self) {
        if self.phase != SessionPhase::InProgress {
            return;
        }
        if self.current_index + 1 < self.quiz.questions.len() {
            self.current_index += 1;
        }
    }

    /// Moves to the previous question. A no-op on the first.
    pub fn previous(&mut self) {
        if self.phase != SessionPhase::InProgress {
            return;
        }
        self.current_index = self.current_index.saturating_sub(1);
    }

    /// Jumps straight to a question by index, as the question selector
    /// does. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if self.phase != SessionPhase::InProgress {
            return;
        }
        if index < self.quiz.questions.len() {
            self.current_index = index;
        }
    }

    /// Asks to submit. Normally moves to `Confirming` so the student can
    /// back out; when time has already run out the submission proceeds
    /// immediately instead.
    pub fn request_submit(&mut self) -> Result<Option<GradeOutcome>, AppError> {
        if self.phase != SessionPhase::InProgress {
            return Ok(self.outcome);
        }
        if self.remaining_secs == 0 {
            return self.submit_now().map(Some);
        }
        self.phase = SessionPhase::Confirming;
        Ok(None)
    }

    /// Backs out of the confirmation dialog, preserving the question
    /// index, the timer and all answers.
    pub fn cancel_submit(&mut self) {
        if self.phase == SessionPhase::Confirming {
            self.phase = SessionPhase::InProgress;
        }
    }

    /// Confirms submission from the dialog.
    pub fn confirm_submit(&mut self) -> Result<GradeOutcome, AppError> {
        if self.phase != SessionPhase::Confirming {
            return Err(AppError::Validation(
                "There is no submission awaiting confirmation".to_string(),
            ));
        }
        self.submit_now()
    }

    /// One second of countdown. Reaching zero forces immediate grading and
    /// submission, bypassing the confirmation dialog. The countdown keeps
    /// running while the confirmation dialog is open.
    pub fn tick(&mut self) -> Result<TickOutcome, AppError> {
        if let Some(outcome) = self.outcome {
            return Ok(TickOutcome::Submitted(outcome));
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            tracing::info!(
                "Time expired for student {} on quiz {}",
                self.student_id,
                self.quiz.id
            );
            return self.submit_now().map(TickOutcome::Submitted);
        }

        Ok(TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        })
    }

    /// Records the attempt through the ledger and makes the session
    /// terminal. Unanswered questions are legal and grade as zero.
    fn submit_now(&mut self) -> Result<GradeOutcome, AppError> {
        let outcome = self
            .ledger
            .submit(&self.student_id, &self.quiz.id, self.answers.clone())?;

        self.phase = SessionPhase::Submitted;
        self.outcome = Some(outcome);
        Ok(outcome)
    }
}

/// Owner handle for a session's countdown task. Dropping the guard aborts
/// the task, so navigating away from the quiz tears the timer down and it
/// can never fire against a stale session.
pub struct CountdownGuard {
    handle: JoinHandle<()>,
}

impl CountdownGuard {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns the one-second countdown for a session.
///
/// The task stops itself as soon as the session reports a terminal tick,
/// whether by timeout or because the student submitted manually in the
/// meantime.
pub fn spawn_countdown(session: Arc<Mutex<QuizSession>>) -> CountdownGuard {
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            let mut session = session.lock().await;
            match session.tick() {
                Ok(TickOutcome::Running { .. }) => {}
                Ok(TickOutcome::Submitted(_)) => break,
                Err(err) => {
                    tracing::error!("Countdown submission failed: {}", err);
                    break;
                }
            }
        }
    });

    CountdownGuard { handle }
}
