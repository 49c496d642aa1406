// tests/session_tests.rs

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use schoolhub::error::AppError;
use schoolhub::models::quiz::{CorrectAnswer, NewQuestion, NewQuiz, QuestionKind, Quiz, QuizUpdate};
use schoolhub::session::{QuizSession, SessionPhase, TickOutcome, spawn_countdown};
use schoolhub::state::AppState;
use tokio::sync::Mutex;

const STUDENT: &str = "student-1";

/// A three-question quiz with the given time limit in minutes.
fn timed_quiz(state: &AppState, time_limit: u32) -> Quiz {
    let choice = |text: &str, correct: &str| NewQuestion {
        id: None,
        text: text.to_string(),
        kind: QuestionKind::MultipleChoice,
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct_answer: CorrectAnswer::Single(correct.to_string()),
        points: 5,
    };

    state.quizzes.create(NewQuiz {
        title: "Timed quiz".to_string(),
        description: String::new(),
        subject_id: "subject-1".to_string(),
        topic_id: None,
        questions: vec![
            choice("First", "A"),
            choice("Second", "B"),
            choice("Third", "C"),
        ],
        time_limit,
        opens_at: Utc::now(),
        closes_at: Utc::now() + Duration::days(1),
    })
}

fn start_session(state: &AppState, quiz: &Quiz) -> QuizSession {
    QuizSession::start(&state.quizzes, state.attempts.clone(), STUDENT, &quiz.id)
        .expect("quiz exists")
}

#[test]
fn loading_an_unknown_quiz_terminates_the_flow() {
    // Arrange
    let state = AppState::new();

    // Act
    let result = QuizSession::start(&state.quizzes, state.attempts.clone(), STUDENT, "missing");

    // Assert
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn loading_seeds_timer_and_blank_answers() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);

    // Act
    let session = start_session(&state, &quiz);

    // Assert
    assert_eq!(session.phase(), SessionPhase::InProgress);
    assert_eq!(session.remaining_secs(), 15 * 60);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.answers().len(), 3);
    assert!(session.answers().values().all(|answer| answer.is_blank()));
    assert_eq!(session.remaining_display(), "15:00");
}

#[test]
fn session_on_an_emptied_quiz_has_no_current_question() {
    // Arrange: the catalog never creates a zero-question quiz, but an
    // update can empty one out from under a later session
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    state
        .quizzes
        .update(
            &quiz.id,
            QuizUpdate {
                questions: Some(Vec::new()),
                ..Default::default()
            },
        )
        .expect("quiz exists");

    // Act
    let mut session = start_session(&state, &quiz);

    // Assert: no question to display, answering is a no-op, no panic
    assert!(session.current_question().is_none());
    session.answer_current("A");
    assert!(session.answers().is_empty());
    assert_eq!(session.phase(), SessionPhase::InProgress);
}

#[test]
fn current_question_follows_the_displayed_index() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    let mut session = start_session(&state, &quiz);

    // Act / Assert
    assert_eq!(
        session.current_question().expect("question displayed").id,
        quiz.questions[0].id
    );
    session.jump_to(2);
    assert_eq!(
        session.current_question().expect("question displayed").id,
        quiz.questions[2].id
    );
}

#[test]
fn navigation_clamps_at_both_ends() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    let mut session = start_session(&state, &quiz);

    // Act / Assert: no regression before the first question
    session.previous();
    assert_eq!(session.current_index(), 0);

    // Advancing stops at the last question
    session.next();
    session.next();
    session.next();
    session.next();
    assert_eq!(session.current_index(), 2);

    // The selector jumps anywhere valid and ignores the rest
    session.jump_to(1);
    assert_eq!(session.current_index(), 1);
    session.jump_to(99);
    assert_eq!(session.current_index(), 1);
}

#[test]
fn answers_overwrite_for_the_displayed_question() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    let mut session = start_session(&state, &quiz);

    // Act
    session.answer_current("B");
    session.answer_current("A");
    session.jump_to(2);
    session.answer_current("C");

    // Assert
    let q1 = &quiz.questions[0].id;
    let q3 = &quiz.questions[2].id;
    assert_eq!(session.answers()[q1].as_text(), Some("A"));
    assert_eq!(session.answers()[q3].as_text(), Some("C"));
}

#[test]
fn confirm_flow_records_the_attempt_once() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    let mut session = start_session(&state, &quiz);
    session.answer_current("A");

    // Act: request, then confirm
    let pending = session.request_submit().expect("quiz exists");
    assert!(pending.is_none());
    assert_eq!(session.phase(), SessionPhase::Confirming);

    let outcome = session.confirm_submit().expect("submission was pending");

    // Assert
    assert_eq!(session.phase(), SessionPhase::Submitted);
    assert_eq!(outcome.score, 5);
    assert_eq!(outcome.max_score, 15);
    assert!(state.attempts.has_attempted(STUDENT, &quiz.id));
}

#[test]
fn cancelling_confirmation_preserves_progress() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    let mut session = start_session(&state, &quiz);
    session.answer_current("A");
    session.jump_to(1);
    let _ = session.tick().expect("quiz exists");
    let remaining = session.remaining_secs();

    // Act
    session.request_submit().expect("quiz exists");
    session.cancel_submit();

    // Assert: index, timer and answers all survive
    assert_eq!(session.phase(), SessionPhase::InProgress);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.remaining_secs(), remaining);
    assert_eq!(
        session.answers()[&quiz.questions[0].id].as_text(),
        Some("A")
    );
    assert!(!state.attempts.has_attempted(STUDENT, &quiz.id));
}

#[test]
fn confirm_without_pending_request_is_rejected() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    let mut session = start_session(&state, &quiz);

    // Act
    let result = session.confirm_submit();

    // Assert
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(session.phase(), SessionPhase::InProgress);
}

#[test]
fn timeout_forces_submission_within_sixty_ticks() {
    // Arrange: one-minute quiz, no user action at all
    let state = AppState::new();
    let quiz = timed_quiz(&state, 1);
    let mut session = start_session(&state, &quiz);

    // Act: 59 ticks keep the session running
    for _ in 0..59 {
        match session.tick().expect("quiz exists") {
            TickOutcome::Running { .. } => {}
            TickOutcome::Submitted(_) => panic!("submitted before the deadline"),
        }
    }

    // The 60th tick reaches zero and bypasses confirmation
    let outcome = session.tick().expect("quiz exists");

    // Assert: graded with only blank answers
    match outcome {
        TickOutcome::Submitted(grade) => {
            assert_eq!(grade.score, 0);
            assert_eq!(grade.max_score, 15);
        }
        TickOutcome::Running { .. } => panic!("deadline did not force submission"),
    }
    assert_eq!(session.phase(), SessionPhase::Submitted);
    assert!(state.attempts.has_attempted(STUDENT, &quiz.id));
}

#[test]
fn timeout_in_confirming_also_submits() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 1);
    let mut session = start_session(&state, &quiz);
    session.answer_current("A");
    session.request_submit().expect("quiz exists");
    assert_eq!(session.phase(), SessionPhase::Confirming);

    // Act: the countdown does not pause for the dialog
    let mut last = session.tick().expect("quiz exists");
    for _ in 0..59 {
        last = session.tick().expect("quiz exists");
    }

    // Assert
    assert!(matches!(last, TickOutcome::Submitted(_)));
    assert_eq!(session.phase(), SessionPhase::Submitted);
}

#[test]
fn submitted_session_is_terminal() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    let mut session = start_session(&state, &quiz);
    session.answer_current("A");
    session.request_submit().expect("quiz exists");
    session.confirm_submit().expect("submission was pending");
    let recorded = state.attempts.attempt(STUDENT, &quiz.id).expect("recorded");

    // Act: every mutator after the terminal state
    session.answer_current("D");
    session.next();
    session.jump_to(2);
    let repeat = session.request_submit().expect("no-op");
    let tick = session.tick().expect("no-op");

    // Assert: nothing moved, nothing was re-recorded
    assert_eq!(session.phase(), SessionPhase::Submitted);
    assert_eq!(session.current_index(), 0);
    assert_eq!(repeat, session.outcome());
    assert!(matches!(tick, TickOutcome::Submitted(_)));
    let after = state.attempts.attempt(STUDENT, &quiz.id).expect("still recorded");
    assert_eq!(after.submitted_at, recorded.submitted_at);
    assert_eq!(after.score, recorded.score);
}

#[tokio::test(start_paused = true)]
async fn countdown_task_autosubmits_a_one_minute_quiz() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 1);
    let session = Arc::new(Mutex::new(start_session(&state, &quiz)));

    // Act: spawn the countdown and let 61 simulated seconds elapse
    let guard = spawn_countdown(session.clone());
    tokio::time::sleep(StdDuration::from_secs(61)).await;

    // Assert: the session submitted itself with the blank answer map
    assert_eq!(session.lock().await.phase(), SessionPhase::Submitted);
    let attempt = state.attempts.attempt(STUDENT, &quiz.id).expect("autosubmitted");
    assert_eq!(attempt.score, 0);
    assert_eq!(attempt.max_score, 15);
    guard.cancel();
}

#[tokio::test(start_paused = true)]
async fn dropping_the_guard_stops_the_countdown() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 1);
    let session = Arc::new(Mutex::new(start_session(&state, &quiz)));
    let guard = spawn_countdown(session.clone());

    // Act: navigate away after ten seconds
    tokio::time::sleep(StdDuration::from_secs(10)).await;
    drop(guard);
    let remaining = session.lock().await.remaining_secs();
    tokio::time::sleep(StdDuration::from_secs(120)).await;

    // Assert: no further ticks fired against the stale session
    assert_eq!(session.lock().await.remaining_secs(), remaining);
    assert_eq!(session.lock().await.phase(), SessionPhase::InProgress);
    assert!(!state.attempts.has_attempted(STUDENT, &quiz.id));
}

#[tokio::test(start_paused = true)]
async fn manual_submission_finishes_the_countdown_task() {
    // Arrange
    let state = AppState::new();
    let quiz = timed_quiz(&state, 15);
    let session = Arc::new(Mutex::new(start_session(&state, &quiz)));
    let guard = spawn_countdown(session.clone());

    // Act: submit manually a few seconds in
    tokio::time::sleep(StdDuration::from_secs(3)).await;
    {
        let mut session = session.lock().await;
        session.answer_current("A");
        session.request_submit().expect("quiz exists");
        session.confirm_submit().expect("submission was pending");
    }
    // The next tick observes the terminal phase and the task stops
    tokio::time::sleep(StdDuration::from_secs(2)).await;

    // Assert
    assert!(guard.is_finished());
    assert_eq!(session.lock().await.phase(), SessionPhase::Submitted);
}
