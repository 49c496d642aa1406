// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use schoolhub::config::Config;
use schoolhub::routes;
use schoolhub::seed;
use schoolhub::session::{QuizSession, SessionPhase, spawn_countdown};
use tokio::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Build the seeded in-memory stores
    let state = seed::demo_state();
    tracing::info!(
        "Catalog ready: {} subjects, {} quizzes",
        state.curriculum.all_subjects().len(),
        state.quizzes.all().len()
    );

    // Teacher walk-through: sign in and inspect owned subjects and quizzes
    let teacher = match state.auth.login(&config.demo_teacher_email, "password") {
        Ok(user) => user,
        Err(err) => {
            tracing::error!("Demo teacher login failed: {}", err);
            return;
        }
    };
    tracing::info!(
        "{} landed on {}",
        teacher.name,
        routes::dashboard_path(Some(teacher.role))
    );

    let subjects = state.curriculum.teacher_subjects(&teacher.id);
    let subject_ids: Vec<String> = subjects.iter().map(|subject| subject.id.clone()).collect();
    for quiz in state.quizzes.by_teacher_subjects(&subject_ids) {
        tracing::info!(
            "Teacher quiz: '{}' ({} questions, edit at {})",
            quiz.title,
            quiz.questions.len(),
            routes::edit_quiz_path(&quiz.id)
        );
    }
    state.auth.logout();

    // Student walk-through: take the first available quiz end to end
    let student = match state.auth.login(&config.demo_student_email, "password") {
        Ok(user) => user,
        Err(err) => {
            tracing::error!("Demo student login failed: {}", err);
            return;
        }
    };
    tracing::info!(
        "{} landed on {}",
        student.name,
        routes::dashboard_path(Some(student.role))
    );

    let Some(quiz) = state
        .curriculum
        .student_subjects(&student.id)
        .iter()
        .flat_map(|subject| state.quizzes.by_subject(&subject.id))
        .next()
    else {
        tracing::warn!("No quiz available for the demo student");
        return;
    };

    let session = match QuizSession::start(&state.quizzes, state.attempts.clone(), &student.id, &quiz.id)
    {
        Ok(session) => Arc::new(Mutex::new(session)),
        Err(err) => {
            tracing::error!("Could not start quiz session: {}", err);
            return;
        }
    };

    // The countdown runs while the student works through the questions.
    let countdown = spawn_countdown(session.clone());

    let outcome = {
        let mut session = session.lock().await;

        // Answer every question with its first option (or a guess).
        let question_count = session.quiz().questions.len();
        for index in 0..question_count {
            session.jump_to(index);
            let answer = session
                .current_question()
                .and_then(|question| question.options.first().cloned())
                .unwrap_or_else(|| "Energy production".to_string());
            session.answer_current(answer);
        }

        match session.request_submit().expect("quiz exists") {
            // Time had already expired; the submission went straight through.
            Some(outcome) => outcome,
            None => {
                tracing::info!(
                    "Awaiting confirmation, remaining {}",
                    session.remaining_display()
                );
                session.confirm_submit().expect("submission was pending")
            }
        }
    };
    countdown.cancel();

    tracing::info!(
        "Quiz submitted: {}/{} ({:.0}%)",
        outcome.score,
        outcome.max_score,
        outcome.percentage()
    );

    debug_assert_eq!(
        session.lock().await.phase(),
        SessionPhase::Submitted
    );

    let results = state.attempts.results_for_quiz(&quiz.id);
    for entry in &results {
        tracing::info!(
            "Result: student {} scored {}/{} ({:.0}%)",
            entry.student_id,
            entry.score,
            entry.max_score,
            entry.percentage
        );
    }

    match serde_json::to_string_pretty(&results) {
        Ok(dump) => tracing::debug!("Results payload:\n{}", dump),
        Err(err) => tracing::error!("Could not serialize results: {}", err),
    }
}
