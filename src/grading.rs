// src/grading.rs

use crate::models::attempt::GradeOutcome;
use crate::models::quiz::{AnswerMap, AnswerValue, Question, QuestionKind, Quiz};

/// Grades an answer set against a quiz.
///
/// * `max_score` is the sum of every question's points, answered or not.
/// * Each question is binary: full points or zero, no partial credit.
/// * Choice questions (multiple-choice, true/false) require an exact,
///   case-sensitive match against the answer key.
/// * Short-answer questions are compared after trimming whitespace and
///   lower-casing both sides, against any accepted answer.
/// * An absent answer contributes zero.
pub fn grade(quiz: &Quiz, answers: &AnswerMap) -> GradeOutcome {
    let max_score = quiz.max_score();

    let mut score = 0;
    for question in &quiz.questions {
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        if is_correct(question, answer) {
            score += question.points;
        }
    }

    GradeOutcome { score, max_score }
}

/// Whether a single answer earns the question's points.
///
/// Only plain-text answers can score; a multi-valued answer never matches
/// the single-selection question kinds this platform supports.
fn is_correct(question: &Question, answer: &AnswerValue) -> bool {
    let Some(text) = answer.as_text() else {
        return false;
    };

    match question.kind {
        QuestionKind::MultipleChoice | QuestionKind::TrueFalse => question
            .correct_answer
            .accepted()
            .iter()
            .any(|accepted| accepted == text),
        QuestionKind::ShortAnswer => {
            let candidate = normalize(text);
            question
                .correct_answer
                .accepted()
                .iter()
                .any(|accepted| normalize(accepted) == candidate)
        }
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}
