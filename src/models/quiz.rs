// src/models/quiz.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Question type: multiple choice, true/false or free short answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

/// The answer key of a question.
///
/// Serialized untagged so it round-trips as either a plain string or an
/// array of strings, matching the authoring surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    /// Exactly one accepted string.
    Single(String),
    /// Any member of the set is accepted.
    AnySet(Vec<String>),
}

impl CorrectAnswer {
    /// All accepted strings. Empty for `AnySet(vec![])`, which can never
    /// be scored correct.
    pub fn accepted(&self) -> &[String] {
        match self {
            CorrectAnswer::Single(s) => std::slice::from_ref(s),
            CorrectAnswer::AnySet(set) => set,
        }
    }
}

/// A candidate's answer to a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Many(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Many(_) => None,
        }
    }

    /// True when the candidate left the question blank.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.is_empty(),
            AnswerValue::Many(values) => values.is_empty(),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

/// Candidate answers keyed by question id.
pub type AnswerMap = HashMap<String, AnswerValue>;

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    /// Prompt shown to the student.
    pub text: String,

    pub kind: QuestionKind,

    /// Ordered option strings. Present for multiple-choice/true-false,
    /// empty for short-answer.
    #[serde(default)]
    pub options: Vec<String>,

    pub correct_answer: CorrectAnswer,

    /// Points awarded for a correct answer. Always positive.
    pub points: u32,
}

/// A quiz as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subject_id: String,

    /// Optional owning topic; `None` means a general quiz for the subject.
    pub topic_id: Option<String>,

    pub questions: Vec<Question>,

    /// Time limit in minutes. Always positive.
    pub time_limit: u32,

    /// Window during which the quiz is open. `opens_at <= closes_at`.
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
}

impl Quiz {
    /// Sum of every question's point value, answered or not.
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

/// DTO for a question inside a create/update request. The catalog assigns
/// the id; authoring carries an existing id through edits.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewQuestion {
    pub id: Option<String>,

    #[validate(length(min = 1, max = 1000, message = "Question text must not be empty."))]
    pub text: String,

    pub kind: QuestionKind,

    #[serde(default)]
    pub options: Vec<String>,

    pub correct_answer: CorrectAnswer,

    #[validate(range(min = 1, message = "Points must be a positive number."))]
    pub points: u32,
}

/// DTO for creating a new quiz.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewQuiz {
    #[validate(length(min = 1, max = 200, message = "Quiz title must not be empty."))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: String,

    #[validate(length(min = 1, message = "A subject must be selected."))]
    pub subject_id: String,

    pub topic_id: Option<String>,

    #[validate(
        length(min = 1, message = "Please add at least one question to the quiz."),
        nested,
        custom(function = validate_choice_questions)
    )]
    pub questions: Vec<NewQuestion>,

    #[validate(range(min = 1, message = "Time limit must be a positive number of minutes."))]
    pub time_limit: u32,

    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
}

/// DTO for partially updating a quiz. Only provided fields overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject_id: Option<String>,
    pub topic_id: Option<Option<String>>,
    pub questions: Option<Vec<Question>>,
    pub time_limit: Option<u32>,
    pub opens_at: Option<DateTime<Utc>>,
    pub closes_at: Option<DateTime<Utc>>,
}

/// Checks the structural invariants of choice questions:
/// the answer key must be one of the listed options, and a true/false
/// question must carry exactly the {"True", "False"} option pair.
fn validate_choice_questions(questions: &[NewQuestion]) -> Result<(), validator::ValidationError> {
    for question in questions {
        match question.kind {
            QuestionKind::MultipleChoice | QuestionKind::TrueFalse => {
                if question.kind == QuestionKind::TrueFalse
                    && question.options != ["True".to_string(), "False".to_string()]
                {
                    return Err(validator::ValidationError::new("true_false_options"));
                }
                let key_listed = question
                    .correct_answer
                    .accepted()
                    .iter()
                    .all(|answer| question.options.contains(answer));
                if question.correct_answer.accepted().is_empty() || !key_listed {
                    return Err(validator::ValidationError::new("correct_answer_not_an_option"));
                }
            }
            QuestionKind::ShortAnswer => {
                if !question.options.is_empty() {
                    return Err(validator::ValidationError::new("short_answer_has_options"));
                }
            }
        }
    }
    Ok(())
}
