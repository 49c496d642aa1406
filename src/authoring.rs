// src/authoring.rs

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::quiz::{CorrectAnswer, NewQuestion, NewQuiz, Question, QuestionKind, Quiz, QuizUpdate};
use crate::services::curriculum::CurriculumStore;
use crate::services::quizzes::QuizCatalog;

const DEFAULT_TIME_LIMIT_MINUTES: u32 = 15;
const DEFAULT_POINTS: u32 = 5;

/// One question being edited in the form.
///
/// The cleared answer-key state is an empty accepted set, which can never
/// grade correct and fails validation for the choice kinds until the
/// teacher marks an option.
#[derive(Debug, Clone)]
pub struct DraftQuestion {
    /// Present when editing an existing question; reused at submit so
    /// recorded attempts keep pointing at the same question ids.
    pub id: Option<String>,
    pub text: String,
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,
    pub points: u32,
}

impl DraftQuestion {
    /// A blank multiple-choice question: four empty options, no answer
    /// key selected, default point value.
    fn blank() -> Self {
        Self {
            id: None,
            text: String::new(),
            kind: QuestionKind::MultipleChoice,
            options: vec![String::new(); 4],
            correct_answer: CorrectAnswer::AnySet(Vec::new()),
            points: DEFAULT_POINTS,
        }
    }
}

/// Draft state behind the quiz create/edit form.
///
/// Owns the dynamically-sized question list and the per-kind option
/// behavior; on submit it validates the assembled quiz and hands it to the
/// catalog, creating or updating depending on whether an existing quiz id
/// was seeded.
pub struct QuizForm {
    quiz_id: Option<String>,
    pub title: String,
    pub description: String,
    subject_id: String,
    topic_id: Option<String>,
    pub time_limit: u32,
    pub opens_at: DateTime<Utc>,
    pub closes_at: DateTime<Utc>,
    questions: Vec<DraftQuestion>,
    /// (id, title) of the topics selectable for the chosen subject.
    topic_choices: Vec<(String, String)>,
}

impl QuizForm {
    /// A fresh form for creating a quiz, seeded with one blank question
    /// and a 30-day open window.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            quiz_id: None,
            title: String::new(),
            description: String::new(),
            subject_id: String::new(),
            topic_id: None,
            time_limit: DEFAULT_TIME_LIMIT_MINUTES,
            opens_at: now,
            closes_at: now + Duration::days(30),
            questions: vec![DraftQuestion::blank()],
            topic_choices: Vec::new(),
        }
    }

    /// Seeds the form from an existing quiz for editing. The topic
    /// selector is populated from the quiz's subject.
    pub fn edit(store: &CurriculumStore, quiz: &Quiz) -> Self {
        let topic_choices = topic_choices_for(store, &quiz.subject_id);

        let questions = quiz
            .questions
            .iter()
            .map(|question| DraftQuestion {
                id: Some(question.id.clone()),
                text: question.text.clone(),
                kind: question.kind,
                options: question.options.clone(),
                correct_answer: question.correct_answer.clone(),
                points: question.points,
            })
            .collect();

        Self {
            quiz_id: Some(quiz.id.clone()),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            subject_id: quiz.subject_id.clone(),
            topic_id: quiz.topic_id.clone(),
            time_limit: quiz.time_limit,
            opens_at: quiz.opens_at,
            closes_at: quiz.closes_at,
            questions,
            topic_choices,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.quiz_id.is_some()
    }

    pub fn questions(&self) -> &[DraftQuestion] {
        &self.questions
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn topic_id(&self) -> Option<&str> {
        self.topic_id.as_deref()
    }

    pub fn topic_choices(&self) -> &[(String, String)] {
        &self.topic_choices
    }

    /// Appends a new blank question.
    pub fn add_question(&mut self) {
        self.questions.push(DraftQuestion::blank());
    }

    /// Removes the question at `index`. Out-of-range indices are ignored.
    pub fn remove_question(&mut self, index: usize) {
        if index < self.questions.len() {
            self.questions.remove(index);
        }
    }

    /// Switches a question's kind, resetting its options accordingly and
    /// clearing the answer key — the old key may no longer be a valid
    /// option for the new kind.
    pub fn set_question_kind(&mut self, index: usize, kind: QuestionKind) {
        let Some(question) = self.questions.get_mut(index) else {
            return;
        };

        question.kind = kind;
        question.options = match kind {
            QuestionKind::MultipleChoice => vec![String::new(); 4],
            QuestionKind::TrueFalse => vec!["True".to_string(), "False".to_string()],
            QuestionKind::ShortAnswer => Vec::new(),
        };
        question.correct_answer = CorrectAnswer::AnySet(Vec::new());
    }

    pub fn set_question_text(&mut self, index: usize, text: &str) {
        if let Some(question) = self.questions.get_mut(index) {
            question.text = text.to_string();
        }
    }

    pub fn set_question_points(&mut self, index: usize, points: u32) {
        if let Some(question) = self.questions.get_mut(index) {
            question.points = points;
        }
    }

    /// Edits one option's text. If the option was the marked answer key,
    /// the key follows the new text.
    pub fn set_option_text(&mut self, index: usize, option_index: usize, text: &str) {
        let Some(question) = self.questions.get_mut(index) else {
            return;
        };
        let Some(option) = question.options.get_mut(option_index) else {
            return;
        };

        let was_marked = question.correct_answer == CorrectAnswer::Single(option.clone())
            && !option.is_empty();
        *option = text.to_string();
        if was_marked {
            question.correct_answer = CorrectAnswer::Single(text.to_string());
        }
    }

    /// Marks one option as correct. Single-select: marking an option
    /// replaces any previously marked one for this question.
    pub fn mark_correct(&mut self, index: usize, option_index: usize) {
        let Some(question) = self.questions.get_mut(index) else {
            return;
        };
        if let Some(option) = question.options.get(option_index) {
            question.correct_answer = CorrectAnswer::Single(option.clone());
        }
    }

    /// Sets the expected answer of a short-answer question.
    pub fn set_answer_key(&mut self, index: usize, answer: &str) {
        if let Some(question) = self.questions.get_mut(index) {
            question.correct_answer = CorrectAnswer::Single(answer.to_string());
        }
    }

    /// Selects the owning subject. Refreshes the topic selector to the
    /// subject's topics and clears any previously chosen topic — a topic
    /// belongs to exactly one subject, so a stale selection must not
    /// survive the change.
    pub fn set_subject(&mut self, store: &CurriculumStore, subject_id: &str) {
        self.subject_id = subject_id.to_string();
        self.topic_id = None;
        self.topic_choices = topic_choices_for(store, subject_id);
    }

    pub fn set_topic(&mut self, topic_id: Option<String>) {
        self.topic_id = topic_id;
    }

    /// Validates the draft and hands the assembled quiz to the catalog.
    ///
    /// Existing question ids are reused; questions added during this edit
    /// get fresh ids. Creating (no seeded quiz id) defers all id
    /// assignment to the catalog.
    pub fn submit(&self, catalog: &QuizCatalog) -> Result<Quiz, AppError> {
        let new_quiz = NewQuiz {
            title: self.title.clone(),
            description: self.description.clone(),
            subject_id: self.subject_id.clone(),
            topic_id: self.topic_id.clone(),
            questions: self
                .questions
                .iter()
                .map(|draft| NewQuestion {
                    id: draft.id.clone(),
                    text: draft.text.clone(),
                    kind: draft.kind,
                    options: draft.options.clone(),
                    correct_answer: draft.correct_answer.clone(),
                    points: draft.points,
                })
                .collect(),
            time_limit: self.time_limit,
            opens_at: self.opens_at,
            closes_at: self.closes_at,
        };
        new_quiz.validate()?;

        match &self.quiz_id {
            None => Ok(catalog.create(new_quiz)),
            Some(quiz_id) => {
                let questions = new_quiz
                    .questions
                    .into_iter()
                    .map(|draft| Question {
                        id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                        text: draft.text,
                        kind: draft.kind,
                        options: draft.options,
                        correct_answer: draft.correct_answer,
                        points: draft.points,
                    })
                    .collect();

                let update = QuizUpdate {
                    title: Some(new_quiz.title),
                    description: Some(new_quiz.description),
                    subject_id: Some(new_quiz.subject_id),
                    topic_id: Some(new_quiz.topic_id),
                    questions: Some(questions),
                    time_limit: Some(new_quiz.time_limit),
                    opens_at: Some(new_quiz.opens_at),
                    closes_at: Some(new_quiz.closes_at),
                };

                catalog.update(quiz_id, update).ok_or_else(|| {
                    AppError::NotFound(format!("Quiz '{}' no longer exists", quiz_id))
                })
            }
        }
    }
}

impl Default for QuizForm {
    fn default() -> Self {
        Self::new()
    }
}

fn topic_choices_for(store: &CurriculumStore, subject_id: &str) -> Vec<(String, String)> {
    store
        .subject_by_id(subject_id)
        .map(|subject| {
            subject
                .topics
                .into_iter()
                .map(|topic| (topic.id, topic.title))
                .collect()
        })
        .unwrap_or_default()
}
