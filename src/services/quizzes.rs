// src/services/quizzes.rs

use std::sync::RwLock;

use uuid::Uuid;

use crate::models::quiz::{NewQuiz, Question, Quiz, QuizUpdate};

/// In-memory repository of quiz definitions and their questions.
///
/// Explicitly constructed and injected wherever quizzes are read or
/// authored; tests build their own isolated instances. The catalog does
/// not enforce referential integrity: deleting a subject elsewhere does
/// not cascade into its quizzes.
pub struct QuizCatalog {
    quizzes: RwLock<Vec<Quiz>>,
}

impl QuizCatalog {
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(Vec::new()),
        }
    }

    pub fn all(&self) -> Vec<Quiz> {
        self.quizzes.read().expect("quiz catalog lock poisoned").clone()
    }

    /// Looks a quiz up by id. Callers must handle the miss.
    pub fn by_id(&self, quiz_id: &str) -> Option<Quiz> {
        self.quizzes
            .read()
            .expect("quiz catalog lock poisoned")
            .iter()
            .find(|quiz| quiz.id == quiz_id)
            .cloned()
    }

    pub fn by_subject(&self, subject_id: &str) -> Vec<Quiz> {
        self.quizzes
            .read()
            .expect("quiz catalog lock poisoned")
            .iter()
            .filter(|quiz| quiz.subject_id == subject_id)
            .cloned()
            .collect()
    }

    pub fn by_topic(&self, topic_id: &str) -> Vec<Quiz> {
        self.quizzes
            .read()
            .expect("quiz catalog lock poisoned")
            .iter()
            .filter(|quiz| quiz.topic_id.as_deref() == Some(topic_id))
            .cloned()
            .collect()
    }

    /// All quizzes belonging to any of a teacher's subjects.
    pub fn by_teacher_subjects(&self, subject_ids: &[String]) -> Vec<Quiz> {
        self.quizzes
            .read()
            .expect("quiz catalog lock poisoned")
            .iter()
            .filter(|quiz| subject_ids.contains(&quiz.subject_id))
            .cloned()
            .collect()
    }

    /// Stores a new quiz.
    ///
    /// Assigns a fresh quiz id and fresh per-question ids by position; any
    /// ids carried in from an authoring draft are ignored here.
    pub fn create(&self, new_quiz: NewQuiz) -> Quiz {
        let quiz_id = Uuid::new_v4().to_string();

        let questions = new_quiz
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, draft)| Question {
                id: format!("q{}-{}", index + 1, quiz_id),
                text: draft.text,
                kind: draft.kind,
                options: draft.options,
                correct_answer: draft.correct_answer,
                points: draft.points,
            })
            .collect();

        let quiz = Quiz {
            id: quiz_id,
            title: new_quiz.title,
            description: new_quiz.description,
            subject_id: new_quiz.subject_id,
            topic_id: new_quiz.topic_id,
            questions,
            time_limit: new_quiz.time_limit,
            opens_at: new_quiz.opens_at,
            closes_at: new_quiz.closes_at,
        };

        tracing::info!("Created quiz '{}' ({})", quiz.title, quiz.id);

        self.quizzes
            .write()
            .expect("quiz catalog lock poisoned")
            .push(quiz.clone());

        quiz
    }

    /// Partially updates a quiz: only the provided fields overwrite.
    /// Returns the updated quiz, or `None` when the id does not resolve.
    pub fn update(&self, quiz_id: &str, update: QuizUpdate) -> Option<Quiz> {
        let mut quizzes = self.quizzes.write().expect("quiz catalog lock poisoned");
        let quiz = quizzes.iter_mut().find(|quiz| quiz.id == quiz_id)?;

        if let Some(title) = update.title {
            quiz.title = title;
        }
        if let Some(description) = update.description {
            quiz.description = description;
        }
        if let Some(subject_id) = update.subject_id {
            quiz.subject_id = subject_id;
        }
        if let Some(topic_id) = update.topic_id {
            quiz.topic_id = topic_id;
        }
        if let Some(questions) = update.questions {
            quiz.questions = questions;
        }
        if let Some(time_limit) = update.time_limit {
            quiz.time_limit = time_limit;
        }
        if let Some(opens_at) = update.opens_at {
            quiz.opens_at = opens_at;
        }
        if let Some(closes_at) = update.closes_at {
            quiz.closes_at = closes_at;
        }

        tracing::info!("Updated quiz '{}' ({})", quiz.title, quiz.id);

        Some(quiz.clone())
    }

    /// Removes a quiz. Returns whether an entry existed.
    ///
    /// Historical attempts referencing the quiz are untouched; grading only
    /// reads the quiz at submission time.
    pub fn delete(&self, quiz_id: &str) -> bool {
        let mut quizzes = self.quizzes.write().expect("quiz catalog lock poisoned");
        let before = quizzes.len();
        quizzes.retain(|quiz| quiz.id != quiz_id);

        let removed = quizzes.len() < before;
        if removed {
            tracing::info!("Deleted quiz {}", quiz_id);
        }
        removed
    }
}

impl Default for QuizCatalog {
    fn default() -> Self {
        Self::new()
    }
}
