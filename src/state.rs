// src/state.rs

use std::sync::Arc;

use crate::services::attempts::AttemptLedger;
use crate::services::auth::AuthService;
use crate::services::curriculum::CurriculumStore;
use crate::services::quizzes::QuizCatalog;

/// The explicitly constructed application stores.
///
/// Nothing here is an ambient singleton: every consumer receives its
/// dependencies from an `AppState`, and tests build isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub curriculum: Arc<CurriculumStore>,
    pub quizzes: Arc<QuizCatalog>,
    pub attempts: Arc<AttemptLedger>,
}

impl AppState {
    pub fn new() -> Self {
        let quizzes = Arc::new(QuizCatalog::new());

        Self {
            auth: Arc::new(AuthService::new()),
            curriculum: Arc::new(CurriculumStore::new()),
            attempts: Arc::new(AttemptLedger::new(quizzes.clone())),
            quizzes,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
