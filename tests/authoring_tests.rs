// tests/authoring_tests.rs

use schoolhub::authoring::QuizForm;
use schoolhub::error::AppError;
use schoolhub::models::quiz::{CorrectAnswer, QuestionKind};
use schoolhub::services::curriculum::NewSubject;
use schoolhub::state::AppState;

/// Registers a subject with two topics and returns its id.
fn subject_with_topics(state: &AppState, name: &str) -> String {
    let subject = state
        .curriculum
        .add_subject(NewSubject {
            name: name.to_string(),
            code: name[..2].to_uppercase(),
            description: format!("{} description", name),
        })
        .expect("valid subject");

    for week in 1..=2 {
        state
            .curriculum
            .add_topic(
                &subject.id,
                schoolhub::models::curriculum::NewTopic {
                    title: format!("{} week {}", name, week),
                    description: String::new(),
                    content: String::new(),
                    order: week,
                },
            )
            .expect("subject exists");
    }

    subject.id
}

/// Fills the first (blank) question of a fresh form with a valid
/// multiple-choice draft.
fn fill_first_question(form: &mut QuizForm) {
    form.set_question_text(0, "Pick the second option.");
    for (index, text) in ["Alpha", "Beta", "Gamma", "Delta"].iter().enumerate() {
        form.set_option_text(0, index, text);
    }
    form.mark_correct(0, 1);
}

#[test]
fn new_form_seeds_one_blank_multiple_choice_question() {
    // Act
    let form = QuizForm::new();

    // Assert
    assert!(!form.is_editing());
    assert_eq!(form.questions().len(), 1);
    let question = &form.questions()[0];
    assert_eq!(question.kind, QuestionKind::MultipleChoice);
    assert_eq!(question.options, vec!["", "", "", ""]);
    assert_eq!(question.correct_answer, CorrectAnswer::AnySet(Vec::new()));
    assert_eq!(question.points, 5);
}

#[test]
fn switching_kind_resets_options_and_clears_the_answer_key() {
    // Arrange
    let mut form = QuizForm::new();
    fill_first_question(&mut form);
    assert_eq!(
        form.questions()[0].correct_answer,
        CorrectAnswer::Single("Beta".to_string())
    );

    // Act: multiple-choice -> short-answer
    form.set_question_kind(0, QuestionKind::ShortAnswer);

    // Assert: options gone, key cleared
    assert!(form.questions()[0].options.is_empty());
    assert_eq!(
        form.questions()[0].correct_answer,
        CorrectAnswer::AnySet(Vec::new())
    );

    // Act: short-answer -> true/false pins the option pair
    form.set_question_kind(0, QuestionKind::TrueFalse);
    assert_eq!(form.questions()[0].options, vec!["True", "False"]);
    assert_eq!(
        form.questions()[0].correct_answer,
        CorrectAnswer::AnySet(Vec::new())
    );

    // Back to multiple-choice restores four blanks
    form.set_question_kind(0, QuestionKind::MultipleChoice);
    assert_eq!(form.questions()[0].options, vec!["", "", "", ""]);
}

#[test]
fn marking_correct_is_single_select() {
    // Arrange
    let mut form = QuizForm::new();
    fill_first_question(&mut form);

    // Act
    form.mark_correct(0, 2);

    // Assert: the later mark replaces the earlier one
    assert_eq!(
        form.questions()[0].correct_answer,
        CorrectAnswer::Single("Gamma".to_string())
    );
}

#[test]
fn editing_a_marked_option_keeps_the_key_in_sync() {
    // Arrange
    let mut form = QuizForm::new();
    fill_first_question(&mut form);

    // Act
    form.set_option_text(0, 1, "Beta prime");

    // Assert
    assert_eq!(
        form.questions()[0].correct_answer,
        CorrectAnswer::Single("Beta prime".to_string())
    );
}

#[test]
fn changing_subject_refreshes_topics_and_clears_the_selection() {
    // Arrange
    let state = AppState::new();
    let maths = subject_with_topics(&state, "Mathematics");
    let english = subject_with_topics(&state, "English");

    let mut form = QuizForm::new();
    form.set_subject(&state.curriculum, &maths);
    assert_eq!(form.topic_choices().len(), 2);
    let (maths_topic, _) = form.topic_choices()[0].clone();
    form.set_topic(Some(maths_topic));
    assert!(form.topic_id().is_some());

    // Act
    form.set_subject(&state.curriculum, &english);

    // Assert: a topic belongs to exactly one subject, the stale pick is gone
    assert_eq!(form.subject_id(), english);
    assert!(form.topic_id().is_none());
    assert_eq!(form.topic_choices().len(), 2);
}

#[test]
fn submit_with_no_questions_is_a_validation_error() {
    // Arrange
    let state = AppState::new();
    let subject = subject_with_topics(&state, "Physics");
    let mut form = QuizForm::new();
    form.title = "Empty quiz".to_string();
    form.set_subject(&state.curriculum, &subject);
    form.remove_question(0);

    // Act
    let result = form.submit(&state.quizzes);

    // Assert: blocked, nothing saved
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(state.quizzes.all().is_empty());
}

#[test]
fn submit_rejects_a_choice_question_without_a_marked_answer() {
    // Arrange
    let state = AppState::new();
    let subject = subject_with_topics(&state, "Physics");
    let mut form = QuizForm::new();
    form.title = "Half-finished".to_string();
    form.set_subject(&state.curriculum, &subject);
    form.set_question_text(0, "Which option?");
    for (index, text) in ["A", "B", "C", "D"].iter().enumerate() {
        form.set_option_text(0, index, text);
    }
    // No option marked correct.

    // Act
    let result = form.submit(&state.quizzes);

    // Assert
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn submit_creates_a_quiz_through_the_catalog() {
    // Arrange
    let state = AppState::new();
    let subject = subject_with_topics(&state, "Chemistry");
    let mut form = QuizForm::new();
    form.title = "Bonding basics".to_string();
    form.description = "Ionic and covalent bonds.".to_string();
    form.set_subject(&state.curriculum, &subject);
    fill_first_question(&mut form);

    form.add_question();
    form.set_question_kind(1, QuestionKind::ShortAnswer);
    form.set_question_text(1, "Name the bond formed by electron transfer.");
    form.set_answer_key(1, "Ionic");
    form.set_question_points(1, 3);

    // Act
    let quiz = form.submit(&state.quizzes).expect("valid draft");

    // Assert
    assert_eq!(quiz.questions.len(), 2);
    assert_eq!(quiz.subject_id, subject);
    assert_eq!(quiz.questions[1].points, 3);
    assert_eq!(state.quizzes.by_subject(&subject).len(), 1);
}

#[test]
fn editing_reuses_question_ids_and_updates_in_place() {
    // Arrange: create via a form, then reopen for editing
    let state = AppState::new();
    let subject = subject_with_topics(&state, "Biology");
    let mut form = QuizForm::new();
    form.title = "Cells".to_string();
    form.set_subject(&state.curriculum, &subject);
    fill_first_question(&mut form);
    let created = form.submit(&state.quizzes).expect("valid draft");
    let original_question_id = created.questions[0].id.clone();

    let mut edit = QuizForm::edit(&state.curriculum, &created);
    assert!(edit.is_editing());
    edit.title = "Cells, revised".to_string();
    edit.add_question();
    edit.set_question_kind(1, QuestionKind::TrueFalse);
    edit.set_question_text(1, "Plant cells have walls.");
    edit.mark_correct(1, 0);

    // Act
    let updated = edit.submit(&state.quizzes).expect("valid draft");

    // Assert: same quiz, same surviving question id, one fresh id
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Cells, revised");
    assert_eq!(updated.questions[0].id, original_question_id);
    assert_ne!(updated.questions[1].id, original_question_id);
    assert_eq!(state.quizzes.all().len(), 1);
}

#[test]
fn removing_questions_by_position() {
    // Arrange
    let mut form = QuizForm::new();
    form.add_question();
    form.add_question();
    form.set_question_text(1, "middle");

    // Act
    form.remove_question(1);
    form.remove_question(99);

    // Assert
    assert_eq!(form.questions().len(), 2);
    assert!(form.questions().iter().all(|q| q.text != "middle"));
}
