// src/seed.rs

use chrono::{Duration, Utc};

use crate::models::curriculum::{NewResource, NewTopic, ResourceKind};
use crate::models::quiz::{CorrectAnswer, NewQuestion, NewQuiz, QuestionKind};
use crate::services::curriculum::NewSubject;
use crate::state::AppState;

/// The Nigerian secondary-school subject list the demo data is built from.
pub const SUBJECT_NAMES: [&str; 18] = [
    "Mathematics",
    "English Language",
    "Biology",
    "Chemistry",
    "Physics",
    "Agricultural Science",
    "Economics",
    "Government",
    "Literature in English",
    "Geography",
    "Accounting",
    "Commerce",
    "Computer Studies",
    "Civic Education",
    "History",
    "Islamic Religious Studies",
    "Christian Religious Studies",
    "Further Mathematics",
];

const DEMO_TEACHER_ID: &str = "2";
const DEMO_STUDENT_ID: &str = "1";

/// Builds a fully seeded `AppState` for the demo binary and manual
/// exploration: the subject catalog with topics and resources, teacher and
/// student subject assignments, and three sample quizzes.
pub fn demo_state() -> AppState {
    let state = AppState::new();
    seed_curriculum(&state);
    seed_quizzes(&state);
    state
}

fn seed_curriculum(state: &AppState) {
    let resource_kinds = [ResourceKind::Pdf, ResourceKind::Video, ResourceKind::Link];

    for name in SUBJECT_NAMES {
        let code: String = name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect::<String>()
            .to_uppercase();

        let subject = state
            .curriculum
            .add_subject(NewSubject {
                name: name.to_string(),
                code,
                description: format!(
                    "{} for secondary school students following the Nigerian curriculum.",
                    name
                ),
            })
            .expect("seed subject is valid");

        for week in 1..=3u32 {
            let topic = state
                .curriculum
                .add_topic(
                    &subject.id,
                    NewTopic {
                        title: format!("Week {}: Introduction to {} - Part {}", week, name, week),
                        description: format!(
                            "This topic covers the fundamental concepts of {}.",
                            name
                        ),
                        content: format!(
                            "<h2>Learning Objectives</h2>\
                             <p>Understand and apply the basic principles of {}.</p>",
                            name
                        ),
                        order: week,
                    },
                )
                .expect("seed subject exists");

            for slot in 1..=2usize {
                let kind = resource_kinds[(week as usize + slot) % resource_kinds.len()];
                state.curriculum.add_resource(
                    &subject.id,
                    &topic.id,
                    NewResource {
                        title: format!("{} Resource {}", name, slot),
                        kind,
                        url: format!(
                            "https://example.com/{}/{}",
                            name.to_lowercase().replace(' ', "-"),
                            slot
                        ),
                    },
                );
            }
        }
    }

    let subjects = state.curriculum.all_subjects();
    for subject in subjects.iter().take(3) {
        state
            .curriculum
            .assign_subject_to_teacher(DEMO_TEACHER_ID, &subject.id);
    }
    for subject in subjects.iter().take(4) {
        state.curriculum.enroll_student(DEMO_STUDENT_ID, &subject.id);
    }
}

fn seed_quizzes(state: &AppState) {
    let subjects = state.curriculum.all_subjects();
    let now = Utc::now();

    // Mathematics: Algebra Basics
    if let Some(maths) = subjects.first() {
        state.quizzes.create(NewQuiz {
            title: "Mathematics: Algebra Basics".to_string(),
            description: "Test your understanding of algebraic expressions and equations."
                .to_string(),
            subject_id: maths.id.clone(),
            topic_id: maths.topics.first().map(|topic| topic.id.clone()),
            questions: vec![
                choice_question(
                    "If x + 5 = 10, what is the value of x?",
                    &["3", "5", "7", "15"],
                    "5",
                    5,
                ),
                true_false_question("Is the expression 2x + 3y a linear expression?", "True", 3),
                choice_question("Solve for x: 3x - 7 = 11", &["4", "6", "7", "9"], "6", 5),
            ],
            time_limit: 15,
            opens_at: now - Duration::days(7),
            closes_at: now + Duration::days(30),
        });
    }

    // English Language: Grammar Test
    if let Some(english) = subjects.get(1) {
        state.quizzes.create(NewQuiz {
            title: "English Language: Grammar Test".to_string(),
            description: "Assess your knowledge of English grammar rules and usage.".to_string(),
            subject_id: english.id.clone(),
            topic_id: english.topics.get(1).map(|topic| topic.id.clone()),
            questions: vec![
                choice_question(
                    "Which of the following is a proper noun?",
                    &["book", "Nigeria", "happiness", "teacher"],
                    "Nigeria",
                    4,
                ),
                choice_question(
                    "Identify the verb in the sentence: \"The students study diligently.\"",
                    &["The", "students", "study", "diligently"],
                    "study",
                    4,
                ),
            ],
            time_limit: 10,
            opens_at: now - Duration::days(10),
            closes_at: now + Duration::days(20),
        });
    }

    // Biology: Cell Structure
    if let Some(biology) = subjects.get(2) {
        state.quizzes.create(NewQuiz {
            title: "Biology: Cell Structure".to_string(),
            description: "Test your knowledge of cell structures and functions.".to_string(),
            subject_id: biology.id.clone(),
            topic_id: biology.topics.get(2).map(|topic| topic.id.clone()),
            questions: vec![
                choice_question(
                    "Which organelle is responsible for protein synthesis?",
                    &["Nucleus", "Ribosome", "Golgi apparatus", "Mitochondria"],
                    "Ribosome",
                    5,
                ),
                true_false_question("Is the cell membrane permeable to all substances?", "False", 3),
                NewQuestion {
                    id: None,
                    text: "What is the main function of mitochondria?".to_string(),
                    kind: QuestionKind::ShortAnswer,
                    options: Vec::new(),
                    correct_answer: CorrectAnswer::Single("Energy production".to_string()),
                    points: 5,
                },
            ],
            time_limit: 20,
            opens_at: now - Duration::days(5),
            closes_at: now + Duration::days(25),
        });
    }
}

fn choice_question(text: &str, options: &[&str], correct: &str, points: u32) -> NewQuestion {
    NewQuestion {
        id: None,
        text: text.to_string(),
        kind: QuestionKind::MultipleChoice,
        options: options.iter().map(|option| option.to_string()).collect(),
        correct_answer: CorrectAnswer::Single(correct.to_string()),
        points,
    }
}

fn true_false_question(text: &str, correct: &str, points: u32) -> NewQuestion {
    NewQuestion {
        id: None,
        text: text.to_string(),
        kind: QuestionKind::TrueFalse,
        options: vec!["True".to_string(), "False".to_string()],
        correct_answer: CorrectAnswer::Single(correct.to_string()),
        points,
    }
}
