// src/services/curriculum.rs

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::curriculum::{NewResource, NewTopic, Resource, Subject, Topic};

/// DTO for registering a subject in the catalog.
#[derive(Debug, Clone, Validate)]
pub struct NewSubject {
    #[validate(length(min = 1, max = 100, message = "Subject name must not be empty."))]
    pub name: String,
    #[validate(length(min = 1, max = 20, message = "Subject code must not be empty."))]
    pub code: String,
    pub description: String,
}

/// In-memory catalog of subjects, their topics and attached resources,
/// plus the teacher/student subject assignments.
///
/// Lookup misses return `Option`/`bool` rather than errors; callers decide
/// whether a miss is worth surfacing.
pub struct CurriculumStore {
    subjects: RwLock<Vec<Subject>>,
    teacher_subjects: RwLock<HashMap<String, Vec<String>>>,
    student_subjects: RwLock<HashMap<String, Vec<String>>>,
}

impl CurriculumStore {
    pub fn new() -> Self {
        Self {
            subjects: RwLock::new(Vec::new()),
            teacher_subjects: RwLock::new(HashMap::new()),
            student_subjects: RwLock::new(HashMap::new()),
        }
    }

    pub fn all_subjects(&self) -> Vec<Subject> {
        self.subjects.read().expect("curriculum lock poisoned").clone()
    }

    pub fn subject_by_id(&self, subject_id: &str) -> Option<Subject> {
        self.subjects
            .read()
            .expect("curriculum lock poisoned")
            .iter()
            .find(|subject| subject.id == subject_id)
            .cloned()
    }

    pub fn subject_by_code(&self, code: &str) -> Option<Subject> {
        self.subjects
            .read()
            .expect("curriculum lock poisoned")
            .iter()
            .find(|subject| subject.code == code)
            .cloned()
    }

    pub fn add_subject(&self, new_subject: NewSubject) -> Result<Subject, AppError> {
        new_subject.validate()?;

        let subject = Subject {
            id: Uuid::new_v4().to_string(),
            name: new_subject.name,
            code: new_subject.code,
            description: new_subject.description,
            teacher_id: None,
            topics: Vec::new(),
        };

        tracing::info!("Added subject '{}' ({})", subject.name, subject.id);

        self.subjects
            .write()
            .expect("curriculum lock poisoned")
            .push(subject.clone());

        Ok(subject)
    }

    /// Subjects a teacher is assigned to.
    pub fn teacher_subjects(&self, teacher_id: &str) -> Vec<Subject> {
        let assigned = self
            .teacher_subjects
            .read()
            .expect("curriculum lock poisoned")
            .get(teacher_id)
            .cloned()
            .unwrap_or_default();

        self.subjects
            .read()
            .expect("curriculum lock poisoned")
            .iter()
            .filter(|subject| assigned.contains(&subject.id))
            .cloned()
            .collect()
    }

    /// Subjects a student is enrolled in.
    pub fn student_subjects(&self, student_id: &str) -> Vec<Subject> {
        let enrolled = self
            .student_subjects
            .read()
            .expect("curriculum lock poisoned")
            .get(student_id)
            .cloned()
            .unwrap_or_default();

        self.subjects
            .read()
            .expect("curriculum lock poisoned")
            .iter()
            .filter(|subject| enrolled.contains(&subject.id))
            .cloned()
            .collect()
    }

    pub fn assign_subject_to_teacher(&self, teacher_id: &str, subject_id: &str) {
        let mut assignments = self
            .teacher_subjects
            .write()
            .expect("curriculum lock poisoned");
        let subjects = assignments.entry(teacher_id.to_string()).or_default();
        if !subjects.contains(&subject_id.to_string()) {
            subjects.push(subject_id.to_string());
        }
    }

    pub fn enroll_student(&self, student_id: &str, subject_id: &str) {
        let mut enrollments = self
            .student_subjects
            .write()
            .expect("curriculum lock poisoned");
        let subjects = enrollments.entry(student_id.to_string()).or_default();
        if !subjects.contains(&subject_id.to_string()) {
            subjects.push(subject_id.to_string());
        }
    }

    /// Resolves a topic inside a subject.
    pub fn topic_by_id(&self, subject_id: &str, topic_id: &str) -> Option<Topic> {
        self.subject_by_id(subject_id)?
            .topics
            .into_iter()
            .find(|topic| topic.id == topic_id)
    }

    /// Appends a topic to a subject. Returns `None` when the subject does
    /// not resolve.
    pub fn add_topic(&self, subject_id: &str, new_topic: NewTopic) -> Option<Topic> {
        let mut subjects = self.subjects.write().expect("curriculum lock poisoned");
        let subject = subjects.iter_mut().find(|subject| subject.id == subject_id)?;

        let topic = Topic {
            id: Uuid::new_v4().to_string(),
            title: new_topic.title,
            description: new_topic.description,
            subject_id: subject_id.to_string(),
            content: new_topic.content,
            resources: Vec::new(),
            order: new_topic.order,
        };

        subject.topics.push(topic.clone());
        Some(topic)
    }

    /// Replaces a topic's content wholesale. Returns whether it existed.
    pub fn update_topic(&self, subject_id: &str, topic_id: &str, updated: Topic) -> bool {
        let mut subjects = self.subjects.write().expect("curriculum lock poisoned");
        let Some(subject) = subjects.iter_mut().find(|subject| subject.id == subject_id) else {
            return false;
        };
        let Some(topic) = subject.topics.iter_mut().find(|topic| topic.id == topic_id) else {
            return false;
        };

        *topic = Topic {
            id: topic.id.clone(),
            subject_id: topic.subject_id.clone(),
            ..updated
        };
        true
    }

    pub fn remove_topic(&self, subject_id: &str, topic_id: &str) -> bool {
        let mut subjects = self.subjects.write().expect("curriculum lock poisoned");
        let Some(subject) = subjects.iter_mut().find(|subject| subject.id == subject_id) else {
            return false;
        };

        let before = subject.topics.len();
        subject.topics.retain(|topic| topic.id != topic_id);
        subject.topics.len() < before
    }

    /// Attaches a resource to a topic. Returns `None` when the subject or
    /// topic does not resolve.
    pub fn add_resource(
        &self,
        subject_id: &str,
        topic_id: &str,
        new_resource: NewResource,
    ) -> Option<Resource> {
        let mut subjects = self.subjects.write().expect("curriculum lock poisoned");
        let subject = subjects.iter_mut().find(|subject| subject.id == subject_id)?;
        let topic = subject.topics.iter_mut().find(|topic| topic.id == topic_id)?;

        let resource = Resource {
            id: Uuid::new_v4().to_string(),
            title: new_resource.title,
            kind: new_resource.kind,
            url: new_resource.url,
            topic_id: topic_id.to_string(),
        };

        topic.resources.push(resource.clone());
        Some(resource)
    }

    pub fn remove_resource(&self, subject_id: &str, topic_id: &str, resource_id: &str) -> bool {
        let mut subjects = self.subjects.write().expect("curriculum lock poisoned");
        let Some(subject) = subjects.iter_mut().find(|subject| subject.id == subject_id) else {
            return false;
        };
        let Some(topic) = subject.topics.iter_mut().find(|topic| topic.id == topic_id) else {
            return false;
        };

        let before = topic.resources.len();
        topic.resources.retain(|resource| resource.id != resource_id);
        topic.resources.len() < before
    }
}

impl Default for CurriculumStore {
    fn default() -> Self {
        Self::new()
    }
}
