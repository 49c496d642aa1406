// src/models/curriculum.rs

use serde::{Deserialize, Serialize};

/// A school subject with its ordered list of topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,

    pub name: String,

    /// Short subject code, e.g. "MATH101".
    pub code: String,

    pub description: String,

    /// Teacher currently responsible for the subject, if any.
    pub teacher_id: Option<String>,

    pub topics: Vec<Topic>,
}

/// A teaching unit inside a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub subject_id: String,

    /// Rich-text lesson body as authored by the teacher.
    pub content: String,

    pub resources: Vec<Resource>,

    /// Position within the subject's scheme of work.
    pub order: u32,
}

/// Kind of attachment linked to a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pdf,
    Video,
    Image,
    Link,
    Document,
}

/// A downloadable or linkable learning resource attached to a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub kind: ResourceKind,
    pub url: String,
    pub topic_id: String,
}

/// DTO for adding a topic to a subject (id is assigned by the store).
#[derive(Debug, Clone, Deserialize)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
    pub content: String,
    pub order: u32,
}

/// DTO for attaching a resource to a topic (id/topic_id assigned by the store).
#[derive(Debug, Clone, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub kind: ResourceKind,
    pub url: String,
}
