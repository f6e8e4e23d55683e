use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single course entry in the catalog document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Fields this service does not interpret; kept so rewrites are lossless
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Course {
    pub fn new(id: u32, payload: CoursePayload) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            extra: Map::new(),
        }
    }

    /// Replace the user-editable fields, leaving `id` untouched
    pub fn apply(&mut self, payload: CoursePayload) {
        self.title = payload.title;
        self.description = payload.description;
    }
}

/// Title/description pair accepted by create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
}

impl CoursePayload {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// On-disk shape: `{"courses": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseDocument {
    pub courses: Vec<Course>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseDocument {
    pub fn position(&self, id: u32) -> Option<usize> {
        self.courses.iter().position(|course| course.id == id)
    }
}
