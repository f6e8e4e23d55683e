use std::collections::HashSet;
use std::path::PathBuf;

use rand::Rng;
use tracing::{debug, info};

use crate::database::allocator::IdAllocator;
use crate::database::document::JsonDocument;
use crate::database::error::StoreError;
use crate::database::models::{Course, CourseDocument, CoursePayload};
use crate::types::Operation;

/// Course records kept in a single JSON document.
///
/// Reads decode the whole file; mutations go through [`JsonDocument::mutate`]
/// so concurrent writers are applied one after another instead of
/// overwriting each other. Callers always receive owned copies.
pub struct CourseStore {
    document: JsonDocument<CourseDocument>,
    allocator: IdAllocator,
}

impl CourseStore {
    pub fn new(path: impl Into<PathBuf>, allocator: IdAllocator) -> Self {
        Self {
            document: JsonDocument::new(path),
            allocator,
        }
    }

    /// Build the store and seed an empty document on first boot
    pub async fn open(path: impl Into<PathBuf>, allocator: IdAllocator) -> Result<Self, StoreError> {
        let store = Self::new(path, allocator);
        if store.document.ensure_exists(&CourseDocument::default()).await? {
            info!("Created course store at {}", store.document.path().display());
        }
        Ok(store)
    }

    pub async fn list_all(&self) -> Result<Vec<Course>, StoreError> {
        let document = self.document.load().await?;
        debug!(operation = %Operation::Select, count = document.courses.len(), "Listed courses");
        Ok(document.courses)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Course, StoreError> {
        self.document
            .load()
            .await?
            .courses
            .into_iter()
            .find(|course| course.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Uniformly pick one course; `EmptyStore` when there are none
    pub async fn get_random(&self) -> Result<Course, StoreError> {
        let mut courses = self.document.load().await?.courses;
        if courses.is_empty() {
            return Err(StoreError::EmptyStore);
        }
        let index = rand::thread_rng().gen_range(0..courses.len());
        Ok(courses.swap_remove(index))
    }

    pub async fn create(&self, payload: CoursePayload) -> Result<Course, StoreError> {
        let allocator = self.allocator;
        let course = self
            .document
            .mutate(Operation::Create, move |document| {
                let existing: HashSet<u32> = document.courses.iter().map(|c| c.id).collect();
                let course = Course::new(allocator.allocate(&existing), payload);
                document.courses.push(course.clone());
                Ok(course)
            })
            .await?;

        info!(operation = %Operation::Create, id = course.id, "Course created");
        Ok(course)
    }

    pub async fn update(&self, id: u32, payload: CoursePayload) -> Result<(), StoreError> {
        self.document
            .mutate(Operation::Update, move |document| {
                let index = document.position(id).ok_or(StoreError::NotFound(id))?;
                document.courses[index].apply(payload);
                Ok(())
            })
            .await?;

        info!(operation = %Operation::Update, id, "Course updated");
        Ok(())
    }

    pub async fn delete(&self, id: u32) -> Result<(), StoreError> {
        self.document
            .mutate(Operation::Delete, move |document| {
                let before = document.courses.len();
                document.courses.retain(|course| course.id != id);
                if document.courses.len() == before {
                    return Err(StoreError::NotFound(id));
                }
                Ok(())
            })
            .await?;

        info!(operation = %Operation::Delete, id, "Course deleted");
        Ok(())
    }
}
