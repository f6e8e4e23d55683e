pub mod allocator;
pub mod document;
pub mod error;
pub mod models;
pub mod store;
pub mod users;

pub use allocator::IdAllocator;
pub use document::JsonDocument;
pub use error::StoreError;
pub use models::{Course, CourseDocument, CoursePayload, NewUser, User, UserDocument, UserProfile};
pub use store::CourseStore;
pub use users::{JsonUserDirectory, UserDirectory};
