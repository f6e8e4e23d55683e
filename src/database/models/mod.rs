pub mod course;
pub mod user;

pub use course::{Course, CourseDocument, CoursePayload};
pub use user::{NewUser, User, UserDocument, UserProfile};
