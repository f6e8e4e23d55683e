// handlers/mod.rs - two security tiers
//
// public:    no credentials needed (course reads, registration, health)
// protected: Basic authentication via `basic_auth_middleware` (course writes, current user)

pub mod protected;
pub mod public;
pub mod validation;

use crate::error::ApiError;

/// Course ids in paths are unsigned integers; anything else cannot match a record
pub(crate) fn parse_course_id(raw: &str) -> Result<u32, ApiError> {
    raw.parse::<u32>().map_err(|_| ApiError::course_not_found())
}
