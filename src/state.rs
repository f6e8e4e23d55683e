use std::sync::Arc;

use crate::auth::{AuthError, AuthGate};
use crate::config::{SecurityConfig, StorageConfig};
use crate::database::{CourseStore, IdAllocator, JsonUserDirectory, StoreError, UserDirectory};

/// Shared handles injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<CourseStore>,
    pub users: Arc<dyn UserDirectory>,
    pub gate: Arc<AuthGate>,
    pub bcrypt_cost: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to open storage: {0}")]
    Storage(#[from] StoreError),

    #[error("Failed to initialise authentication: {0}")]
    Auth(#[from] AuthError),
}

impl AppState {
    pub fn new(
        courses: CourseStore,
        users: Arc<dyn UserDirectory>,
        security: &SecurityConfig,
    ) -> Result<Self, AuthError> {
        let gate = AuthGate::new(users.clone(), security.bcrypt_cost, security.enable_audit_logging)?;
        Ok(Self {
            courses: Arc::new(courses),
            users,
            gate: Arc::new(gate),
            bcrypt_cost: security.bcrypt_cost,
        })
    }

    /// Open (and seed if missing) both documents named in the config
    pub async fn open(storage: &StorageConfig, security: &SecurityConfig) -> Result<Self, StateError> {
        let courses = CourseStore::open(&storage.data_file, IdAllocator::new(storage.max_id)).await?;
        let users = JsonUserDirectory::open(&storage.users_file).await?;
        Ok(Self::new(courses, Arc::new(users), security)?)
    }
}
