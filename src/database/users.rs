use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::database::document::JsonDocument;
use crate::database::error::StoreError;
use crate::database::models::{NewUser, User, UserDocument};
use crate::types::Operation;

/// Lookup capability the authentication gate depends on
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find the user whose login identity (email address) matches exactly
    async fn find_by_identity(&self, identity: &str) -> Result<Option<User>, StoreError>;

    /// Register a new user; fails with `Conflict` when the identity is taken
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}

/// User directory stored as `{"users": [...]}` in its own JSON document
pub struct JsonUserDirectory {
    document: JsonDocument<UserDocument>,
}

impl JsonUserDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            document: JsonDocument::new(path),
        }
    }

    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let directory = Self::new(path);
        directory.document.ensure_exists(&UserDocument::default()).await?;
        Ok(directory)
    }
}

#[async_trait]
impl UserDirectory for JsonUserDirectory {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .document
            .load()
            .await?
            .users
            .into_iter()
            .find(|user| user.email_address == identity))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = self
            .document
            .mutate(Operation::Create, move |document| {
                if document.users.iter().any(|u| u.email_address == new_user.email_address) {
                    return Err(StoreError::Conflict(format!(
                        "A user with email address '{}' already exists",
                        new_user.email_address
                    )));
                }

                let id = document.users.iter().map(|u| u.id).max().map_or(1, |max| max + 1);
                let user = User {
                    id,
                    first_name: new_user.first_name,
                    last_name: new_user.last_name,
                    email_address: new_user.email_address,
                    password_hash: new_user.password_hash,
                    extra: Default::default(),
                };
                document.users.push(user.clone());
                Ok(user)
            })
            .await?;

        info!(id = user.id, "User registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Sally".into(),
            last_name: "Jones".into(),
            email_address: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn create_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let directory = JsonUserDirectory::open(dir.path().join("users.json")).await.unwrap();

        let first = directory.create(new_user("sally@jones.com")).await.unwrap();
        let second = directory.create(new_user("sam@jones.com")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let found = directory.find_by_identity("sam@jones.com").await.unwrap().unwrap();
        assert_eq!(found.id, 2);
        assert!(directory.find_by_identity("nobody@jones.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let directory = JsonUserDirectory::open(dir.path().join("users.json")).await.unwrap();

        directory.create(new_user("sally@jones.com")).await.unwrap();
        let result = directory.create(new_user("sally@jones.com")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }
}
