use thiserror::Error;

use crate::database::StoreError;

/// Why a request was denied. Diagnostic only; callers always see the same denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    MissingCredentials,
    UnknownIdentity(String),
    BadSecret(String),
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenialReason::MissingCredentials => write!(f, "authorization header missing or malformed"),
            DenialReason::UnknownIdentity(identity) => write!(f, "no user found for '{}'", identity),
            DenialReason::BadSecret(identity) => write!(f, "password mismatch for '{}'", identity),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Access denied: {0}")]
    Denied(DenialReason),

    #[error(transparent)]
    Directory(#[from] StoreError),

    #[error("Password hashing error: {0}")]
    Hashing(String),
}
