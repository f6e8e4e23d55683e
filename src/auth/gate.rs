use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::auth::basic::parse_basic_auth_header;
use crate::auth::error::{AuthError, DenialReason};
use crate::auth::password::{verify_password, Verification};
use crate::database::{UserDirectory, UserProfile};

/// Secret hashed at startup so unknown identities cost one bcrypt verification too
const TIMING_DUMMY_SECRET: &str = "course-catalog-timing-dummy";

/// Identity attached to a request after the gate lets it through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser(pub UserProfile);

impl AuthenticatedUser {
    pub fn identity(&self) -> &str {
        &self.0.email_address
    }

    pub fn profile(&self) -> &UserProfile {
        &self.0
    }
}

/// Decides whether the credentials on a request belong to a known user.
///
/// One pass per request: extract -> look up -> verify. Every failure becomes
/// `AuthError::Denied` with a reason that is logged here and nowhere else.
///
/// With `audit_logging` on, successes are logged at info and denials at warn.
/// Otherwise both drop to debug.
pub struct AuthGate {
    directory: Arc<dyn UserDirectory>,
    dummy_hash: String,
    audit_logging: bool,
}

impl AuthGate {
    pub fn new(directory: Arc<dyn UserDirectory>, bcrypt_cost: u32, audit_logging: bool) -> Result<Self, AuthError> {
        let dummy_hash =
            bcrypt::hash(TIMING_DUMMY_SECRET, bcrypt_cost).map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(Self {
            directory,
            dummy_hash,
            audit_logging,
        })
    }

    pub fn audit_logging(&self) -> bool {
        self.audit_logging
    }

    /// Authenticate the raw `Authorization` header value, if any
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let outcome = self.check(authorization).await;

        match &outcome {
            Ok(user) if self.audit_logging => {
                info!(user_id = user.profile().id, "Authentication successful for {}", user.identity())
            }
            Ok(user) => debug!(user_id = user.profile().id, "Authentication successful"),
            Err(AuthError::Denied(reason)) if self.audit_logging => warn!(reason = %reason, "Authentication denied"),
            Err(AuthError::Denied(reason)) => debug!(reason = %reason, "Authentication denied"),
            Err(_) => {}
        }

        outcome
    }

    async fn check(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let Some(credentials) = authorization.and_then(parse_basic_auth_header) else {
            return Err(AuthError::Denied(DenialReason::MissingCredentials));
        };

        let Some(user) = self.directory.find_by_identity(&credentials.identity).await? else {
            verify_password(&credentials.secret, &self.dummy_hash).await?;
            return Err(AuthError::Denied(DenialReason::UnknownIdentity(credentials.identity)));
        };

        match verify_password(&credentials.secret, &user.password_hash).await? {
            Verification::Match => Ok(AuthenticatedUser(UserProfile::from(&user))),
            Verification::NoMatch => Err(AuthError::Denied(DenialReason::BadSecret(credentials.identity))),
        }
    }
}
