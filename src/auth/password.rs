// Password hashing and verification

use tracing::warn;

use crate::auth::error::AuthError;

/// bcrypt ignores everything past this many bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Outcome of comparing a claimed secret with a stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Match,
    NoMatch,
}

/// Hash a password with bcrypt on the blocking pool.
///
/// Passwords longer than `MAX_PASSWORD_BYTES` are refused rather than truncated.
pub async fn hash_password(secret: &str, cost: u32) -> Result<String, AuthError> {
    if secret.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::Hashing(format!(
            "Password exceeds {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    let secret = secret.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::hash(secret, cost).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

/// Verify `claimed_secret` against a bcrypt hash.
///
/// bcrypt re-derives the digest from the stored salt and compares the two in
/// constant time. A stored value that is not a valid bcrypt hash is a
/// `NoMatch`, never an error the caller could tell apart. So is a claimed
/// secret over `MAX_PASSWORD_BYTES`, which bcrypt would otherwise truncate.
pub async fn verify_password(claimed_secret: &str, stored_hash: &str) -> Result<Verification, AuthError> {
    if claimed_secret.len() > MAX_PASSWORD_BYTES {
        return Ok(Verification::NoMatch);
    }

    let secret = claimed_secret.to_string();
    let hash = stored_hash.to_string();

    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(secret, &hash))
        .await
        .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?;

    match outcome {
        Ok(true) => Ok(Verification::Match),
        Ok(false) => Ok(Verification::NoMatch),
        Err(e) => {
            warn!("Stored password hash could not be parsed: {}", e);
            Ok(Verification::NoMatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify() {
        let hash = hash_password("SecurePassword123!", 4).await.unwrap();
        assert!(hash.starts_with("$2"));

        assert_eq!(verify_password("SecurePassword123!", &hash).await.unwrap(), Verification::Match);
        assert_eq!(verify_password("securepassword123!", &hash).await.unwrap(), Verification::NoMatch);
    }

    #[tokio::test]
    async fn same_password_hashes_differently() {
        let a = hash_password("repeat", 4).await.unwrap();
        let b = hash_password("repeat", 4).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(verify_password("repeat", &a).await.unwrap(), Verification::Match);
        assert_eq!(verify_password("repeat", &b).await.unwrap(), Verification::Match);
    }

    #[tokio::test]
    async fn long_secret_sharing_a_72_byte_prefix_does_not_match() {
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        // A hash of the bare prefix is what bcrypt would produce for any longer secret
        let hash = bcrypt::hash(&prefix, 4).unwrap();

        let claimed = format!("{}totally-wrong", prefix);
        assert_eq!(verify_password(&claimed, &hash).await.unwrap(), Verification::NoMatch);
        assert_eq!(verify_password(&prefix, &hash).await.unwrap(), Verification::Match);
    }

    #[tokio::test]
    async fn over_long_password_is_not_hashed() {
        let long = "b".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(hash_password(&long, 4).await, Err(AuthError::Hashing(_))));
        assert!(hash_password(&"b".repeat(MAX_PASSWORD_BYTES), 4).await.is_ok());
    }

    #[tokio::test]
    async fn malformed_hash_is_no_match() {
        let outcome = verify_password("anything", "not-a-bcrypt-hash").await.unwrap();
        assert_eq!(outcome, Verification::NoMatch);
    }
}
