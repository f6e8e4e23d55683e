//! Credential checks for protected routes: Basic header parsing, bcrypt
//! verification and the gate that ties them to the user directory.

pub mod basic;
pub mod error;
pub mod gate;
pub mod password;

pub use basic::{parse_basic_auth_header, Credentials};
pub use error::{AuthError, DenialReason};
pub use gate::{AuthGate, AuthenticatedUser};
pub use password::{hash_password, verify_password, Verification};
