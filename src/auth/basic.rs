use base64::prelude::*;

/// Identity and secret taken from an `Authorization: Basic` header
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identity: String,
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Parse `Basic <base64(identity:secret)>`.
///
/// Anything that is not a well-formed Basic credential yields `None`; the
/// gate treats that the same as a missing header.
pub fn parse_basic_auth_header(header: &str) -> Option<Credentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64_STANDARD.decode(encoded.trim().as_bytes()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    // Only the first colon separates; the secret may contain more
    let (identity, secret) = decoded.split_once(':')?;
    Some(Credentials {
        identity: identity.to_string(),
        secret: secret.to_string(),
    })
}
