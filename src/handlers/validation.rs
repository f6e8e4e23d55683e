// Request body shape checks for course and user payloads

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::database::CoursePayload;
use crate::error::ApiError;

/// Unwrap an axum JSON body, mapping rejections to `INVALID_JSON`
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))
}

/// Validated registration input, password still in plaintext
pub struct RegistrationInput {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

pub fn course_payload(body: &Value) -> Result<CoursePayload, ApiError> {
    let mut errors = Vec::new();
    let title = required(body, "title", "Please provide a value for \"title\"", &mut errors);
    let description = required(body, "description", "Please provide a value for \"description\"", &mut errors);

    match (title, description) {
        (Some(title), Some(description)) if errors.is_empty() => Ok(CoursePayload { title, description }),
        _ => Err(ApiError::validation_error(errors)),
    }
}

pub fn registration(body: &Value) -> Result<RegistrationInput, ApiError> {
    let mut errors = Vec::new();
    let first_name = required(body, "firstName", "Please provide a value for \"firstName\"", &mut errors);
    let last_name = required(body, "lastName", "Please provide a value for \"lastName\"", &mut errors);
    let email_address = required(body, "emailAddress", "Please provide a value for \"emailAddress\"", &mut errors);
    let password = required(body, "password", "Please provide a value for \"password\"", &mut errors);

    if let Some(email) = &email_address {
        if !looks_like_email(email) {
            errors.push("Please enter a valid email address".to_string());
        }
    }

    if password.as_ref().is_some_and(|p| p.len() > MAX_PASSWORD_BYTES) {
        errors.push(format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES));
    }

    match (first_name, last_name, email_address, password) {
        (Some(first_name), Some(last_name), Some(email_address), Some(password)) if errors.is_empty() => {
            Ok(RegistrationInput {
                first_name,
                last_name,
                email_address,
                password,
            })
        }
        _ => Err(ApiError::validation_error(errors)),
    }
}

/// A field passes when it is a non-blank string
fn required(body: &Value, field: &str, message: &str, errors: &mut Vec<String>) -> Option<String> {
    match body.get(field).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => Some(value.to_string()),
        _ => {
            errors.push(message.to_string());
            None
        }
    }
}

fn looks_like_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !candidate.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn errors_of(result: Result<impl Sized, ApiError>) -> Vec<String> {
        match result {
            Err(ApiError::ValidationError(errors)) => errors,
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn course_payload_accepts_complete_body() {
        let payload = course_payload(&json!({ "title": "T", "description": "D" })).unwrap();
        assert_eq!(payload, CoursePayload::new("T", "D"));
    }

    #[test]
    fn course_payload_reports_each_missing_field() {
        let errors = errors_of(course_payload(&json!({ "title": "", "description": null })));
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("title"));
        assert!(errors[1].contains("description"));
    }

    #[test]
    fn non_string_fields_are_rejected() {
        let errors = errors_of(course_payload(&json!({ "title": 5, "description": "D" })));
        assert_eq!(errors, vec!["Please provide a value for \"title\"".to_string()]);
    }

    #[test]
    fn registration_checks_email_shape() {
        let errors = errors_of(registration(&json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "emailAddress": "joe-at-smith",
            "password": "pw"
        })));
        assert_eq!(errors, vec!["Please enter a valid email address".to_string()]);
    }

    #[test]
    fn registration_rejects_passwords_bcrypt_would_truncate() {
        let errors = errors_of(registration(&json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "emailAddress": "joe@smith.com",
            "password": "p".repeat(73)
        })));
        assert_eq!(errors, vec!["Password must be at most 72 bytes".to_string()]);

        // Multi-byte characters count by encoded length
        let errors = errors_of(registration(&json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "emailAddress": "joe@smith.com",
            "password": "é".repeat(37)
        })));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn registration_accepts_valid_body() {
        let input = registration(&json!({
            "firstName": "Joe",
            "lastName": "Smith",
            "emailAddress": "joe@smith.com",
            "password": "joepassword"
        }))
        .unwrap();
        assert_eq!(input.email_address, "joe@smith.com");
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("a@.co"));
        assert!(!looks_like_email("a b@c.d"));
    }
}
