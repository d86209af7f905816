//! Client-side checks for the create-user form.
//!
//! Validators only inspect their input; callers trim separately before
//! building a request.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    domain::CreateUserRequest,
    error::{Field, ValidationError},
};

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 100;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(Field::Name, "Name is required"));
    }

    let length = trimmed.chars().count();
    if length < NAME_MIN_LENGTH {
        return Err(ValidationError::new(
            Field::Name,
            format!("Name must be at least {NAME_MIN_LENGTH} characters long"),
        ));
    }
    if length > NAME_MAX_LENGTH {
        return Err(ValidationError::new(
            Field::Name,
            format!("Name must not exceed {NAME_MAX_LENGTH} characters"),
        ));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(Field::Email, "Email is required"));
    }
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err(ValidationError::new(
            Field::Email,
            "Please enter a valid email address",
        ));
    }
    Ok(())
}

/// Checks the name first, then the email, returning the first failure.
pub fn validate_create_user_request(request: &CreateUserRequest) -> Result<(), ValidationError> {
    validate_name(&request.name)?;
    validate_email(&request.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_bounds() {
        for len in 0..=120 {
            let name = "a".repeat(len);
            let result = validate_name(&name);
            if (NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&len) {
                assert!(result.is_ok(), "length {len} should pass");
            } else {
                let err = result.expect_err("out of range length must fail");
                assert_eq!(err.field, Field::Name, "length {len}");
            }
        }
    }

    #[test]
    fn name_is_measured_after_trimming() {
        assert!(validate_name("   a   ").is_err());
        assert!(validate_name("  ab  ").is_ok());
        let padded = format!("  {}  ", "x".repeat(NAME_MAX_LENGTH));
        assert!(validate_name(&padded).is_ok());
    }

    #[test]
    fn name_counts_characters_not_bytes() {
        assert!(validate_name("é").is_err());
        assert!(validate_name("Zoë").is_ok());
        assert!(validate_name(&"ü".repeat(NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn name_messages() {
        assert_eq!(
            validate_name("  ").expect_err("blank").message,
            "Name is required"
        );
        assert_eq!(
            validate_name("a").expect_err("short").message,
            "Name must be at least 2 characters long"
        );
        assert_eq!(
            validate_name(&"a".repeat(101)).expect_err("long").message,
            "Name must not exceed 100 characters"
        );
    }

    #[test]
    fn email_accepts_simple_addresses() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("  john.doe+tag@example.com  ").is_ok());
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for input in [
            "not-an-email",
            "a@b",
            "@b.co",
            "a@.",
            "a b@c.de",
            "a@@b.co",
        ] {
            let err = validate_email(input).expect_err(input);
            assert_eq!(err.message, "Please enter a valid email address", "{input}");
        }
    }

    #[test]
    fn empty_email_is_required() {
        let err = validate_email("").expect_err("empty");
        assert_eq!(err.field, Field::Email);
        assert_eq!(err.to_string(), "Email is required");
        assert_eq!(
            validate_email("   ").expect_err("blank").message,
            "Email is required"
        );
    }

    #[test]
    fn request_validation_reports_name_before_email() {
        let request = CreateUserRequest {
            name: String::new(),
            email: "bad".to_string(),
        };
        assert_eq!(
            validate_create_user_request(&request)
                .expect_err("invalid")
                .field,
            Field::Name
        );

        let request = CreateUserRequest::trimmed("Ann", "bad");
        assert_eq!(
            validate_create_user_request(&request)
                .expect_err("invalid")
                .field,
            Field::Email
        );

        let request = CreateUserRequest::trimmed("Ann", "ann@x.com");
        assert!(validate_create_user_request(&request).is_ok());
    }
}
