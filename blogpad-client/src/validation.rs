//! Client-side form validation. Errors are per field and block submission.

use crate::models::{CommentParams, PostParams, SignInParams, SignUpParams};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", join_errors(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        // first failing rule wins for a field
        if self.get(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    let parts: Vec<String> = errors.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// At least one digit, one uppercase letter and one symbol.
pub fn is_strong_password(password: &str) -> bool {
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());
    has_digit && has_upper && has_symbol
}

fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &str,
) -> bool {
    if value.trim().is_empty() {
        errors.add(field, message);
        false
    } else {
        true
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if required(errors, "email", email, "Email is required") && !is_valid_email(email.trim()) {
        errors.add("email", "Invalid email address");
    }
}

pub fn validate_sign_up(params: &SignUpParams) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    required(&mut errors, "firstName", &params.first_name, "First name is required");
    required(&mut errors, "lastName", &params.last_name, "Last name is required");
    check_email(&mut errors, &params.email);

    if required(&mut errors, "password", &params.password, "Password is required") {
        if params.password.chars().count() < PASSWORD_MIN_LEN {
            errors.add("password", "Password must be at least 6 characters");
        } else if !is_strong_password(&params.password) {
            errors.add(
                "password",
                "Invalid password. Should have at least a number, uppercase character and symbol",
            );
        }
    }

    errors.into_result()
}

pub fn validate_sign_in(params: &SignInParams) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, &params.email);
    required(&mut errors, "password", &params.password, "Password is required");
    errors.into_result()
}

pub fn validate_post(params: &PostParams) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    required(&mut errors, "title", &params.title, "Title is required");
    required(&mut errors, "content", &params.content, "Content is required");
    errors.into_result()
}

pub fn validate_comment(params: &CommentParams) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    required(&mut errors, "comment", &params.comment, "Comment is required");
    errors.into_result()
}
