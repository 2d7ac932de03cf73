//! Credential forms and their field-level validation rules
//!
//! Validation happens before anything is sent to the payments service.
//! Each field reports at most one message; a missing value always wins
//! over the length and shape rules.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 20;
const NAME_MAX: usize = 20;

/// A form field that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Firstname,
    Lastname,
    Email,
    Password,
}

impl Field {
    /// Wire and display name of the field
    pub fn name(&self) -> &'static str {
        match self {
            Field::Firstname => "firstname",
            Field::Lastname => "lastname",
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-field validation messages, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(Field, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    /// Message shown under the given field, if any
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, msg)| (*f, msg.as_str()))
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Sign-in form
#[derive(Clone, Default, Serialize)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}

impl SigninForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check every field, collecting one message per failing field
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        errors.into_result()
    }
}

impl fmt::Debug for SigninForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigninForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form
#[derive(Clone, Default, Serialize)]
pub struct SignupForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    /// Check every field, collecting one message per failing field
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_name(
            &self.firstname,
            Field::Firstname,
            "First name is required.",
            "First name must be at most 20 characters.",
            &mut errors,
        );
        check_name(
            &self.lastname,
            Field::Lastname,
            "Last name is required.",
            "Last name must be at most 20 characters.",
            &mut errors,
        );
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        errors.into_result()
    }

    /// Credentials used for the sign-in that follows a registration
    pub fn credentials(&self) -> SigninForm {
        SigninForm::new(self.email.clone(), self.password.clone())
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn check_name(value: &str, field: Field, required: &str, too_long: &str, errors: &mut FieldErrors) {
    if value.is_empty() {
        errors.push(field, required);
    } else if value.chars().count() > NAME_MAX {
        errors.push(field, too_long);
    }
}

fn check_email(value: &str, errors: &mut FieldErrors) {
    if value.is_empty() {
        errors.push(Field::Email, "Email is required.");
    } else if !is_valid_email(value) {
        errors.push(Field::Email, "Invalid email address.");
    }
}

fn check_password(value: &str, errors: &mut FieldErrors) {
    let len = value.chars().count();
    if value.is_empty() {
        errors.push(Field::Password, "Password is required.");
    } else if len < PASSWORD_MIN {
        errors.push(Field::Password, "Password must be at least 8 characters.");
    } else if len > PASSWORD_MAX {
        errors.push(Field::Password, "Password must be at most 20 characters.");
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

/// Email shape check: local part without a leading dot or doubled dots,
/// dotted domain ending in an alphabetic TLD of two or more letters
pub fn is_valid_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    email_regex().is_match(value)
}
