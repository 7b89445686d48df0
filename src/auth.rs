use crate::error::{Error, Result, ValidationError};
use crate::models::Session;
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Email/password pair submitted to the auth provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Every problem with the credentials, keyed by field name
    pub fn field_errors(&self) -> Vec<(&'static str, ValidationError)> {
        let mut errors = Vec::new();
        if !looks_like_email(&self.email) {
            errors.push(("email", ValidationError::InvalidEmail));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push((
                "password",
                ValidationError::PasswordTooShort(MIN_PASSWORD_LEN),
            ));
        }
        errors
    }

    /// Reject the credentials before contacting the provider
    pub fn validate(&self) -> Result<()> {
        match self.field_errors().into_iter().next() {
            Some((_, err)) => Err(err.into()),
            None => Ok(()),
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Admin screens require a signed-in user holding the admin role
pub fn require_admin(session: Option<&Session>) -> Result<&Session> {
    match session {
        None => Err(Error::AccessDenied(
            "sign in to access the admin panel".to_string(),
        )),
        Some(session) if !session.is_admin => Err(Error::AccessDenied(
            "You don't have admin privileges.".to_string(),
        )),
        Some(session) => Ok(session),
    }
}
