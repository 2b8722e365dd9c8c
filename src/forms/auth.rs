use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::missing_fields;
use crate::domain::user::normalize_email;

const PASSWORD_MIN_LEN_VALIDATOR: u64 = 8;
const PASSWORD_MAX_LEN_VALIDATOR: u64 = 128;
const EMAIL_MAX_LEN_VALIDATOR: u64 = 254;

pub type AuthFormResult<T> = Result<T, AuthFormError>;

#[derive(Debug, Error)]
pub enum AuthFormError {
    #[error("Email and password required")]
    MissingCredentials,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be between 8 and 128 characters")]
    InvalidPassword,
}

impl From<ValidationErrors> for AuthFormError {
    fn from(errors: ValidationErrors) -> Self {
        if !missing_fields(&errors).is_empty() {
            Self::MissingCredentials
        } else if errors.field_errors().contains_key("email") {
            Self::InvalidEmail
        } else {
            Self::InvalidPassword
        }
    }
}

/// Email/password pair after validation. The password is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /api/auth/register` and the register page.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(required, email, length(max = EMAIL_MAX_LEN_VALIDATOR))]
    pub email: Option<String>,
    #[validate(
        required,
        length(min = PASSWORD_MIN_LEN_VALIDATOR, max = PASSWORD_MAX_LEN_VALIDATOR)
    )]
    pub password: Option<String>,
}

impl RegisterForm {
    pub fn into_credentials(self) -> AuthFormResult<Credentials> {
        let form = Self {
            email: self.email.map(|email| normalize_email(&email)).filter(|e| !e.is_empty()),
            password: self.password.filter(|password| !password.is_empty()),
        };
        form.validate()?;

        match (form.email, form.password) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(AuthFormError::MissingCredentials),
        }
    }
}

/// Payload for `POST /api/auth/login` and the login page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginForm {
    /// Only presence is checked; wrong values fail authentication instead.
    pub fn into_credentials(self) -> AuthFormResult<Credentials> {
        let email = self
            .email
            .map(|email| normalize_email(&email))
            .filter(|email| !email.is_empty());
        let password = self.password.filter(|password| !password.is_empty());

        match (email, password) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(AuthFormError::MissingCredentials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: Option<&str>, password: Option<&str>) -> AuthFormResult<Credentials> {
        RegisterForm {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
        .into_credentials()
    }

    #[test]
    fn register_normalizes_email() {
        let credentials = register(Some("  Alice@Example.COM "), Some("correct horse")).unwrap();
        assert_eq!(credentials.email, "alice@example.com");
        assert_eq!(credentials.password, "correct horse");
    }

    #[test]
    fn register_requires_both_fields() {
        assert!(matches!(
            register(None, Some("password123")),
            Err(AuthFormError::MissingCredentials)
        ));
        assert!(matches!(
            register(Some("a@example.com"), Some("")),
            Err(AuthFormError::MissingCredentials)
        ));
    }

    #[test]
    fn register_rejects_bad_email_and_short_password() {
        assert!(matches!(
            register(Some("not-an-email"), Some("password123")),
            Err(AuthFormError::InvalidEmail)
        ));
        assert!(matches!(
            register(Some("a@example.com"), Some("short")),
            Err(AuthFormError::InvalidPassword)
        ));
    }

    #[test]
    fn login_only_checks_presence() {
        let form = LoginForm {
            email: Some("A@example.com".into()),
            password: Some("x".into()),
        };
        assert_eq!(
            form.into_credentials().unwrap(),
            Credentials {
                email: "a@example.com".into(),
                password: "x".into()
            }
        );

        assert!(matches!(
            LoginForm::default().into_credentials(),
            Err(AuthFormError::MissingCredentials)
        ));
    }
}
