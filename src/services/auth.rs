//! Account registration and credential login.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::domain::user::{NewUser, SessionUser, User};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::{RepositoryError, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

const DUPLICATE_EMAIL_MESSAGE: &str = "User already exists";

/// Registers a new account with a salted Argon2id hash of the password.
pub fn register<R>(repo: &R, form: RegisterForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let credentials = form
        .into_credentials()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_user_by_email(&credentials.email)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Form(DUPLICATE_EMAIL_MESSAGE.to_string()));
    }

    let password_hash = hash_password(&credentials.password)?;
    let new_user = NewUser::new(&credentials.email, password_hash);

    match repo.create_user(&new_user) {
        Ok(user) => {
            log::info!("Registered account {}", user.email);
            Ok(user)
        }
        // Lost a race with a concurrent registration for the same email.
        Err(RepositoryError::ConstraintViolation(_)) => {
            Err(ServiceError::Form(DUPLICATE_EMAIL_MESSAGE.to_string()))
        }
        Err(err) => Err(ServiceError::from(err)),
    }
}

/// Checks email and password, returning the identity to store in the session.
pub fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<SessionUser>
where
    R: UserReader + ?Sized,
{
    let credentials = form
        .into_credentials()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let Some(user) = repo
        .get_user_by_email(&credentials.email)
        .map_err(ServiceError::from)?
    else {
        return Err(ServiceError::Unauthorized);
    };

    if !verify_password(&credentials.password, &user.password_hash) {
        log::warn!("Failed login attempt for {}", user.email);
        return Err(ServiceError::Unauthorized);
    }

    Ok(SessionUser::from(&user))
}

fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            log::error!("Failed to hash password: {err}");
            ServiceError::Internal
        })
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        log::error!("Stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
