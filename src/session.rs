//! Cookie-backed session identity.
//!
//! The signed-in account is serialized into the actix-identity id. Handlers
//! receive it through [`CurrentUser`] and pass it to services explicitly.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use thiserror::Error;

use crate::domain::user::SessionUser;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to store session: {0}")]
    Store(String),
}

/// The account attached to the request, if any. Extraction never fails: a
/// missing, expired or undecodable identity yields `None`.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<SessionUser>);

impl CurrentUser {
    pub fn session(&self) -> Option<&SessionUser> {
        self.0.as_ref()
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
            .and_then(|id| match serde_json::from_str::<SessionUser>(&id) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::warn!("Discarding undecodable session identity: {err}");
                    None
                }
            });

        ready(Ok(Self(user)))
    }
}

/// Attach `user` to the session cookie of the current request.
pub fn sign_in(req: &HttpRequest, user: &SessionUser) -> Result<(), SessionError> {
    let id = serde_json::to_string(user)?;
    Identity::login(&req.extensions(), id).map_err(|err| SessionError::Store(err.to_string()))?;
    Ok(())
}

/// Drop the identity from the session, if there is one.
pub fn sign_out(req: &HttpRequest) {
    if let Ok(identity) = req.get_identity() {
        identity.logout();
    }
}
