//! Identity extraction.
//!
//! The access token is read from `Authorization: Bearer <token>` or, for
//! browser clients, from the `access_token` cookie set at login. Requests
//! without a valid token are served as anonymous.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use ya_core::Actor;
use ya_core::ports::{AuthError, TokenClaims};

use crate::state::AppState;

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Authenticated user identity.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Optional identity extractor - never fails, anonymous when there is no
/// usable token.
///
/// ```ignore
/// async fn page(viewer: Viewer) -> impl Responder {
///     format!("logged in: {}", viewer.is_authenticated())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Viewer(pub Option<Identity>);

impl Viewer {
    /// The acting identity for the ownership guard.
    pub fn actor(&self) -> Actor {
        self.0
            .as_ref()
            .map_or(Actor::Anonymous, |identity| Actor::User(identity.user_id))
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Viewer(identify(req))))
    }
}

fn identify(req: &HttpRequest) -> Option<Identity> {
    let token = access_token(req)?;

    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return None;
    };

    match state.tokens.validate_token(&token) {
        Ok(claims) => {
            let identity = Identity::from(claims);
            tracing::debug!(
                user_id = %identity.user_id,
                username = %identity.username,
                "Authenticated request"
            );
            Some(identity)
        }
        Err(AuthError::TokenExpired) => {
            tracing::debug!("Expired access token, serving as anonymous");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected access token");
            None
        }
    }
}

/// Bearer token first, then the cookie.
fn access_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    match bearer {
        Some(token) => Some(token.to_string()),
        None => req
            .cookie(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty()),
    }
}
