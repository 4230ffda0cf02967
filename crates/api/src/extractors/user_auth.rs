//! User JWT authentication extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::{bearer_token, UserAuth};

/// The authenticated caller.
///
/// Reuses the [`UserAuth`] inserted by `require_user_auth` when the route
/// is behind it, else validates the bearer token itself.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl From<UserAuth> for AuthUser {
    fn from(auth: UserAuth) -> Self {
        Self {
            user_id: auth.user_id,
            email: auth.email,
        }
    }
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthUser, ApiError> {
    if let Some(auth) = parts.extensions.get::<UserAuth>() {
        return Ok(auth.clone().into());
    }

    let token = bearer_token(&parts.headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing or invalid Authorization header".to_string()))?;

    UserAuth::validate(&state.jwt, token)
        .map(AuthUser::from)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
    }
}

/// The caller if a valid bearer token was sent. Never rejects.
#[derive(Debug, Clone)]
pub struct OptionalUserAuth(pub Option<AuthUser>);

impl OptionalUserAuth {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUserAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(OptionalUserAuth(authenticate(parts, state).ok()))
    }
}
