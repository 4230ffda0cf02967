//! User JWT authentication middleware.
//!
//! Bearer tokens are issued by the hosted auth provider and signed with a
//! shared HS256 secret; the subject claim is the user's profile id.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use shared::jwt::{extract_user_id, JwtConfig};

/// Authenticated user information extracted from JWT.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl UserAuth {
    /// Validates an access token and returns user authentication info.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt_config
            .validate_access_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id = extract_user_id(&claims).map_err(|e| e.to_string())?;

        Ok(UserAuth {
            user_id,
            email: claims.email,
        })
    }
}

/// Returns the bearer token from the Authorization header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware that requires JWT user authentication.
///
/// Rejects requests without a valid token; on success the [`UserAuth`] is
/// stored in request extensions for downstream handlers.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = match bearer_token(req.headers()) {
        Some(token) => token,
        None => return unauthorized_response("Missing or invalid Authorization header"),
    };

    match UserAuth::validate(&state.jwt, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

/// Middleware that validates a bearer token when one is present.
///
/// Invalid or missing tokens do not reject the request; the handler just
/// sees no [`UserAuth`].
pub async fn optional_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match UserAuth::validate(&state.jwt, token) {
            Ok(auth) => {
                req.extensions_mut().insert(auth);
            }
            Err(e) => tracing::debug!("Ignoring invalid optional token: {}", e),
        }
    }

    next.run(req).await
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}
