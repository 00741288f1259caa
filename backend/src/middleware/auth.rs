//! Authentication middleware
//!
//! Bearer tokens are Supabase access tokens validated with the configured
//! secret. Protected route groups use [`auth_middleware`]; handlers that
//! mix public and protected methods take [`CurrentUser`] directly.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::error::{AppError, AppResult};
use crate::security::validate_access_token;
use crate::AppState;

/// Authenticated user information extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Token subject
    pub user_id: String,
    pub email: Option<String>,
    pub role: String,
    pub session_id: Option<String>,
}

fn authenticate(headers: &HeaderMap, state: &AppState) -> AppResult<AuthUser> {
    let bearer = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

    let claims = validate_access_token(
        bearer.token(),
        state.config.jwt_secret(),
        &state.config.algorithm,
    )?;

    Ok(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role.unwrap_or_else(|| "authenticated".to_string()),
        session_id: claims.session_id,
    })
}

/// Rejects requests without a valid bearer token and stores the
/// [`AuthUser`] in request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let user = authenticate(request.headers(), &state)?;
    tracing::debug!(user_id = %user.user_id, "Authenticated request");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extractor for the authenticated user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0.user_id
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(CurrentUser(user.clone()));
        }

        let state = AppState::from_ref(state);
        authenticate(&parts.headers, &state).map(CurrentUser)
    }
}

/// Only the owner of a resource may access it
pub fn require_user_access(current_user_id: &str, owner_id: &str) -> AppResult<()> {
    if current_user_id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Not authorized to access this resource".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_user_access() {
        assert!(require_user_access("user-1", "user-1").is_ok());
        assert!(matches!(
            require_user_access("user-1", "user-2"),
            Err(AppError::Forbidden(_))
        ));
    }
}
