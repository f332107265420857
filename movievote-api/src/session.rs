use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use movievote_errors::AppError;
use tower_sessions::Session;
use uuid::Uuid;

pub const USER_ID_KEY: &str = "user_id";
pub const OAUTH_STATE_KEY: &str = "oauth_state";
pub const PKCE_VERIFIER_KEY: &str = "pkce_verifier";
pub const REDIRECT_TO_KEY: &str = "redirect_to";

/// The signed-in user's id, if there is one.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<Uuid>);

/// The signed-in user's id. Anonymous requests are redirected to the login
/// route with the current path as `redirect_to`.
#[derive(Debug, Clone, Copy)]
pub struct RequireUser(pub Uuid);

async fn session_user<S>(parts: &mut Parts, state: &S) -> Result<Option<Uuid>, Response>
where
    S: Send + Sync,
{
    let session = Session::from_request_parts(parts, state)
        .await
        .map_err(IntoResponse::into_response)?;
    session
        .get::<Uuid>(USER_ID_KEY)
        .await
        .map_err(|e| AppError::Internal(format!("Session read failed: {e}")).into_response())
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Viewer(session_user(parts, state).await?))
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match session_user(parts, state).await? {
            Some(id) => Ok(RequireUser(id)),
            None => {
                let path = parts.uri.path();
                tracing::debug!(path, "Anonymous request to protected route");
                Err(Redirect::to(&login_redirect(path)).into_response())
            }
        }
    }
}

pub fn login_redirect(path: &str) -> String {
    format!("/auth/login?redirect_to={}", urlencoding::encode(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_encodes_path() {
        assert_eq!(login_redirect("/movies"), "/auth/login?redirect_to=%2Fmovies");
    }
}
