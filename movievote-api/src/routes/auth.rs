use super::load_user;
use crate::session::{Viewer, OAUTH_STATE_KEY, PKCE_VERIFIER_KEY, REDIRECT_TO_KEY, USER_ID_KEY};
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use movievote_app::infrastructure::security::InputSanitizer;
use movievote_app::AppContext;
use movievote_errors::AppError;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn session_err(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("Session error: {e}"))
}

pub async fn login(
    State(ctx): State<AppContext>,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Result<Redirect, AppError> {
    let request = ctx.oauth.authorize();

    session
        .insert(OAUTH_STATE_KEY, &request.csrf_state)
        .await
        .map_err(session_err)?;
    session
        .insert(PKCE_VERIFIER_KEY, &request.pkce_verifier)
        .await
        .map_err(session_err)?;

    let redirect_to = query
        .redirect_to
        .as_deref()
        .and_then(InputSanitizer::safe_redirect_target);
    match redirect_to {
        Some(target) => session
            .insert(REDIRECT_TO_KEY, target)
            .await
            .map_err(session_err)?,
        None => {
            session
                .remove::<String>(REDIRECT_TO_KEY)
                .await
                .map_err(session_err)?;
        }
    }

    tracing::debug!("Redirecting to Google for login");
    Ok(Redirect::to(&request.url))
}

pub async fn callback(
    State(ctx): State<AppContext>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, AppError> {
    if let Some(error) = query.error {
        tracing::warn!(error, "Google returned an error");
        return Err(AppError::Auth(error));
    }

    let expected_state: Option<String> = session
        .remove(OAUTH_STATE_KEY)
        .await
        .map_err(session_err)?;
    let pkce_verifier: Option<String> = session
        .remove(PKCE_VERIFIER_KEY)
        .await
        .map_err(session_err)?;

    let (Some(code), Some(state)) = (query.code, query.state) else {
        return Err(AppError::Auth("Missing code or state".to_string()));
    };
    let (Some(expected_state), Some(pkce_verifier)) = (expected_state, pkce_verifier) else {
        tracing::warn!("OAuth callback without a pending login");
        return Err(AppError::Auth("No login in progress".to_string()));
    };
    if state != expected_state {
        tracing::warn!("OAuth state mismatch");
        return Err(AppError::Auth("State mismatch".to_string()));
    }

    let profile = ctx.oauth.exchange_code(&code, pkce_verifier).await?;
    let user = ctx
        .user_repo
        .upsert(&profile)
        .await
        .map_err(AppError::database)?;

    let redirect_to: Option<String> = session
        .remove(REDIRECT_TO_KEY)
        .await
        .map_err(session_err)?;
    session.cycle_id().await.map_err(session_err)?;
    session.insert(USER_ID_KEY, user.id).await.map_err(session_err)?;

    tracing::info!(user_id = %user.id, email = %user.email, "User logged in");
    Ok(Redirect::to(redirect_to.as_deref().unwrap_or("/")))
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await.map_err(session_err)?;
    Ok(Redirect::to("/"))
}

pub async fn me(
    State(ctx): State<AppContext>,
    Viewer(viewer): Viewer,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = load_user(&ctx, viewer).await?;
    Ok(Json(json!({
        "authenticated": user.is_some(),
        "user": user,
    })))
}
