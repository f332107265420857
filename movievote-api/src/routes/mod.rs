pub mod auth;
pub mod board;
pub mod movies;

use movievote_app::domain::User;
use movievote_app::AppContext;
use movievote_errors::AppError;
use uuid::Uuid;

/// Loads the session's user. A session pointing at a deleted account is
/// treated as logged out.
async fn load_user(ctx: &AppContext, id: Option<Uuid>) -> Result<Option<User>, AppError> {
    let Some(id) = id else {
        return Ok(None);
    };
    ctx.user_repo.find_by_id(id).await.map_err(AppError::database)
}

async fn require_user(ctx: &AppContext, id: Uuid) -> Result<User, AppError> {
    load_user(ctx, Some(id)).await?.ok_or(AppError::Unauthorized)
}

fn log_failure(action: &str, err: &AppError) {
    match err {
        AppError::Validation { field, message } => {
            tracing::warn!(action, field = %field, "Rejected input: {}", message)
        }
        AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
            tracing::error!(action, "{}", err)
        }
        _ => tracing::debug!(action, "{}", err),
    }
}
