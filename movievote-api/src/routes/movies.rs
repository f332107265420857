use super::{log_failure, require_user};
use crate::session::RequireUser;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use movievote_app::AppContext;
use movievote_errors::{AppError, FieldErrors};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct MovieForm {
    pub title: Option<String>,
}

async fn render_index(
    ctx: &AppContext,
    user_id: Uuid,
    errors: FieldErrors,
) -> Result<Html<String>, AppError> {
    let user = require_user(ctx, user_id).await?;
    let movies = ctx.movie_board.all().await?;
    Ok(Html(movievote_ui::render_movies(user, movies, errors)))
}

pub async fn index(
    State(ctx): State<AppContext>,
    RequireUser(user_id): RequireUser,
) -> Result<Html<String>, AppError> {
    render_index(&ctx, user_id, FieldErrors::new()).await
}

pub async fn create(
    State(ctx): State<AppContext>,
    RequireUser(user_id): RequireUser,
    Form(form): Form<MovieForm>,
) -> Result<Response, AppError> {
    require_user(&ctx, user_id).await?;
    match ctx.submit_movie.execute(user_id, form.title.as_deref()).await {
        Ok(_) => Ok(Redirect::to("/movies").into_response()),
        Err(err) if err.is_validation() => {
            log_failure("create_movie", &err);
            let page = render_index(&ctx, user_id, err.field_errors()).await?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(err) => {
            log_failure("create_movie", &err);
            Err(err)
        }
    }
}

/// Owner-only detail page; other users get a 404.
pub async fn show(
    State(ctx): State<AppContext>,
    RequireUser(user_id): RequireUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let movie = ctx
        .movie_repo
        .find_for_owner(id, user_id)
        .await
        .map_err(AppError::database)?
        .ok_or(AppError::NotFound)?;
    let user = require_user(&ctx, user_id).await?;
    Ok(Html(movievote_ui::render_movie_detail(user, movie.into())))
}

pub async fn delete(
    State(ctx): State<AppContext>,
    RequireUser(user_id): RequireUser,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    let removed = ctx
        .movie_repo
        .delete_for_owner(id, user_id)
        .await
        .map_err(AppError::database)
        .inspect_err(|err| log_failure("delete_movie", err))?;
    if removed == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(%user_id, movie_id = %id, "Movie deleted");
    Ok(Redirect::to("/movies"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_text, context, seed_user};
    use chrono::Utc;
    use movievote_app::domain::Movie;

    async fn add_movie(ctx: &AppContext, owner: Uuid, title: &str) -> Uuid {
        ctx.movie_repo
            .create(&Movie::new(title.to_string(), owner, Utc::now()))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_index_lists_every_movie_with_links() {
        let ctx = context().await;
        let user = seed_user(&ctx, "critic").await;
        let id = add_movie(&ctx, user, "Stalker").await;

        let Html(body) = index(State(ctx), RequireUser(user)).await.unwrap();
        assert!(body.contains("Stalker"));
        assert!(body.contains(&format!("/movies/{id}")));
        assert!(body.contains("action=\"/movies\""));
    }

    #[tokio::test]
    async fn test_create_with_empty_title_is_bad_request() {
        let ctx = context().await;
        let user = seed_user(&ctx, "critic").await;
        let form = MovieForm {
            title: Some(String::new()),
        };

        let response = create(State(ctx), RequireUser(user), Form(form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("Title is required"));
    }

    #[tokio::test]
    async fn test_detail_and_delete_are_owner_only() {
        let ctx = context().await;
        let owner = seed_user(&ctx, "owner").await;
        let stranger = seed_user(&ctx, "stranger").await;
        let id = add_movie(&ctx, owner, "Ran").await;

        let err = show(State(ctx.clone()), RequireUser(stranger), Path(id))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::NotFound);
        let err = delete(State(ctx.clone()), RequireUser(stranger), Path(id))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::NotFound);

        let Html(body) = show(State(ctx.clone()), RequireUser(owner), Path(id))
            .await
            .unwrap();
        assert!(body.contains(&format!("/movies/{id}/delete")));

        let response = delete(State(ctx.clone()), RequireUser(owner), Path(id))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.headers()["location"], "/movies");
        assert!(ctx.movie_board.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleted_account_cannot_create() {
        let ctx = context().await;
        let form = MovieForm {
            title: Some("Ran".to_string()),
        };

        let err = create(State(ctx.clone()), RequireUser(Uuid::new_v4()), Form(form))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Unauthorized);
        assert!(ctx.movie_board.all().await.unwrap().is_empty());
    }
}
