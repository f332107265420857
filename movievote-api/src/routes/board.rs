use super::{load_user, log_failure, require_user};
use crate::session::{RequireUser, Viewer};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Utc;
use movievote_app::AppContext;
use movievote_errors::{AppError, FieldErrors};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct HomeForm {
    pub title: Option<String>,
    #[serde(rename = "_method")]
    pub method: Option<String>,
    #[serde(rename = "movieId")]
    pub movie_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoteForm {
    #[serde(rename = "movieId")]
    pub movie_id: Option<String>,
}

impl HomeForm {
    fn is_vote(&self) -> bool {
        self.method
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("patch"))
    }
}

async fn render_board(
    ctx: &AppContext,
    viewer: Option<Uuid>,
    errors: FieldErrors,
) -> Result<Html<String>, AppError> {
    let user = load_user(ctx, viewer).await?;
    let board = ctx
        .movie_board
        .home(user.as_ref().map(|u| u.id), Utc::now())
        .await?;
    Ok(Html(movievote_ui::render_home(user, board, errors)))
}

pub async fn home(
    State(ctx): State<AppContext>,
    Viewer(viewer): Viewer,
) -> Result<Html<String>, AppError> {
    render_board(&ctx, viewer, FieldErrors::new()).await
}

/// Adds a movie, or toggles a vote when the form carries `_method=patch`.
pub async fn submit(
    State(ctx): State<AppContext>,
    RequireUser(user_id): RequireUser,
    Form(form): Form<HomeForm>,
) -> Result<Response, AppError> {
    require_user(&ctx, user_id).await?;
    let outcome = if form.is_vote() {
        ctx.toggle_vote
            .execute(user_id, form.movie_id.as_deref())
            .await
            .map(|_| ())
    } else {
        ctx.submit_movie
            .execute(user_id, form.title.as_deref())
            .await
            .map(|_| ())
    };

    match outcome {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(err) if err.is_validation() => {
            log_failure("submit", &err);
            let page = render_board(&ctx, Some(user_id), err.field_errors()).await?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(err) => {
            log_failure("submit", &err);
            Err(err)
        }
    }
}

pub async fn vote(
    State(ctx): State<AppContext>,
    RequireUser(user_id): RequireUser,
    Form(form): Form<VoteForm>,
) -> Result<Redirect, AppError> {
    require_user(&ctx, user_id).await?;
    ctx.toggle_vote
        .execute(user_id, form.movie_id.as_deref())
        .await
        .inspect_err(|err| log_failure("vote", err))?;
    Ok(Redirect::to("/"))
}

pub async fn vote_redirect() -> Redirect {
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_text, context, seed_user};
    use movievote_app::domain::Movie;

    #[tokio::test]
    async fn test_empty_title_rerenders_with_inline_error() {
        let ctx = context().await;
        let user = seed_user(&ctx, "critic").await;
        let form = HomeForm {
            title: Some("   ".to_string()),
            ..Default::default()
        };

        let response = submit(State(ctx), RequireUser(user), Form(form)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_text(response).await;
        assert!(body.contains("id=\"title-error\""));
        assert!(body.contains("Title is required"));
    }

    #[tokio::test]
    async fn test_valid_title_redirects_home() {
        let ctx = context().await;
        let user = seed_user(&ctx, "critic").await;
        let form = HomeForm {
            title: Some("Paris, Texas".to_string()),
            ..Default::default()
        };

        let response = submit(State(ctx.clone()), RequireUser(user), Form(form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");

        let all = ctx.movie_board.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Paris, Texas");
    }

    #[tokio::test]
    async fn test_patch_without_movie_id_is_keyed_on_movie_id() {
        let ctx = context().await;
        let user = seed_user(&ctx, "critic").await;
        let form = HomeForm {
            method: Some("PATCH".to_string()),
            ..Default::default()
        };

        let response = submit(State(ctx), RequireUser(user), Form(form)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_text(response).await;
        assert!(body.contains("id=\"movieId-error\""));
        assert!(body.contains("Movie Id is required"));
    }

    #[tokio::test]
    async fn test_vote_without_movie_id_returns_json_errors() {
        let ctx = context().await;
        let user = seed_user(&ctx, "critic").await;

        let err = vote(State(ctx), RequireUser(user), Form(VoteForm::default()))
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["errors"]["movieId"], "Movie Id is required");
    }

    #[tokio::test]
    async fn test_vote_toggles_and_redirects() {
        let ctx = context().await;
        let user = seed_user(&ctx, "critic").await;
        let movie = ctx
            .movie_repo
            .create(&Movie::new("Alien".to_string(), user, Utc::now()))
            .await
            .unwrap();
        let form = || VoteForm {
            movie_id: Some(movie.id.to_string()),
        };

        let response = vote(State(ctx.clone()), RequireUser(user), Form(form()))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.headers()["location"], "/");
        assert_eq!(ctx.movie_board.all().await.unwrap()[0].vote_count, 1);

        vote(State(ctx.clone()), RequireUser(user), Form(form())).await.unwrap();
        assert_eq!(ctx.movie_board.all().await.unwrap()[0].vote_count, 0);
    }

    #[tokio::test]
    async fn test_vote_on_unknown_movie_is_not_found() {
        let ctx = context().await;
        let user = seed_user(&ctx, "critic").await;
        let form = VoteForm {
            movie_id: Some(Uuid::new_v4().to_string()),
        };

        let err = vote(State(ctx), RequireUser(user), Form(form))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleted_account_cannot_submit_or_vote() {
        let ctx = context().await;
        let owner = seed_user(&ctx, "owner").await;
        let movie = ctx
            .movie_repo
            .create(&Movie::new("Alien".to_string(), owner, Utc::now()))
            .await
            .unwrap();
        let ghost = Uuid::new_v4();

        let form = HomeForm {
            title: Some("Aliens".to_string()),
            ..Default::default()
        };
        let err = submit(State(ctx.clone()), RequireUser(ghost), Form(form))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Unauthorized);

        let form = HomeForm {
            method: Some("patch".to_string()),
            movie_id: Some(movie.id.to_string()),
            ..Default::default()
        };
        let err = submit(State(ctx.clone()), RequireUser(ghost), Form(form))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Unauthorized);

        let form = VoteForm {
            movie_id: Some(movie.id.to_string()),
        };
        let err = vote(State(ctx.clone()), RequireUser(ghost), Form(form))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);

        let all = ctx.movie_board.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].vote_count, 0);
    }
}
