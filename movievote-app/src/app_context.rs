use crate::application::{MovieBoard, SubmitMovie, ToggleVote};
use crate::config::Config;
use crate::domain::WeekPolicy;
use crate::infrastructure::auth::GoogleOAuth;
use crate::infrastructure::db::{self, MovieRepository, UserRepository, VoteRepository};
use movievote_errors::AppError;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub movie_board: Arc<MovieBoard>,
    pub submit_movie: Arc<SubmitMovie>,
    pub toggle_vote: Arc<ToggleVote>,
    pub movie_repo: MovieRepository,
    pub user_repo: UserRepository,
    pub oauth: Arc<GoogleOAuth>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, oauth: GoogleOAuth, week_policy: WeekPolicy) -> Self {
        let movie_repo = MovieRepository::new(db.clone());
        let vote_repo = VoteRepository::new(db.clone());
        Self {
            movie_board: Arc::new(MovieBoard::new(movie_repo.clone(), week_policy)),
            submit_movie: Arc::new(SubmitMovie::new(movie_repo.clone())),
            toggle_vote: Arc::new(ToggleVote::new(movie_repo.clone(), vote_repo)),
            movie_repo,
            user_repo: UserRepository::new(db),
            oauth: Arc::new(oauth),
        }
    }

    /// Connects to the database, brings the schema up to date and wires the use cases.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let db = db::create_connection(&config.database)
            .await
            .map_err(AppError::database)?;
        db::run_migrations(&db).await.map_err(AppError::database)?;

        let oauth = GoogleOAuth::new(&config.google)?;
        tracing::info!("Week window policy: {:?}", config.week_policy);
        Ok(Self::new(db, oauth, config.week_policy))
    }
}
