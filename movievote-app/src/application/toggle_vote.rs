use crate::domain::VoteToggle;
use crate::infrastructure::db::{MovieRepository, VoteRepository};
use crate::infrastructure::security::InputSanitizer;
use movievote_errors::AppError;
use uuid::Uuid;

pub struct ToggleVote {
    movies: MovieRepository,
    votes: VoteRepository,
}

impl ToggleVote {
    pub fn new(movies: MovieRepository, votes: VoteRepository) -> Self {
        Self { movies, votes }
    }

    /// Validates the submitted movie id, then flips the user's vote on it.
    pub async fn execute(
        &self,
        user_id: Uuid,
        raw_movie_id: Option<&str>,
    ) -> Result<VoteToggle, AppError> {
        let movie_id = InputSanitizer::validate_movie_id(raw_movie_id)?;

        if !self.movies.exists(movie_id).await.map_err(AppError::database)? {
            return Err(AppError::NotFound);
        }

        let outcome = self
            .votes
            .toggle(user_id, movie_id)
            .await
            .map_err(AppError::database)?;
        tracing::info!(%user_id, %movie_id, voted = outcome.voted(), "Vote toggled");
        Ok(outcome)
    }
}
