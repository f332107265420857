use crate::domain::Movie;
use crate::infrastructure::db::MovieRepository;
use crate::infrastructure::security::InputSanitizer;
use chrono::Utc;
use movievote_errors::AppError;
use uuid::Uuid;

pub struct SubmitMovie {
    movies: MovieRepository,
}

impl SubmitMovie {
    pub fn new(movies: MovieRepository) -> Self {
        Self { movies }
    }

    pub async fn execute(&self, user_id: Uuid, raw_title: Option<&str>) -> Result<Movie, AppError> {
        let title = InputSanitizer::validate_title(raw_title)?;
        let movie = Movie::new(title, user_id, Utc::now());

        let model = self.movies.create(&movie).await.map_err(AppError::database)?;
        tracing::info!(%user_id, movie_id = %model.id, "Movie added: {}", model.title);
        Ok(model.into())
    }
}
