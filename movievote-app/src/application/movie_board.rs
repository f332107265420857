use crate::domain::{MovieListItem, MovieOrder, WeekPolicy, WeekWindow};
use crate::infrastructure::db::MovieRepository;
use chrono::{DateTime, Utc};
use movievote_errors::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two lists shown on the front page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeBoard {
    pub window: WeekWindow,
    /// This week's movies, most voted first.
    pub weekly: Vec<MovieListItem>,
    /// This week's movies, most recently updated first.
    pub recent: Vec<MovieListItem>,
}

pub struct MovieBoard {
    movies: MovieRepository,
    policy: WeekPolicy,
}

impl MovieBoard {
    pub fn new(movies: MovieRepository, policy: WeekPolicy) -> Self {
        Self { movies, policy }
    }

    /// Every movie, most voted first.
    pub async fn all(&self) -> Result<Vec<MovieListItem>, AppError> {
        self.movies
            .ranked(None, MovieOrder::Popularity)
            .await
            .map_err(AppError::database)
    }

    pub async fn home(
        &self,
        viewer: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<HomeBoard, AppError> {
        let window = WeekWindow::for_instant(now, self.policy);
        let weekly = self.windowed(viewer, &window, MovieOrder::Popularity).await?;
        let recent = self.windowed(viewer, &window, MovieOrder::Recency).await?;
        tracing::debug!(
            from = %window.from,
            to = %window.to,
            weekly = weekly.len(),
            "Loaded home board"
        );
        Ok(HomeBoard {
            window,
            weekly,
            recent,
        })
    }

    async fn windowed(
        &self,
        viewer: Option<Uuid>,
        window: &WeekWindow,
        order: MovieOrder,
    ) -> Result<Vec<MovieListItem>, AppError> {
        let mut items = self
            .movies
            .ranked(Some(window), order)
            .await
            .map_err(AppError::database)?;
        if let Some(viewer) = viewer {
            self.movies
                .attach_viewer_votes(&mut items, viewer)
                .await
                .map_err(AppError::database)?;
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;
    use crate::infrastructure::db::testing::{memory_db, seed_user};
    use crate::infrastructure::db::VoteRepository;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_home_board_scopes_to_week_and_marks_viewer_votes() {
        let db = memory_db().await;
        let movies = MovieRepository::new(db.clone());
        let votes = VoteRepository::new(db.clone());
        let viewer = seed_user(&db, "viewer").await;
        let other = seed_user(&db, "other").await;

        let mut ids = Vec::new();
        for (title, when) in [("Jaws", at(10, 9)), ("Rocky", at(11, 9)), ("Old", at(1, 9))] {
            let movie = Movie::new(title.to_string(), other, when);
            ids.push(movies.create(&movie).await.unwrap().id);
        }
        votes.toggle(viewer, ids[0]).await.unwrap();
        votes.toggle(other, ids[0]).await.unwrap();
        votes.toggle(other, ids[1]).await.unwrap();

        let board = MovieBoard::new(movies, WeekPolicy::Rolling);
        let home = board.home(Some(viewer), at(12, 15)).await.unwrap();

        let weekly: Vec<(&str, bool)> = home
            .weekly
            .iter()
            .map(|m| (m.title.as_str(), m.viewer_has_voted()))
            .collect();
        assert_eq!(weekly, vec![("Jaws", true), ("Rocky", false)]);

        let recent: Vec<&str> = home.recent.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(recent, vec!["Rocky", "Jaws"]);

        let all = board.all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|m| m.viewer_votes.is_empty()));
    }

    #[tokio::test]
    async fn test_anonymous_viewer_has_no_votes() {
        let db = memory_db().await;
        let movies = MovieRepository::new(db.clone());
        let owner = seed_user(&db, "owner").await;
        let movie = Movie::new("Up".to_string(), owner, at(11, 9));
        let id = movies.create(&movie).await.unwrap().id;
        VoteRepository::new(db).toggle(owner, id).await.unwrap();

        let board = MovieBoard::new(movies, WeekPolicy::Calendar);
        let home = board.home(None, at(12, 15)).await.unwrap();
        assert_eq!(home.weekly.len(), 1);
        assert_eq!(home.weekly[0].vote_count, 1);
        assert!(!home.weekly[0].viewer_has_voted());
        assert_eq!(home.window.from, at(9, 0));
    }
}
