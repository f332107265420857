use super::Vote;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    pub fn new(title: String, user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// How a movie list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieOrder {
    /// Vote count descending, then most recently updated first.
    Popularity,
    /// Most recently updated first.
    Recency,
}

/// One row of a rendered movie list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieListItem {
    pub id: Uuid,
    pub title: String,
    pub user_id: Uuid,
    pub updated_at: DateTime<Utc>,
    pub vote_count: i64,
    /// The viewing user's own votes on this movie. Empty for anonymous viewers
    /// and for lists that do not track viewer state.
    pub viewer_votes: Vec<Vote>,
}

impl MovieListItem {
    pub fn viewer_has_voted(&self) -> bool {
        !self.viewer_votes.is_empty()
    }
}
