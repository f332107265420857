use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub user_id: uuid::Uuid,
    pub movie_id: uuid::Uuid,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Vote {
    pub fn new(user_id: uuid::Uuid, movie_id: uuid::Uuid) -> Self {
        Self {
            user_id,
            movie_id,
            created_at: None,
        }
    }
}

/// State of the (user, movie) pair after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteToggle {
    Cast,
    Withdrawn,
}

impl VoteToggle {
    pub fn voted(self) -> bool {
        matches!(self, Self::Cast)
    }
}
