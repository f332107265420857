use super::entities::{vote, Vote};
use crate::domain::VoteToggle;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub async fn exists(&self, user_id: Uuid, movie_id: Uuid) -> Result<bool, DbErr> {
        let vote = Vote::find_by_id((user_id, movie_id)).one(&self.db).await?;
        Ok(vote.is_some())
    }

    #[cfg(test)]
    pub async fn count_for_movie(&self, movie_id: Uuid) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        Vote::find()
            .filter(vote::Column::MovieId.eq(movie_id))
            .count(&self.db)
            .await
    }

    /// Flips the vote for the pair in one transaction.
    ///
    /// The delete runs first; only when it removed nothing is a vote inserted,
    /// with `ON CONFLICT DO NOTHING` on the (user_id, movie_id) key. Two racing
    /// toggles can therefore never leave two rows behind.
    pub async fn toggle(&self, user_id: Uuid, movie_id: Uuid) -> Result<VoteToggle, DbErr> {
        let txn = self.db.begin().await?;
        let outcome = Self::toggle_in(&txn, user_id, movie_id).await?;
        txn.commit().await?;
        Ok(outcome)
    }

    async fn toggle_in<C>(conn: &C, user_id: Uuid, movie_id: Uuid) -> Result<VoteToggle, DbErr>
    where
        C: ConnectionTrait,
    {
        let removed = Vote::delete_many()
            .filter(vote::Column::UserId.eq(user_id))
            .filter(vote::Column::MovieId.eq(movie_id))
            .exec(conn)
            .await?
            .rows_affected;
        if removed > 0 {
            return Ok(VoteToggle::Withdrawn);
        }

        if !Self::cast_in(conn, user_id, movie_id).await? {
            tracing::debug!(%user_id, %movie_id, "Concurrent toggle already cast this vote");
        }
        Ok(VoteToggle::Cast)
    }

    /// Inserts the vote unless the pair already has one. Returns whether a
    /// row was written.
    async fn cast_in<C>(conn: &C, user_id: Uuid, movie_id: Uuid) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let active = vote::ActiveModel {
            user_id: Set(user_id),
            movie_id: Set(movie_id),
            created_at: Set(Some(chrono::Utc::now())),
        };
        let inserted = Vote::insert(active)
            .on_conflict(
                OnConflict::columns([vote::Column::UserId, vote::Column::MovieId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await?;
        Ok(inserted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Movie;
    use crate::infrastructure::db::testing::{memory_db, seed_user};
    use crate::infrastructure::db::MovieRepository;

    async fn movie(db: &DatabaseConnection, owner: Uuid) -> Uuid {
        let movie = Movie::new("Heat".to_string(), owner, chrono::Utc::now());
        MovieRepository::new(db.clone()).create(&movie).await.unwrap().id
    }

    #[tokio::test]
    async fn test_toggle_twice_returns_to_no_vote() {
        let db = memory_db().await;
        let votes = VoteRepository::new(db.clone());
        let user = seed_user(&db, "voter").await;
        let movie_id = movie(&db, user).await;

        assert_eq!(votes.toggle(user, movie_id).await.unwrap(), VoteToggle::Cast);
        assert!(votes.exists(user, movie_id).await.unwrap());
        assert_eq!(votes.count_for_movie(movie_id).await.unwrap(), 1);

        assert_eq!(votes.toggle(user, movie_id).await.unwrap(), VoteToggle::Withdrawn);
        assert!(!votes.exists(user, movie_id).await.unwrap());
        assert_eq!(votes.count_for_movie(movie_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_votes_are_per_user() {
        let db = memory_db().await;
        let votes = VoteRepository::new(db.clone());
        let alice = seed_user(&db, "alice").await;
        let bob = seed_user(&db, "bob").await;
        let movie_id = movie(&db, alice).await;

        votes.toggle(alice, movie_id).await.unwrap();
        votes.toggle(bob, movie_id).await.unwrap();
        assert_eq!(votes.count_for_movie(movie_id).await.unwrap(), 2);

        votes.toggle(bob, movie_id).await.unwrap();
        assert!(votes.exists(alice, movie_id).await.unwrap());
        assert!(!votes.exists(bob, movie_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_cast_on_existing_vote_is_absorbed_by_key() {
        let db = memory_db().await;
        let votes = VoteRepository::new(db.clone());
        let user = seed_user(&db, "racer").await;
        let movie_id = movie(&db, user).await;

        // A second toggle that also saw no vote reaches the insert after the first committed.
        assert_eq!(votes.toggle(user, movie_id).await.unwrap(), VoteToggle::Cast);
        let txn = db.begin().await.unwrap();
        let inserted = VoteRepository::cast_in(&txn, user, movie_id).await.unwrap();
        txn.commit().await.unwrap();

        assert!(!inserted);
        assert_eq!(votes.count_for_movie(movie_id).await.unwrap(), 1);
        assert!(votes.exists(user, movie_id).await.unwrap());
    }
}
