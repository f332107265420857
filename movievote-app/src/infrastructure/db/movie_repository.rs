use super::entities::{movie, vote, Movie, Vote};
use crate::domain::{MovieListItem, MovieOrder, WeekWindow};
use chrono::{DateTime, Utc};
use sea_orm::{
    entity::*, query::*, DatabaseConnection, DbErr, FromQueryResult, JoinType, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, FromQueryResult)]
struct RankedMovieRow {
    id: Uuid,
    title: String,
    user_id: Uuid,
    updated_at: DateTime<Utc>,
    vote_count: i64,
}

#[derive(Clone)]
pub struct MovieRepository {
    db: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, movie_data: &crate::domain::Movie) -> Result<movie::Model, DbErr> {
        let active = movie::ActiveModel {
            id: Set(movie_data.id),
            title: Set(movie_data.title.clone()),
            user_id: Set(movie_data.user_id),
            created_at: Set(movie_data.created_at),
            updated_at: Set(movie_data.updated_at),
        };
        active.insert(&self.db).await
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DbErr> {
        Ok(Movie::find_by_id(id).one(&self.db).await?.is_some())
    }

    pub async fn find_for_owner(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<movie::Model>, DbErr> {
        Movie::find()
            .filter(movie::Column::Id.eq(id))
            .filter(movie::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Returns the number of movies removed: 0 when the movie is missing or
    /// belongs to someone else.
    pub async fn delete_for_owner(&self, id: Uuid, user_id: Uuid) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;
        let owned = Movie::find()
            .filter(movie::Column::Id.eq(id))
            .filter(movie::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .is_some();
        if !owned {
            txn.rollback().await?;
            return Ok(0);
        }

        // Not every backend enforces the cascade (SQLite needs a pragma), so
        // the votes go first explicitly.
        Vote::delete_many()
            .filter(vote::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        let removed = Movie::delete_many()
            .filter(movie::Column::Id.eq(id))
            .filter(movie::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?
            .rows_affected;
        txn.commit().await?;
        Ok(removed)
    }

    /// Movies with their vote counts, optionally restricted to a window of
    /// update times. Viewer votes are left empty; see [`Self::attach_viewer_votes`].
    pub async fn ranked(
        &self,
        window: Option<&WeekWindow>,
        order: MovieOrder,
    ) -> Result<Vec<MovieListItem>, DbErr> {
        let mut query = Movie::find()
            .select_only()
            .column(movie::Column::Id)
            .column(movie::Column::Title)
            .column(movie::Column::UserId)
            .column(movie::Column::UpdatedAt)
            .column_as(vote::Column::UserId.count(), "vote_count")
            .join(JoinType::LeftJoin, movie::Relation::Votes.def())
            .group_by(movie::Column::Id)
            .group_by(movie::Column::Title)
            .group_by(movie::Column::UserId)
            .group_by(movie::Column::UpdatedAt);

        if let Some(window) = window {
            query = query
                .filter(movie::Column::UpdatedAt.gte(window.from))
                .filter(movie::Column::UpdatedAt.lt(window.to));
        }

        query = match order {
            MovieOrder::Popularity => query
                .order_by(vote::Column::UserId.count(), Order::Desc)
                .order_by_desc(movie::Column::UpdatedAt),
            MovieOrder::Recency => query.order_by_desc(movie::Column::UpdatedAt),
        };

        let rows = query.into_model::<RankedMovieRow>().all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|row| MovieListItem {
                id: row.id,
                title: row.title,
                user_id: row.user_id,
                updated_at: row.updated_at,
                vote_count: row.vote_count,
                viewer_votes: Vec::new(),
            })
            .collect())
    }

    /// Fills `viewer_votes` with the viewer's own votes, in one query.
    pub async fn attach_viewer_votes(
        &self,
        items: &mut [MovieListItem],
        viewer: Uuid,
    ) -> Result<(), DbErr> {
        if items.is_empty() {
            return Ok(());
        }

        let movie_ids: Vec<Uuid> = items.iter().map(|m| m.id).collect();
        let votes = Vote::find()
            .filter(vote::Column::UserId.eq(viewer))
            .filter(vote::Column::MovieId.is_in(movie_ids))
            .all(&self.db)
            .await?;

        let mut by_movie: HashMap<Uuid, Vec<crate::domain::Vote>> = HashMap::new();
        for v in votes {
            by_movie.entry(v.movie_id).or_default().push(v.into());
        }
        for item in items.iter_mut() {
            item.viewer_votes = by_movie.remove(&item.id).unwrap_or_default();
        }
        Ok(())
    }
}
