pub mod entities;
mod movie_repository;
mod user_repository;
mod vote_repository;

pub use movie_repository::MovieRepository;
pub use user_repository::UserRepository;
pub use vote_repository::VoteRepository;

use crate::config::DatabaseSettings;
use entities::{movie, Movie, User, Vote};
use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;

pub async fn create_connection(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(settings.url.as_str());
    opt.max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Creates any missing tables from the entity definitions.
///
/// Order matters for the foreign keys: users, then movies, then votes.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Movie),
        schema.create_table_from_entity(Vote),
    ];
    for table in tables.iter_mut() {
        table.if_not_exists();
        db.execute(backend.build(&*table)).await?;
    }

    let updated_at_index = Index::create()
        .if_not_exists()
        .name("idx_movies_updated_at")
        .table(Movie)
        .col(movie::Column::UpdatedAt)
        .to_owned();
    db.execute(backend.build(&updated_at_index)).await?;

    tracing::info!("Database schema is up to date");
    Ok(())
}
