use super::entities::{user, User};
use crate::domain::GoogleProfile;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<crate::domain::User>, DbErr> {
        Ok(User::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
    }

    /// Inserts the account on first login, refreshes its profile afterwards.
    pub async fn upsert(&self, profile: &GoogleProfile) -> Result<crate::domain::User, DbErr> {
        let now = chrono::Utc::now();
        let model = match self.find_by_google_id(&profile.sub).await? {
            Some(existing) => {
                let mut active: user::ActiveModel = existing.into();
                active.email = Set(profile.email.clone());
                active.name = Set(profile.name.clone());
                active.avatar_url = Set(profile.picture.clone());
                active.updated_at = Set(Some(now));
                active.update(&self.db).await?
            }
            None => {
                let active = user::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    google_id: Set(profile.sub.clone()),
                    email: Set(profile.email.clone()),
                    name: Set(profile.name.clone()),
                    avatar_url: Set(profile.picture.clone()),
                    created_at: Set(Some(now)),
                    updated_at: Set(Some(now)),
                };
                active.insert(&self.db).await?
            }
        };
        Ok(model.into())
    }
}
