use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::profiles;

/// The profile is a singleton per user; the public site renders the first
/// visible one.
pub struct ProfileRepository {
    conn: DatabaseConnection,
}

impl ProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_public(&self, include_hidden: bool) -> Result<Option<profiles::Model>> {
        let mut query = profiles::Entity::find();

        if !include_hidden {
            query = query.filter(profiles::Column::Visibility.eq(true));
        }

        query
            .one(&self.conn)
            .await
            .context("Failed to fetch profile")
    }

    pub async fn find_by_user(&self, user_id: i32) -> Result<Option<profiles::Model>> {
        profiles::Entity::find()
            .filter(profiles::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to fetch profile by user")
    }

    pub async fn insert(&self, model: profiles::ActiveModel) -> Result<profiles::Model> {
        model
            .insert(&self.conn)
            .await
            .context("Failed to insert profile")
    }

    pub async fn update(&self, model: profiles::ActiveModel) -> Result<profiles::Model> {
        model
            .update(&self.conn)
            .await
            .context("Failed to update profile")
    }
}
