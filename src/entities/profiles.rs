use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Singleton per user: one profile row keyed by `user_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub user_id: i32,

    pub full_name: String,

    pub tagline: String,

    pub bio: String,

    pub location: String,

    pub email: String,

    pub phone: Option<String>,

    pub avatar: Option<String>,

    pub resume: Option<String>,

    /// JSON array of {platform, url, icon?}
    pub social_links: String,

    pub visibility: bool,

    pub created_by: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
