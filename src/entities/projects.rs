use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(unique)]
    pub slug: String,

    pub short_description: String,

    pub description: String,

    /// JSON array of technology names
    pub technologies: String,

    /// "web" | "mobile" | "backend" | "ai-ml" | "opensource" | "other"
    pub category: String,

    /// JSON array of image URLs
    pub images: String,

    pub live_url: Option<String>,

    pub github_url: Option<String>,

    pub featured: bool,

    /// Display position; lower sorts first, ties fall back to created_at.
    pub order: i32,

    /// "draft" | "published" | "archived"
    pub status: String,

    pub visibility: bool,

    pub views: i64,

    pub created_by: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
