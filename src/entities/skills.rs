use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// "backend" | "frontend" | "database" | "devops" | "ai-ml" | "tools" | "other"
    pub category: String,

    /// "beginner" | "intermediate" | "advanced" | "expert"
    pub proficiency: String,

    pub icon: Option<String>,

    pub order: i32,

    pub visibility: bool,

    pub created_by: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
