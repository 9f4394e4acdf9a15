use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "experiences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub company: String,

    pub position: String,

    pub location: String,

    /// ISO date, e.g. "2023-04-01"
    pub start_date: String,

    pub end_date: Option<String>,

    pub current: bool,

    pub description: String,

    /// JSON array of strings
    pub responsibilities: String,

    /// JSON array of strings
    pub achievements: String,

    /// JSON array of strings
    pub technologies: String,

    pub order: i32,

    pub visibility: bool,

    pub created_by: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
