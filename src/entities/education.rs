use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "education")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub institution: String,

    pub degree: String,

    pub field: String,

    pub location: String,

    pub start_date: String,

    pub end_date: Option<String>,

    pub current: bool,

    pub grade: Option<String>,

    pub description: Option<String>,

    pub order: i32,

    pub visibility: bool,

    pub created_by: i32,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
