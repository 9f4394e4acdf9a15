use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Append-only. No application code updates or deletes rows here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub user_id: i32,

    /// CREATE | UPDATE | DELETE | LOGIN | LOGOUT | REGISTER
    pub action: String,

    /// PROJECT | SKILL | EXPERIENCE | EDUCATION | CERTIFICATION | PROFILE | AUTH
    pub resource: String,

    pub resource_id: Option<i32>,

    /// JSON {"old": ..., "new": ...} snapshot for updates
    pub changes: Option<String>,

    pub ip_address: Option<String>,

    pub user_agent: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
