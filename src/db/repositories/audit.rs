use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::audit_logs;

/// One row to append. `changes` is a pre-serialized JSON snapshot.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub user_id: i32,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<i32>,
    pub changes: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default)]
pub struct AuditQuery {
    pub resource: Option<String>,
    pub action: Option<String>,
    pub limit: u64,
    pub skip: u64,
}

/// Append-only: this repository exposes no update or delete.
pub struct AuditRepository {
    conn: DatabaseConnection,
}

impl AuditRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn append(&self, entry: AuditEntry) -> Result<()> {
        let active = audit_logs::ActiveModel {
            user_id: Set(entry.user_id),
            action: Set(entry.action),
            resource: Set(entry.resource),
            resource_id: Set(entry.resource_id),
            changes: Set(entry.changes),
            ip_address: Set(entry.ip_address),
            user_agent: Set(entry.user_agent),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        audit_logs::Entity::insert(active)
            .exec(&self.conn)
            .await
            .context("Failed to append audit entry")?;

        Ok(())
    }

    /// Newest first, filtered by resource and/or action.
    pub async fn query(&self, query: &AuditQuery) -> Result<(Vec<audit_logs::Model>, u64)> {
        let mut select = audit_logs::Entity::find()
            .order_by_desc(audit_logs::Column::CreatedAt)
            .order_by_desc(audit_logs::Column::Id);

        if let Some(resource) = &query.resource {
            select = select.filter(audit_logs::Column::Resource.eq(resource.clone()));
        }

        if let Some(action) = &query.action {
            select = select.filter(audit_logs::Column::Action.eq(action.clone()));
        }

        let total = select
            .clone()
            .count(&self.conn)
            .await
            .context("Failed to count audit entries")?;

        let items = select
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.conn)
            .await
            .context("Failed to query audit entries")?;

        Ok((items, total))
    }
}
