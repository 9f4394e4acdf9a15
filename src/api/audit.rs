use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::guard::AdminUser;
use super::{ApiError, ApiResponse, AppState};
use crate::constants::pagination;
use crate::db::AuditQuery;
use crate::entities::audit_logs;

#[derive(Debug, Deserialize)]
pub struct AuditParams {
    pub resource: Option<String>,
    pub action: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct AuditLogDto {
    pub id: i64,
    pub user_id: i32,
    pub action: String,
    pub resource: String,
    pub resource_id: Option<i32>,
    pub changes: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: String,
}

impl From<audit_logs::Model> for AuditLogDto {
    fn from(model: audit_logs::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            resource: model.resource,
            resource_id: model.resource_id,
            changes: model
                .changes
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuditListResponse {
    pub logs: Vec<AuditLogDto>,
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
}

/// GET /audit (admin)
pub async fn list(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<AuditParams>,
) -> Result<Json<ApiResponse<AuditListResponse>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(pagination::DEFAULT_AUDIT_LIMIT)
        .clamp(1, pagination::MAX_PAGE_SIZE);
    let skip = params.skip.unwrap_or(0);

    let query = AuditQuery {
        resource: params.resource,
        action: params.action,
        limit,
        skip,
    };

    let (logs, total) = state
        .store
        .audit()
        .query(&query)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to query audit log: {e}")))?;

    Ok(Json(ApiResponse::success(AuditListResponse {
        logs: logs.into_iter().map(AuditLogDto::from).collect(),
        total,
        limit,
        skip,
    })))
}
