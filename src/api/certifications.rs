use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::guard::{AdminUser, OptionalUser};
use super::validation::require;
use super::{ApiError, ApiResponse, AppState};
use crate::db::ContentEntity;
use crate::entities::certifications;
use crate::services::{AuditAction, ClientMeta};

#[derive(Debug, Serialize)]
pub struct CertificationDto {
    pub id: i32,
    pub title: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image: Option<String>,
    pub order: i32,
    pub visibility: bool,
    pub created_by: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<certifications::Model> for CertificationDto {
    fn from(model: certifications::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            issuer: model.issuer,
            issue_date: model.issue_date,
            expiry_date: model.expiry_date,
            credential_id: model.credential_id,
            credential_url: model.credential_url,
            image: model.image,
            order: model.order,
            visibility: model.visibility,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListCertificationsParams {
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCertificationRequest {
    pub title: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub order: i32,
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCertificationRequest {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image: Option<String>,
    pub order: Option<i32>,
    pub visibility: Option<bool>,
}

/// GET /certifications
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    Query(params): Query<ListCertificationsParams>,
) -> Result<Json<ApiResponse<Vec<CertificationDto>>>, ApiError> {
    let include_hidden = user.is_admin();
    let visibility = include_hidden.then_some(params.visibility).flatten();

    let items = state
        .store
        .content::<certifications::Entity>()
        .list(include_hidden, visibility, None)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to list certifications: {e}")))?;

    Ok(Json(ApiResponse::success(
        items.into_iter().map(CertificationDto::from).collect(),
    )))
}

/// POST /certifications (admin)
pub async fn create(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Json(payload): Json<CreateCertificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CertificationDto>>), ApiError> {
    require(&payload.title, "Title")?;
    require(&payload.issuer, "Issuer")?;
    require(&payload.issue_date, "Issue date")?;

    let now = chrono::Utc::now().to_rfc3339();

    let active = certifications::ActiveModel {
        title: Set(payload.title),
        issuer: Set(payload.issuer),
        issue_date: Set(payload.issue_date),
        expiry_date: Set(payload.expiry_date),
        credential_id: Set(payload.credential_id),
        credential_url: Set(payload.credential_url),
        image: Set(payload.image),
        order: Set(payload.order),
        visibility: Set(payload.visibility.unwrap_or(true)),
        created_by: Set(admin.id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let certification = state
        .store
        .content::<certifications::Entity>()
        .insert(active)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create certification: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Create,
            certifications::Entity::RESOURCE,
            Some(certification.id),
            None,
            &meta,
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            certification.into(),
            "Certification created successfully",
        )),
    ))
}

/// PATCH /certifications/{id} (admin)
pub async fn update(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCertificationRequest>,
) -> Result<Json<ApiResponse<CertificationDto>>, ApiError> {
    let content = state.store.content::<certifications::Entity>();

    let existing = content
        .get(id, true)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch certification: {e}")))?
        .ok_or_else(|| ApiError::not_found("Certification", id))?;

    let before = serde_json::to_value(&existing)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot certification: {e}")))?;

    let mut active = existing.clone().into_active_model();

    if let Some(title) = payload.title {
        require(&title, "Title")?;
        active.title = Set(title);
    }
    if let Some(issuer) = payload.issuer {
        active.issuer = Set(issuer);
    }
    if let Some(issue_date) = payload.issue_date {
        active.issue_date = Set(issue_date);
    }
    if let Some(expiry_date) = payload.expiry_date {
        active.expiry_date = Set(Some(expiry_date));
    }
    if let Some(credential_id) = payload.credential_id {
        active.credential_id = Set(Some(credential_id));
    }
    if let Some(credential_url) = payload.credential_url {
        active.credential_url = Set(Some(credential_url));
    }
    if let Some(image) = payload.image {
        active.image = Set(Some(image));
    }
    if let Some(visibility) = payload.visibility {
        active.visibility = Set(visibility);
    }
    if let Some(order) = payload.order {
        let clamped = content
            .clamp_order(&existing, order)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to validate reorder: {e}")))?;
        if let Some(order) = clamped {
            active.order = Set(order);
        }
    }

    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let updated = content
        .update(active)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to update certification: {e}")))?;

    let after = serde_json::to_value(&updated)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot certification: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Update,
            certifications::Entity::RESOURCE,
            Some(updated.id),
            Some(serde_json::json!({ "old": before, "new": after })),
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        updated.into(),
        "Certification updated successfully",
    )))
}

/// DELETE /certifications/{id} (admin)
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = state
        .store
        .content::<certifications::Entity>()
        .delete(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete certification: {e}")))?;

    if !deleted {
        return Err(ApiError::not_found("Certification", id));
    }

    state
        .audit
        .record(
            admin.id,
            AuditAction::Delete,
            certifications::Entity::RESOURCE,
            Some(id),
            None,
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        (),
        "Certification deleted successfully",
    )))
}
