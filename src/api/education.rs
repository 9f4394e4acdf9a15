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
use crate::entities::education;
use crate::services::{AuditAction, ClientMeta};

#[derive(Debug, Serialize)]
pub struct EducationDto {
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

impl From<education::Model> for EducationDto {
    fn from(model: education::Model) -> Self {
        Self {
            id: model.id,
            institution: model.institution,
            degree: model.degree,
            field: model.field,
            location: model.location,
            start_date: model.start_date,
            end_date: model.end_date,
            current: model.current,
            grade: model.grade,
            description: model.description,
            order: model.order,
            visibility: model.visibility,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListEducationParams {
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEducationRequest {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub grade: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub order: i32,
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEducationRequest {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub visibility: Option<bool>,
}

/// GET /education
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    Query(params): Query<ListEducationParams>,
) -> Result<Json<ApiResponse<Vec<EducationDto>>>, ApiError> {
    let include_hidden = user.is_admin();
    let visibility = include_hidden.then_some(params.visibility).flatten();

    let items = state
        .store
        .content::<education::Entity>()
        .list(include_hidden, visibility, None)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to list education: {e}")))?;

    Ok(Json(ApiResponse::success(
        items.into_iter().map(EducationDto::from).collect(),
    )))
}

/// POST /education (admin)
pub async fn create(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Json(payload): Json<CreateEducationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EducationDto>>), ApiError> {
    require(&payload.institution, "Institution")?;
    require(&payload.degree, "Degree")?;
    require(&payload.field, "Field")?;
    require(&payload.location, "Location")?;
    require(&payload.start_date, "Start date")?;

    let now = chrono::Utc::now().to_rfc3339();

    let active = education::ActiveModel {
        institution: Set(payload.institution),
        degree: Set(payload.degree),
        field: Set(payload.field),
        location: Set(payload.location),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        current: Set(payload.current),
        grade: Set(payload.grade),
        description: Set(payload.description),
        order: Set(payload.order),
        visibility: Set(payload.visibility.unwrap_or(true)),
        created_by: Set(admin.id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let entry = state
        .store
        .content::<education::Entity>()
        .insert(active)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create education entry: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Create,
            education::Entity::RESOURCE,
            Some(entry.id),
            None,
            &meta,
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            entry.into(),
            "Education entry created successfully",
        )),
    ))
}

/// PATCH /education/{id} (admin)
pub async fn update(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEducationRequest>,
) -> Result<Json<ApiResponse<EducationDto>>, ApiError> {
    let content = state.store.content::<education::Entity>();

    let existing = content
        .get(id, true)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch education entry: {e}")))?
        .ok_or_else(|| ApiError::not_found("Education entry", id))?;

    let before = serde_json::to_value(&existing)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot education entry: {e}")))?;

    let mut active = existing.clone().into_active_model();

    if let Some(institution) = payload.institution {
        require(&institution, "Institution")?;
        active.institution = Set(institution);
    }
    if let Some(degree) = payload.degree {
        active.degree = Set(degree);
    }
    if let Some(field) = payload.field {
        active.field = Set(field);
    }
    if let Some(location) = payload.location {
        active.location = Set(location);
    }
    if let Some(start_date) = payload.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = payload.end_date {
        active.end_date = Set(Some(end_date));
    }
    if let Some(current) = payload.current {
        active.current = Set(current);
    }
    if let Some(grade) = payload.grade {
        active.grade = Set(Some(grade));
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
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
        .map_err(|e| ApiError::internal(format!("Failed to update education entry: {e}")))?;

    let after = serde_json::to_value(&updated)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot education entry: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Update,
            education::Entity::RESOURCE,
            Some(updated.id),
            Some(serde_json::json!({ "old": before, "new": after })),
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        updated.into(),
        "Education entry updated successfully",
    )))
}

/// DELETE /education/{id} (admin)
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = state
        .store
        .content::<education::Entity>()
        .delete(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete education entry: {e}")))?;

    if !deleted {
        return Err(ApiError::not_found("Education entry", id));
    }

    state
        .audit
        .record(
            admin.id,
            AuditAction::Delete,
            education::Entity::RESOURCE,
            Some(id),
            None,
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        (),
        "Education entry deleted successfully",
    )))
}
