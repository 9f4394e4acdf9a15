use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::guard::{AdminUser, OptionalUser};
use super::types::{decode_string_list, encode_string_list};
use super::validation::require;
use super::{ApiError, ApiResponse, AppState};
use crate::db::ContentEntity;
use crate::entities::experiences;
use crate::services::{AuditAction, ClientMeta};

#[derive(Debug, Serialize)]
pub struct ExperienceDto {
    pub id: i32,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    pub order: i32,
    pub visibility: bool,
    pub created_by: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<experiences::Model> for ExperienceDto {
    fn from(model: experiences::Model) -> Self {
        Self {
            id: model.id,
            company: model.company,
            position: model.position,
            location: model.location,
            start_date: model.start_date,
            end_date: model.end_date,
            current: model.current,
            description: model.description,
            responsibilities: decode_string_list(&model.responsibilities),
            achievements: decode_string_list(&model.achievements),
            technologies: decode_string_list(&model.technologies),
            order: model.order,
            visibility: model.visibility,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListExperiencesParams {
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExperienceRequest {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub order: i32,
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExperienceRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub order: Option<i32>,
    pub visibility: Option<bool>,
}

/// GET /experiences
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    Query(params): Query<ListExperiencesParams>,
) -> Result<Json<ApiResponse<Vec<ExperienceDto>>>, ApiError> {
    let include_hidden = user.is_admin();
    let visibility = include_hidden.then_some(params.visibility).flatten();

    let items = state
        .store
        .content::<experiences::Entity>()
        .list(include_hidden, visibility, None)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to list experiences: {e}")))?;

    Ok(Json(ApiResponse::success(
        items.into_iter().map(ExperienceDto::from).collect(),
    )))
}

/// POST /experiences (admin)
pub async fn create(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Json(payload): Json<CreateExperienceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExperienceDto>>), ApiError> {
    require(&payload.company, "Company")?;
    require(&payload.position, "Position")?;
    require(&payload.location, "Location")?;
    require(&payload.start_date, "Start date")?;
    require(&payload.description, "Description")?;

    let now = chrono::Utc::now().to_rfc3339();

    let active = experiences::ActiveModel {
        company: Set(payload.company),
        position: Set(payload.position),
        location: Set(payload.location),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        current: Set(payload.current),
        description: Set(payload.description),
        responsibilities: Set(encode_string_list(&payload.responsibilities)),
        achievements: Set(encode_string_list(&payload.achievements)),
        technologies: Set(encode_string_list(&payload.technologies)),
        order: Set(payload.order),
        visibility: Set(payload.visibility.unwrap_or(true)),
        created_by: Set(admin.id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let experience = state
        .store
        .content::<experiences::Entity>()
        .insert(active)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create experience: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Create,
            experiences::Entity::RESOURCE,
            Some(experience.id),
            None,
            &meta,
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            experience.into(),
            "Experience created successfully",
        )),
    ))
}

/// PATCH /experiences/{id} (admin)
pub async fn update(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateExperienceRequest>,
) -> Result<Json<ApiResponse<ExperienceDto>>, ApiError> {
    let content = state.store.content::<experiences::Entity>();

    let existing = content
        .get(id, true)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch experience: {e}")))?
        .ok_or_else(|| ApiError::not_found("Experience", id))?;

    let before = serde_json::to_value(&existing)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot experience: {e}")))?;

    let mut active = existing.clone().into_active_model();

    if let Some(company) = payload.company {
        require(&company, "Company")?;
        active.company = Set(company);
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
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
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(responsibilities) = payload.responsibilities {
        active.responsibilities = Set(encode_string_list(&responsibilities));
    }
    if let Some(achievements) = payload.achievements {
        active.achievements = Set(encode_string_list(&achievements));
    }
    if let Some(technologies) = payload.technologies {
        active.technologies = Set(encode_string_list(&technologies));
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
        .map_err(|e| ApiError::internal(format!("Failed to update experience: {e}")))?;

    let after = serde_json::to_value(&updated)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot experience: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Update,
            experiences::Entity::RESOURCE,
            Some(updated.id),
            Some(serde_json::json!({ "old": before, "new": after })),
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        updated.into(),
        "Experience updated successfully",
    )))
}

/// DELETE /experiences/{id} (admin)
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = state
        .store
        .content::<experiences::Entity>()
        .delete(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete experience: {e}")))?;

    if !deleted {
        return Err(ApiError::not_found("Experience", id));
    }

    state
        .audit
        .record(
            admin.id,
            AuditAction::Delete,
            experiences::Entity::RESOURCE,
            Some(id),
            None,
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        (),
        "Experience deleted successfully",
    )))
}
