use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, Condition, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::guard::{AdminUser, OptionalUser};
use super::validation::{SKILL_CATEGORIES, SKILL_PROFICIENCIES, one_of, require};
use super::{ApiError, ApiResponse, AppState};
use crate::db::ContentEntity;
use crate::entities::skills;
use crate::services::{AuditAction, ClientMeta};

#[derive(Debug, Serialize)]
pub struct SkillDto {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub proficiency: String,
    pub icon: Option<String>,
    pub order: i32,
    pub visibility: bool,
    pub created_by: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<skills::Model> for SkillDto {
    fn from(model: skills::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            proficiency: model.proficiency,
            icon: model.icon,
            order: model.order,
            visibility: model.visibility,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListSkillsParams {
    pub category: Option<String>,
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSkillRequest {
    pub name: String,
    pub category: String,
    pub proficiency: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub order: i32,
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSkillRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub proficiency: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i32>,
    pub visibility: Option<bool>,
}

/// GET /skills
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    Query(params): Query<ListSkillsParams>,
) -> Result<Json<ApiResponse<Vec<SkillDto>>>, ApiError> {
    let include_hidden = user.is_admin();
    let visibility = include_hidden.then_some(params.visibility).flatten();

    let category = params
        .category
        .map(|category| Condition::all().add(skills::Column::Category.eq(category)));

    let items = state
        .store
        .content::<skills::Entity>()
        .list(include_hidden, visibility, category)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to list skills: {e}")))?;

    Ok(Json(ApiResponse::success(
        items.into_iter().map(SkillDto::from).collect(),
    )))
}

/// POST /skills (admin)
pub async fn create(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Json(payload): Json<CreateSkillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SkillDto>>), ApiError> {
    require(&payload.name, "Name")?;
    one_of(&payload.category, SKILL_CATEGORIES, "Category")?;
    one_of(&payload.proficiency, SKILL_PROFICIENCIES, "Proficiency")?;

    let now = chrono::Utc::now().to_rfc3339();

    let active = skills::ActiveModel {
        name: Set(payload.name),
        category: Set(payload.category),
        proficiency: Set(payload.proficiency),
        icon: Set(payload.icon),
        order: Set(payload.order),
        visibility: Set(payload.visibility.unwrap_or(true)),
        created_by: Set(admin.id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let skill = state
        .store
        .content::<skills::Entity>()
        .insert(active)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create skill: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Create,
            skills::Entity::RESOURCE,
            Some(skill.id),
            None,
            &meta,
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            skill.into(),
            "Skill created successfully",
        )),
    ))
}

/// PATCH /skills/{id} (admin)
pub async fn update(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSkillRequest>,
) -> Result<Json<ApiResponse<SkillDto>>, ApiError> {
    let content = state.store.content::<skills::Entity>();

    let existing = content
        .get(id, true)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch skill: {e}")))?
        .ok_or_else(|| ApiError::not_found("Skill", id))?;

    if let Some(category) = &payload.category {
        one_of(category, SKILL_CATEGORIES, "Category")?;
    }
    if let Some(proficiency) = &payload.proficiency {
        one_of(proficiency, SKILL_PROFICIENCIES, "Proficiency")?;
    }

    let before = serde_json::to_value(&existing)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot skill: {e}")))?;

    let mut active = existing.clone().into_active_model();

    if let Some(name) = payload.name {
        require(&name, "Name")?;
        active.name = Set(name);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(proficiency) = payload.proficiency {
        active.proficiency = Set(proficiency);
    }
    if let Some(icon) = payload.icon {
        active.icon = Set(Some(icon));
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
        .map_err(|e| ApiError::internal(format!("Failed to update skill: {e}")))?;

    let after = serde_json::to_value(&updated)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot skill: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Update,
            skills::Entity::RESOURCE,
            Some(updated.id),
            Some(serde_json::json!({ "old": before, "new": after })),
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        updated.into(),
        "Skill updated successfully",
    )))
}

/// DELETE /skills/{id} (admin)
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = state
        .store
        .content::<skills::Entity>()
        .delete(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete skill: {e}")))?;

    if !deleted {
        return Err(ApiError::not_found("Skill", id));
    }

    state
        .audit
        .record(
            admin.id,
            AuditAction::Delete,
            skills::Entity::RESOURCE,
            Some(id),
            None,
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        (),
        "Skill deleted successfully",
    )))
}
