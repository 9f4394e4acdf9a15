use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::guard::{AdminUser, OptionalUser};
use super::types::{PageMeta, decode_string_list, encode_string_list};
use super::validation::{PROJECT_CATEGORIES, PROJECT_STATUSES, one_of, require};
use super::{ApiError, ApiResponse, AppState};
use crate::constants::{pagination, project_status};
use crate::db::{ContentEntity, ProjectListQuery};
use crate::entities::projects;
use crate::services::{AuditAction, ClientMeta};

#[derive(Debug, Serialize)]
pub struct ProjectDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub category: String,
    pub images: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: bool,
    pub order: i32,
    pub status: String,
    pub visibility: bool,
    pub views: i64,
    pub created_by: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<projects::Model> for ProjectDto {
    fn from(model: projects::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            short_description: model.short_description,
            description: model.description,
            technologies: decode_string_list(&model.technologies),
            category: model.category,
            images: decode_string_list(&model.images),
            live_url: model.live_url,
            github_url: model.github_url,
            featured: model.featured,
            order: model.order,
            status: model.status,
            visibility: model.visibility,
            views: model.views,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListProjectsParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub short_description: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
    pub status: Option<String>,
    pub visibility: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: Option<bool>,
    pub order: Option<i32>,
    pub status: Option<String>,
    pub visibility: Option<bool>,
}

/// GET /projects
/// Public callers see published, visible projects only; admins see all and
/// may filter by status, featured and visibility.
pub async fn list(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    Query(params): Query<ListProjectsParams>,
) -> Result<Json<ApiResponse<Vec<ProjectDto>>>, ApiError> {
    let include_hidden = user.is_admin();

    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(pagination::DEFAULT_PAGE_SIZE)
        .clamp(1, pagination::MAX_PAGE_SIZE);

    let query = ProjectListQuery {
        page,
        limit,
        category: params.category,
        status: include_hidden.then_some(params.status).flatten(),
        featured: include_hidden.then_some(params.featured).flatten(),
        search: params.search,
        visibility: include_hidden.then_some(params.visibility).flatten(),
        include_hidden,
    };

    let (items, total) = state
        .store
        .projects()
        .list(&query)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to list projects: {e}")))?;

    let data = items.into_iter().map(ProjectDto::from).collect();

    Ok(Json(ApiResponse::paginated(
        data,
        PageMeta::new(page, limit, total),
    )))
}

/// GET /projects/{slug}
/// Fetching by slug is an observable event: it bumps the view counter.
pub async fn get_by_slug(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ProjectDto>>, ApiError> {
    let repo = state.store.projects();

    let project = repo
        .find_by_slug(&slug, user.is_admin())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch project: {e}")))?
        .ok_or_else(|| ApiError::not_found("Project", &slug))?;

    let project = repo
        .record_view(project)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to record view: {e}")))?;

    Ok(Json(ApiResponse::success(project.into())))
}

/// POST /projects (admin)
pub async fn create(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectDto>>), ApiError> {
    require(&payload.title, "Title")?;
    require(&payload.short_description, "Short description")?;
    require(&payload.description, "Description")?;
    one_of(&payload.category, PROJECT_CATEGORIES, "Category")?;
    if let Some(status) = &payload.status {
        one_of(status, PROJECT_STATUSES, "Status")?;
    }

    let repo = state.store.projects();
    let slug = repo
        .unique_slug(&payload.title)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to derive slug: {e}")))?;

    let now = chrono::Utc::now().to_rfc3339();

    let active = projects::ActiveModel {
        title: Set(payload.title),
        slug: Set(slug),
        short_description: Set(payload.short_description),
        description: Set(payload.description),
        technologies: Set(encode_string_list(&payload.technologies)),
        category: Set(payload.category),
        images: Set(encode_string_list(&payload.images)),
        live_url: Set(payload.live_url),
        github_url: Set(payload.github_url),
        featured: Set(payload.featured),
        order: Set(payload.order),
        status: Set(payload
            .status
            .unwrap_or_else(|| project_status::DRAFT.to_string())),
        visibility: Set(payload.visibility.unwrap_or(true)),
        views: Set(0),
        created_by: Set(admin.id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let project = state
        .store
        .content::<projects::Entity>()
        .insert(active)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create project: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Create,
            projects::Entity::RESOURCE,
            Some(project.id),
            None,
            &meta,
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            project.into(),
            "Project created successfully",
        )),
    ))
}

/// PATCH /projects/{id} (admin)
/// Field merge and reorder share this endpoint; the audit entry carries
/// before/after snapshots.
pub async fn update(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectDto>>, ApiError> {
    let content = state.store.content::<projects::Entity>();

    let existing = content
        .get(id, true)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch project: {e}")))?
        .ok_or_else(|| ApiError::not_found("Project", id))?;

    if let Some(category) = &payload.category {
        one_of(category, PROJECT_CATEGORIES, "Category")?;
    }
    if let Some(status) = &payload.status {
        one_of(status, PROJECT_STATUSES, "Status")?;
    }

    let before = serde_json::to_value(&existing)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot project: {e}")))?;

    let mut active = existing.clone().into_active_model();

    if let Some(title) = payload.title {
        require(&title, "Title")?;
        active.title = Set(title);
    }
    if let Some(short_description) = payload.short_description {
        active.short_description = Set(short_description);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(technologies) = payload.technologies {
        active.technologies = Set(encode_string_list(&technologies));
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(images) = payload.images {
        active.images = Set(encode_string_list(&images));
    }
    if let Some(live_url) = payload.live_url {
        active.live_url = Set(Some(live_url));
    }
    if let Some(github_url) = payload.github_url {
        active.github_url = Set(Some(github_url));
    }
    if let Some(featured) = payload.featured {
        active.featured = Set(featured);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
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
        .map_err(|e| ApiError::internal(format!("Failed to update project: {e}")))?;

    let after = serde_json::to_value(&updated)
        .map_err(|e| ApiError::internal(format!("Failed to snapshot project: {e}")))?;

    state
        .audit
        .record(
            admin.id,
            AuditAction::Update,
            projects::Entity::RESOURCE,
            Some(updated.id),
            Some(serde_json::json!({ "old": before, "new": after })),
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        updated.into(),
        "Project updated successfully",
    )))
}

/// DELETE /projects/{id} (admin)
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let content = state.store.content::<projects::Entity>();

    let deleted = content
        .delete(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete project: {e}")))?;

    if !deleted {
        return Err(ApiError::not_found("Project", id));
    }

    state
        .audit
        .record(
            admin.id,
            AuditAction::Delete,
            projects::Entity::RESOURCE,
            Some(id),
            None,
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        (),
        "Project deleted successfully",
    )))
}
