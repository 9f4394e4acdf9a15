use axum::{Json, extract::State};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::guard::{AdminUser, OptionalUser};
use super::validation::require;
use super::{ApiError, ApiResponse, AppState};
use crate::entities::profiles;
use crate::services::audit::resources;
use crate::services::{AuditAction, ClientMeta};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub tagline: String,
    pub bio: String,
    pub location: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub resume: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub visibility: bool,
    pub created_by: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<profiles::Model> for ProfileDto {
    fn from(model: profiles::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            full_name: model.full_name,
            tagline: model.tagline,
            bio: model.bio,
            location: model.location,
            email: model.email,
            phone: model.phone,
            avatar: model.avatar,
            resume: model.resume,
            social_links: serde_json::from_str(&model.social_links).unwrap_or_default(),
            visibility: model.visibility,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub full_name: Option<String>,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub resume: Option<String>,
    pub social_links: Option<Vec<SocialLink>>,
    pub visibility: Option<bool>,
}

fn encode_links(links: &[SocialLink]) -> String {
    serde_json::to_string(links).unwrap_or_else(|_| "[]".to_string())
}

/// GET /profile
pub async fn get(
    State(state): State<Arc<AppState>>,
    user: OptionalUser,
) -> Result<Json<ApiResponse<ProfileDto>>, ApiError> {
    let profile = state
        .store
        .profiles()
        .find_public(user.is_admin())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch profile: {e}")))?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(ApiResponse::success(profile.into())))
}

/// PATCH /profile (admin)
/// Create-if-absent keyed by the caller's user id, since the profile is a
/// singleton per user.
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    meta: ClientMeta,
    Json(payload): Json<UpsertProfileRequest>,
) -> Result<Json<ApiResponse<ProfileDto>>, ApiError> {
    let repo = state.store.profiles();

    let existing = repo
        .find_by_user(admin.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch profile: {e}")))?;

    let now = chrono::Utc::now().to_rfc3339();

    let (profile, action, changes) = match existing {
        None => {
            let full_name = payload.full_name.unwrap_or_default();
            let tagline = payload.tagline.unwrap_or_default();
            let bio = payload.bio.unwrap_or_default();
            let location = payload.location.unwrap_or_default();
            let email = payload.email.unwrap_or_default();
            require(&full_name, "Full name")?;
            require(&tagline, "Tagline")?;
            require(&bio, "Bio")?;
            require(&location, "Location")?;
            require(&email, "Email")?;

            let active = profiles::ActiveModel {
                user_id: Set(admin.id),
                full_name: Set(full_name),
                tagline: Set(tagline),
                bio: Set(bio),
                location: Set(location),
                email: Set(email),
                phone: Set(payload.phone),
                avatar: Set(payload.avatar),
                resume: Set(payload.resume),
                social_links: Set(encode_links(&payload.social_links.unwrap_or_default())),
                visibility: Set(payload.visibility.unwrap_or(true)),
                created_by: Set(admin.id),
                created_at: Set(now.clone()),
                updated_at: Set(now),
                ..Default::default()
            };

            let created = repo
                .insert(active)
                .await
                .map_err(|e| ApiError::internal(format!("Failed to create profile: {e}")))?;

            (created, AuditAction::Create, None)
        }
        Some(existing) => {
            let before = serde_json::to_value(&existing)
                .map_err(|e| ApiError::internal(format!("Failed to snapshot profile: {e}")))?;

            let mut active = existing.into_active_model();

            if let Some(full_name) = payload.full_name {
                require(&full_name, "Full name")?;
                active.full_name = Set(full_name);
            }
            if let Some(tagline) = payload.tagline {
                active.tagline = Set(tagline);
            }
            if let Some(bio) = payload.bio {
                active.bio = Set(bio);
            }
            if let Some(location) = payload.location {
                active.location = Set(location);
            }
            if let Some(email) = payload.email {
                active.email = Set(email);
            }
            if let Some(phone) = payload.phone {
                active.phone = Set(Some(phone));
            }
            if let Some(avatar) = payload.avatar {
                active.avatar = Set(Some(avatar));
            }
            if let Some(resume) = payload.resume {
                active.resume = Set(Some(resume));
            }
            if let Some(links) = payload.social_links {
                active.social_links = Set(encode_links(&links));
            }
            if let Some(visibility) = payload.visibility {
                active.visibility = Set(visibility);
            }

            active.updated_at = Set(now);

            let updated = repo
                .update(active)
                .await
                .map_err(|e| ApiError::internal(format!("Failed to update profile: {e}")))?;

            let after = serde_json::to_value(&updated)
                .map_err(|e| ApiError::internal(format!("Failed to snapshot profile: {e}")))?;

            (
                updated,
                AuditAction::Update,
                Some(serde_json::json!({ "old": before, "new": after })),
            )
        }
    };

    state
        .audit
        .record(
            admin.id,
            action,
            resources::PROFILE,
            Some(profile.id),
            changes,
            &meta,
        )
        .await;

    Ok(Json(ApiResponse::with_message(
        profile.into(),
        "Profile updated successfully",
    )))
}
