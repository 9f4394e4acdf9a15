use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuditRecorder, TokenService};

pub mod audit;
pub mod auth;
pub mod certifications;
pub mod education;
mod error;
pub mod experiences;
pub mod guard;
pub mod profile;
pub mod projects;
pub mod skills;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub config: Arc<Config>,

    pub tokens: TokenService,

    pub audit: AuditRecorder,
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::new(&config.general.database_path).await?;
    let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_expiry_days);
    let audit = AuditRecorder::new(store.clone());

    Ok(Arc::new(AppState {
        store,
        config: Arc::new(config),
        tokens,
        audit,
    }))
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: String,
}

async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get_by_slug)
                .patch(projects::update)
                .delete(projects::remove),
        )
        .route("/skills", get(skills::list).post(skills::create))
        .route(
            "/skills/{id}",
            patch(skills::update).delete(skills::remove),
        )
        .route(
            "/experiences",
            get(experiences::list).post(experiences::create),
        )
        .route(
            "/experiences/{id}",
            patch(experiences::update).delete(experiences::remove),
        )
        .route("/education", get(education::list).post(education::create))
        .route(
            "/education/{id}",
            patch(education::update).delete(education::remove),
        )
        .route(
            "/certifications",
            get(certifications::list).post(certifications::create),
        )
        .route(
            "/certifications/{id}",
            patch(certifications::update).delete(certifications::remove),
        )
        .route("/profile", get(profile::get).patch(profile::upsert))
        .route("/audit", get(audit::list))
        .with_state(state);

    // Cookie auth needs credentialed CORS, which cannot be combined with a
    // wildcard origin.
    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api/v1", api_router)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}
