//! The audit recorder: one immutable row per mutating action.
//!
//! Appends are awaited inline but never fail the caller's request. By the
//! time the recorder runs, the primary mutation has already committed, so an
//! append error is logged and swallowed rather than surfaced.

use axum::http::{header, request::Parts};

use crate::db::{AuditEntry, Store};

/// Resource tags recorded in the audit trail.
pub mod resources {

    pub const PROJECT: &str = "PROJECT";

    pub const SKILL: &str = "SKILL";

    pub const EXPERIENCE: &str = "EXPERIENCE";

    pub const EDUCATION: &str = "EDUCATION";

    pub const CERTIFICATION: &str = "CERTIFICATION";

    pub const PROFILE: &str = "PROFILE";

    pub const AUTH: &str = "AUTH";
}

#[derive(Clone, Copy, Debug)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Logout,
    Register,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Register => "REGISTER",
        }
    }
}

/// Request-scoped client metadata recorded alongside audit entries. Built
/// from headers only, so it is equally available behind a proxy and in
/// `oneshot` tests.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientMeta {
    #[must_use]
    pub fn from_parts(parts: &Parts) -> Self {
        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_string());

        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        Self {
            ip_address,
            user_agent,
        }
    }
}

#[derive(Clone)]
pub struct AuditRecorder {
    store: Store,
}

impl AuditRecorder {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Append one entry. Failures are logged, never propagated.
    pub async fn record(
        &self,
        user_id: i32,
        action: AuditAction,
        resource: &str,
        resource_id: Option<i32>,
        changes: Option<serde_json::Value>,
        meta: &ClientMeta,
    ) {
        let entry = AuditEntry {
            user_id,
            action: action.as_str().to_string(),
            resource: resource.to_string(),
            resource_id,
            changes: changes.map(|value| value.to_string()),
            ip_address: meta.ip_address.clone(),
            user_agent: meta.user_agent.clone(),
        };

        if let Err(e) = self.store.audit().append(entry).await {
            tracing::error!(
                "Failed to append {} audit entry for {resource}: {e}",
                action.as_str()
            );
        }
    }
}
