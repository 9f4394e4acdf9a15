use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use folio::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "correct-horse-battery";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.auth.admin_email = ADMIN_EMAIL.to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = folio::api::create_app_state(config)
        .await
        .expect("Failed to create app state");
    folio::api::router(state)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_admin(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            serde_json::json!({
                "email": ADMIN_EMAIL,
                "password": ADMIN_PASSWORD,
                "name": "Admin",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_skill(app: &Router, token: &str, name: &str, order: i32) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/skills",
            Some(token),
            serde_json::json!({
                "name": name,
                "category": "backend",
                "proficiency": "advanced",
                "order": order,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["data"]["id"].as_i64().unwrap()
}

async fn list_skill_names(app: &Router, token: Option<&str>) -> Vec<String> {
    let response = app
        .clone()
        .oneshot(get_request("/api/v1/skills", token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|skill| skill["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn mutations_require_authentication() {
    let app = spawn_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/skills",
            None,
            serde_json::json!({
                "name": "Go",
                "category": "backend",
                "proficiency": "advanced",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn skill_visibility_lifecycle() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    // Create as admin: 201 with a generated id and the default order.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/skills",
            Some(&token),
            serde_json::json!({
                "name": "Go",
                "category": "backend",
                "proficiency": "advanced",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["order"], 0);
    assert_eq!(body["data"]["visibility"], true);

    // Anonymous list sees it while visibility defaults to true.
    assert_eq!(list_skill_names(&app, None).await, vec!["Go"]);

    // Hide it.
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/skills/{id}"),
            Some(&token),
            serde_json::json!({ "visibility": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Anonymous callers no longer see it; the admin still does.
    assert!(list_skill_names(&app, None).await.is_empty());
    assert_eq!(list_skill_names(&app, Some(&token)).await, vec!["Go"]);

    // Admin can also filter explicitly.
    let response = app
        .clone()
        .oneshot(get_request("/api/v1/skills?visibility=true", Some(&token)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_unknown_proficiency() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/skills",
            Some(&token),
            serde_json::json!({
                "name": "Go",
                "category": "backend",
                "proficiency": "wizard",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_skill_is_not_found_and_not_audited() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/api/v1/skills/9999",
            Some(&token),
            serde_json::json!({ "name": "Ghost" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get_request(
            "/api/v1/audit?resource=SKILL&action=UPDATE",
            Some(&token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn delete_missing_skill_is_not_found() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/skills/9999")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn every_mutation_appends_one_audit_entry() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    let id = create_skill(&app, &token, "Go", 0).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/skills/{id}"),
            Some(&token),
            serde_json::json!({ "proficiency": "expert" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/skills/{id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for action in ["CREATE", "UPDATE", "DELETE"] {
        let response = app
            .clone()
            .oneshot(get_request(
                &format!("/api/v1/audit?resource=SKILL&action={action}"),
                Some(&token),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["total"], 1, "expected one {action} entry");
        let log = &body["data"]["logs"][0];
        assert_eq!(log["resource"], "SKILL");
        assert_eq!(log["resource_id"].as_i64().unwrap(), id);
    }

    // The update entry carries before/after snapshots.
    let response = app
        .oneshot(get_request(
            "/api/v1/audit?resource=SKILL&action=UPDATE",
            Some(&token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let changes = &body["data"]["logs"][0]["changes"];
    assert_eq!(changes["old"]["proficiency"], "advanced");
    assert_eq!(changes["new"]["proficiency"], "expert");
}

#[tokio::test]
async fn moving_the_middle_item_up_reorders_the_list() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    create_skill(&app, &token, "first", 0).await;
    let middle = create_skill(&app, &token, "middle", 1).await;
    create_skill(&app, &token, "last", 2).await;

    assert_eq!(
        list_skill_names(&app, None).await,
        vec!["first", "middle", "last"]
    );

    // Move "middle" up: order 1 -> 0. It now ties with "first" and wins the
    // tie on the newer creation date.
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/skills/{middle}"),
            Some(&token),
            serde_json::json!({ "order": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        list_skill_names(&app, None).await,
        vec!["middle", "first", "last"]
    );
}

#[tokio::test]
async fn boundary_reorders_are_noops() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    let first = create_skill(&app, &token, "first", 0).await;
    create_skill(&app, &token, "middle", 1).await;
    let last = create_skill(&app, &token, "last", 2).await;

    // First item up.
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/skills/{first}"),
            Some(&token),
            serde_json::json!({ "order": -1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["order"], 0);

    // Last item down.
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/skills/{last}"),
            Some(&token),
            serde_json::json!({ "order": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["order"], 2);

    assert_eq!(
        list_skill_names(&app, None).await,
        vec!["first", "middle", "last"]
    );
}

#[tokio::test]
async fn audit_endpoint_is_admin_only_and_pages() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/audit", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    for (name, order) in [("one", 0), ("two", 1), ("three", 2)] {
        create_skill(&app, &token, name, order).await;
    }

    let response = app
        .clone()
        .oneshot(get_request(
            "/api/v1/audit?resource=SKILL&limit=2&skip=0",
            Some(&token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["logs"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(get_request(
            "/api/v1/audit?resource=SKILL&limit=2&skip=2",
            Some(&token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["logs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn experience_crud_round_trip() {
    let app = spawn_app().await;
    let token = register_admin(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/experiences",
            Some(&token),
            serde_json::json!({
                "company": "Example Corp",
                "position": "Engineer",
                "location": "Remote",
                "start_date": "2022-01-01",
                "description": "Backend work",
                "responsibilities": ["APIs"],
                "technologies": ["rust"],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["responsibilities"][0], "APIs");

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/experiences/{id}"),
            Some(&token),
            serde_json::json!({ "current": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["current"], true);

    let response = app
        .oneshot(get_request("/api/v1/experiences", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["company"], "Example Corp");
}
