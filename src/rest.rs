//! HTTP surface: JSON CRUD per collection, admin login/logout, health.
//!
//! Response shapes follow the reference contract: creates return 201 with
//! `{message, <doc>}`, reads and partial updates return the bare document,
//! deletes return `{message}`, lists return a bare array (empty array when
//! nothing matches, never an error).

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::auth;
use crate::error::ApiError;
use crate::gate;
use crate::models::{Blog, BlogInput, NewUser, Retreat, RetreatInput, User, UserPatch};
use crate::pages;
use crate::storage::Store;

/// Shared state for all handlers. The store handle is cloned per request;
/// Sled pools internally, so no extra locking happens here.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub environment: String,
}

impl AppState {
    pub fn new(store: Store, environment: String) -> Self {
        Self { store, environment }
    }
}

/// Builds the full router: JSON API, server-rendered pages, and the admin
/// gate over everything (the gate itself scopes to `/admin/*`).
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/:id",
            axum::routing::patch(update_user).delete(delete_user),
        )
        .route("/api/blogs", get(list_blogs).post(create_blog))
        .route(
            "/api/blogs/:id",
            get(get_blog).patch(update_blog).delete(delete_blog),
        )
        .route("/api/retreats", get(list_retreats).post(create_retreat))
        .route(
            "/api/retreats/:id",
            get(get_retreat).patch(update_retreat).delete(delete_retreat),
        )
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/logout", post(admin_logout))
        .route("/api/health", get(health))
        .merge(pages::page_routes())
        .layer(middleware::from_fn(gate::admin_gate))
        .with_state(state)
}

// --- users ---

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.store.list_users()?))
}

async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;
    let email = payload.email.clone().unwrap_or_default();
    if state.store.email_taken(&email)? {
        return Err(ApiError::DuplicateEmail);
    }
    let user = payload.into_user(Utc::now());
    state.store.put_user(&user)?;
    tracing::info!(user = %user.id, "subscriber created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "user": user })),
    ))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, ApiError> {
    let mut user = state
        .store
        .get_user(&id)?
        .ok_or(ApiError::NotFound("User"))?;
    user.has_access = patch.has_access;
    state.store.put_user(&user)?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_user(&id)? {
        return Err(ApiError::NotFound("User"));
    }
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

// --- blogs ---

#[derive(Debug, Default, Deserialize)]
struct BlogListQuery {
    published: Option<String>,
}

async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<Vec<Blog>>, ApiError> {
    // Filter applies only when the parameter is present and literally "true".
    let published_only = query.published.as_deref() == Some("true");
    Ok(Json(state.store.list_blogs(published_only)?))
}

async fn create_blog(
    State(state): State<AppState>,
    Json(payload): Json<BlogInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate_new()?;
    let blog = payload.into_blog(Utc::now())?;
    state.store.put_blog(&blog)?;
    tracing::info!(blog = %blog.id, title = %blog.title, "blog created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Blog created successfully", "blog": blog })),
    ))
}

async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, ApiError> {
    let blog = state
        .store
        .get_blog(&id)?
        .ok_or(ApiError::NotFound("Blog"))?;
    Ok(Json(blog))
}

async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<BlogInput>,
) -> Result<Json<Blog>, ApiError> {
    patch.validate_patch()?;
    let mut blog = state
        .store
        .get_blog(&id)?
        .ok_or(ApiError::NotFound("Blog"))?;
    patch.apply_to(&mut blog, Utc::now())?;
    state.store.put_blog(&blog)?;
    Ok(Json(blog))
}

async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_blog(&id)? {
        return Err(ApiError::NotFound("Blog"));
    }
    Ok(Json(json!({ "message": "Blog deleted successfully" })))
}

// --- retreats ---

#[derive(Debug, Default, Deserialize)]
struct RetreatListQuery {
    active: Option<String>,
}

async fn list_retreats(
    State(state): State<AppState>,
    Query(query): Query<RetreatListQuery>,
) -> Result<Json<Vec<Retreat>>, ApiError> {
    let active_only = query.active.as_deref() == Some("true");
    Ok(Json(state.store.list_retreats(active_only)?))
}

async fn create_retreat(
    State(state): State<AppState>,
    Json(payload): Json<RetreatInput>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate_new()?;
    let retreat = payload.into_retreat(Utc::now());
    state.store.put_retreat(&retreat)?;
    tracing::info!(retreat = %retreat.id, label = %retreat.label, "retreat created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Retreat created successfully", "retreat": retreat })),
    ))
}

async fn get_retreat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Retreat>, ApiError> {
    let retreat = state
        .store
        .get_retreat(&id)?
        .ok_or(ApiError::NotFound("Retreat"))?;
    Ok(Json(retreat))
}

async fn update_retreat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<RetreatInput>,
) -> Result<Json<Retreat>, ApiError> {
    patch.validate_patch()?;
    let mut retreat = state
        .store
        .get_retreat(&id)?
        .ok_or(ApiError::NotFound("Retreat"))?;
    patch.apply_to(&mut retreat, Utc::now());
    state.store.put_retreat(&retreat)?;
    Ok(Json(retreat))
}

async fn delete_retreat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete_retreat(&id)? {
        return Err(ApiError::NotFound("Retreat"));
    }
    Ok(Json(json!({ "message": "Retreat deleted successfully" })))
}

// --- admin session ---

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginRequest {
    password: Option<String>,
}

async fn admin_login(Json(payload): Json<LoginRequest>) -> Result<impl IntoResponse, ApiError> {
    let password = match payload.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ApiError::MissingPassword),
    };

    let valid = auth::verify_password(password).map_err(|err| {
        tracing::error!(error = %err, "password verification failed");
        ApiError::Internal
    })?;
    if !valid {
        tracing::warn!("admin login rejected");
        return Err(ApiError::InvalidPassword);
    }

    let token = auth::mint_token();
    tracing::info!("admin login accepted");
    Ok((
        [(header::SET_COOKIE, auth::login_cookie(&token))],
        Json(json!({ "message": "Login successful", "token": token })),
    ))
}

async fn admin_logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, auth::logout_cookie())],
        Json(json!({ "message": "Logout successful" })),
    )
}

// --- health ---

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "API is working",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.environment,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt; // For .oneshot() testing

    fn test_router() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = Store::open(dir.path().to_str().unwrap()).expect("open store");
        let state = AppState::new(store, "test".to_string());
        (create_router(state), dir)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_reports_status_and_environment() {
        let (app, _dir) = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("health request");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["message"], "API is working");
        assert_eq!(body["environment"], "test");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn login_rejects_wrong_and_missing_passwords() {
        let (app, _dir) = test_router();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/admin/login")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"password":"wrong"}"#))
                    .unwrap(),
            )
            .await
            .expect("login request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Invalid password");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/admin/login")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .expect("login request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Password is required");
    }
}
