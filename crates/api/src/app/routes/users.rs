use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use doceria_auth::{User, UserId, hash_password};
use doceria_core::EntityId;
use doceria_infra::Store;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

fn parse_id(id: &str) -> Result<UserId, axum::response::Response> {
    id.parse::<EntityId>()
        .map(UserId::new)
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.users.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::UserRequest>,
) -> axum::response::Response {
    let password = match body.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "password is required",
            );
        }
    };

    let user = User {
        id: UserId::new(EntityId::new()),
        name: body.name,
        email: body.email,
        password_hash: hash_password(password),
        role: body.role,
    };
    services.users.save(user.clone());
    tracing::info!(id = %user.id, email = %user.email, "user created");
    (StatusCode::CREATED, Json(user)).into_response()
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.users.find(&id) {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UserRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(existing) = services.users.find(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    };

    // An absent or empty password keeps the stored hash.
    let password_hash = match body.password.as_deref() {
        Some(p) if !p.is_empty() => hash_password(p),
        _ => existing.password_hash,
    };

    let user = User {
        id,
        name: body.name,
        email: body.email,
        password_hash,
        role: body.role,
    };
    services.users.save(user.clone());
    (StatusCode::OK, Json(user)).into_response()
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.users.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found")
    }
}
