use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::post,
};

use doceria_auth::verify_password;
use doceria_core::EntityId;
use doceria_infra::Store;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new().route("/login", post(login))
}

/// Compare the submitted secret against the stored hash and hand back an
/// opaque session token. Unknown e-mail and wrong password are
/// indistinguishable to the caller.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let user = services
        .users
        .list()
        .into_iter()
        .find(|user| user.email == body.email);

    match user {
        Some(user) if verify_password(&body.password, &user.password_hash) => {
            tracing::info!(email = %user.email, "login succeeded");
            let token = format!("session-{}", EntityId::new());
            (
                StatusCode::OK,
                Json(serde_json::json!({ "token": token, "user": user })),
            )
                .into_response()
        }
        _ => {
            tracing::warn!(email = %body.email, "login failed");
            errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "invalid credentials",
            )
        }
    }
}
