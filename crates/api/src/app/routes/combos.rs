use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use doceria_catalog::{Combo, ComboId};
use doceria_core::EntityId;
use doceria_infra::Store;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_combos).post(create_combo))
        .route(
            "/:id",
            get(get_combo).put(update_combo).delete(delete_combo),
        )
        .route("/:id/status", put(set_combo_active))
}

fn parse_id(id: &str) -> Result<ComboId, axum::response::Response> {
    id.parse::<EntityId>()
        .map(ComboId::new)
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid combo id"))
}

pub async fn list_combos(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.combos.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_combo(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ComboRequest>,
) -> axum::response::Response {
    let draft = match dto::to_combo_draft(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    // Strict path: one dangling catalog-item reference fails the whole
    // creation and nothing is stored.
    let combo = match Combo::create(ComboId::new(EntityId::new()), draft, &services.catalog()) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.combos.save(combo.clone());
    tracing::info!(id = %combo.id, name = %combo.name, lines = combo.lines.len(), "combo created");
    (StatusCode::CREATED, Json(combo)).into_response()
}

pub async fn get_combo(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.combos.find(&id) {
        Some(combo) => (StatusCode::OK, Json(combo)).into_response(),
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("combo not found for id {id}"),
        ),
    }
}

pub async fn update_combo(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ComboRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(mut combo) = services.combos.find(&id) else {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("combo not found for id {id}"),
        );
    };

    let draft = match dto::to_combo_draft(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    // The whole line set is replaced; a failed resolution leaves the stored
    // combo untouched.
    if let Err(e) = combo.apply_update(draft, &services.catalog()) {
        return errors::domain_error_to_response(e);
    }

    services.combos.save(combo.clone());
    (StatusCode::OK, Json(combo)).into_response()
}

pub async fn set_combo_active(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ComboActiveRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(mut combo) = services.combos.find(&id) else {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("combo not found for id {id}"),
        );
    };

    combo.active = body.active;
    services.combos.save(combo.clone());
    (StatusCode::OK, Json(combo)).into_response()
}

pub async fn delete_combo(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    // Lines live inside the combo record, so removal cascades to them.
    if services.combos.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("combo not found for id {id}"),
        )
    }
}
