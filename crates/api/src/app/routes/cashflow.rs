use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use doceria_core::EntityId;
use doceria_infra::Store;
use doceria_ledger::{LedgerEntry, LedgerEntryId};

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route(
            "/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

fn parse_id(id: &str) -> Result<LedgerEntryId, axum::response::Response> {
    id.parse::<EntityId>().map(LedgerEntryId::new).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid ledger entry id")
    })
}

fn build_entry(
    id: LedgerEntryId,
    body: dto::LedgerEntryRequest,
) -> Result<LedgerEntry, axum::response::Response> {
    Ok(LedgerEntry {
        id,
        name: body.name,
        unit_price: body.unit_price,
        quantity: body.quantity,
        total: body.total,
        date: dto::parse_date(&body.date, "date")?,
        time: dto::parse_time(&body.time, "time")?,
        kind: body.kind,
    })
}

pub async fn list_entries(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.ledger.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LedgerEntryRequest>,
) -> axum::response::Response {
    let entry = match build_entry(LedgerEntryId::new(EntityId::new()), body) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    services.ledger.save(entry.clone());
    (StatusCode::CREATED, Json(entry)).into_response()
}

pub async fn get_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.ledger.find(&id) {
        Some(entry) => (StatusCode::OK, Json(entry)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "ledger entry not found"),
    }
}

pub async fn update_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::LedgerEntryRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.ledger.find(&id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "ledger entry not found");
    }

    let entry = match build_entry(id, body) {
        Ok(e) => e,
        Err(resp) => return resp,
    };
    services.ledger.save(entry.clone());
    (StatusCode::OK, Json(entry)).into_response()
}

pub async fn delete_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.ledger.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "ledger entry not found")
    }
}
