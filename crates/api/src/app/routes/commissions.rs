use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use doceria_core::EntityId;
use doceria_infra::Store;
use doceria_sales::{Commission, CommissionId};

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_commissions).post(create_commission))
        .route("/search", get(search_commissions))
        .route("/status/:status", get(list_commissions_by_status))
        .route(
            "/:id",
            get(get_commission)
                .put(update_commission)
                .delete(delete_commission),
        )
        .route("/:id/status", put(update_commission_status))
}

fn parse_id(id: &str) -> Result<CommissionId, axum::response::Response> {
    id.parse::<EntityId>().map(CommissionId::new).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid commission id")
    })
}

pub async fn list_commissions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.commissions.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn list_commissions_by_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(status): Path<String>,
) -> axum::response::Response {
    let status = match dto::parse_status(&status) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let items: Vec<Commission> = services
        .commissions
        .list()
        .into_iter()
        .filter(|commission| commission.status == status)
        .collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn search_commissions(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let items: Vec<Commission> = services
        .commissions
        .list()
        .into_iter()
        .filter(|commission| commission.matches_term(&params.term))
        .collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_commission(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CommissionRequest>, JsonRejection>,
) -> axum::response::Response {
    // Same structured error shape for malformed input as everywhere else.
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "malformed_request",
                rejection.body_text(),
            );
        }
    };

    let draft = match dto::to_commission_draft(&body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    // Tolerant path, same as sales: dangling line references are dropped.
    let commission = Commission::create(
        CommissionId::new(EntityId::new()),
        draft,
        &services.catalog(),
    );
    services.commissions.save(commission.clone());
    tracing::info!(
        id = %commission.id,
        customer = %commission.customer,
        lines = commission.lines.len(),
        "commission created"
    );

    (StatusCode::CREATED, Json(commission)).into_response()
}

pub async fn get_commission(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.commissions.find(&id) {
        Some(commission) => (StatusCode::OK, Json(commission)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "commission not found"),
    }
}

pub async fn update_commission(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::CommissionRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "malformed_request",
                rejection.body_text(),
            );
        }
    };

    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(mut commission) = services.commissions.find(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "commission not found");
    };

    let draft = match dto::to_commission_draft(&body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let status = match dto::optional_status(&body.status) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    commission.replace(draft, status, &services.catalog());
    services.commissions.save(commission.clone());
    (StatusCode::OK, Json(commission)).into_response()
}

pub async fn update_commission_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::StatusUpdateRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(mut commission) = services.commissions.find(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "commission not found");
    };

    let status = match dto::parse_status(&body.status) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    commission.status = status;
    services.commissions.save(commission.clone());
    (StatusCode::OK, Json(commission)).into_response()
}

pub async fn delete_commission(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.commissions.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "commission not found")
    }
}
