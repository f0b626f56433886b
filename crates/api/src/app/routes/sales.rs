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
use doceria_sales::{Sale, SaleId, project_sale};

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/search", get(search_sales))
        .route("/status/:status", get(list_sales_by_status))
        .route("/:id", get(get_sale).put(update_sale).delete(delete_sale))
        .route("/:id/status", put(update_sale_status))
}

fn parse_id(id: &str) -> Result<SaleId, axum::response::Response> {
    id.parse::<EntityId>()
        .map(SaleId::new)
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid sale id"))
}

fn project_all(services: &AppServices, sales: Vec<Sale>) -> axum::response::Response {
    let catalog = services.catalog();
    let items: Vec<_> = sales
        .iter()
        .map(|sale| project_sale(sale, &catalog))
        .collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn list_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    project_all(&services, services.sales.list())
}

pub async fn list_sales_by_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(status): Path<String>,
) -> axum::response::Response {
    let status = match dto::parse_status(&status) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let sales = services
        .sales
        .list()
        .into_iter()
        .filter(|sale| sale.status == status)
        .collect();
    project_all(&services, sales)
}

pub async fn search_sales(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchParams>,
) -> axum::response::Response {
    let sales = services
        .sales
        .list()
        .into_iter()
        .filter(|sale| sale.matches_term(&params.term))
        .collect();
    project_all(&services, sales)
}

pub async fn create_sale(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SaleRequest>, JsonRejection>,
) -> axum::response::Response {
    // Malformed input (non-numeric amount, wrong types) is fatal and gets the
    // same structured error shape as every other failure.
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

    let draft = match dto::to_sale_draft(&body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    // Tolerant path: dangling line references are dropped inside
    // `Sale::create`, never failing the request. Status is forced to Pending.
    let catalog = services.catalog();
    let sale = Sale::create(SaleId::new(EntityId::new()), draft, &catalog);
    services.sales.save(sale.clone());
    tracing::info!(id = %sale.id, customer = %sale.customer, lines = sale.lines.len(), "sale created");

    (StatusCode::CREATED, Json(project_sale(&sale, &catalog))).into_response()
}

pub async fn get_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.sales.find(&id) {
        Some(sale) => {
            (StatusCode::OK, Json(project_sale(&sale, &services.catalog()))).into_response()
        }
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "sale not found"),
    }
}

pub async fn update_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::SaleRequest>, JsonRejection>,
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
    let Some(mut sale) = services.sales.find(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "sale not found");
    };

    let draft = match dto::to_sale_draft(&body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let status = match dto::optional_status(&body.status) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let catalog = services.catalog();
    sale.replace(draft, status, &catalog);
    services.sales.save(sale.clone());
    (StatusCode::OK, Json(project_sale(&sale, &catalog))).into_response()
}

pub async fn update_sale_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::StatusUpdateRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(mut sale) = services.sales.find(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "sale not found");
    };

    // Unknown names fail here, before any mutation.
    let status = match dto::parse_status(&body.status) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    sale.status = status;
    services.sales.save(sale.clone());
    (StatusCode::OK, Json(project_sale(&sale, &services.catalog()))).into_response()
}

pub async fn delete_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    // Transaction lines live inside the sale record; removal cascades.
    if services.sales.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "sale not found")
    }
}
