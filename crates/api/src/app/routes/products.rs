use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use doceria_catalog::{Product, ProductId};
use doceria_core::EntityId;
use doceria_infra::Store;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn parse_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse::<EntityId>().map(ProductId::new).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid catalog item id")
    })
}

fn build_product(
    id: ProductId,
    body: dto::ProductRequest,
) -> Result<Product, axum::response::Response> {
    let expires_on = match body.expires_on.as_deref() {
        Some(raw) => Some(dto::parse_date(raw, "expiresOn")?),
        None => None,
    };
    Ok(Product {
        id,
        name: body.name,
        unit_price: body.unit_price,
        expires_on,
    })
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.products.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    let product = match build_product(ProductId::new(EntityId::new()), body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    services.products.save(product.clone());
    tracing::info!(id = %product.id, name = %product.name, "catalog item created");
    (StatusCode::CREATED, Json(product)).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.products.find(&id) {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "catalog item not found"),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.products.find(&id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "catalog item not found");
    }

    let product = match build_product(id, body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    services.products.save(product.clone());
    (StatusCode::OK, Json(product)).into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.products.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "catalog item not found")
    }
}
