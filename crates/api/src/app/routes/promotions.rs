use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use doceria_catalog::{ProductId, Promotion, PromotionId};
use doceria_core::EntityId;
use doceria_infra::Store;

use crate::app::{dto, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_promotions).post(create_promotion))
        .route(
            "/:id",
            get(get_promotion)
                .put(update_promotion)
                .delete(delete_promotion),
        )
}

fn parse_id(id: &str) -> Result<PromotionId, axum::response::Response> {
    id.parse::<EntityId>().map(PromotionId::new).map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid promotion id")
    })
}

fn build_promotion(
    id: PromotionId,
    body: dto::PromotionRequest,
) -> Result<Promotion, axum::response::Response> {
    Ok(Promotion {
        id,
        product_id: ProductId::new(dto::parse_entity_id(
            &body.catalog_item_id,
            "catalogItemId",
        )?),
        description: body.description,
        starts_on: dto::parse_date(&body.starts_on, "startsOn")?,
        ends_on: dto::parse_date(&body.ends_on, "endsOn")?,
    })
}

pub async fn list_promotions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.promotions.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_promotion(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PromotionRequest>,
) -> axum::response::Response {
    let promotion = match build_promotion(PromotionId::new(EntityId::new()), body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    services.promotions.save(promotion.clone());
    (StatusCode::CREATED, Json(promotion)).into_response()
}

pub async fn get_promotion(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.promotions.find(&id) {
        Some(promotion) => (StatusCode::OK, Json(promotion)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "promotion not found"),
    }
}

pub async fn update_promotion(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::PromotionRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.promotions.find(&id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "promotion not found");
    }

    let promotion = match build_promotion(id, body) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    services.promotions.save(promotion.clone());
    (StatusCode::OK, Json(promotion)).into_response()
}

pub async fn delete_promotion(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.promotions.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "promotion not found")
    }
}
