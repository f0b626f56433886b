use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use doceria_auth::Role;
use doceria_catalog::{ComboDraft, ComboId, ComboLineDraft, ProductId};
use doceria_core::{DomainError, EntityId};
use doceria_ledger::EntryKind;
use doceria_sales::{CommissionDraft, LineDescriptor, OrderStatus, SaleDraft};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub unit_price: u64,
    pub expires_on: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboLineRequest {
    pub catalog_item_id: String,
    pub quantity: u32,
    pub unit_price: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub total_price: u64,
    pub active: Option<bool>,
    #[serde(default)]
    pub lines: Vec<ComboLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ComboActiveRequest {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub catalog_item_id: Option<String>,
    pub combo_id: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub customer_name: String,
    pub total_amount: u64,
    pub date: String,
    pub time: String,
    /// Ignored on create (new sales always start `Pending`); honored on
    /// full-replacement update.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lines: Vec<LineRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRequest {
    pub customer_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub delivery_date: String,
    pub amount: u64,
    /// Ignored on create; honored on full-replacement update.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lines: Vec<LineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryRequest {
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub total: u64,
    pub date: String,
    pub time: String,
    pub kind: EntryKind,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRequest {
    pub catalog_item_id: String,
    pub description: String,
    pub starts_on: String,
    pub ends_on: String,
}

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    /// Required on create; on update an absent/empty password keeps the
    /// stored hash.
    #[serde(default)]
    pub password: Option<String>,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: String,
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, axum::response::Response> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_date",
            format!("{field}: {e}"),
        )
    })
}

pub fn parse_time(value: &str, field: &str) -> Result<NaiveTime, axum::response::Response> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_time",
                format!("{field}: {e}"),
            )
        })
}

pub fn parse_entity_id(value: &str, field: &str) -> Result<EntityId, axum::response::Response> {
    value.parse().map_err(|e: DomainError| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("{field}: {e}"))
    })
}

pub fn parse_status(value: &str) -> Result<OrderStatus, axum::response::Response> {
    value.parse().map_err(errors::domain_error_to_response)
}

/// Malformed ids inside line descriptors are malformed input (fatal), while
/// well-formed ids that simply do not resolve are handled tolerantly further
/// down the line-resolution path.
pub fn to_line_descriptors(
    lines: &[LineRequest],
) -> Result<Vec<LineDescriptor>, axum::response::Response> {
    lines
        .iter()
        .map(|line| {
            let catalog_item_id = match line.catalog_item_id.as_deref() {
                Some(raw) => Some(ProductId::new(parse_entity_id(raw, "catalogItemId")?)),
                None => None,
            };
            let combo_id = match line.combo_id.as_deref() {
                Some(raw) => Some(ComboId::new(parse_entity_id(raw, "comboId")?)),
                None => None,
            };
            Ok(LineDescriptor {
                catalog_item_id,
                combo_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
        })
        .collect()
}

pub fn to_combo_draft(req: ComboRequest) -> Result<ComboDraft, axum::response::Response> {
    let lines = req
        .lines
        .iter()
        .map(|line| {
            Ok(ComboLineDraft {
                product_id: ProductId::new(parse_entity_id(
                    &line.catalog_item_id,
                    "catalogItemId",
                )?),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
        })
        .collect::<Result<Vec<_>, axum::response::Response>>()?;

    Ok(ComboDraft {
        name: req.name,
        description: req.description.unwrap_or_default(),
        total_price: req.total_price,
        active: req.active,
        lines,
    })
}

pub fn to_sale_draft(req: &SaleRequest) -> Result<SaleDraft, axum::response::Response> {
    Ok(SaleDraft {
        customer: req.customer_name.clone(),
        total_amount: req.total_amount,
        sale_date: parse_date(&req.date, "date")?,
        sale_time: parse_time(&req.time, "time")?,
        lines: to_line_descriptors(&req.lines)?,
    })
}

pub fn to_commission_draft(
    req: &CommissionRequest,
) -> Result<CommissionDraft, axum::response::Response> {
    Ok(CommissionDraft {
        customer: req.customer_name.clone(),
        description: req.description.clone().unwrap_or_default(),
        delivery_date: parse_date(&req.delivery_date, "deliveryDate")?,
        amount: req.amount,
        lines: to_line_descriptors(&req.lines)?,
    })
}

/// Optional status on update requests: absent keeps the stored value,
/// present must parse.
pub fn optional_status(
    value: &Option<String>,
) -> Result<Option<OrderStatus>, axum::response::Response> {
    match value.as_deref() {
        Some(raw) => Ok(Some(parse_status(raw)?)),
        None => Ok(None),
    }
}
