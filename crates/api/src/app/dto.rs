use core::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::json;

use localshop_core::{DomainError, ProductId};
use localshop_inventory::{
    AdjustmentKind, BulkField, Category, Notification, Page, Product, ProductStatus, SortDirection,
    SortKey, StockLogEntry, ViewQuery,
};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Query string accepted by the product list and the export.
///
/// `category` and `status` treat `all` (or an empty value) as "no filter".
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub min_price: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub max_price: Option<f64>,
    pub sort_by: Option<SortKey>,
    pub sort_order: Option<SortDirection>,
    pub page: Option<usize>,
}

impl ViewParams {
    pub fn into_query(self) -> Result<ViewQuery, DomainError> {
        let status = match unless_all(self.status) {
            Some(raw) => Some(raw.parse::<ProductStatus>()?),
            None => None,
        };

        let query = ViewQuery::new()
            .with_search(self.search.unwrap_or_default())
            .with_category(unless_all(self.category))
            .with_status(status)
            .with_price_range(self.min_price, self.max_price)
            .with_sort(
                self.sort_by.unwrap_or_default(),
                self.sort_order.unwrap_or_default(),
            );
        Ok(query.with_page(self.page.unwrap_or(1)))
    }
}

/// An empty price bound (`min_price=`) means no bound.
fn blank_as_none<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(de)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn unless_all(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && !v.eq_ignore_ascii_case("all")
    })
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub quantity: i64,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    pub ids: Vec<String>,
    pub field: BulkField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfirmParams {
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct SelectAllRequest {
    pub ids: Vec<String>,
}

pub fn parse_product_ids(raw: &[String]) -> Result<Vec<ProductId>, DomainError> {
    raw.iter().map(|id| id.parse()).collect()
}

/// Parse a path id, mapping failures straight to a 400 response.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse().map_err(errors::domain_error_to_response)
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    json!({
        "id": p.id.to_string(),
        "name": p.name,
        "category": p.category,
        "sub_category": p.sub_category,
        "brand": p.brand,
        "sku": p.sku,
        "stock_quantity": p.stock_quantity,
        "unit_of_measure": p.unit_of_measure,
        "cost_price": p.cost_price,
        "selling_price": p.selling_price,
        "expiry_date": p.expiry_date.map(|d| d.to_string()),
        "description": p.description,
        "image_url": p.image_url,
        "status": p.status.as_str(),
        "last_updated": p.last_updated.to_string(),
    })
}

pub fn page_to_json(page: &Page<Product>) -> serde_json::Value {
    json!({
        "items": page.items.iter().map(product_to_json).collect::<Vec<_>>(),
        "page": page.page,
        "page_size": page.page_size,
        "total_items": page.total_items,
        "total_pages": page.total_pages,
    })
}

pub fn stock_log_to_json(e: &StockLogEntry) -> serde_json::Value {
    json!({
        "id": e.id.to_string(),
        "product_id": e.product_id.to_string(),
        "product_name": e.product_name,
        "type": e.kind,
        "quantity": e.quantity,
        "previous_stock": e.previous_stock,
        "new_stock": e.new_stock,
        "reason": e.reason,
        "date": e.date.to_string(),
        "user": e.user,
    })
}

pub fn category_to_json(c: &Category) -> serde_json::Value {
    json!({
        "id": c.id.to_string(),
        "name": c.name,
        "description": c.description,
        "count": c.count,
    })
}

pub fn notification_to_json(n: &Notification) -> serde_json::Value {
    json!({
        "id": n.id.0,
        "message": n.message,
        "type": n.severity,
        "created_at": n.created_at.to_rfc3339(),
        "expires_at": n.expires_at.to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_means_no_filter() {
        let params = ViewParams {
            category: Some("all".to_string()),
            status: Some("All".to_string()),
            ..ViewParams::default()
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.category(), None);
        assert_eq!(query.status(), None);
    }

    #[test]
    fn params_build_the_expected_query() {
        let params = ViewParams {
            search: Some("tea".to_string()),
            category: Some("Beverages".to_string()),
            status: Some("low stock".to_string()),
            min_price: Some(1.0),
            max_price: Some(50.0),
            sort_by: Some(SortKey::Price),
            sort_order: Some(SortDirection::Desc),
            page: Some(3),
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.search(), "tea");
        assert_eq!(query.category(), Some("Beverages"));
        assert_eq!(query.status(), Some(ProductStatus::LowStock));
        assert_eq!(query.min_price(), Some(1.0));
        assert_eq!(query.max_price(), Some(50.0));
        assert_eq!(query.sort_key(), SortKey::Price);
        assert_eq!(query.sort_direction(), SortDirection::Desc);
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn blank_price_bounds_mean_no_bound() {
        let uri: axum::http::Uri = "/products?min_price=&max_price=%20&search=tea".parse().unwrap();
        let axum::extract::Query(params) =
            axum::extract::Query::<ViewParams>::try_from_uri(&uri).unwrap();
        let query = params.into_query().unwrap();
        assert_eq!(query.min_price(), None);
        assert_eq!(query.max_price(), None);
        assert_eq!(query.search(), "tea");

        let uri: axum::http::Uri = "/products?min_price=2.5".parse().unwrap();
        let axum::extract::Query(params) =
            axum::extract::Query::<ViewParams>::try_from_uri(&uri).unwrap();
        assert_eq!(params.min_price, Some(2.5));
        assert_eq!(params.max_price, None);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let params = ViewParams {
            status: Some("Backordered".to_string()),
            ..ViewParams::default()
        };
        assert!(matches!(params.into_query(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        let ids = vec!["not-a-uuid".to_string()];
        assert!(matches!(parse_product_ids(&ids), Err(DomainError::InvalidId(_))));
    }
}
