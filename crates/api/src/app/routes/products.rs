use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use localshop_core::{DomainError, ProductId};
use localshop_inventory::{Confirmed, ProductForm};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/bulk/update", post(bulk_update))
        .route("/bulk/delete", post(bulk_delete))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/stock", post(adjust_stock))
}

/// One page of the catalog, filtered and sorted by the query string.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ViewParams>,
) -> axum::response::Response {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let page = services.read(|ledger| ledger.view(&query));
    Json(dto::page_to_json(&page)).into_response()
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(form): Json<ProductForm>,
) -> axum::response::Response {
    let created = services.write(|ledger| {
        let id = ledger.add_product(form, Utc::now())?;
        Ok::<_, DomainError>(ledger.product(id).map(dto::product_to_json))
    });

    match created {
        Ok(Some(body)) => (StatusCode::CREATED, Json(body)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "product vanished after insert",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_id::<ProductId>(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.read(|ledger| ledger.product(id).map(dto::product_to_json)) {
        Some(body) => Json(body).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(form): Json<ProductForm>,
) -> axum::response::Response {
    let id = match dto::parse_id::<ProductId>(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let updated = services.write(|ledger| {
        ledger.edit_product(id, form, Utc::now())?;
        Ok::<_, DomainError>(ledger.product(id).map(dto::product_to_json))
    });

    match updated {
        Ok(Some(body)) => Json(body).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_id::<ProductId>(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.write(|ledger| ledger.delete_product(id, Utc::now())) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Apply an increase, decrease, or set-to-value adjustment; returns the stock log entry.
pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    let id = match dto::parse_id::<ProductId>(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let adjusted = services.write(|ledger| {
        ledger.adjust_stock(id, body.kind, body.quantity, &body.reason, Utc::now())
    });

    match adjusted {
        Ok(entry) => (StatusCode::CREATED, Json(dto::stock_log_to_json(&entry))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn bulk_update(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BulkUpdateRequest>,
) -> axum::response::Response {
    let ids = match dto::parse_product_ids(&body.ids) {
        Ok(ids) => ids,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.write(|ledger| ledger.bulk_update(&ids, body.field, &body.value, Utc::now())) {
        Ok(updated) => Json(json!({ "updated": updated })).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Remove several products at once. The request must carry `"confirm": true`.
pub async fn bulk_delete(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BulkDeleteRequest>,
) -> axum::response::Response {
    let ids = match dto::parse_product_ids(&body.ids) {
        Ok(ids) => ids,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut confirmation = Confirmed(body.confirm);
    match services.write(|ledger| ledger.bulk_delete(&ids, &mut confirmation, Utc::now())) {
        Ok(deleted) => Json(json!({ "deleted": deleted })).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
