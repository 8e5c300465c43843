//! Delimited-text import and export of the catalog.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/export", get(export_products))
        .route("/import", post(import_products))
}

/// Every product the query string filters to (all pages), as a CSV download.
pub async fn export_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ViewParams>,
) -> axum::response::Response {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let export = match services.write(|ledger| ledger.export_to_delimited_text(&query, Utc::now())) {
        Ok(export) => export,
        Err(e) => return errors::delimited_error_to_response(e),
    };

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        export.content,
    )
        .into_response()
}

/// Append the rows of a CSV body. The first line is a header and is skipped.
pub async fn import_products(
    Extension(services): Extension<Arc<AppServices>>,
    body: String,
) -> axum::response::Response {
    let imported = services.write(|ledger| ledger.import_from_delimited_text(&body, Utc::now()));
    Json(json!({ "imported": imported })).into_response()
}
