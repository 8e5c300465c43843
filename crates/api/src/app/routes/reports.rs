use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn stats(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.read(|ledger| ledger.stats()))
}

/// Full stock log, newest first.
pub async fn stock_logs(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let entries = services.read(|ledger| {
        ledger
            .stock_log()
            .iter()
            .map(dto::stock_log_to_json)
            .collect::<Vec<_>>()
    });
    Json(entries)
}
