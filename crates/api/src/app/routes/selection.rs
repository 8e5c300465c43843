//! Products picked for bulk actions.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use localshop_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(get_selection).put(select_all).delete(clear_selection),
        )
        .route("/:id", post(toggle_selection))
}

fn selection_json(services: &AppServices) -> serde_json::Value {
    services.read(|ledger| {
        json!({
            "ids": ledger.selection().iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        })
    })
}

pub async fn get_selection(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(selection_json(&services))
}

/// Replace the selection with the known products among `ids` (the "select all" box).
pub async fn select_all(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SelectAllRequest>,
) -> axum::response::Response {
    let ids = match dto::parse_product_ids(&body.ids) {
        Ok(ids) => ids,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.write(|ledger| ledger.select_all(&ids));
    Json(selection_json(&services)).into_response()
}

pub async fn clear_selection(Extension(services): Extension<Arc<AppServices>>) -> StatusCode {
    services.write(|ledger| ledger.clear_selection());
    StatusCode::NO_CONTENT
}

pub async fn toggle_selection(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_id::<ProductId>(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.write(|ledger| ledger.toggle_selection(id)) {
        Ok(selected) => Json(json!({ "id": id.to_string(), "selected": selected })).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
