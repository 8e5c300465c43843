use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;

use localshop_inventory::NotificationId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:id", delete(dismiss_notification))
}

/// Notifications that have not expired yet, oldest first.
pub async fn list_notifications(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    let active = services.read(|ledger| {
        ledger
            .notifications(Utc::now())
            .map(dto::notification_to_json)
            .collect::<Vec<_>>()
    });
    Json(active)
}

pub async fn dismiss_notification(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    if services.write(|ledger| ledger.dismiss_notification(NotificationId(id))) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "notification not found")
    }
}
