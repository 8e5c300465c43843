use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;

use localshop_core::{CategoryId, DomainError};
use localshop_inventory::Confirmed;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", delete(delete_category))
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    let categories = services.read(|ledger| {
        ledger
            .categories()
            .iter()
            .map(dto::category_to_json)
            .collect::<Vec<_>>()
    });
    Json(categories)
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCategoryRequest>,
) -> axum::response::Response {
    let created = services.write(|ledger| {
        let id = ledger.add_category(&body.name, &body.description, Utc::now())?;
        Ok::<_, DomainError>(ledger
            .categories()
            .iter()
            .find(|c| c.id == id)
            .map(dto::category_to_json))
    });

    match created {
        Ok(Some(body)) => (StatusCode::CREATED, Json(body)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "category vanished after insert",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `DELETE /categories/:id?confirm=true`. Products keep their category name.
pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(params): Query<dto::ConfirmParams>,
) -> axum::response::Response {
    let id = match dto::parse_id::<CategoryId>(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut confirmation = Confirmed(params.confirm);
    match services.write(|ledger| ledger.delete_category(id, &mut confirmation, Utc::now())) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
