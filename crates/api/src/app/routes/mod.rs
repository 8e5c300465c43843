use axum::{routing::get, Router};

pub mod categories;
pub mod notifications;
pub mod products;
pub mod reports;
pub mod selection;
pub mod system;
pub mod transfer;

/// Router for every inventory endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/stats", get(reports::stats))
        .route("/stock-logs", get(reports::stock_logs))
        .nest("/products", products::router().merge(transfer::router()))
        .nest("/categories", categories::router())
        .nest("/selection", selection::router())
        .nest("/notifications", notifications::router())
}
