use axum::http::StatusCode;

pub const LIVENESS_MESSAGE: &str = "Local Shop AI Backend Running 🚀";

pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
