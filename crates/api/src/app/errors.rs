use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use localshop_core::DomainError;
use localshop_inventory::DelimitedError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::NotConfirmed(prompt) => json_error(
            StatusCode::PRECONDITION_REQUIRED,
            "confirmation_required",
            prompt,
        ),
    }
}

pub fn delimited_error_to_response(err: DelimitedError) -> axum::response::Response {
    tracing::error!(error = %err, "export failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "export_error",
        err.to_string(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_http_statuses() {
        let cases = [
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::not_found(), StatusCode::NOT_FOUND),
            (DomainError::not_confirmed("Delete 2 products?"), StatusCode::PRECONDITION_REQUIRED),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }
}
