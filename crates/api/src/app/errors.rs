use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;

use phonemart_core::DomainError;

/// Seconds a client should wait before retrying while the catalog loads.
pub const RETRY_AFTER_SECS: &str = "1";

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotLoaded => {
            let mut res = json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "not_loaded",
                "catalog is loading, retry shortly",
            );
            res.headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
            res
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        DomainError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_input", msg),
        DomainError::UpstreamUnavailable(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream_error", msg)
        }
    }
}

/// Malformed or missing JSON bodies are client input errors.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_input", rejection.body_text())
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
    fn not_loaded_is_retryable_service_unavailable() {
        let res = domain_error_to_response(DomainError::NotLoaded);
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(res.headers().get(header::RETRY_AFTER).unwrap(), "1");
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(domain_error_to_response(DomainError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            domain_error_to_response(DomainError::invalid_input("stock")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error_to_response(DomainError::upstream("timeout")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
