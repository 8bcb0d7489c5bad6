use axum::{
    extract::rejection::JsonRejection,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/estimation", post(estimate))
}

/// Stateless: needs neither the catalog nor the mirror.
pub async fn estimate(body: Result<Json<dto::EstimateRequest>, JsonRejection>) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let result = body
        .base_price()
        .and_then(|base| phonemart_pricing::estimate(base, &body.diagnostics));

    match result {
        Ok(estimation) => Json(dto::EstimateResponse {
            estimation,
            diagnostics: body.diagnostics,
        })
        .into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "estimation rejected");
            errors::domain_error_to_response(e)
        }
    }
}
