use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use phonemart_core::DomainError;
use phonemart_pricing::Diagnostics;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    /// `None` when the key is absent or `null`.
    #[serde(default)]
    pub stock: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    /// Number or numeric string (catalog prices come from CSV text).
    #[serde(alias = "base_price")]
    pub prix_base: Value,
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl EstimateRequest {
    pub fn base_price(&self) -> Result<f64, DomainError> {
        match &self.prix_base {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| DomainError::invalid_input("prix_base is not representable")),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::invalid_input(format!("prix_base {s:?} is not a number"))),
            _ => Err(DomainError::invalid_input("prix_base must be a number")),
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub estimation: u64,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog_loaded: bool,
    pub mirror_configured: bool,
    pub products: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}
