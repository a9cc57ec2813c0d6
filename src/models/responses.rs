use serde::{Deserialize, Serialize};

use crate::models::domain::DuplicateScreeningResult;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
///
/// `details` carries the screening result for duplicate warnings and blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DuplicateScreeningResult>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
            error_type: None,
            details: None,
        }
    }
}

/// Response for a listing that may be created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenListingResponse {
    pub allowed: bool,
    pub screening: DuplicateScreeningResult,
}
