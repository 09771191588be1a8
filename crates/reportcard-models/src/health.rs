//! Health and diagnostic responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SERVICE_NAME: &str = "School Management System API";

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            service: SERVICE_NAME.to_string(),
        }
    }
}

/// Response of `GET /api/test`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub template_path: String,
    pub template_exists: bool,
    pub template_cached: bool,
    /// Placeholder tokens found in the template; empty when it cannot be loaded
    pub template_placeholders: Vec<String>,
    /// Known placeholder tokens the template does not contain
    pub missing_placeholders: Vec<String>,
    pub provider: String,
}

/// Successful response of `GET /api/test-firebase`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderCheckResponse {
    pub success: bool,
    pub message: String,
    pub provider: String,
}
