use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Failures raised while fetching data for, or generating, a report card.
///
/// The `Display` output doubles as the user-facing message, both in HTTP
/// responses and in per-student batch outcomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// The requested student has no record.
    #[error("Student not found")]
    NotFound,

    /// Required request fields are missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The template asset is missing, unreadable, or not a word document.
    #[error("Failed to load report template: {0}")]
    TemplateLoad(String),

    /// The populated document could not be serialized.
    #[error("Failed to render report document: {0}")]
    TemplateRender(String),

    /// The underlying data store call failed (network, auth, quota, timeout).
    #[error("Data fetch failed: {0}")]
    DataFetch(String),
}

impl ReportError {
    pub fn template_load(err: impl std::fmt::Display) -> Self {
        Self::TemplateLoad(err.to_string())
    }

    pub fn template_render(err: impl std::fmt::Display) -> Self {
        Self::TemplateRender(err.to_string())
    }

    pub fn data_fetch(err: impl std::fmt::Display) -> Self {
        Self::DataFetch(err.to_string())
    }

    /// HTTP status the single-report path answers with for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::TemplateLoad(_) | Self::TemplateRender(_) | Self::DataFetch(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    fn body(&self) -> ErrorResponse {
        if self.status.is_server_error() {
            ErrorResponse {
                success: false,
                message: "Internal server error".to_string(),
                error: Some(self.error.to_string()),
            }
        } else {
            ErrorResponse {
                success: false,
                message: self.error.to_string(),
                error: None,
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = %self.error, "Request failed");
        }

        (self.status, Json(self.body())).into_response()
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::new(err.status_code(), err)
    }
}
