use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::clients::{AmadeusError, UpstreamIssue};
use crate::services::{FlightError, HotelError, PaymentError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ExternalApiError { service: String, message: String },

    /// An upstream answer relayed with its own status and `errors` array.
    Upstream {
        status: StatusCode,
        message: String,
        errors: Vec<UpstreamIssue>,
    },

    ValidationError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ExternalApiError { service, message } => {
                write!(f, "{} error: {}", service, message)
            }
            ApiError::Upstream {
                status, message, ..
            } => write!(f, "Upstream error ({}): {}", status, message),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::ExternalApiError { service, message } => {
                tracing::warn!("{} API error: {}", service, message);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("{} service is unavailable", service),
                    None,
                )
            }
            ApiError::Upstream {
                status,
                message,
                errors,
            } => {
                tracing::warn!(%status, "Relaying upstream error: {}", message);
                (status, message, Some(errors))
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = ApiResponse::<()>::error(
            status.canonical_reason().unwrap_or("Error"),
            message,
        );
        body.errors = errors;
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<AmadeusError> for ApiError {
    fn from(err: AmadeusError) -> Self {
        match err {
            AmadeusError::MissingCredentials => ApiError::internal(err.to_string()),
            AmadeusError::Api { status, errors } => {
                let message = errors
                    .iter()
                    .find_map(|issue| issue.detail.clone())
                    .unwrap_or_else(|| format!("Amadeus returned {status}"));
                let status = if status.is_client_error() || status.is_server_error() {
                    status
                } else {
                    StatusCode::BAD_GATEWAY
                };
                ApiError::Upstream {
                    status,
                    message,
                    errors,
                }
            }
            other => ApiError::amadeus_error(other.to_string()),
        }
    }
}

impl From<HotelError> for ApiError {
    fn from(err: HotelError) -> Self {
        match err {
            HotelError::Validation(msg) => Self::validation(msg),
            HotelError::NotFound(msg) => Self::NotFound(msg),
            HotelError::Upstream(err) => err.into(),
        }
    }
}

impl From<FlightError> for ApiError {
    fn from(err: FlightError) -> Self {
        match err {
            FlightError::Validation(msg) => Self::validation(msg),
            FlightError::Upstream(err) => err.into(),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Validation(msg) => Self::validation(msg),
        }
    }
}

impl ApiError {
    pub fn amadeus_error(msg: impl Into<String>) -> Self {
        ApiError::ExternalApiError {
            service: "Amadeus".to_string(),
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}
