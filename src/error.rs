//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::availability::AvailabilityError;
use crate::booking::storage::StorageError;
use crate::booking::wizard::WizardError;
use crate::invoice::export::ExportError;

/// Bad user input, caught at the input boundary.
///
/// These never reach the pricing engine or the booking store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Please select a date at least 7 days in the future (earliest available: {earliest})")]
    LeadTime { date: NaiveDate, earliest: NaiveDate },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Please select a location in {region}")]
    OutsideServiceRegion { region: String },

    #[error("The hand signal discount cannot be combined with extra time")]
    ConflictingVariants,
}

impl ValidationError {
    /// Name of the offending input field, for inline form feedback
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField { field } => Some(field),
            ValidationError::LeadTime { .. } | ValidationError::InvalidDate(_) => Some("date"),
            ValidationError::OutOfRange { field, .. } => Some(field),
            ValidationError::OutsideServiceRegion { .. } => Some("location"),
            ValidationError::ConflictingVariants => Some("handSignal"),
        }
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,

    #[error("Booking session {0} not found")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

fn json_error(
    status: StatusCode,
    error_type: &'static str,
    message: String,
    field: Option<&'static str>,
) -> Response {
    let body = ErrorResponse {
        error_type,
        message,
        field,
    };
    (status, Json(body)).into_response()
}

fn validation_response(err: &ValidationError) -> Response {
    json_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        "validation",
        err.to_string(),
        err.field(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Page not found"),
            AppError::SessionNotFound(_) => {
                return json_error(StatusCode::NOT_FOUND, "session_not_found", self.to_string(), None);
            }
            AppError::Validation(e) => return validation_response(e),
            AppError::Availability(e) => {
                tracing::info!("Reservation rejected: {}", e);
                return json_error(StatusCode::CONFLICT, "slot_unavailable", e.to_string(), Some("timeSlot"));
            }
            AppError::Wizard(e) => {
                return match e {
                    WizardError::Validation(v) => validation_response(v),
                    WizardError::Availability(a) => {
                        tracing::info!("Reservation rejected: {}", a);
                        json_error(StatusCode::CONFLICT, "slot_unavailable", a.to_string(), Some("timeSlot"))
                    }
                    WizardError::InvalidTransition { .. } => {
                        json_error(StatusCode::CONFLICT, "invalid_transition", e.to_string(), None)
                    }
                };
            }
            AppError::Export(e) => {
                tracing::warn!("Invoice export failed: {}", e);
                return json_error(
                    StatusCode::BAD_GATEWAY,
                    "export_failure",
                    "Failed to generate the invoice document. Please try again.".to_string(),
                    None,
                );
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                return json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage",
                    "Could not save your booking".to_string(),
                    None,
                );
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };

        // Return simple HTML error page
        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head><title>{} - OpenAir Photobooths</title></head>
<body style="font-family: sans-serif; text-align: center; padding: 50px;">
    <h1>{}</h1>
    <p>{}</p>
    <a href="/">Return to homepage</a>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            message
        );

        (status, axum::response::Html(html)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_fields() {
        assert_eq!(
            ValidationError::MissingField { field: "location" }.field(),
            Some("location")
        );
        assert_eq!(ValidationError::InvalidDate("x".into()).field(), Some("date"));
        assert_eq!(
            ValidationError::OutsideServiceRegion { region: "FL".into() }.to_string(),
            "Please select a location in FL"
        );
    }

    #[test]
    fn test_status_codes() {
        let resp = AppError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::from(ValidationError::MissingField { field: "email" }).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = AppError::from(AvailabilityError::SlotUnavailable {
            date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            slot_id: "slot-0".into(),
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = AppError::Internal("boom".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
