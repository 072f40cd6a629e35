//! "Have us call you" requests from the booking pages.
//!
//! There is no CRM behind this yet; a request is validated, logged and
//! acknowledged.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    pub first_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct ContactAcknowledgement {
    pub message: &'static str,
}

impl ContactRequest {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        for (field, value) in [
            ("firstName", &self.first_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field });
            }
        }
        Ok(())
    }
}

pub async fn create(
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactAcknowledgement>)> {
    request.validate()?;
    tracing::info!(
        first_name = %request.first_name.trim(),
        email = %request.email.trim(),
        "Call-back requested"
    );
    Ok((
        StatusCode::ACCEPTED,
        Json(ContactAcknowledgement {
            message: "Thanks! We'll be in touch shortly.",
        }),
    ))
}
