//! Event location handling.
//!
//! Address lookup happens in the browser's place-autocomplete widget; the
//! server only receives the resolved place and checks that it lies inside the
//! state we serve.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A place picked in the address lookup widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlace {
    pub label: String,
    pub place_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// First-level administrative area, e.g. "FL"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

/// The constituent state events may be booked in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRegion {
    state_code: String,
}

impl ServiceRegion {
    pub fn new(state_code: impl Into<String>) -> Self {
        Self {
            state_code: state_code.into().trim().to_uppercase(),
        }
    }

    pub fn state_code(&self) -> &str {
        &self.state_code
    }

    /// Whether the place resolved to this region. Unknown state means no.
    pub fn contains(&self, place: &ResolvedPlace) -> bool {
        place
            .state_code
            .as_deref()
            .map_or(false, |code| code.trim().eq_ignore_ascii_case(&self.state_code))
    }

    pub fn check(&self, place: &ResolvedPlace) -> Result<(), ValidationError> {
        if self.contains(place) {
            Ok(())
        } else {
            Err(ValidationError::OutsideServiceRegion {
                region: self.state_code.clone(),
            })
        }
    }
}

impl Default for ServiceRegion {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SERVICE_REGION)
    }
}
