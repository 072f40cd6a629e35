//! Request DTOs for pricing API endpoints.
//!
//! This is the input boundary: counts arrive as signed integers so negative or
//! out-of-range values can be rejected with a field-level error before they
//! reach the pricing functions.

use serde::Deserialize;

use crate::error::ValidationError;

use super::models::{
    EquipmentSelection, PricingVariant, INCLUDED_HOURS, MAX_EXTRA_LOGOS, MAX_EXTRA_ROLLS,
    MAX_EXTRA_TIME_HOURS, MAX_PHOTOGRAPHER_HOURS,
};

/// Equipment options as submitted by a form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentRequest {
    pub custom_frame: bool,
    pub extra_logos: i64,
    pub custom_backdrop: bool,
    pub party_swag: bool,
    pub printer: bool,
    pub extra_rolls: i64,
    pub gif_setting: bool,
    pub photographer: bool,
    pub photographer_hours: Option<i64>,
    pub outdoor_covered: bool,
    pub extra_time: bool,
    pub extra_time_hours: Option<i64>,
    pub is_veteran: bool,
    pub is_non_profit: bool,
    pub hand_signal: bool,
}

fn to_count(field: &'static str, value: i64, min: u32, max: u32) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or(ValidationError::OutOfRange {
            field,
            value,
            min: i64::from(min),
            max: i64::from(max),
        })
}

impl EquipmentRequest {
    /// Validate and normalize into a selection priced under `variant`.
    ///
    /// Counts are only checked when their parent option is selected; an
    /// unselected option's count is reset anyway.
    pub fn into_selection(self, variant: PricingVariant) -> Result<EquipmentSelection, ValidationError> {
        let extra_logos = if self.custom_frame {
            to_count("extraLogos", self.extra_logos, 0, MAX_EXTRA_LOGOS)?
        } else {
            0
        };
        let extra_rolls = if self.printer {
            to_count("extraRolls", self.extra_rolls, 0, MAX_EXTRA_ROLLS)?
        } else {
            0
        };
        let photographer_hours = match (self.photographer, self.photographer_hours) {
            (true, Some(hours)) => to_count("photographerHours", hours, INCLUDED_HOURS, MAX_PHOTOGRAPHER_HOURS)?,
            _ => INCLUDED_HOURS,
        };
        let extra_time_hours = match (self.extra_time, self.extra_time_hours) {
            (true, Some(hours)) => to_count("extraTimeHours", hours, INCLUDED_HOURS, MAX_EXTRA_TIME_HOURS)?,
            _ => INCLUDED_HOURS,
        };

        let selection = EquipmentSelection {
            custom_frame: self.custom_frame,
            extra_logos,
            custom_backdrop: self.custom_backdrop,
            party_swag: self.party_swag,
            printer: self.printer,
            extra_rolls,
            gif_setting: self.gif_setting,
            photographer: self.photographer,
            photographer_hours,
            outdoor_covered: self.outdoor_covered,
            extra_time: self.extra_time,
            extra_time_hours,
            is_veteran: self.is_veteran,
            is_non_profit: self.is_non_profit,
            hand_signal: self.hand_signal,
        };
        selection.validate()?;
        Ok(selection.normalized_for(variant))
    }
}

/// Request to quote a wizard equipment selection
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub equipment: EquipmentRequest,
}

/// Request from the standalone quick booking form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickQuoteRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub slot_id: Option<String>,
    #[serde(default)]
    pub equipment: EquipmentRequest,
}
