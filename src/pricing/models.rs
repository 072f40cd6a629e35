//! Equipment selection and pricing models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Hours included with the booth and with a photographer
pub const INCLUDED_HOURS: u32 = 4;
pub const MAX_EXTRA_LOGOS: u32 = 25;
pub const MAX_EXTRA_ROLLS: u32 = 5;
pub const MAX_EXTRA_TIME_HOURS: u32 = 10;
pub const MAX_PHOTOGRAPHER_HOURS: u32 = 24;

/// Which pricing contract a selection is quoted under.
///
/// The two are never combined: extra time and the veteran/non-profit discounts
/// only exist in the wizard, the hand-signal discount only in the quick form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingVariant {
    #[default]
    FullWizard,
    QuickForm,
}

/// Equipment and add-ons chosen for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentSelection {
    pub custom_frame: bool,
    pub extra_logos: u32,
    pub custom_backdrop: bool,
    pub party_swag: bool,
    pub printer: bool,
    pub extra_rolls: u32,
    pub gif_setting: bool,
    pub photographer: bool,
    pub photographer_hours: u32,
    pub outdoor_covered: bool,
    pub extra_time: bool,
    pub extra_time_hours: u32,
    pub is_veteran: bool,
    pub is_non_profit: bool,
    pub hand_signal: bool,
}

impl Default for EquipmentSelection {
    fn default() -> Self {
        Self {
            custom_frame: false,
            extra_logos: 0,
            custom_backdrop: false,
            party_swag: false,
            printer: false,
            extra_rolls: 0,
            gif_setting: false,
            photographer: false,
            photographer_hours: INCLUDED_HOURS,
            outdoor_covered: false,
            extra_time: false,
            extra_time_hours: INCLUDED_HOURS,
            is_veteran: false,
            is_non_profit: false,
            hand_signal: false,
        }
    }
}

impl EquipmentSelection {
    /// Check count ranges and that the two pricing variants are not mixed
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("extraLogos", self.extra_logos, 0, MAX_EXTRA_LOGOS)?;
        check_range("extraRolls", self.extra_rolls, 0, MAX_EXTRA_ROLLS)?;
        check_range(
            "photographerHours",
            self.photographer_hours,
            INCLUDED_HOURS,
            MAX_PHOTOGRAPHER_HOURS,
        )?;
        check_range(
            "extraTimeHours",
            self.extra_time_hours,
            INCLUDED_HOURS,
            MAX_EXTRA_TIME_HOURS,
        )?;
        if self.hand_signal && self.extra_time {
            return Err(ValidationError::ConflictingVariants);
        }
        Ok(())
    }

    /// Reset dependent counts whose parent option is off, and drop the
    /// fields the variant does not price.
    pub fn normalized_for(mut self, variant: PricingVariant) -> Self {
        if !self.custom_frame {
            self.extra_logos = 0;
        }
        if !self.printer {
            self.extra_rolls = 0;
        }
        if !self.photographer {
            self.photographer_hours = INCLUDED_HOURS;
        }
        match variant {
            PricingVariant::FullWizard => self.hand_signal = false,
            PricingVariant::QuickForm => {
                self.extra_time = false;
                self.is_veteran = false;
                self.is_non_profit = false;
            }
        }
        if !self.extra_time {
            self.extra_time_hours = INCLUDED_HOURS;
        }
        self
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        });
    }
    Ok(())
}

/// One priced row of a quote or invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub key: &'static str,
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl LineItem {
    pub fn new(key: &'static str, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            key,
            description: description.into(),
            amount,
        }
    }
}
