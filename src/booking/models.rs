//! The accumulated booking record and its parts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::location::ResolvedPlace;
use crate::pricing::{compute_total, EquipmentSelection};

/// Contact details collected on the second wizard step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ContactDetails {
    /// "First Last", or whichever half is present
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// Everything a lead has entered across the wizard.
///
/// Fields are only ever overwritten by a later submission of the same step,
/// never cleared. `total_cost` is pre-tax and kept in step with `equipment`
/// through [`recompute_total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_details: Option<ResolvedPlace>,
    /// Start label of the reserved slot, e.g. "2:00 PM"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    pub contact: ContactDetails,
    pub equipment: EquipmentSelection,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl Default for BookingRecord {
    fn default() -> Self {
        let equipment = EquipmentSelection::default();
        Self {
            date: None,
            location: None,
            location_details: None,
            time_slot: None,
            contact: ContactDetails::default(),
            total_cost: compute_total(&equipment),
            equipment,
            payment_status: None,
        }
    }
}

/// Bring `total_cost` back in line with `equipment`. Idempotent.
pub fn recompute_total(mut record: BookingRecord) -> BookingRecord {
    record.total_cost = compute_total(&record.equipment);
    record
}

/// What is persisted per wizard session: the record, plus the step numbers
/// reached so far so the visited set survives a reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    #[serde(flatten)]
    pub record: BookingRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visited_steps: Vec<u8>,
}
