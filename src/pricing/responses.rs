//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::availability::TimeSlot;

use super::models::{EquipmentSelection, LineItem, PricingVariant};

pub const CURRENCY: &str = "USD";

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn usd(amount: Decimal) -> Self {
        Self {
            amount,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Response for a price quote
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub variant: PricingVariant,
    pub equipment: EquipmentSelection,
    pub line_items: Vec<LineItem>,
    pub subtotal: MoneyResponse,
    pub tax: MoneyResponse,
    pub total_with_tax: MoneyResponse,
}

/// Response for the quick booking form
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickQuoteResponse {
    pub location: String,
    pub date: NaiveDate,
    pub date_bookable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_slot: Option<TimeSlot>,
    pub quote: QuoteResponse,
}
