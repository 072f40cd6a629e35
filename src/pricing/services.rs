//! Quote assembly on top of the pure calculators.
//!
//! `Quote` is what both the quote endpoints and the invoice draft are built
//! from, so the line items shown to a lead always match the stored total.

use rust_decimal::Decimal;

use crate::availability::catalog::check_lead_time;
use crate::availability::{parse_date, AvailabilityProvider};
use crate::error::{AppError, ValidationError};

use super::calculators::{compute_total_for, line_items, tax_for};
use super::models::{EquipmentSelection, LineItem, PricingVariant};
use super::requests::QuickQuoteRequest;
use super::responses::{MoneyResponse, QuickQuoteResponse, QuoteResponse};

/// Priced selection with its breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub variant: PricingVariant,
    pub equipment: EquipmentSelection,
    pub line_items: Vec<LineItem>,
    /// Pre-tax total
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total_with_tax: Decimal,
}

impl Quote {
    pub fn build(equipment: EquipmentSelection, variant: PricingVariant) -> Self {
        let subtotal = compute_total_for(&equipment, variant);
        let tax = tax_for(subtotal);
        Self {
            variant,
            line_items: line_items(&equipment, variant),
            equipment,
            subtotal,
            tax,
            total_with_tax: subtotal + tax,
        }
    }

    pub fn into_response(self) -> QuoteResponse {
        QuoteResponse {
            variant: self.variant,
            equipment: self.equipment,
            line_items: self.line_items,
            subtotal: MoneyResponse::usd(self.subtotal),
            tax: MoneyResponse::usd(self.tax),
            total_with_tax: MoneyResponse::usd(self.total_with_tax),
        }
    }
}

/// Price the standalone quick booking form.
///
/// Checks location and lead time, reserves the chosen slot if one was picked,
/// then quotes under the quick-form contract.
pub fn quick_quote(
    request: QuickQuoteRequest,
    provider: &dyn AvailabilityProvider,
) -> Result<QuickQuoteResponse, AppError> {
    let location = request.location.trim();
    if location.is_empty() {
        return Err(ValidationError::MissingField { field: "location" }.into());
    }

    let date = check_lead_time(parse_date(&request.date)?, provider.today())?;
    let equipment = request.equipment.into_selection(PricingVariant::QuickForm)?;

    let reserved_slot = match request.slot_id.as_deref().map(str::trim) {
        Some(slot_id) if !slot_id.is_empty() => Some(provider.reserve_slot(date, slot_id)?),
        _ => None,
    };

    Ok(QuickQuoteResponse {
        location: location.to_string(),
        date,
        date_bookable: provider.is_date_bookable(date),
        reserved_slot,
        quote: Quote::build(equipment, PricingVariant::QuickForm).into_response(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::{FixedClock, MockAvailability};
    use crate::pricing::requests::EquipmentRequest;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn provider() -> MockAvailability {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let booked = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        MockAvailability::with_booked(Arc::new(FixedClock(today)), [(booked, 0)])
    }

    fn request(date: &str, slot_id: Option<&str>) -> QuickQuoteRequest {
        QuickQuoteRequest {
            location: "Cocoa Village".to_string(),
            date: date.to_string(),
            slot_id: slot_id.map(str::to_string),
            equipment: EquipmentRequest {
                printer: true,
                hand_signal: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_quote_build_totals() {
        let equipment = EquipmentSelection {
            custom_frame: true,
            extra_logos: 3,
            ..Default::default()
        };
        let quote = Quote::build(equipment, PricingVariant::FullWizard);
        assert_eq!(quote.subtotal, dec!(675));
        assert_eq!(quote.tax, dec!(47.25));
        assert_eq!(quote.total_with_tax, dec!(722.25));
        assert_eq!(quote.line_items.len(), 3);
    }

    #[test]
    fn test_quick_quote_applies_hand_signal() {
        let response = quick_quote(request("2026-11-03", Some("slot-2")), &provider()).unwrap();
        // 500 + 400 - 200
        assert_eq!(response.quote.subtotal.amount, dec!(700));
        assert_eq!(response.reserved_slot.unwrap().start_time, "2:00 PM");
        assert!(response.date_bookable);
    }

    #[test]
    fn test_quick_quote_rejects_short_notice() {
        let err = quick_quote(request("2026-10-20", None), &provider()).unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::LeadTime { .. })));
    }

    #[test]
    fn test_quick_quote_rejects_booked_slot() {
        let err = quick_quote(request("2026-11-02", Some("slot-0")), &provider()).unwrap_err();
        assert!(matches!(err, AppError::Availability(_)));
    }

    #[test]
    fn test_quick_quote_requires_location() {
        let mut req = request("2026-11-03", None);
        req.location = "  ".to_string();
        let err = quick_quote(req, &provider()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField { field: "location" })
        ));
    }
}
