//! Invoice draft built from a booking record.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::booking::models::{BookingRecord, PaymentStatus};
use crate::pricing::calculators::tax_for;
use crate::pricing::{compute_total, line_items, LineItem, PricingVariant};

pub const INVOICE_TITLE: &str = "OpenAir Photobooth Rental";
pub const NOT_SELECTED: &str = "Not selected";

pub const PAYMENT_TERMS: &str = "By submitting, you agree that OpenAir will contact you and \
confirm your event. Payment is due 50% up front, and 50% end of Event. If you are using Custom \
items or digital creative, 25% is due at Creative and 25% due at end of event.";

/// Dollar amount for display, e.g. "$722.25"
pub fn format_usd(amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub title: &'static str,
    /// "MMMM d, yyyy", or "Not selected"
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub line_items: Vec<LineItem>,
    /// Pre-tax total
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_with_tax: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    pub terms: &'static str,
}

impl InvoiceDraft {
    /// Price the record's equipment afresh; the stored total is never trusted.
    pub fn from_record(record: &BookingRecord) -> Self {
        let subtotal = compute_total(&record.equipment);
        let tax = tax_for(subtotal);

        Self {
            title: INVOICE_TITLE,
            date: record
                .date
                .map(|date| date.format("%B %-d, %Y").to_string())
                .unwrap_or_else(|| NOT_SELECTED.to_string()),
            time: record
                .time_slot
                .clone()
                .unwrap_or_else(|| NOT_SELECTED.to_string()),
            location: record.location.clone(),
            customer_name: record.contact.full_name(),
            line_items: line_items(&record.equipment, PricingVariant::FullWizard),
            subtotal,
            tax,
            total_with_tax: subtotal + tax,
            payment_status: record.payment_status,
            terms: PAYMENT_TERMS,
        }
    }

    /// Short plain-text summary, encoded into the exported QR code
    pub fn summary_text(&self) -> String {
        let mut lines = vec![
            self.title.to_string(),
            format!("Date: {}", self.date),
            format!("Time: {}", self.time),
        ];
        if let Some(location) = &self.location {
            lines.push(format!("Location: {}", location));
        }
        if let Some(name) = &self.customer_name {
            lines.push(format!("Customer: {}", name));
        }
        lines.push(format!("Subtotal: {}", format_usd(self.subtotal)));
        lines.push(format!("Total (including tax): {}", format_usd(self.total_with_tax)));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::models::ContactDetails;
    use crate::pricing::EquipmentSelection;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record() -> BookingRecord {
        BookingRecord {
            date: NaiveDate::from_ymd_opt(2026, 11, 4),
            location: Some("MainStreet Craftfairs, Cocoa".to_string()),
            time_slot: Some("10:00 AM".to_string()),
            contact: ContactDetails {
                first_name: Some("Sam".to_string()),
                last_name: Some("Rivera".to_string()),
                ..Default::default()
            },
            equipment: EquipmentSelection {
                custom_frame: true,
                extra_logos: 3,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_include_tax() {
        let draft = InvoiceDraft::from_record(&record());
        assert_eq!(draft.subtotal, dec!(675));
        assert_eq!(draft.tax, dec!(47.25));
        assert_eq!(draft.total_with_tax, dec!(722.25));
    }

    #[test]
    fn test_booth_fee_first_in_pricing_order() {
        let draft = InvoiceDraft::from_record(&record());
        let descriptions: Vec<&str> = draft.line_items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Canon-OpenAir Booth", "Custom Frame with Logo", "Extra Logos (3)"]
        );
        assert_eq!(draft.line_items[2].amount, dec!(75));
    }

    #[test]
    fn test_date_and_missing_fields() {
        let draft = InvoiceDraft::from_record(&record());
        assert_eq!(draft.date, "November 4, 2026");
        assert_eq!(draft.customer_name.as_deref(), Some("Sam Rivera"));

        let empty = InvoiceDraft::from_record(&BookingRecord::default());
        assert_eq!(empty.date, NOT_SELECTED);
        assert_eq!(empty.time, NOT_SELECTED);
        assert_eq!(empty.location, None);
        assert_eq!(empty.total_with_tax, dec!(535));
    }

    #[test]
    fn test_stale_stored_total_ignored() {
        let mut stale = record();
        stale.total_cost = dec!(1);
        assert_eq!(InvoiceDraft::from_record(&stale).subtotal, dec!(675));
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(722.25)), "$722.25");
        assert_eq!(format_usd(dec!(500)), "$500.00");
        assert_eq!(format_usd(dec!(-200)), "-$200.00");
    }

    #[test]
    fn test_summary_text() {
        let summary = InvoiceDraft::from_record(&record()).summary_text();
        assert!(summary.starts_with("OpenAir Photobooth Rental\nDate: November 4, 2026"));
        assert!(summary.contains("Location: MainStreet Craftfairs, Cocoa"));
        assert!(summary.ends_with("Total (including tax): $722.25"));
    }
}
