//! Core pricing calculation functions.
//!
//! Pure functions for pricing math. Inputs are assumed to be validated and
//! normalized at the request boundary; nothing here rejects a selection.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{EquipmentSelection, LineItem, PricingVariant, INCLUDED_HOURS};

pub const BASE_FEE: u32 = 500;
pub const CUSTOM_FRAME_FEE: u32 = 100;
pub const EXTRA_LOGO_FEE: u32 = 25;
pub const CUSTOM_BACKDROP_FEE: u32 = 200;
pub const PARTY_SWAG_FEE: u32 = 150;
pub const PRINTER_FEE: u32 = 400;
pub const EXTRA_ROLL_FEE: u32 = 200;
pub const PHOTOGRAPHER_FEE: u32 = 300;
pub const PHOTOGRAPHER_HOURLY_FEE: u32 = 120;
pub const OUTDOOR_COVERED_FEE: u32 = 300;
pub const HAND_SIGNAL_DISCOUNT: u32 = 200;

/// Extra booth hours beyond the included four: the first three at the
/// lower rate, the rest at the higher one.
pub const EXTRA_TIME_LOW_RATE_HOURS: u32 = 3;
pub const EXTRA_TIME_LOW_RATE: u32 = 120;
pub const EXTRA_TIME_HIGH_RATE: u32 = 200;

/// Sales tax shown on invoices (7%)
pub const TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use openair_booth_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

fn dollars(amount: u32) -> Decimal {
    Decimal::from(amount)
}

/// Photographer charge: flat fee plus each hour beyond the included four
pub fn photographer_cost(hours: u32) -> Decimal {
    dollars(PHOTOGRAPHER_FEE) + dollars(PHOTOGRAPHER_HOURLY_FEE * hours.saturating_sub(INCLUDED_HOURS))
}

/// Extra-time surcharge for a booth rented `hours` in total.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use openair_booth_web::pricing::calculators::extra_time_surcharge;
///
/// assert_eq!(extra_time_surcharge(4), dec!(0));
/// assert_eq!(extra_time_surcharge(7), dec!(360));  // 3 × 120
/// assert_eq!(extra_time_surcharge(10), dec!(760)); // 3 × 120 + 3 × 200
/// ```
pub fn extra_time_surcharge(hours: u32) -> Decimal {
    let extra = hours.saturating_sub(INCLUDED_HOURS);
    let low = extra.min(EXTRA_TIME_LOW_RATE_HOURS);
    let high = extra.saturating_sub(EXTRA_TIME_LOW_RATE_HOURS);
    dollars(low * EXTRA_TIME_LOW_RATE) + dollars(high * EXTRA_TIME_HIGH_RATE)
}

/// Multiplier for the veteran / non-profit discounts (wizard only)
pub fn discount_multiplier(selection: &EquipmentSelection) -> Decimal {
    match (selection.is_veteran, selection.is_non_profit) {
        (true, true) => Decimal::new(65, 2),
        (true, false) | (false, true) => Decimal::new(75, 2),
        (false, false) => Decimal::ONE,
    }
}

fn discount_description(selection: &EquipmentSelection) -> &'static str {
    match (selection.is_veteran, selection.is_non_profit) {
        (true, true) => "Veteran & Non-Profit Discount (35% off)",
        (true, false) => "Veteran Discount (25% off)",
        _ => "Non-Profit Discount (25% off)",
    }
}

/// Additive line items, booth base fee first, in pricing order
pub fn additive_items(selection: &EquipmentSelection, variant: PricingVariant) -> Vec<LineItem> {
    let mut items = vec![LineItem::new("booth", "Canon-OpenAir Booth", dollars(BASE_FEE))];

    if selection.custom_frame {
        items.push(LineItem::new(
            "custom_frame",
            "Custom Frame with Logo",
            dollars(CUSTOM_FRAME_FEE),
        ));
    }
    if selection.extra_logos > 0 {
        items.push(LineItem::new(
            "extra_logos",
            format!("Extra Logos ({})", selection.extra_logos),
            dollars(EXTRA_LOGO_FEE * selection.extra_logos),
        ));
    }
    if selection.custom_backdrop {
        items.push(LineItem::new(
            "custom_backdrop",
            "Custom Backdrop",
            dollars(CUSTOM_BACKDROP_FEE),
        ));
    }
    if selection.party_swag {
        items.push(LineItem::new(
            "party_swag",
            "Custom Party Fun Swag",
            dollars(PARTY_SWAG_FEE),
        ));
    }
    if selection.printer {
        items.push(LineItem::new("printer", "Printer (100 Shots)", dollars(PRINTER_FEE)));
        if selection.extra_rolls > 0 {
            items.push(LineItem::new(
                "extra_rolls",
                format!("Extra Rolls ({})", selection.extra_rolls),
                dollars(EXTRA_ROLL_FEE * selection.extra_rolls),
            ));
        }
    }
    if selection.gif_setting {
        items.push(LineItem::new("gif_setting", "GIF Setting", Decimal::ZERO));
    }
    if selection.photographer {
        items.push(LineItem::new(
            "photographer",
            format!("Pro-Photographer ({} hours)", selection.photographer_hours),
            photographer_cost(selection.photographer_hours),
        ));
    }
    if selection.outdoor_covered {
        items.push(LineItem::new(
            "outdoor_covered",
            "Outdoor Covered Area",
            dollars(OUTDOOR_COVERED_FEE),
        ));
    }

    match variant {
        PricingVariant::FullWizard => {
            if selection.extra_time {
                let surcharge = extra_time_surcharge(selection.extra_time_hours);
                if surcharge > Decimal::ZERO {
                    items.push(LineItem::new(
                        "extra_time",
                        format!("Extra Time ({} hours total)", selection.extra_time_hours),
                        surcharge,
                    ));
                }
            }
        }
        PricingVariant::QuickForm => {
            if selection.hand_signal {
                items.push(LineItem::new(
                    "hand_signal",
                    "Hand Signal Discount",
                    -dollars(HAND_SIGNAL_DISCOUNT),
                ));
            }
        }
    }

    items
}

/// Full line-item breakdown. A discount, if any, is the last line, and the
/// lines always sum to `compute_total_for` of the same selection.
pub fn line_items(selection: &EquipmentSelection, variant: PricingVariant) -> Vec<LineItem> {
    let mut items = additive_items(selection, variant);
    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();
    let total = compute_total_for(selection, variant);

    if total != subtotal {
        items.push(LineItem::new(
            "discount",
            discount_description(selection),
            total - subtotal,
        ));
    }
    items
}

/// Quote total under the given pricing variant.
///
/// Rounded to cents and never negative.
pub fn compute_total_for(selection: &EquipmentSelection, variant: PricingVariant) -> Decimal {
    let subtotal: Decimal = additive_items(selection, variant)
        .iter()
        .map(|item| item.amount)
        .sum();

    let total = match variant {
        PricingVariant::FullWizard => subtotal * discount_multiplier(selection),
        PricingVariant::QuickForm => subtotal,
    };

    round_money(total, 2).max(Decimal::ZERO)
}

/// Quote total under the canonical (wizard) pricing contract
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use openair_booth_web::pricing::{compute_total, EquipmentSelection};
///
/// assert_eq!(compute_total(&EquipmentSelection::default()), dec!(500));
/// ```
pub fn compute_total(selection: &EquipmentSelection) -> Decimal {
    compute_total_for(selection, PricingVariant::FullWizard)
}

/// Tax on a pre-tax amount
pub fn tax_for(subtotal: Decimal) -> Decimal {
    round_money(subtotal * TAX_RATE, 2)
}

/// Pre-tax amount plus tax
pub fn total_with_tax(subtotal: Decimal) -> Decimal {
    subtotal + tax_for(subtotal)
}
