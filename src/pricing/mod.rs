//! Pricing engine for booth rentals.
//!
//! Pure calculators live in `calculators`; `services` assembles quotes and
//! the quick-form flow on top of them.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

pub use calculators::{compute_total, compute_total_for, line_items, round_money};
pub use models::{EquipmentSelection, LineItem, PricingVariant};
pub use routes::router;
pub use services::Quote;
