//! Calendar availability for booth rentals.
//!
//! Serves the fixed slot catalog for a date, masks out already-booked slots
//! and enforces the minimum lead time. The provider is a constructed
//! collaborator handed to the wizard and the routes through `AppState`.

pub mod catalog;
pub mod clock;
pub mod provider;
pub mod routes;

pub use catalog::{earliest_bookable_date, is_lead_time_valid, parse_date, TimeSlot, MIN_LEAD_DAYS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use provider::{AvailabilityError, AvailabilityProvider, MockAvailability};
pub use routes::router;
