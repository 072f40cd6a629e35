//! Booking wizard: the accumulated record, the step machine driving it,
//! persistence and the session API.

pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod storage;
pub mod wizard;

pub use models::{recompute_total, BookingRecord, ContactDetails, PaymentStatus, StoredSession};
pub use routes::router;
pub use storage::{BookingStore, FileBookingStore, MemoryBookingStore};
pub use wizard::{BookingWizard, WizardError, WizardStep};
