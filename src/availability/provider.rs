//! Availability provider contract and the mock calendar behind it.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::catalog::{is_lead_time_valid, TimeSlot, MIN_LEAD_DAYS, SLOT_START_HOURS};
use super::clock::Clock;

/// Days (counted from construction) that may receive mock bookings
const MOCK_BOOKING_HORIZON_DAYS: u64 = 30;

/// Chance that a day in the horizon has one booked slot
const MOCK_BOOKED_DAY_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Time slot {slot_id} is not available on {date}")]
    SlotUnavailable { date: NaiveDate, slot_id: String },
}

/// Answers slot and availability queries for calendar dates.
pub trait AvailabilityProvider: Send + Sync {
    /// Current date as seen by this provider
    fn today(&self) -> NaiveDate;

    /// Ordered slot list for `date`. Deterministic per date.
    fn list_slots(&self, date: NaiveDate) -> Vec<TimeSlot>;

    /// True iff at least one slot on `date` is available
    fn is_date_bookable(&self, date: NaiveDate) -> bool {
        self.list_slots(date).iter().any(|slot| slot.available)
    }

    /// Confirm a slot against the latest availability.
    ///
    /// Always re-reads `list_slots`; never trusts a previously fetched list.
    fn reserve_slot(&self, date: NaiveDate, slot_id: &str) -> Result<TimeSlot, AvailabilityError> {
        self.list_slots(date)
            .into_iter()
            .find(|slot| slot.id == slot_id && slot.available)
            .ok_or_else(|| AvailabilityError::SlotUnavailable {
                date,
                slot_id: slot_id.to_string(),
            })
    }
}

/// In-memory calendar with a seeded "already booked" mask.
///
/// The mask is generated once at construction; reservations do not mutate it.
pub struct MockAvailability {
    clock: Arc<dyn Clock>,
    booked: HashSet<(NaiveDate, usize)>,
}

impl MockAvailability {
    /// Build the mock calendar, drawing booked slots from `seed`
    pub fn new(clock: Arc<dyn Clock>, seed: u64) -> Self {
        let anchor = clock.today();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut booked = HashSet::new();

        for offset in MIN_LEAD_DAYS..MIN_LEAD_DAYS + MOCK_BOOKING_HORIZON_DAYS {
            let Some(day) = anchor.checked_add_days(Days::new(offset)) else {
                break;
            };
            if rng.gen::<f64>() < MOCK_BOOKED_DAY_PROBABILITY {
                booked.insert((day, rng.gen_range(0..SLOT_START_HOURS.len())));
            }
        }

        tracing::debug!("Mock calendar seeded with {} booked slots", booked.len());
        Self { clock, booked }
    }

    /// Build the mock calendar with an explicit booked mask
    pub fn with_booked<I>(clock: Arc<dyn Clock>, booked: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, usize)>,
    {
        Self {
            clock,
            booked: booked.into_iter().collect(),
        }
    }

    /// Number of booked (date, slot) pairs in the mask
    pub fn booked_count(&self) -> usize {
        self.booked.len()
    }
}

impl AvailabilityProvider for MockAvailability {
    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn list_slots(&self, date: NaiveDate) -> Vec<TimeSlot> {
        let bookable = is_lead_time_valid(date, self.clock.today());

        SLOT_START_HOURS
            .iter()
            .enumerate()
            .map(|(index, start_hour)| {
                let available = bookable && !self.booked.contains(&(date, index));
                TimeSlot::from_catalog(index, *start_hour, available)
            })
            .collect()
    }
}
