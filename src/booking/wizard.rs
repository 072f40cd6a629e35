//! The five-step booking wizard.
//!
//! A wizard owns the step pointer, the set of steps reached so far and the
//! accumulated [`BookingRecord`]. Every submission validates its whole input
//! before touching either, so a rejected submission leaves the wizard exactly
//! as it was.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::availability::catalog::check_lead_time;
use crate::availability::{parse_date, AvailabilityError, AvailabilityProvider};
use crate::error::ValidationError;
use crate::location::{ResolvedPlace, ServiceRegion};
use crate::pricing::requests::EquipmentRequest;
use crate::pricing::PricingVariant;

use super::models::{recompute_total, BookingRecord, ContactDetails, PaymentStatus, StoredSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    EventDetails = 1,
    Contact = 2,
    Equipment = 3,
    Payment = 4,
    Confirmation = 5,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::EventDetails,
        WizardStep::Contact,
        WizardStep::Equipment,
        WizardStep::Payment,
        WizardStep::Confirmation,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::EventDetails => "Event Details",
            WizardStep::Contact => "Contact Information",
            WizardStep::Equipment => "Equipment",
            WizardStep::Payment => "Payment",
            WizardStep::Confirmation => "Confirmation",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

/// Step 1 input
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDetails {
    pub location: String,
    pub place: Option<ResolvedPlace>,
    pub date: String,
    pub slot_id: String,
}

/// Step 2 input
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Step 4 choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentDecision {
    Confirm,
    Defer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error("Cannot {action} from {from}")]
    InvalidTransition { from: WizardStep, action: &'static str },
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

#[derive(Clone)]
pub struct BookingWizard {
    current: WizardStep,
    visited: BTreeSet<WizardStep>,
    record: BookingRecord,
    availability: Arc<dyn AvailabilityProvider>,
    region: ServiceRegion,
}

impl fmt::Debug for BookingWizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingWizard")
            .field("current", &self.current)
            .field("visited", &self.visited)
            .field("record", &self.record)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl BookingWizard {
    /// Fresh wizard on step 1 with an empty record
    pub fn new(availability: Arc<dyn AvailabilityProvider>, region: ServiceRegion) -> Self {
        Self::rehydrate(BookingRecord::default(), availability, region)
    }

    /// Resume from a stored record. The pointer always restarts at step 1.
    pub fn rehydrate(
        record: BookingRecord,
        availability: Arc<dyn AvailabilityProvider>,
        region: ServiceRegion,
    ) -> Self {
        Self {
            current: WizardStep::EventDetails,
            visited: BTreeSet::from([WizardStep::EventDetails]),
            record: recompute_total(record),
            availability,
            region,
        }
    }

    /// Rehydrate a stored session. The wizard reopens on step 1 but keeps
    /// every step reached before; unknown step numbers are dropped.
    pub fn resume(
        stored: StoredSession,
        availability: Arc<dyn AvailabilityProvider>,
        region: ServiceRegion,
    ) -> Self {
        let mut wizard = Self::rehydrate(stored.record, availability, region);
        wizard
            .visited
            .extend(stored.visited_steps.into_iter().filter_map(WizardStep::from_number));
        wizard
    }

    /// Everything needed to [`resume`](Self::resume) this wizard later
    pub fn snapshot(&self) -> StoredSession {
        StoredSession {
            record: self.record.clone(),
            visited_steps: self.visited().map(WizardStep::number).collect(),
        }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Steps reached so far, in order
    pub fn visited(&self) -> impl Iterator<Item = WizardStep> + '_ {
        self.visited.iter().copied()
    }

    pub fn has_visited(&self, step: WizardStep) -> bool {
        self.visited.contains(&step)
    }

    pub fn record(&self) -> &BookingRecord {
        &self.record
    }

    fn expect_step(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.current == step {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                from: self.current,
                action,
            })
        }
    }

    fn advance(&mut self, to: WizardStep) {
        self.current = to;
        self.visited.insert(to);
    }

    /// Step 1: location, lead-time-valid date and a slot the provider confirms
    pub fn submit_event_details(&mut self, input: EventDetails) -> Result<(), WizardError> {
        self.expect_step(WizardStep::EventDetails, "submit event details")?;

        let location = required("location", &input.location)?;
        if let Some(place) = &input.place {
            self.region.check(place)?;
        }
        let date = check_lead_time(parse_date(&input.date)?, self.availability.today())?;
        let slot_id = required("timeSlot", &input.slot_id)?;
        let slot = self.availability.reserve_slot(date, &slot_id)?;

        tracing::debug!("Wizard reserved {} on {}", slot.id, date);
        self.record.location = Some(location);
        self.record.location_details = input.place;
        self.record.date = Some(date);
        self.record.time_slot = Some(slot.start_time);
        self.advance(WizardStep::Contact);
        Ok(())
    }

    /// Step 2: all four contact fields, non-empty after trimming
    pub fn submit_contact(&mut self, input: ContactInput) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Contact, "submit contact details")?;

        let contact = ContactDetails {
            first_name: Some(required("firstName", &input.first_name)?),
            last_name: Some(required("lastName", &input.last_name)?),
            phone: Some(required("phone", &input.phone)?),
            email: Some(required("email", &input.email)?),
        };

        self.record.contact = contact;
        self.advance(WizardStep::Equipment);
        Ok(())
    }

    /// Step 3: merge the selection and recompute the total
    pub fn submit_equipment(&mut self, input: EquipmentRequest) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Equipment, "submit equipment")?;

        let equipment = input.into_selection(PricingVariant::FullWizard)?;
        self.record.equipment = equipment;
        self.record = recompute_total(std::mem::take(&mut self.record));
        self.advance(WizardStep::Payment);
        Ok(())
    }

    /// Step 4: both decisions advance; only the payment status differs
    pub fn submit_payment(&mut self, decision: PaymentDecision) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Payment, "submit payment")?;

        self.record.payment_status = Some(match decision {
            PaymentDecision::Confirm => PaymentStatus::Completed,
            PaymentDecision::Defer => PaymentStatus::Pending,
        });
        self.advance(WizardStep::Confirmation);
        Ok(())
    }

    /// One step back from steps 2 to 4. Nothing in the record is lost.
    pub fn back(&mut self) -> Result<(), WizardError> {
        match self.current {
            WizardStep::Contact | WizardStep::Equipment | WizardStep::Payment => {
                if let Some(previous) = self.current.previous() {
                    self.current = previous;
                }
                Ok(())
            }
            from => Err(WizardError::InvalidTransition {
                from,
                action: "go back",
            }),
        }
    }

    /// Jump to a step reached before. Unvisited steps are ignored.
    pub fn go_to(&mut self, step: WizardStep) -> bool {
        if self.visited.contains(&step) {
            self.current = step;
            true
        } else {
            tracing::debug!("Ignoring jump to unvisited {}", step);
            false
        }
    }

    /// From the confirmation back to step 1, keeping the record and visited steps
    pub fn restart(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Confirmation, "restart")?;
        self.current = WizardStep::EventDetails;
        Ok(())
    }
}
