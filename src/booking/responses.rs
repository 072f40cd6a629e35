//! Response DTOs for wizard endpoints.

use serde::Serialize;
use uuid::Uuid;

use super::models::{BookingRecord, PaymentStatus};
use super::wizard::{BookingWizard, WizardStep};

/// Closing message shown on the confirmation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub headline: &'static str,
    pub message: &'static str,
}

impl Confirmation {
    pub fn for_status(status: Option<PaymentStatus>) -> Self {
        match status {
            Some(PaymentStatus::Completed) => Self {
                headline: "Thanks for your payment!",
                message: "Your booking is confirmed! We'll send you a confirmation email shortly.",
            },
            _ => Self {
                headline: "Thanks for your interest!",
                message: "We'll be in touch shortly.",
            },
        }
    }
}

/// Snapshot of a wizard session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub session_id: Uuid,
    pub current_step: u8,
    pub step_title: &'static str,
    pub visited_steps: Vec<u8>,
    pub record: BookingRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
}

impl WizardView {
    pub fn new(session_id: Uuid, wizard: &BookingWizard) -> Self {
        let current = wizard.current();
        let record = wizard.record().clone();
        Self {
            session_id,
            current_step: current.number(),
            step_title: current.title(),
            visited_steps: wizard.visited().map(WizardStep::number).collect(),
            confirmation: (current == WizardStep::Confirmation)
                .then(|| Confirmation::for_status(record.payment_status)),
            record,
        }
    }
}
