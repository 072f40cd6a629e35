//! Wizard API route handlers.
//!
//! # Routes
//!
//! - `POST /api/wizard` - Open or resume a session
//! - `GET /api/wizard/:id` - Current view
//! - `POST /api/wizard/:id/event-details` - Step 1
//! - `POST /api/wizard/:id/contact` - Step 2
//! - `POST /api/wizard/:id/equipment` - Step 3
//! - `POST /api/wizard/:id/payment` - Step 4
//! - `POST /api/wizard/:id/back` - One step back
//! - `POST /api/wizard/:id/steps/:step` - Jump to a visited step
//! - `POST /api/wizard/:id/restart` - Back to step 1 after confirmation

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::pricing::requests::EquipmentRequest;
use crate::AppState;

use super::requests::{OpenSessionRequest, PaymentRequest};
use super::responses::WizardView;
use super::services;
use super::wizard::{ContactInput, EventDetails, WizardStep};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wizard", post(open))
        .route("/api/wizard/:id", get(show))
        .route("/api/wizard/:id/event-details", post(event_details))
        .route("/api/wizard/:id/contact", post(contact))
        .route("/api/wizard/:id/equipment", post(equipment))
        .route("/api/wizard/:id/payment", post(payment))
        .route("/api/wizard/:id/back", post(back))
        .route("/api/wizard/:id/steps/:step", post(go_to))
        .route("/api/wizard/:id/restart", post(restart))
}

pub async fn open(
    State(state): State<AppState>,
    body: Option<Json<OpenSessionRequest>>,
) -> Result<Json<WizardView>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    Ok(Json(services::open_session(&state, request.session_id).await?))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<WizardView>> {
    Ok(Json(services::view(&state, id).await?))
}

pub async fn event_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<EventDetails>,
) -> Result<Json<WizardView>> {
    let view = services::apply(&state, id, |w| w.submit_event_details(input)).await?;
    // The slot list shown to other visitors may have changed
    state.cache.invalidate_availability();
    Ok(Json(view))
}

pub async fn contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ContactInput>,
) -> Result<Json<WizardView>> {
    Ok(Json(services::apply(&state, id, |w| w.submit_contact(input)).await?))
}

pub async fn equipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<EquipmentRequest>,
) -> Result<Json<WizardView>> {
    Ok(Json(services::apply(&state, id, |w| w.submit_equipment(input)).await?))
}

pub async fn payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<WizardView>> {
    let view = services::apply(&state, id, |w| w.submit_payment(request.decision)).await?;
    tracing::info!("Session {} reached confirmation", id);
    Ok(Json(view))
}

pub async fn back(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<WizardView>> {
    Ok(Json(services::apply(&state, id, |w| w.back()).await?))
}

/// Jump to a visited step. Unvisited or unknown steps leave the view as it was.
pub async fn go_to(
    State(state): State<AppState>,
    Path((id, step)): Path<(Uuid, u8)>,
) -> Result<Json<WizardView>> {
    let Some(step) = WizardStep::from_number(step) else {
        return Err(AppError::NotFound);
    };
    let view = services::apply(&state, id, |w| {
        w.go_to(step);
        Ok(())
    })
    .await?;
    Ok(Json(view))
}

pub async fn restart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>> {
    Ok(Json(services::apply(&state, id, |w| w.restart()).await?))
}
