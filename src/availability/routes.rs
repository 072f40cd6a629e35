//! Availability API route handlers.
//!
//! # Routes
//!
//! - `GET /api/availability/:date` - Slot list for a date
//! - `GET /api/availability/:date/bookable` - Whether any slot is open
//! - `POST /api/availability/:date/reserve` - Confirm a slot

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::AppState;

use super::catalog::{earliest_bookable_date, parse_date, TimeSlot};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/availability/:date", get(list_slots))
        .route("/api/availability/:date/bookable", get(bookable))
        .route("/api/availability/:date/reserve", post(reserve))
}

/// Slots for one date
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub earliest_bookable_date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookableResponse {
    pub date: NaiveDate,
    pub bookable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub slot_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// Slot list for a date. Dates inside the lead time list every slot as unavailable.
pub async fn list_slots(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<SlotsResponse>> {
    let date = parse_date(&date)?;
    let today = state.availability.today();
    let slots = state.cache.slots_for(state.availability.as_ref(), today, date).await;

    Ok(Json(SlotsResponse {
        date,
        earliest_bookable_date: earliest_bookable_date(today),
        slots: slots.as_ref().clone(),
    }))
}

pub async fn bookable(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<BookableResponse>> {
    let date = parse_date(&date)?;
    let bookable = state.cache.is_bookable(state.availability.as_ref(), date).await;
    Ok(Json(BookableResponse { date, bookable }))
}

/// Reserve a slot, always checked against the provider rather than the cache
pub async fn reserve(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(request): Json<ReserveRequest>,
) -> Result<Json<ReservationResponse>> {
    let date = parse_date(&date)?;
    let slot = state.availability.reserve_slot(date, request.slot_id.trim())?;
    state.cache.invalidate_availability();
    tracing::info!("Reserved {} on {}", slot.id, date);
    Ok(Json(ReservationResponse { date, slot }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get, json_body, post_json, test_state, BOOKED_DATE};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_slots_inside_lead_time() {
        let app = router().with_state(test_state());
        let response = get(app, "/api/availability/2026-10-20").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["earliestBookableDate"], "2026-10-24");
        let slots = body["slots"].as_array().unwrap();
        assert_eq!(slots.len(), 6);
        assert!(slots.iter().all(|s| s["available"] == false));
    }

    #[tokio::test]
    async fn test_bookable_endpoint() {
        let app = router().with_state(test_state());
        let body = json_body(get(app, "/api/availability/2026-11-10/bookable").await).await;
        assert_eq!(body["bookable"], true);
    }

    #[tokio::test]
    async fn test_invalid_date_is_validation_error() {
        let app = router().with_state(test_state());
        let response = get(app, "/api/availability/next-tuesday").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_reserve_booked_slot_conflicts() {
        let state = test_state();
        let uri = format!("/api/availability/{}/reserve", BOOKED_DATE);

        let response = post_json(
            router().with_state(state.clone()),
            &uri,
            serde_json::json!({"slotId": "slot-0"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert_eq!(body["errorType"], "slot_unavailable");

        let response = post_json(
            router().with_state(state),
            &uri,
            serde_json::json!({"slotId": "slot-3"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["slot"]["startTime"], "4:00 PM");
    }
}
