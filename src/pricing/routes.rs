//! Pricing API route handlers.
//!
//! # Routes
//!
//! - `POST /api/quote` - Quote a wizard equipment selection
//! - `POST /api/quick-quote` - Price and reserve from the quick booking form

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::models::PricingVariant;
use super::requests::{QuickQuoteRequest, QuoteRequest};
use super::responses::{QuickQuoteResponse, QuoteResponse};
use super::services::{self, Quote};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/quote", post(quote))
        .route("/api/quick-quote", post(quick_quote))
}

/// Quote an equipment selection under wizard pricing
pub async fn quote(Json(request): Json<QuoteRequest>) -> Result<Json<QuoteResponse>> {
    let equipment = request.equipment.into_selection(PricingVariant::FullWizard)?;
    Ok(Json(Quote::build(equipment, PricingVariant::FullWizard).into_response()))
}

/// Quick booking form: validate, reserve and quote in one call
pub async fn quick_quote(
    State(state): State<AppState>,
    Json(request): Json<QuickQuoteRequest>,
) -> Result<Json<QuickQuoteResponse>> {
    let response = services::quick_quote(request, state.availability.as_ref())?;
    if let Some(slot) = &response.reserved_slot {
        tracing::info!("Quick form reserved {} on {}", slot.id, response.date);
        state.cache.invalidate_availability();
    }
    Ok(Json(response))
}
