//! OpenAir Photobooths website and booking wizard.
//!
//! Axum server for the marketing pages and the booking API: calendar
//! availability, pricing quotes, the five-step booking wizard and invoice
//! drafts with a downloadable PDF.

pub mod availability;
pub mod booking;
pub mod cache;
pub mod config;
pub mod error;
pub mod invoice;
pub mod location;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use availability::{AvailabilityProvider, Clock, MockAvailability, SystemClock};
use booking::{BookingStore, FileBookingStore};
use cache::AppCache;
use config::Config;
use error::AppError;
use invoice::{InvoiceExporter, PdfExporter};
use location::ServiceRegion;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: AppCache,
    pub availability: Arc<dyn AvailabilityProvider>,
    pub store: Arc<dyn BookingStore>,
    pub exporter: Arc<dyn InvoiceExporter>,
    pub region: ServiceRegion,
}

impl AppState {
    /// Wire up the production collaborators described by `config`
    pub fn from_config(config: Config) -> Self {
        if !config.use_mock_data {
            warn!("USE_MOCK_DATA=false but no live calendar source is configured, serving mock availability");
        }
        let seed = config.availability_seed.unwrap_or_else(rand::random);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let availability = MockAvailability::new(clock, seed);
        info!(
            seed,
            booked_slots = availability.booked_count(),
            "Mock availability ready"
        );

        Self {
            cache: AppCache::new(),
            availability: Arc::new(availability),
            store: Arc::new(FileBookingStore::new(config.data_dir.clone())),
            exporter: Arc::new(PdfExporter),
            region: ServiceRegion::new(config.service_region.clone()),
            config: Arc::new(config),
        }
    }
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .merge(availability::router())
        .merge(pricing::router())
        .merge(booking::router())
        .merge(invoice::router())
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use axum::response::Response;
    use axum::Router;
    use chrono::NaiveDate;
    use tower::ServiceExt;

    use super::*;
    use crate::availability::FixedClock;
    use crate::booking::MemoryBookingStore;

    /// Slot 0 is already booked on this date
    pub const BOOKED_DATE: &str = "2026-11-02";

    /// State frozen at 2026-10-16 with an in-memory store
    pub fn test_state() -> AppState {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let booked = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        let availability = MockAvailability::with_booked(Arc::new(FixedClock(today)), [(booked, 0)]);

        AppState {
            config: Arc::new(Config::default()),
            cache: AppCache::new(),
            availability: Arc::new(availability),
            store: Arc::new(MemoryBookingStore::new()),
            exporter: Arc::new(PdfExporter),
            region: ServiceRegion::default(),
        }
    }

    pub async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    pub async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
