//! In-memory caching using moka
//!
//! Caches availability answers per date and holds live wizard sessions.
//! Slot lists are only a read-through cache for display; reservations always
//! go to the provider.

use chrono::{Days, NaiveDate};
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::interval;
use tracing::{debug, info};
use uuid::Uuid;

use crate::availability::{earliest_bookable_date, AvailabilityProvider, TimeSlot};
use crate::booking::wizard::BookingWizard;

/// Number of bookable days warmed ahead of time
const WARM_DAYS: u64 = 30;

/// A wizard guarded for exclusive mutation
pub type SharedWizard = Arc<Mutex<BookingWizard>>;

/// Availability answers depend on the lead time, so they are keyed by the
/// calendar day they were computed on as well as the date asked about.
pub type AvailabilityKey = (NaiveDate, NaiveDate);

/// Application cache holding availability answers and wizard sessions
#[derive(Clone)]
pub struct AppCache {
    /// Slot lists ((today, date) -> slots)
    pub time_slots: Cache<AvailabilityKey, Arc<Vec<TimeSlot>>>,
    /// Date bookable flags ((today, date) -> bookable)
    pub date_availability: Cache<AvailabilityKey, bool>,
    /// Wizard sessions (session id -> wizard)
    pub sessions: Cache<Uuid, SharedWizard>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Slot lists: 400 dates, fresh for 5 minutes
            time_slots: Cache::builder()
                .max_capacity(400)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            date_availability: Cache::builder()
                .max_capacity(400)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            // Sessions: dropped after an hour idle, rehydrated from the store on demand
            sessions: Cache::builder()
                .max_capacity(10_000)
                .time_to_idle(Duration::from_secs(60 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            time_slots_size: self.time_slots.entry_count(),
            date_availability_size: self.date_availability.entry_count(),
            sessions_size: self.sessions.entry_count(),
        }
    }

    /// Slot list for `date` as seen on `today`, served from cache when fresh.
    ///
    /// `today` should come from the same provider, so the answer never
    /// outlives the day it was computed on.
    pub async fn slots_for(
        &self,
        provider: &dyn AvailabilityProvider,
        today: NaiveDate,
        date: NaiveDate,
    ) -> Arc<Vec<TimeSlot>> {
        let key = (today, date);
        if let Some(cached) = self.time_slots.get(&key).await {
            debug!("Cache HIT for slots: {} (today {})", date, today);
            return cached;
        }
        debug!("Cache MISS for slots: {} (today {})", date, today);
        let slots = Arc::new(provider.list_slots(date));
        self.time_slots.insert(key, slots.clone()).await;
        slots
    }

    /// Bookable flag for `date` as seen on the provider's current day
    pub async fn is_bookable(&self, provider: &dyn AvailabilityProvider, date: NaiveDate) -> bool {
        let key = (provider.today(), date);
        if let Some(cached) = self.date_availability.get(&key).await {
            debug!("Cache HIT for bookable: {}", date);
            return cached;
        }
        let bookable = provider.is_date_bookable(date);
        self.date_availability.insert(key, bookable).await;
        bookable
    }

    /// Drop every availability answer, e.g. after a reservation
    pub fn invalidate_availability(&self) {
        self.time_slots.invalidate_all();
        self.date_availability.invalidate_all();
        debug!("Availability caches invalidated");
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.invalidate_availability();
        self.sessions.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub time_slots_size: u64,
    pub date_availability_size: u64,
    pub sessions_size: u64,
}

/// Start background cache warmer
///
/// Warms the next month of bookable dates on startup and every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, provider: Arc<dyn AvailabilityProvider>) {
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, provider.as_ref()).await;
    }
}

/// Warm the slot caches for upcoming bookable dates
async fn warm_cache(cache: &AppCache, provider: &dyn AvailabilityProvider) {
    info!("Starting cache warm-up...");

    let today = provider.today();
    let first = earliest_bookable_date(today);
    for offset in 0..WARM_DAYS {
        let Some(date) = first.checked_add_days(Days::new(offset)) else {
            break;
        };
        let slots = provider.list_slots(date);
        let bookable = slots.iter().any(|slot| slot.available);
        cache.time_slots.insert((today, date), Arc::new(slots)).await;
        cache.date_availability.insert((today, date), bookable).await;
    }

    cache.time_slots.run_pending_tasks().await;
    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
