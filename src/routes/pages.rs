//! Marketing page handlers

use askama::Template;
use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::availability::earliest_bookable_date;
use crate::cache::CacheStats;
use crate::error::Result;
use crate::AppState;

pub struct Feature {
    pub multiplier: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub struct Review {
    pub venue: &'static str,
    pub text: &'static str,
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        multiplier: "1X",
        title: "Event Engagement",
        description: "Participants enjoy fun, memorable experiences with your brand.",
    },
    Feature {
        multiplier: "2X",
        title: "Lead Generation",
        description: "Turn on Data Capture to grow your list of contacts with every photo sent.",
    },
    Feature {
        multiplier: "3X",
        title: "Photo Sharing",
        description: "Photos get shared via messages, email and to social media with your branding.",
    },
];

pub const REVIEWS: [Review; 3] = [
    Review {
        venue: "MainStreet Craftfairs Cocoa",
        text: "Definitely a 5 STAR vendor. The Picture quality is amazing and their digital \
               delivery is instant! Our young guests LOVE that! I will use again!! Thank you \
               OpenAir Photobooths for making our events always a success!!!",
    },
    Review {
        venue: "Winebar Downtown - Orlando",
        text: "We were able to customize our package to fit our needs. Andy has been super \
               helpful and responsive from the beginning. Our guests LOVED the services and we \
               love the pictures. Everyone had a great time. The attendant was so sweet and friendly!",
    },
    Review {
        venue: "Wedding at the Oakmont",
        text: "We had the opportunity of booking Photobooths for our wedding this past September. \
               Our photo booth attendant, Tiffani, arrived early to set up the photo booth in the \
               designated area.",
    },
];

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    features: &'static [Feature],
    reviews: &'static [Review],
    earliest_date: String,
    service_region: String,
}

#[derive(Template)]
#[template(path = "privacy.html")]
struct PrivacyTemplate;

#[derive(Template)]
#[template(path = "terms.html")]
struct TermsTemplate;

/// Homepage handler
pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let template = HomeTemplate {
        features: &FEATURES,
        reviews: &REVIEWS,
        earliest_date: earliest_bookable_date(state.availability.today())
            .format("%Y-%m-%d")
            .to_string(),
        service_region: state.region.state_code().to_string(),
    };
    Ok(Html(template.render()?))
}

pub async fn privacy() -> Result<Html<String>> {
    Ok(Html(PrivacyTemplate.render()?))
}

pub async fn terms() -> Result<Html<String>> {
    Ok(Html(TermsTemplate.render()?))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: CacheStats,
}

/// Liveness check with cache statistics
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}
