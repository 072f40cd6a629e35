//! Route handlers for site pages

pub mod contact;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/privacy", get(pages::privacy))
        .route("/terms", get(pages::terms))
        .route("/health", get(pages::health))
        .route("/api/contact-requests", post(contact::create))
}
