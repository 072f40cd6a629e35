//! Invoice route handlers.
//!
//! # Routes
//!
//! - `GET /api/wizard/:id/invoice` - Draft invoice for a session
//! - `GET /api/wizard/:id/invoice/export` - Download the invoice PDF

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::booking::services;
use crate::error::Result;
use crate::AppState;

use super::draft::InvoiceDraft;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wizard/:id/invoice", get(draft))
        .route("/api/wizard/:id/invoice/export", get(export))
}

async fn draft_for(state: &AppState, id: Uuid) -> Result<InvoiceDraft> {
    let wizard = services::session(state, id).await?;
    let wizard = wizard.lock().await;
    Ok(InvoiceDraft::from_record(wizard.record()))
}

pub async fn draft(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<InvoiceDraft>> {
    Ok(Json(draft_for(&state, id).await?))
}

/// Export never touches the session; a failed export can simply be retried.
pub async fn export(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Response> {
    let draft = draft_for(&state, id).await?;
    let document = state.exporter.export(&draft)?;
    tracing::info!("Exported invoice for session {} ({} bytes)", id, document.bytes.len());

    let disposition = format!("attachment; filename=\"{}\"", document.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
