//! Invoice drafts and their export.

pub mod draft;
pub mod export;
pub mod pdf;
pub mod routes;

pub use draft::InvoiceDraft;
pub use export::{ExportError, ExportedDocument, InvoiceExporter, PdfExporter};
pub use routes::router;
