//! Invoice export to a portable PDF.
//!
//! The invoice view is laid out on one A4 page, with a QR code of the
//! invoice summary in the top right corner so a printed copy can be read
//! back with a phone.

use image::{GrayImage, Luma};
use qrcode::QrCode;
use thiserror::Error;

use crate::booking::models::PaymentStatus;

use super::draft::{format_usd, InvoiceDraft};
use super::pdf::{wrap, Font, Page, PAGE_HEIGHT, PAGE_WIDTH};

pub const EXPORT_FILE_STEM: &str = "OpenAir-PhotoBooth-Invoice";

/// Smallest edge of the rendered QR image, in pixels
const QR_MIN_SIZE: u32 = 240;
/// Printed edge of the QR code, in points
const QR_PRINT_SIZE: f32 = 130.0;

const MARGIN: f32 = 50.0;
const VALUE_COLUMN: f32 = MARGIN + 80.0;
const AMOUNT_COLUMN: f32 = PAGE_WIDTH - MARGIN - 90.0;
const TERMS_WIDTH: usize = 100;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),
}

/// A finished export, ready to be offered as a download
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Document-export backend
pub trait InvoiceExporter: Send + Sync {
    fn export(&self, draft: &InvoiceDraft) -> Result<ExportedDocument, ExportError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExporter;

impl PdfExporter {
    /// Grayscale QR code for `text`
    pub fn render_qr(text: &str) -> Result<GrayImage, ExportError> {
        let code = QrCode::new(text.as_bytes())?;
        Ok(code
            .render::<Luma<u8>>()
            .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
            .build())
    }

    fn layout(draft: &InvoiceDraft, qr: GrayImage) -> Page {
        let mut page = Page::new();
        let top = PAGE_HEIGHT - MARGIN;

        page.image(qr, PAGE_WIDTH - MARGIN - QR_PRINT_SIZE, top - QR_PRINT_SIZE, QR_PRINT_SIZE);
        page.text(Font::Bold, 20.0, MARGIN, top - 20.0, draft.title);

        let mut details = vec![("Date", draft.date.as_str()), ("Time", draft.time.as_str())];
        if let Some(location) = &draft.location {
            details.push(("Location", location.as_str()));
        }
        if let Some(name) = &draft.customer_name {
            details.push(("Customer", name.as_str()));
        }
        if let Some(status) = draft.payment_status {
            details.push(("Payment", payment_label(status)));
        }

        let mut y = top - 50.0;
        for (label, value) in details {
            page.text(Font::Bold, 11.0, MARGIN, y, &format!("{}:", label));
            page.text(Font::Regular, 11.0, VALUE_COLUMN, y, value);
            y -= 16.0;
        }

        // Line items start below the QR code
        y = y.min(top - QR_PRINT_SIZE) - 30.0;
        page.text(Font::Bold, 11.0, MARGIN, y, "Item");
        page.text(Font::Bold, 11.0, AMOUNT_COLUMN, y, "Amount");
        y -= 6.0;
        page.rule(MARGIN, PAGE_WIDTH - MARGIN, y);
        y -= 16.0;

        for item in &draft.line_items {
            page.text(Font::Regular, 11.0, MARGIN, y, &item.description);
            page.text(Font::Regular, 11.0, AMOUNT_COLUMN, y, &format_usd(item.amount));
            y -= 16.0;
        }

        page.rule(MARGIN, PAGE_WIDTH - MARGIN, y + 10.0);
        y -= 6.0;
        let totals = [
            (Font::Regular, "Subtotal", format_usd(draft.subtotal)),
            (Font::Regular, "Tax (7%)", format_usd(draft.tax)),
            (Font::Bold, "Total (including tax)", format_usd(draft.total_with_tax)),
        ];
        for (font, label, amount) in totals {
            page.text(font, 11.0, MARGIN, y, label);
            page.text(font, 11.0, AMOUNT_COLUMN, y, &amount);
            y -= 16.0;
        }

        y -= 20.0;
        for line in wrap(draft.terms, TERMS_WIDTH) {
            page.text(Font::Regular, 9.0, MARGIN, y, &line);
            y -= 12.0;
        }
        page
    }
}

fn payment_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "Pending",
        PaymentStatus::Completed => "Completed",
    }
}

impl InvoiceExporter for PdfExporter {
    fn export(&self, draft: &InvoiceDraft) -> Result<ExportedDocument, ExportError> {
        let qr = Self::render_qr(&draft.summary_text())?;
        Ok(ExportedDocument {
            file_name: format!("{}.pdf", EXPORT_FILE_STEM),
            content_type: "application/pdf",
            bytes: Self::layout(draft, qr).finish(),
        })
    }
}
