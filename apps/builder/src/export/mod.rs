//! PDF Exporter: turns a preview tree into a downloadable single-page A4 PDF.
//!
//! The page is laid out off-screen at a fixed physical size, rasterized at
//! 2× and embedded as one full-page image, so text in the file is not
//! selectable. Rasterization runs on the blocking pool.

pub mod layout;
pub mod page;
pub mod pdf;
pub mod raster;

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::preview::PreviewTree;
use crate::ticket::TicketCounter;
use page::PageGeometry;

const FALLBACK_FILENAME: &str = "Resume.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("pdf encoding failed: {0}")]
    Pdf(String),

    #[error("i/o while encoding: {0}")]
    Io(#[from] std::io::Error),

    #[error("export task failed: {0}")]
    Task(String),

    #[error("export superseded by a newer request")]
    Superseded,
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Bytes,
    /// Whether content ran past the page bottom and was cut off.
    pub clipped: bool,
}

/// `"<name>.pdf"`, or `"Resume.pdf"` when the name is blank.
pub fn export_filename(candidate_name: &str) -> String {
    let name = candidate_name.trim();
    if name.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("{name}.pdf")
    }
}

/// Lays out, rasterizes and encodes `tree`. CPU-bound; call off the runtime.
pub fn render_pdf(
    tree: &PreviewTree,
    geometry: &PageGeometry,
) -> Result<(Vec<u8>, bool), ExportError> {
    let page = layout::layout(tree, geometry);
    let image = raster::rasterize(&page, geometry);
    let bytes = pdf::single_image_pdf(&image, geometry)?;
    Ok((bytes, page.clipped))
}

#[derive(Clone)]
pub struct Exporter {
    geometry: PageGeometry,
    tickets: Arc<TicketCounter>,
}

impl Exporter {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            tickets: Arc::new(TicketCounter::default()),
        }
    }

    /// Exports the given preview. A newer export started before this one
    /// finishes supersedes it.
    pub async fn export(
        &self,
        tree: Arc<PreviewTree>,
        candidate_name: &str,
    ) -> Result<ExportedFile, ExportError> {
        let ticket = self.tickets.issue();
        let filename = export_filename(candidate_name);
        let geometry = self.geometry;
        info!(filename = %filename, template = %tree.template_id, "export started");

        let (bytes, clipped) = tokio::task::spawn_blocking(move || render_pdf(&tree, &geometry))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))??;

        if !self.tickets.is_current(ticket) {
            warn!(filename = %filename, "dropping superseded export");
            return Err(ExportError::Superseded);
        }
        if clipped {
            warn!(filename = %filename, "content ran past the page and was clipped");
        }
        info!(filename = %filename, size = bytes.len(), "export finished");

        Ok(ExportedFile {
            filename,
            bytes: Bytes::from(bytes),
            clipped,
        })
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(page::A4)
    }
}
