//! Rendering services the composer depends on, bound once at start-up.

pub mod typst;

use async_trait::async_trait;

use crate::core::{DocumentLayout, ExportResult, RasterImage, SheetLayout, TemplateView};

pub use self::typst::TypstServices;

#[async_trait]
pub trait RenderServices: Send + Sync {
    /// Captures a rendered template as a PNG image.
    async fn rasterize(&self, view: &TemplateView) -> ExportResult<RasterImage>;

    /// Produces the bytes of a PDF document.
    async fn build_document(&self, doc: &DocumentLayout) -> ExportResult<Vec<u8>>;

    /// Produces the bytes of an xlsx workbook.
    async fn build_spreadsheet(&self, sheet: &SheetLayout) -> ExportResult<Vec<u8>>;
}
