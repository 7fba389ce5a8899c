use async_trait::async_trait;

use super::RenderServices;
use crate::core::{DocumentLayout, ExportConfig, ExportResult, RasterImage, SheetLayout, TemplateView};
use crate::excel::ExcelBuilder;
use crate::pdf::{OutputKind, PdfBuilder, TypstCompiler};

/// Typst for documents and captures, `rust_xlsxwriter` for workbooks.
pub struct TypstServices {
    compiler: TypstCompiler,
    raster_ppi: u32,
}

impl TypstServices {
    /// Checks that the Typst binary runs before handing out the adapter.
    pub async fn new(config: &ExportConfig) -> ExportResult<Self> {
        let compiler = TypstCompiler::new(config.typst_binary.clone(), config.temp_dir.clone());
        let version = compiler.probe().await?;
        tracing::info!(%version, "Typst render services ready");

        Ok(TypstServices {
            compiler,
            raster_ppi: config.raster_ppi,
        })
    }
}

#[async_trait]
impl RenderServices for TypstServices {
    async fn rasterize(&self, view: &TemplateView) -> ExportResult<RasterImage> {
        let png = self
            .compiler
            .compile(&view.markup, &[], OutputKind::Png { ppi: self.raster_ppi })
            .await?;
        RasterImage::from_png(png)
    }

    async fn build_document(&self, doc: &DocumentLayout) -> ExportResult<Vec<u8>> {
        let source = PdfBuilder::from_layout(doc).build();
        self.compiler.compile(&source, &doc.assets, OutputKind::Pdf).await
    }

    async fn build_spreadsheet(&self, sheet: &SheetLayout) -> ExportResult<Vec<u8>> {
        // Workbook assembly and zip compression are CPU-bound
        let sheet = sheet.clone();
        tokio::task::spawn_blocking(move || ExcelBuilder::from_sheet(&sheet)).await?
    }
}
