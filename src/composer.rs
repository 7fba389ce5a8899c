//! Entry point of the export module: turns receipts and expenses into
//! finished files through the bound render services and file sink.

use std::sync::Arc;

use chrono::Local;
use tokio::task::JoinHandle;

use crate::core::{DocumentLayout, ExportConfig, ExportError, ExportResult, Service};
use crate::layouts::{self, LayoutContext};
use crate::locale::{Catalog, Translator};
use crate::models::{Expense, Receipt, Settings};
use crate::notify::{LogNotifier, Notifier};
use crate::services::RenderServices;
use crate::sink::{FileSink, SavedArtifact};
use crate::statement::{compose_transactions, StatementTotals};
use crate::templates::{ReceiptTemplate, TemplateEngine};

pub const STATEMENT_FILENAME: &str = "Income_Expense_Statement.pdf";
pub const LEDGER_FILENAME: &str = "All_Receipts.pdf";
pub const SPREADSHEET_FILENAME: &str = "All_Receipts.xlsx";

pub fn receipt_filename(receipt_number: u32) -> String {
    format!("Receipt-{}.pdf", receipt_number)
}

/// Composes the society's printable and spreadsheet exports.
///
/// Cheap to clone; every clone shares the same services and sink.
#[derive(Clone)]
pub struct ReportComposer {
    services: Arc<dyn RenderServices>,
    sink: Arc<dyn FileSink>,
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
    templates: Arc<TemplateEngine>,
    config: Arc<ExportConfig>,
}

#[derive(Default)]
pub struct ReportComposerBuilder {
    services: Option<Arc<dyn RenderServices>>,
    sink: Option<Arc<dyn FileSink>>,
    notifier: Option<Arc<dyn Notifier>>,
    translator: Option<Arc<dyn Translator>>,
    config: Option<ExportConfig>,
}

impl ReportComposerBuilder {
    pub fn services(mut self, services: Arc<dyn RenderServices>) -> Self {
        self.services = Some(services);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn FileSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn config(mut self, config: ExportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Fails when the render services or the sink are missing, so no export
    /// can start against an unavailable backend.
    pub fn build(self) -> ExportResult<ReportComposer> {
        let services = self
            .services
            .ok_or_else(|| ExportError::unavailable(Service::Pdf, "no render services bound"))?;
        let sink = self
            .sink
            .ok_or_else(|| ExportError::unavailable(Service::Output, "no file sink bound"))?;
        let config = self.config.unwrap_or_default();
        let templates = TemplateEngine::with_receipt_override(config.receipt_template.as_deref())?;

        Ok(ReportComposer {
            services,
            sink,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
            translator: self.translator.unwrap_or_else(|| Arc::new(Catalog::english())),
            templates: Arc::new(templates),
            config: Arc::new(config),
        })
    }
}

/// Handle on a single-receipt export running in the background.
#[derive(Debug)]
pub struct ExportTask {
    handle: JoinHandle<ExportResult<SavedArtifact>>,
}

impl ExportTask {
    /// Waits for the export; failures have already been notified.
    pub async fn wait(self) -> ExportResult<SavedArtifact> {
        self.handle
            .await
            .map_err(|e| ExportError::Task(e.to_string()))?
    }

    /// Lets the export finish on its own.
    pub fn detach(self) {
        drop(self.handle);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl ReportComposer {
    pub fn builder() -> ReportComposerBuilder {
        ReportComposerBuilder::default()
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    fn layout_context(&self) -> LayoutContext<'_> {
        LayoutContext {
            society: &self.config.society,
            currency_symbol: &self.config.currency_symbol,
            page: &self.config.page,
            translator: self.translator.as_ref(),
        }
    }

    /// Renders one receipt through its visual template and saves it as
    /// `Receipt-<n>.pdf`. Returns immediately; must be called from within a
    /// Tokio runtime.
    pub fn render_single_receipt(&self, receipt: &Receipt, settings: &Settings) -> ExportTask {
        let composer = self.clone();
        let receipt = receipt.clone();
        let settings = settings.clone();

        let handle = tokio::spawn(async move {
            let result = composer.single_receipt(&receipt, &settings).await;
            composer.settle(&receipt_filename(receipt.receipt_number), result)
        });

        ExportTask { handle }
    }

    async fn single_receipt(&self, receipt: &Receipt, settings: &Settings) -> ExportResult<SavedArtifact> {
        tracing::info!(receipt = receipt.receipt_number, "Rendering single receipt");

        let template = ReceiptTemplate {
            society: &self.config.society,
            currency_symbol: &self.config.currency_symbol,
            translator: self.translator.as_ref(),
        };
        let view = template.render(&self.templates, receipt, settings)?;

        let image = self.services.rasterize(&view).await?;
        tracing::debug!(width = image.width, height = image.height, "Receipt captured");

        let doc = layouts::single_receipt_document(
            receipt.receipt_number,
            image,
            self.config.page.page_width(),
        );
        self.save_document(&receipt_filename(receipt.receipt_number), &doc)
            .await
    }

    /// Income and expense statement over receipts and expenses combined.
    pub async fn render_combined_statement(
        &self,
        expenses: &[Expense],
        receipts: &[Receipt],
    ) -> ExportResult<SavedArtifact> {
        let result = self.combined_statement(expenses, receipts).await;
        self.settle(STATEMENT_FILENAME, result)
    }

    async fn combined_statement(&self, expenses: &[Expense], receipts: &[Receipt]) -> ExportResult<SavedArtifact> {
        let transactions = compose_transactions(receipts, expenses);
        if transactions.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let totals = StatementTotals::from_transactions(&transactions);
        tracing::info!(
            transactions = transactions.len(),
            income = %totals.total_income,
            expense = %totals.total_expense,
            "Rendering combined statement"
        );

        let doc = layouts::statement_document(
            &self.layout_context(),
            &transactions,
            &totals,
            Local::now().date_naive(),
        );
        self.save_document(STATEMENT_FILENAME, &doc).await
    }

    /// Tabular PDF of all receipts with a total row.
    pub async fn render_receipt_ledger(&self, receipts: &[Receipt]) -> ExportResult<SavedArtifact> {
        tracing::info!(receipts = receipts.len(), "Rendering receipt ledger");
        let doc = layouts::ledger_document(&self.layout_context(), receipts);
        let result = self.save_document(LEDGER_FILENAME, &doc).await;
        self.settle(LEDGER_FILENAME, result)
    }

    /// Workbook of all receipts with a trailing total row.
    pub async fn render_receipt_spreadsheet(&self, receipts: &[Receipt]) -> ExportResult<SavedArtifact> {
        tracing::info!(receipts = receipts.len(), "Rendering receipt spreadsheet");
        let sheet = layouts::receipt_sheet(self.translator.as_ref(), receipts);

        let result = match self.services.build_spreadsheet(&sheet).await {
            Ok(bytes) => self.sink.save(SPREADSHEET_FILENAME, bytes).await,
            Err(e) => Err(e),
        };
        self.settle(SPREADSHEET_FILENAME, result)
    }

    async fn save_document(&self, filename: &str, doc: &DocumentLayout) -> ExportResult<SavedArtifact> {
        let bytes = self.services.build_document(doc).await?;
        self.sink.save(filename, bytes).await
    }

    /// Logs the outcome and raises exactly one notification on failure.
    fn settle(&self, filename: &str, result: ExportResult<SavedArtifact>) -> ExportResult<SavedArtifact> {
        match &result {
            Ok(saved) => {
                tracing::info!(file = %saved.filename, size = saved.size_bytes, "Export completed");
            }
            Err(e) => {
                tracing::error!(file = %filename, error = %e, "Export failed");
                self.notifier.notify(&e.user_message());
            }
        }
        result
    }
}
