//! Export module of a housing-society management app: combined income and
//! expense statements, receipt ledgers, receipt workbooks and single
//! printable receipts.

pub mod composer;
pub mod core;
pub mod excel;
pub mod layouts;
pub mod locale;
pub mod models;
pub mod notify;
pub mod pdf;
pub mod services;
pub mod sink;
pub mod statement;
pub mod templates;

// Re-export commonly used types
pub use crate::core::{ExportConfig, ExportError, ExportResult, PdfConfig, Service};
pub use composer::{ExportTask, ReportComposer, ReportComposerBuilder};
pub use locale::{Catalog, Translator};
pub use models::{Expense, Receipt, Settings, SocietyInfo};
pub use notify::{LogNotifier, Notifier};
pub use services::{RenderServices, TypstServices};
pub use sink::{FileSink, LocalDirSink, MemorySink, SavedArtifact};
