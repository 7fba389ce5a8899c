use std::fmt;
use thiserror::Error;

/// Rendering service that an export depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Pdf,
    Spreadsheet,
    Output,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Pdf => write!(f, "PDF generation library"),
            Service::Spreadsheet => write!(f, "Excel generation library"),
            Service::Output => write!(f, "File output"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{service} is not available: {reason}")]
    ServiceUnavailable { service: Service, reason: String },

    #[error("No transactions to export.")]
    NothingToExport,

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export task failed: {0}")]
    Task(String),
}

impl ExportError {
    pub fn unavailable(service: Service, reason: impl Into<String>) -> Self {
        ExportError::ServiceUnavailable {
            service,
            reason: reason.into(),
        }
    }

    /// Message shown to the person who triggered the export.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::ServiceUnavailable { service, .. } => format!("{} is not loaded.", service),
            ExportError::NothingToExport => self.to_string(),
            _ => "Could not generate the export file.".to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Generation(error.to_string())
    }
}

impl From<image::ImageError> for ExportError {
    fn from(error: image::ImageError) -> Self {
        ExportError::Generation(format!("invalid raster image: {}", error))
    }
}

impl From<minijinja::Error> for ExportError {
    fn from(error: minijinja::Error) -> Self {
        ExportError::Template(error.to_string())
    }
}

impl From<config::ConfigError> for ExportError {
    fn from(error: config::ConfigError) -> Self {
        ExportError::Config(error.to_string())
    }
}

impl From<tokio::task::JoinError> for ExportError {
    fn from(error: tokio::task::JoinError) -> Self {
        ExportError::Task(error.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_services_use_the_library_wording() {
        let pdf = ExportError::unavailable(Service::Pdf, "typst not found");
        assert_eq!(pdf.user_message(), "PDF generation library is not loaded.");

        let xlsx = ExportError::unavailable(Service::Spreadsheet, "missing");
        assert_eq!(xlsx.user_message(), "Excel generation library is not loaded.");
    }

    #[test]
    fn internal_failures_hide_details_from_the_user() {
        let err = ExportError::Generation("error: unknown variable: foo".to_string());
        assert_eq!(err.user_message(), "Could not generate the export file.");
        assert!(err.to_string().contains("unknown variable"));
    }

    #[test]
    fn empty_statement_message() {
        assert_eq!(ExportError::NothingToExport.user_message(), "No transactions to export.");
    }
}
