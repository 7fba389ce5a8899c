#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use society_reports::core::{
    DocumentLayout, ExportError, ExportResult, RasterImage, Service, SheetLayout, TemplateView,
};
use society_reports::{
    Expense, FileSink, MemorySink, Notifier, Receipt, RenderServices, ReportComposer,
};

/// Render services that record what they were asked to build.
#[derive(Default)]
pub struct RecordingServices {
    pub documents: Mutex<Vec<DocumentLayout>>,
    pub sheets: Mutex<Vec<SheetLayout>>,
    pub views: Mutex<Vec<TemplateView>>,
    pub fail_rasterize: bool,
    pub fail_document: bool,
    pub fail_spreadsheet: bool,
    pub capture_size: (u32, u32),
}

impl RecordingServices {
    pub fn new() -> Self {
        RecordingServices {
            capture_size: (600, 400),
            ..Default::default()
        }
    }

    pub fn failing_rasterize() -> Self {
        RecordingServices {
            fail_rasterize: true,
            ..Self::new()
        }
    }

    pub fn failing_document() -> Self {
        RecordingServices {
            fail_document: true,
            ..Self::new()
        }
    }

    pub fn failing_spreadsheet() -> Self {
        RecordingServices {
            fail_spreadsheet: true,
            ..Self::new()
        }
    }

    pub fn documents(&self) -> Vec<DocumentLayout> {
        self.documents.lock().unwrap().clone()
    }

    pub fn sheets(&self) -> Vec<SheetLayout> {
        self.sheets.lock().unwrap().clone()
    }
}

#[async_trait]
impl RenderServices for RecordingServices {
    async fn rasterize(&self, view: &TemplateView) -> ExportResult<RasterImage> {
        self.views.lock().unwrap().push(view.clone());
        if self.fail_rasterize {
            return Err(ExportError::Generation("capture failed".to_string()));
        }

        let (width, height) = self.capture_size;
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .unwrap();
        RasterImage::from_png(png)
    }

    async fn build_document(&self, doc: &DocumentLayout) -> ExportResult<Vec<u8>> {
        if self.fail_document {
            return Err(ExportError::unavailable(Service::Pdf, "typst exited"));
        }
        self.documents.lock().unwrap().push(doc.clone());
        Ok(b"%PDF-1.7 fake".to_vec())
    }

    async fn build_spreadsheet(&self, sheet: &SheetLayout) -> ExportResult<Vec<u8>> {
        if self.fail_spreadsheet {
            return Err(ExportError::unavailable(Service::Spreadsheet, "xlsx writer missing"));
        }
        self.sheets.lock().unwrap().push(sheet.clone());
        Ok(b"PK fake".to_vec())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct Harness {
    pub composer: ReportComposer,
    pub services: Arc<RecordingServices>,
    pub sink: Arc<MemorySink>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness_with(services: RecordingServices) -> Harness {
    let services = Arc::new(services);
    let sink = Arc::new(MemorySink::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let composer = ReportComposer::builder()
        .services(services.clone())
        .sink(sink.clone() as Arc<dyn FileSink>)
        .notifier(notifier.clone())
        .build()
        .unwrap();

    Harness {
        composer,
        services,
        sink,
        notifier,
    }
}

pub fn harness() -> Harness {
    harness_with(RecordingServices::new())
}

pub fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

pub fn receipt(number: u32, name: &str, day: u32, amount: Decimal) -> Receipt {
    Receipt {
        receipt_number: number,
        name: name.to_string(),
        block_number: format!("A-{}", 100 + number),
        date: date(day),
        for_month: "October 2026".to_string(),
        payment_method: "UPI".to_string(),
        amount,
    }
}

pub fn expense(day: u32, description: &str, amount: Decimal) -> Expense {
    Expense {
        date: date(day),
        description: description.to_string(),
        amount,
    }
}
