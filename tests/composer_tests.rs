mod common;

use common::*;
use rust_decimal_macros::dec;
use std::sync::Arc;

use society_reports::composer::{LEDGER_FILENAME, SPREADSHEET_FILENAME, STATEMENT_FILENAME};
use society_reports::core::{Block, PageSize, Rgb, Service, SheetValue};
use society_reports::layouts::RECEIPT_IMAGE_ASSET;
use society_reports::{
    Catalog, ExportConfig, ExportError, LocalDirSink, MemorySink, ReportComposer, Settings,
};

#[tokio::test]
async fn test_empty_statement_saves_nothing_and_notifies_once() {
    let h = harness();

    let err = h.composer.render_combined_statement(&[], &[]).await.unwrap_err();

    assert!(matches!(err, ExportError::NothingToExport));
    assert!(h.sink.is_empty().await);
    assert!(h.services.documents().is_empty());
    assert_eq!(h.notifier.messages(), vec!["No transactions to export.".to_string()]);
}

#[tokio::test]
async fn test_statement_totals_and_signed_amounts() {
    let h = harness();
    let receipts = vec![receipt(1, "Asha Patil", 2, dec!(100))];
    let expenses = vec![expense(5, "Garden upkeep", dec!(-40))];

    let saved = h
        .composer
        .render_combined_statement(&expenses, &receipts)
        .await
        .unwrap();

    assert_eq!(saved.filename, STATEMENT_FILENAME);
    assert!(h.sink.get(STATEMENT_FILENAME).await.is_some());

    let documents = h.services.documents();
    assert_eq!(documents.len(), 1);
    let tables: Vec<_> = documents[0].tables().collect();

    let ledger = tables[0];
    assert_eq!(ledger.rows.len(), 2);
    assert_eq!(ledger.rows[0][1].text, "Maintenance from Asha Patil (#1)");
    assert_eq!(ledger.rows[0][2].text, "+ 100.00");
    assert!(ledger.rows[1][2].text.starts_with("- "));
    assert_eq!(ledger.rows[1][2].color, Some(Rgb::RED));

    let summary: Vec<&str> = tables[1].rows.iter().map(|r| r[1].text.as_str()).collect();
    assert_eq!(summary, vec!["₹100.00", "₹40.00", "₹60.00"]);
    assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_statement_only_expenses() {
    let h = harness();
    let expenses = vec![expense(3, "Security salary", dec!(-12000))];

    h.composer.render_combined_statement(&expenses, &[]).await.unwrap();

    let documents = h.services.documents();
    let summary = documents[0].tables().nth(1).unwrap();
    assert_eq!(summary.rows[0][1].text, "₹0.00");
    assert_eq!(summary.rows[2][1].text, "₹-12000.00");
    assert_eq!(summary.rows[2][1].color, Some(Rgb::RED));
}

#[tokio::test]
async fn test_ledger_total_row() {
    let h = harness();
    let receipts = vec![
        receipt(1, "Asha Patil", 1, dec!(100)),
        receipt(2, "Vikram Rao", 2, dec!(250)),
    ];

    let saved = h.composer.render_receipt_ledger(&receipts).await.unwrap();
    assert_eq!(saved.filename, LEDGER_FILENAME);

    let documents = h.services.documents();
    let table = documents[0].tables().next().unwrap();
    assert_eq!(table.headers, vec!["Receipt No.", "Resident Name", "Date", "Amount"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.footer.len(), 1);
    assert_eq!(table.footer[0][0].text, "Total");
    assert_eq!(table.footer[0][3].text, "350.00");

    let header = documents[0].running_header.as_ref().unwrap();
    assert_eq!(header.text, "Receipts");
}

#[tokio::test]
async fn test_empty_ledger_still_renders() {
    let h = harness();

    h.composer.render_receipt_ledger(&[]).await.unwrap();

    let documents = h.services.documents();
    let table = documents[0].tables().next().unwrap();
    assert!(table.rows.is_empty());
    assert_eq!(table.footer[0][3].text, "0.00");
}

#[tokio::test]
async fn test_spreadsheet_summary_row() {
    let h = harness();
    let receipts = vec![receipt(7, "Nisha Kapoor", 4, dec!(75))];

    let saved = h.composer.render_receipt_spreadsheet(&receipts).await.unwrap();
    assert_eq!(saved.filename, SPREADSHEET_FILENAME);

    let sheets = h.services.sheets();
    let sheet = &sheets[0];
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(sheet.value(0, "Receipt No."), Some(&SheetValue::Integer(7)));
    assert_eq!(
        sheet.value(0, "Resident Name"),
        Some(&SheetValue::Text("Nisha Kapoor".to_string()))
    );

    let summary = &sheet.rows[1];
    assert_eq!(summary.last(), Some(&SheetValue::Amount(dec!(75))));
    assert!(summary[..summary.len() - 1].iter().all(SheetValue::is_blank));
}

#[tokio::test]
async fn test_single_receipt_page_matches_capture() {
    let h = harness();
    let settings = Settings {
        treasurer_name: Some("S. Deshmukh".to_string()),
        footer_note: None,
    };

    let saved = h
        .composer
        .render_single_receipt(&receipt(7, "Nisha Kapoor", 4, dec!(75)), &settings)
        .wait()
        .await
        .unwrap();

    assert_eq!(saved.filename, "Receipt-7.pdf");
    assert!(h.sink.get("Receipt-7.pdf").await.is_some());

    let views = h.services.views.lock().unwrap().clone();
    assert!(views[0].markup.contains("\"Nisha Kapoor\""));
    assert!(views[0].markup.contains("\"S. Deshmukh\""));

    let documents = h.services.documents();
    let doc = &documents[0];
    assert_eq!(doc.assets[0].name, RECEIPT_IMAGE_ASSET);
    assert!(matches!(doc.blocks[0], Block::Image { .. }));

    // 600x400 capture on a 210mm wide page
    match doc.page.page_size {
        PageSize::Custom(width, height) => {
            assert_eq!(width, 210.0);
            assert!(height >= 140.0 && height < 140.2, "height was {}", height);
        }
        ref other => panic!("unexpected page size {:?}", other),
    }
}

#[tokio::test]
async fn test_single_receipt_capture_failure_is_notified() {
    let h = harness_with(RecordingServices::failing_rasterize());

    let result = h
        .composer
        .render_single_receipt(&receipt(3, "Asha Patil", 1, dec!(100)), &Settings::default())
        .wait()
        .await;

    assert!(result.is_err());
    assert!(h.sink.is_empty().await);
    assert!(h.services.documents().is_empty());
    assert_eq!(
        h.notifier.messages(),
        vec!["Could not generate the export file.".to_string()]
    );
}

#[tokio::test]
async fn test_receipts_render_concurrently() {
    let h = harness();
    let settings = Settings::default();

    let tasks: Vec<_> = (1..=5)
        .map(|n| {
            h.composer
                .render_single_receipt(&receipt(n, "Resident", n, dec!(500)), &settings)
                .wait()
        })
        .collect();
    let results = futures::future::join_all(tasks).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(h.sink.filenames().await.len(), 5);
}

#[tokio::test]
async fn test_builder_requires_services_and_sink() {
    let err = ReportComposer::builder()
        .sink(Arc::new(MemorySink::new()))
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ExportError::ServiceUnavailable { service: Service::Pdf, .. }
    ));
    assert_eq!(err.user_message(), "PDF generation library is not loaded.");

    let err = ReportComposer::builder()
        .services(Arc::new(RecordingServices::new()))
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ExportError::ServiceUnavailable { service: Service::Output, .. }
    ));
}

#[tokio::test]
async fn test_translated_labels_reach_the_layout() {
    let services = Arc::new(RecordingServices::new());
    let composer = ReportComposer::builder()
        .services(services.clone())
        .sink(Arc::new(MemorySink::new()))
        .translator(Arc::new(Catalog::english().with("receipts", "Pavtya")))
        .build()
        .unwrap();

    composer
        .render_receipt_spreadsheet(&[receipt(1, "A", 1, dec!(10))])
        .await
        .unwrap();

    assert_eq!(services.sheets()[0].name, "Pavtya");
}

#[tokio::test]
async fn test_local_dir_sink_end_to_end() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let output = temp_dir.path().join("exports");
    let config = ExportConfig {
        output_dir: output.clone(),
        currency_symbol: "Rs.".to_string(),
        ..ExportConfig::default()
    };

    let services = Arc::new(RecordingServices::new());
    let composer = ReportComposer::builder()
        .services(services.clone())
        .sink(Arc::new(LocalDirSink::new(config.output_dir.clone())))
        .config(config)
        .build()
        .unwrap();

    composer
        .render_combined_statement(&[], &[receipt(1, "Asha Patil", 1, dec!(1500.5))])
        .await
        .unwrap();

    let written = std::fs::read(output.join(STATEMENT_FILENAME)).unwrap();
    assert_eq!(written, b"%PDF-1.7 fake");

    let documents = services.documents();
    let summary = documents[0].tables().nth(1).unwrap();
    assert_eq!(summary.rows[0][1].text, "Rs.1500.50");
}

#[tokio::test]
async fn test_statement_build_failure_writes_nothing() {
    let h = harness_with(RecordingServices::failing_document());
    let receipts = vec![receipt(1, "Asha Patil", 2, dec!(100))];

    let result = h.composer.render_combined_statement(&[], &receipts).await;

    assert!(matches!(
        result,
        Err(ExportError::ServiceUnavailable { service: Service::Pdf, .. })
    ));
    assert_eq!(
        h.notifier.messages(),
        vec!["PDF generation library is not loaded.".to_string()]
    );
    assert!(h.sink.is_empty().await);
    assert!(h.services.documents().is_empty());
}

#[tokio::test]
async fn test_ledger_build_failure_writes_nothing() {
    let h = harness_with(RecordingServices::failing_document());
    let receipts = vec![receipt(1, "Asha Patil", 1, dec!(100))];

    let result = h.composer.render_receipt_ledger(&receipts).await;

    assert!(result.is_err());
    assert_eq!(
        h.notifier.messages(),
        vec!["PDF generation library is not loaded.".to_string()]
    );
    assert!(h.sink.is_empty().await);
    assert!(h.services.documents().is_empty());
}

#[tokio::test]
async fn test_spreadsheet_build_failure_writes_nothing() {
    let h = harness_with(RecordingServices::failing_spreadsheet());
    let receipts = vec![receipt(7, "Nisha Kapoor", 4, dec!(75))];

    let result = h.composer.render_receipt_spreadsheet(&receipts).await;

    assert!(matches!(
        result,
        Err(ExportError::ServiceUnavailable { service: Service::Spreadsheet, .. })
    ));
    assert_eq!(
        h.notifier.messages(),
        vec!["Excel generation library is not loaded.".to_string()]
    );
    assert!(h.sink.is_empty().await);
    assert!(h.services.sheets().is_empty());
}

#[tokio::test]
async fn test_single_receipt_build_failure_writes_nothing() {
    let h = harness_with(RecordingServices::failing_document());

    let result = h
        .composer
        .render_single_receipt(&receipt(3, "Asha Patil", 1, dec!(100)), &Settings::default())
        .wait()
        .await;

    assert!(result.is_err());
    assert_eq!(
        h.notifier.messages(),
        vec!["PDF generation library is not loaded.".to_string()]
    );
    assert!(h.sink.is_empty().await);
    assert!(h.services.documents().is_empty());
}
