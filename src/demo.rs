use std::sync::Arc;

use anyhow::Result;
use society_reports::{
    Expense, ExportConfig, LocalDirSink, Receipt, ReportComposer, Settings, TypstServices,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ExportConfig::load()?;
    tracing::info!(output_dir = %config.output_dir.display(), "Starting export demo");

    let services = Arc::new(TypstServices::new(&config).await?);
    let sink = Arc::new(LocalDirSink::new(config.output_dir.clone()));

    let composer = ReportComposer::builder()
        .services(services)
        .sink(sink)
        .config(config)
        .build()?;

    let receipts = sample_receipts()?;
    let expenses = sample_expenses()?;
    let settings = Settings {
        treasurer_name: Some("Sunita Deshmukh".to_string()),
        footer_note: Some("Cheque payments are subject to realisation.".to_string()),
    };

    // Each receipt renders in its own task
    let tasks: Vec<_> = receipts
        .iter()
        .map(|receipt| composer.render_single_receipt(receipt, &settings).wait())
        .collect();
    for outcome in futures::future::join_all(tasks).await {
        if let Ok(saved) = outcome {
            tracing::info!(file = %saved.location, "Receipt ready");
        }
    }

    let (statement, ledger, sheet) = tokio::join!(
        composer.render_combined_statement(&expenses, &receipts),
        composer.render_receipt_ledger(&receipts),
        composer.render_receipt_spreadsheet(&receipts),
    );

    for saved in [statement, ledger, sheet].into_iter().flatten() {
        tracing::info!(file = %saved.location, size = saved.size_bytes, "Export ready");
    }

    Ok(())
}

// Records arrive from the host application as camelCase JSON
fn sample_receipts() -> Result<Vec<Receipt>> {
    let receipts = serde_json::from_value(serde_json::json!([
        {
            "receiptNumber": 101, "name": "Anil Joshi", "blockNumber": "A-101",
            "date": "2026-10-03", "forMonth": "October 2026", "paymentMethod": "UPI",
            "amount": "2500"
        },
        {
            "receiptNumber": 102, "name": "Meera Iyer", "blockNumber": "A-204",
            "date": "2026-10-05", "forMonth": "October 2026", "paymentMethod": "Cash",
            "amount": "2500"
        },
        {
            "receiptNumber": 103, "name": "Farhan Shaikh", "blockNumber": "B-302",
            "date": "2026-10-09", "forMonth": "October 2026", "paymentMethod": "Cheque",
            "amount": "3000"
        }
    ]))?;
    Ok(receipts)
}

fn sample_expenses() -> Result<Vec<Expense>> {
    let expenses = serde_json::from_value(serde_json::json!([
        { "date": "2026-10-04", "description": "Lift maintenance contract", "amount": "-1800.00" },
        { "date": "2026-10-08", "description": "Water tanker", "amount": "-650.50" }
    ]))?;
    Ok(expenses)
}
