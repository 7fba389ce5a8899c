use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A resident's maintenance payment, as recorded by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: u32,
    pub name: String,
    pub block_number: String,
    pub date: NaiveDate,
    /// Billing period the payment covers, e.g. "October 2026".
    pub for_month: String,
    pub payment_method: String,
    pub amount: Decimal,
}
