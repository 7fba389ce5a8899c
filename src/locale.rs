use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Keys looked up through the host's translator.
pub mod keys {
    pub const RECEIPT_NO: &str = "receiptNo";
    pub const RESIDENT_NAME: &str = "residentName";
    pub const BLOCK_NO: &str = "blockNo";
    pub const DATE: &str = "date";
    pub const FOR_MONTH: &str = "forMonth";
    pub const PAYMENT_METHOD: &str = "paymentMethod";
    pub const AMOUNT: &str = "amount";
    pub const RECEIPTS: &str = "receipts";
    pub const TOTAL: &str = "total";
    pub const MAINTENANCE_RECEIPT: &str = "maintenanceReceipt";
    pub const AUTHORISED_SIGNATORY: &str = "authorisedSignatory";
    pub const STATEMENT_TITLE: &str = "incomeExpenseStatement";
    pub const DESCRIPTION: &str = "description";
    pub const TOTAL_INCOME: &str = "totalIncome";
    pub const TOTAL_EXPENSE: &str = "totalExpense";
    pub const NET_BALANCE: &str = "netBalance";
    pub const PAGE: &str = "page";
    pub const OF: &str = "of";
    pub const GENERATED_ON: &str = "generatedOn";
}

static ENGLISH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (keys::RECEIPT_NO, "Receipt No."),
        (keys::RESIDENT_NAME, "Resident Name"),
        (keys::BLOCK_NO, "Block No."),
        (keys::DATE, "Date"),
        (keys::FOR_MONTH, "For Month"),
        (keys::PAYMENT_METHOD, "Payment Method"),
        (keys::AMOUNT, "Amount"),
        (keys::RECEIPTS, "Receipts"),
        (keys::TOTAL, "Total"),
        (keys::MAINTENANCE_RECEIPT, "Maintenance Receipt"),
        (keys::AUTHORISED_SIGNATORY, "Authorised Signatory"),
        (keys::STATEMENT_TITLE, "Income & Expense Statement"),
        (keys::DESCRIPTION, "Description"),
        (keys::TOTAL_INCOME, "Total Income"),
        (keys::TOTAL_EXPENSE, "Total Expense"),
        (keys::NET_BALANCE, "Net Balance"),
        (keys::PAGE, "Page"),
        (keys::OF, "of"),
        (keys::GENERATED_ON, "Generated on:"),
    ])
});

/// Maps a key to the display string of the active language.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// In-memory catalogue. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Catalog { entries }
    }

    pub fn english() -> Self {
        Catalog {
            entries: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
