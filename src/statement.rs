//! Merging, ordering and totalling of records for the combined statement.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Expense, Receipt};

/// Unified view of a receipt or an expense, built per export.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn from_receipt(receipt: &Receipt) -> Self {
        Transaction {
            date: receipt.date,
            description: format!(
                "Maintenance from {} (#{})",
                receipt.name, receipt.receipt_number
            ),
            amount: receipt.amount,
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Transaction {
            date: expense.date,
            description: expense.description.clone(),
            amount: expense.amount,
        }
    }
}

/// Receipts followed by expenses, stably sorted by date.
pub fn compose_transactions(receipts: &[Receipt], expenses: &[Expense]) -> Vec<Transaction> {
    let mut transactions: Vec<Transaction> = receipts
        .iter()
        .map(Transaction::from_receipt)
        .chain(expenses.iter().map(Transaction::from_expense))
        .collect();

    transactions.sort_by_key(|t| t.date);
    transactions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
}

impl StatementTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_income: Decimal = transactions
            .iter()
            .filter(|t| t.amount > Decimal::ZERO)
            .map(|t| t.amount)
            .sum();

        let total_expense: Decimal = transactions
            .iter()
            .filter(|t| t.amount < Decimal::ZERO)
            .map(|t| t.amount.abs())
            .sum();

        StatementTotals {
            total_income,
            total_expense,
            net_balance: total_income - total_expense,
        }
    }
}

pub fn ledger_total(receipts: &[Receipt]) -> Decimal {
    receipts.iter().map(|r| r.amount).sum()
}

/// `+ 100.00` for inflows and zero, `- 40.00` for outflows.
pub fn format_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("- {}", format_amount(amount.abs()))
    } else {
        format!("+ {}", format_amount(amount))
    }
}

pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{}{}", symbol, format_amount(amount))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
