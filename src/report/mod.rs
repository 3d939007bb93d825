use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::Write;

use crate::models::Transaction;
use crate::ui::util::format_amount;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyTotal {
    /// Format: "YYYY-MM"
    pub period: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub amount: Decimal,
}

/// Total per calendar month, oldest first.
pub(crate) fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in transactions {
        *by_month.entry(txn.period()).or_default() += txn.amount;
    }
    by_month
        .into_iter()
        .map(|(period, total)| MonthlyTotal { period, total })
        .collect()
}

/// Every transaction as a point, in chronological order. Ties keep ledger order.
pub(crate) fn trend(transactions: &[Transaction]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = transactions
        .iter()
        .map(|t| TrendPoint {
            timestamp: t.timestamp,
            amount: t.amount,
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);
    points
}

pub(crate) fn render_report(rows: &[MonthlyTotal], out: &mut impl Write) -> Result<()> {
    if rows.is_empty() {
        writeln!(out, "No deposits recorded yet.")?;
        return Ok(());
    }
    for row in rows {
        writeln!(out, "{}: {}", row.period, format_amount(row.total))?;
    }
    Ok(())
}
