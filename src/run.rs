mod cli;
mod menu;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;

use crate::notify::DepositReceipt;
use crate::ui::util::{column, format_amount};

pub(crate) use cli::as_cli;
pub(crate) use menu::as_menu;

/// Parse a user-typed amount such as `100`, `12.50` or `$1,000`.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).with_context(|| format!("Not a valid amount: {}", input.trim()))
}

pub(crate) fn print_receipt(receipt: &DepositReceipt, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", receipt.message)?;
    writeln!(out, "New balance: {}", format_amount(receipt.new_balance))?;
    writeln!(out, "Suggested split ({}):", receipt.template)?;
    for allocation in &receipt.breakdown {
        writeln!(
            out,
            "  {} {}",
            column(allocation.label, 12),
            format_amount(allocation.amount)
        )?;
    }
    Ok(())
}
