use anyhow::{Context, Result};
use baht_core::Transaction;
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::config::OutputFormat;

pub fn render(txns: &[Transaction], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(txns).context("serialize transactions"),
        OutputFormat::Table => Ok(render_table(txns)),
    }
}

fn render_table(txns: &[Transaction]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10}  {:>14}  {:>14}  DESCRIPTION", "DATE", "AMOUNT", "BALANCE");

    for t in txns {
        let balance = t.balance.map(|b| b.to_string()).unwrap_or_default();
        let _ = write!(out, "{:<10}  {:>14}  {:>14}  {}", t.date, t.amount, balance, t.description);
        if let Some(r) = &t.reference {
            let _ = write!(out, " [{r}]");
        }
        out.push('\n');
    }

    let outflow: Decimal = txns.iter().filter(|t| t.is_outflow()).map(|t| t.amount).sum();
    let inflow: Decimal = txns.iter().filter(|t| t.is_inflow()).map(|t| t.amount).sum();
    let _ = writeln!(
        out,
        "\n{} transactions | out {} | in {}",
        txns.len(),
        outflow.abs(),
        inflow
    );
    out
}
