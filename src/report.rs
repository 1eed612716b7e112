// 📄 Report Export - Ledger and registry to comma-separated text
//
// Column order and 2-decimal money are fixed. Fields are written verbatim:
// no quoting, so a comma inside a description shifts the columns after it.

use crate::entities::CompanyRegistry;
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const TRANSACTION_HEADER: [&str; 7] = [
    "ID",
    "Data",
    "CNPJ Origem",
    "CNPJ Destino",
    "Valor",
    "Imposto",
    "Descrição",
];

pub const COMPANY_HEADER: [&str; 5] = ["CNPJ", "Nome", "Funcionarios", "Faturamento", "Imposto"];

/// Two decimals, halves rounded away from zero
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

fn writer<W: Write>(sink: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink)
}

/// Write the header and one row per transaction, in id order
pub fn export_transactions<W: Write>(ledger: &Ledger, sink: W) -> Result<()> {
    let mut wtr = writer(sink);
    wtr.write_record(TRANSACTION_HEADER)?;

    for t in ledger.iter() {
        wtr.write_record([
            t.id().to_string(),
            t.formatted_date(),
            t.source().formatted(),
            t.destination().formatted(),
            format_money(t.amount()),
            format_money(t.tax().ok_or(Error::Overflow("transaction tax"))?),
            t.description().to_string(),
        ])?;
    }

    wtr.flush()?;
    info!(rows = ledger.len(), "exported transaction report");
    Ok(())
}

/// Write the header and one row per company, in registration order
pub fn export_companies<W: Write>(registry: &CompanyRegistry, sink: W) -> Result<()> {
    let mut wtr = writer(sink);
    wtr.write_record(COMPANY_HEADER)?;

    for c in registry.iter() {
        wtr.write_record([
            c.cnpj().formatted(),
            c.name.clone(),
            c.employees.to_string(),
            format_money(c.revenue),
            format_money(c.tax().ok_or(Error::Overflow("company tax"))?),
        ])?;
    }

    wtr.flush()?;
    info!(rows = registry.len(), "exported company report");
    Ok(())
}

/// Create (or truncate) `path` and export the ledger into it
pub fn export_transactions_to_path<P: AsRef<Path>>(ledger: &Ledger, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    export_transactions(ledger, file)
}

/// Create (or truncate) `path` and export the registry into it
pub fn export_companies_to_path<P: AsRef<Path>>(registry: &CompanyRegistry, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    export_companies(registry, file)
}

// ============================================================================
// TESTS
// ============================================================================
