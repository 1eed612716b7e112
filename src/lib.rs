// CNPJ Ledger - Core Library
// Identifier validation, company registry, transaction ledger and CSV reports

pub mod cnpj;
pub mod config;
pub mod entities;
pub mod error;
pub mod ledger;
pub mod report;
pub mod tax;

// Re-export commonly used types
pub use cnpj::{compute_check_digits, parse_digits, validate, Cnpj, Validation};
pub use config::ReportConfig;
pub use entities::{Company, CompanyRegistry};
pub use error::{Error, Result};
pub use ledger::{Ledger, Transaction, TransactionId};
pub use report::{
    export_companies, export_companies_to_path, export_transactions,
    export_transactions_to_path, format_money,
};
pub use tax::{entity_revenue_tax, transaction_tax};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
