// ⚙️ Run Configuration - Loaded from a JSON file
//
// Example:
//   {
//     "validation": "strict",
//     "transactions_report": "out/transacoes.csv",
//     "companies_report": "out/empresas.csv"
//   }
//
// Missing fields fall back to the defaults below.

use crate::cnpj::Validation;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// How CNPJs of the loaded data are checked
    pub validation: Validation,

    pub transactions_report: PathBuf,

    pub companies_report: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            validation: Validation::Permissive,
            transactions_report: PathBuf::from("relatorio_transacoes.csv"),
            companies_report: PathBuf::from("relatorio_empresas.csv"),
        }
    }
}

impl ReportConfig {
    /// Load configuration from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }
}
