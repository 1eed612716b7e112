// 🏢 Company Entity - Descriptive profile keyed by CNPJ
//
// The CNPJ is the natural key and never changes once the company is
// registered. Everything else is plain descriptive data.

use crate::cnpj::Cnpj;
use crate::error::{Error, Result};
use crate::tax;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

// ============================================================================
// COMPANY ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    cnpj: Cnpj,

    /// Display name
    pub name: String,

    pub address: String,

    /// Number of employees
    pub employees: u32,

    /// Yearly revenue
    pub revenue: Decimal,
}

impl Company {
    pub fn new(
        cnpj: Cnpj,
        name: impl Into<String>,
        address: impl Into<String>,
        employees: u32,
        revenue: Decimal,
    ) -> Self {
        Company {
            cnpj,
            name: name.into(),
            address: address.into(),
            employees,
            revenue,
        }
    }

    pub fn cnpj(&self) -> Cnpj {
        self.cnpj
    }

    /// Revenue tax under the entity policy, None if it overflows
    pub fn tax(&self) -> Option<Decimal> {
        tax::entity_revenue_tax(&self.cnpj, self.revenue)
    }
}

// ============================================================================
// COMPANY REGISTRY
// ============================================================================

/// Registry of known companies, at most one per CNPJ.
///
/// Companies are kept in registration order; the map only points into
/// that list.
#[derive(Debug, Default)]
pub struct CompanyRegistry {
    companies: Vec<Company>,
    by_cnpj: HashMap<Cnpj, usize>,
}

impl CompanyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a company. Fails if its CNPJ is already present.
    pub fn register(&mut self, company: Company) -> Result<()> {
        let cnpj = company.cnpj;
        if self.by_cnpj.contains_key(&cnpj) {
            warn!(%cnpj, "rejecting duplicate company registration");
            return Err(Error::DuplicateIdentifier(cnpj));
        }

        debug!(%cnpj, name = %company.name, "registered company");
        self.by_cnpj.insert(cnpj, self.companies.len());
        self.companies.push(company);
        Ok(())
    }

    /// Exact-match lookup
    pub fn find(&self, cnpj: &Cnpj) -> Option<&Company> {
        self.by_cnpj.get(cnpj).map(|&i| &self.companies[i])
    }

    pub fn contains(&self, cnpj: &Cnpj) -> bool {
        self.by_cnpj.contains_key(cnpj)
    }

    /// Every registered company with the same root as `cnpj`, the head
    /// office included
    pub fn branches_of(&self, cnpj: &Cnpj) -> Vec<&Company> {
        self.companies
            .iter()
            .filter(|c| c.cnpj.same_company(cnpj))
            .collect()
    }

    /// Companies in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Company> {
        self.companies.iter()
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
