// 📒 Ledger - Append-only transaction store with a CNPJ index
//
// Two structures, always updated together on insert:
// - transactions: every record, position = id - 1
// - index: CNPJ → ids it took part in (as source or destination), in
//   insertion order
//
// The index serves membership and listing queries. Balance and tax totals
// always scan the full transaction list, and come back as None if a sum
// leaves the decimal range.

use crate::cnpj::Cnpj;
use crate::tax;
use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Ledger-assigned id, 1-based and never reused
pub type TransactionId = u64;

// ============================================================================
// TRANSACTION
// ============================================================================

/// A monetary movement between two CNPJs.
///
/// Only the ledger creates these; fields are read-only afterwards. Neither
/// side needs to be a registered company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    source: Cnpj,
    destination: Cnpj,
    amount: Decimal,
    timestamp: DateTime<Utc>,
    description: String,
}

impl Transaction {
    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn source(&self) -> Cnpj {
        self.source
    }

    pub fn destination(&self) -> Cnpj {
        self.destination
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tax under the transaction policy. Recomputed on every call.
    pub fn tax(&self) -> Option<Decimal> {
        tax::transaction_tax(&self.source, self.amount)
    }

    /// Local date as `dd/mm/yyyy`
    pub fn formatted_date(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%d/%m/%Y")
            .to_string()
    }

    /// True if `cnpj` is the source or the destination
    pub fn involves(&self, cnpj: &Cnpj) -> bool {
        self.source == *cnpj || self.destination == *cnpj
    }
}

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    index: BTreeMap<Cnpj, Vec<TransactionId>>,
    next_id: TransactionId,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
            index: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Record a transaction stamped with the current time
    pub fn insert(
        &mut self,
        source: Cnpj,
        destination: Cnpj,
        amount: Decimal,
        description: impl Into<String>,
    ) -> TransactionId {
        self.insert_at(source, destination, amount, description, Utc::now())
    }

    /// Record a transaction with an explicit timestamp.
    ///
    /// Appends to the list, then indexes the id under the source and under
    /// the destination. A self-transfer is indexed twice under the same key.
    pub fn insert_at(
        &mut self,
        source: Cnpj,
        destination: Cnpj,
        amount: Decimal,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> TransactionId {
        let id = self.next_id;
        self.next_id += 1;

        self.transactions.push(Transaction {
            id,
            source,
            destination,
            amount,
            timestamp,
            description: description.into(),
        });

        self.index.entry(source).or_default().push(id);
        self.index.entry(destination).or_default().push(id);

        debug!(id, %source, %destination, %amount, "inserted transaction");
        id
    }

    /// Direct lookup; ids are dense so this is a plain array access
    pub fn find_by_id(&self, id: TransactionId) -> Option<&Transaction> {
        let position = usize::try_from(id.checked_sub(1)?).ok()?;
        self.transactions.get(position)
    }

    /// Every transaction `cnpj` took part in, in insertion order.
    ///
    /// Results follow the index bucket one entry at a time, so a
    /// self-transfer shows up twice.
    pub fn list_by_cnpj(&self, cnpj: &Cnpj) -> Vec<&Transaction> {
        self.index
            .get(cnpj)
            .map(|ids| ids.iter().filter_map(|&id| self.find_by_id(id)).collect())
            .unwrap_or_default()
    }

    /// Received minus sent, from a full scan
    pub fn balance(&self, cnpj: &Cnpj) -> Option<Decimal> {
        self.transactions
            .iter()
            .try_fold(Decimal::ZERO, |mut balance, t| {
                if t.destination == *cnpj {
                    balance = balance.checked_add(t.amount)?;
                }
                if t.source == *cnpj {
                    balance = balance.checked_sub(t.amount)?;
                }
                Some(balance)
            })
    }

    /// Transaction tax summed over everything `cnpj` sent
    pub fn total_tax(&self, cnpj: &Cnpj) -> Option<Decimal> {
        self.transactions
            .iter()
            .filter(|t| t.source == *cnpj)
            .try_fold(Decimal::ZERO, |total, t| total.checked_add(t.tax()?))
    }

    /// Every CNPJ that appears in the index, ascending
    pub fn identifiers(&self) -> impl Iterator<Item = &Cnpj> {
        self.index.keys()
    }

    /// Transactions in id order
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Check that the index agrees with the transaction list: every indexed
    /// id resolves to a transaction involving its key, and every transaction
    /// is indexed once under its source and once under its destination.
    pub fn verify_index(&self) -> bool {
        let buckets_resolve = self.index.iter().all(|(cnpj, ids)| {
            ids.iter()
                .all(|&id| self.find_by_id(id).is_some_and(|t| t.involves(cnpj)))
        });
        if !buckets_resolve {
            return false;
        }

        self.transactions.iter().all(|t| {
            let occurrences = |key: &Cnpj| {
                self.index
                    .get(key)
                    .map_or(0, |ids| ids.iter().filter(|&&id| id == t.id).count())
            };

            if t.source == t.destination {
                occurrences(&t.source) == 2
            } else {
                occurrences(&t.source) == 1 && occurrences(&t.destination) == 1
            }
        })
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
