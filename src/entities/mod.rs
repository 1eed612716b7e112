// Entity Models
//
// Each entity is keyed by its CNPJ and owned by a registry that rejects
// duplicate keys.

pub mod company;

pub use company::{Company, CompanyRegistry};
