// ⚠️ Errors - Everything the library can fail with
// Lookup misses are not errors: they come back as Option.

use crate::cnpj::Cnpj;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Text or number could not be turned into a 14-digit value
    #[error("invalid CNPJ text {input:?}: {reason}")]
    Format { input: String, reason: &'static str },

    /// Checksum digits do not match (strict construction only)
    #[error("CNPJ {0} fails checksum validation")]
    InvalidIdentifier(Cnpj),

    /// Registry already holds a company with this CNPJ
    #[error("CNPJ {0} is already registered")]
    DuplicateIdentifier(Cnpj),

    /// A money value left the decimal range while building a report
    #[error("amount overflow computing {0}")]
    Overflow(&'static str),

    /// Any failure writing to the sink, whichever layer hit it
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// Non-I/O CSV failure
    #[error("failed to write CSV record: {0}")]
    Csv(csv::Error),
}

impl Error {
    pub(crate) fn format(input: impl Into<String>, reason: &'static str) -> Self {
        Error::Format {
            input: input.into(),
            reason,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Error::Io(err.into())
        } else {
            Error::Csv(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
