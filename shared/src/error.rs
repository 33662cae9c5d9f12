//! Id parsing errors

use thiserror::Error;

/// Raised when a string does not name a known category or supermarket
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Not one of the fixed category ids
    #[error("Unknown category id: {0}")]
    UnknownCategory(String),

    /// Not one of the fixed supermarket ids
    #[error("Unknown supermarket id: {0}")]
    UnknownSupermarket(String),
}
