//! Error types for catalog ordering

use mc_01_ordered_list::OrderingError;
use thiserror::Error;

/// Errors returned by the catalog adapters and the request layer
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed or inconsistent request
    #[error("{0}")]
    Validation(String),

    /// A menu item listed as its own recommendation
    #[error("An item cannot recommend itself.")]
    SelfRecommendation,

    /// The recommendation edge is already ranked
    #[error("This recommendation already exists.")]
    DuplicateRecommendation,

    /// Listing found nothing where the catalog requires at least one entry
    #[error("{0}")]
    NotFound(String),

    /// Failure reported by the ordered list
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}

impl CatalogError {
    /// HTTP-style status for the response envelope.
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::Validation(_)
            | CatalogError::SelfRecommendation
            | CatalogError::DuplicateRecommendation => 400,
            CatalogError::NotFound(_) => 404,
            CatalogError::Ordering(err) => match err {
                OrderingError::NotFound { .. } | OrderingError::UnknownEntity { .. } => 404,
                OrderingError::OutOfRange { .. }
                | OrderingError::NoOp { .. }
                | OrderingError::AlreadyRanked { .. }
                | OrderingError::ScopeFull { .. } => 400,
                OrderingError::Conflict { .. } => 409,
                OrderingError::Store(_) | OrderingError::InconsistentScope { .. } => 500,
            },
        }
    }

    /// True when the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Ordering(err) if err.is_retryable())
    }
}
