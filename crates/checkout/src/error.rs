//! Error types for the checkout core.
//!
//! Absence of a match (no country, no eligible rate) is never an error -
//! those cases are `Option`/empty results the caller renders as "no shipping
//! option". Errors here are reserved for data-integrity faults and
//! collaborator failures.

use serde_json::Value;
use thiserror::Error;

use portside_core::RateId;

/// Data-integrity fault in administrator-configured shipping data.
///
/// Distinct from the silent-degrade policy applied to numeric fields: an
/// unknown rate type must not quietly price as zero, so it is rejected at
/// the boundary transform instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Rate carries a `type` outside the closed flat/weight_based/free set.
    #[error("unknown rate type `{raw}` on rate {rate_id}")]
    UnknownRateType {
        /// The rate the fault was found on.
        rate_id: RateId,
        /// The raw type string as fetched, for logging.
        raw: String,
    },
}

/// Failure reported by a data-access collaborator.
///
/// The core never retries; retry policy, if any, belongs to the
/// collaborator implementation.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Network or backend transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend rejected the client's credentials.
    #[error("access denied: {0}")]
    Denied(String),
}

/// Failure from the order-placement collaborator.
#[derive(Debug, Clone, Error)]
#[error("order placement failed: {message}")]
pub struct PlacementError {
    /// Human-readable failure description.
    pub message: String,
    /// Backend-provided detail payload, if any.
    pub details: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_display() {
        let err = DataError::UnknownRateType {
            rate_id: RateId::new("r1"),
            raw: "express".to_owned(),
        };
        assert_eq!(err.to_string(), "unknown rate type `express` on rate r1");
    }

    #[test]
    fn test_placement_error_display() {
        let err = PlacementError {
            message: "card declined".to_owned(),
            details: None,
        };
        assert_eq!(err.to_string(), "order placement failed: card declined");
    }
}
