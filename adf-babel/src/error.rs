//! Error types for conversion operations
//!
//! The conversion core itself never fails: unknown nodes, malformed attributes
//! and collaborator failures all degrade to best-effort output. These errors
//! only surface at the edges, when input cannot be decoded or a collaborator
//! cannot be constructed.

use thiserror::Error;

/// Errors that can occur around a conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input is not a decodable ADF node
    #[error("Invalid ADF JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// A page lookup collaborator failed to initialise or answer
    #[error("Page lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

/// Failure reported by a [`crate::lookup::PageLookup`] implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// The collaborator could not be reached (network, auth, outage)
    #[error("lookup unavailable: {0}")]
    Unavailable(String),
    /// The collaborator answered with something that is not a page
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}
