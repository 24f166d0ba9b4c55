//! Error types for the crate.
//!
//! This module defines low-level backend errors returned by the concrete
//! arithmetic backends as well as the high-level `Error` type returned by
//! transcript parsing, SRS construction and the Lagrange transform.
//!
//! A transcript that parses but fails verification is not an error: the
//! verifiers return `false` for it. Only structural problems (bad bytes,
//! short input, inconsistent lengths, unsupported domains) surface here.
//!
//! # Examples
//!
//! ```rust
//! use pot_srs::Error;
//!
//! let err = Error::InsufficientDegree { requested: 8, available: 4 };
//! assert_eq!(err.to_string(), "insufficient degree: requested 8, available 4");
//! ```

use thiserror::Error;

/// Errors bubbled up from backend implementations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(&'static str),
    #[error("unsupported backend feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("math error: {0}")]
    Math(&'static str),
}

/// High-level errors returned by the SRS API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
    #[error("truncated input: expected {expected} more bytes while reading {context}")]
    TruncatedInput {
        expected: usize,
        context: &'static str,
    },
    #[error("insufficient degree: requested {requested}, available {available}")]
    InsufficientDegree { requested: usize, available: usize },
    #[error("length mismatch: {0}")]
    LengthMismatch(String),
    #[error("unsupported evaluation domain size: {0}")]
    InvalidDomain(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
