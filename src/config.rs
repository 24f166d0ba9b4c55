//! Configuration types for transcript verification and transformation.
//!
//! A ceremony transcript does not describe itself: the degree bound `n` must be
//! supplied out-of-band, and the Lagrange domain size is chosen by whoever
//! consumes the result. These types carry those choices, validate them, and
//! can be persisted in any serde format.
//!
//! # Example
//!
//! ```rust
//! use pot_srs::{BackendConfig, BackendId, CurveId, SetupParameters};
//!
//! // Transcript with 2^10 powers, transformed onto a 2^9 Lagrange domain
//! let config = BackendConfig::new(BackendId::Arkworks, CurveId::Bn254);
//! let params = SetupParameters::new(1 << 10, Some(1 << 9), config).expect("valid params");
//! assert_eq!(params.lagrange_degree(), 1 << 9);
//! ```

use serde::{Deserialize, Serialize};

use crate::backend::PairingBackend;
use crate::errors::{BackendError, Error};

/// Supported pairing-friendly elliptic curves.
///
/// - **BN254** (alt_bn128): the curve of the ceremony transcripts. Always available.
/// - **BLS12-381**: available for verification and transformation when the
///   `ark_bls12381` feature is enabled. No transcript codec exists for it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurveId {
    /// BN254 / alt_bn128 curve (~100-bit security)
    Bn254,
    /// BLS12-381 curve (~128-bit security)
    Bls12_381,
}

/// Arithmetic backend implementations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BackendId {
    /// Arkworks backend (pure Rust)
    Arkworks,
}

/// Backend and curve configuration.
///
/// Use [`ensure_supported`](BackendConfig::ensure_supported) to check that the
/// combination was compiled in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// The arithmetic backend to use
    pub backend: BackendId,
    /// The pairing-friendly curve to use
    pub curve: CurveId,
}

impl BackendConfig {
    /// Creates a new backend configuration.
    pub fn new(backend: BackendId, curve: CurveId) -> Self {
        Self { backend, curve }
    }

    /// Validates that this backend/curve combination is supported by this build.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot_srs::{BackendConfig, BackendId, CurveId};
    ///
    /// let config = BackendConfig::new(BackendId::Arkworks, CurveId::Bn254);
    /// assert!(config.ensure_supported().is_ok());
    /// ```
    pub fn ensure_supported(&self) -> Result<(), BackendError> {
        match (self.backend, self.curve) {
            (BackendId::Arkworks, CurveId::Bn254) => Ok(()),
            (BackendId::Arkworks, CurveId::Bls12_381) => {
                if cfg!(feature = "ark_bls12381") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `ark_bls12381` feature to use Arkworks BLS12-381",
                    ))
                }
            }
        }
    }

    /// Checks that backend type `B` instantiates the configured curve.
    pub fn ensure_backend<B: PairingBackend>(&self) -> Result<(), BackendError> {
        self.ensure_supported()?;
        if B::CURVE != self.curve {
            return Err(BackendError::UnsupportedCurve(
                "backend type does not match the configured curve",
            ));
        }
        Ok(())
    }

    /// Whether transcripts for this curve can be loaded and stored.
    pub fn has_transcript_codec(&self) -> bool {
        self.curve == CurveId::Bn254
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(BackendId::Arkworks, CurveId::Bn254)
    }
}

/// Parameters describing a transcript and the transform applied to it.
///
/// # Fields
///
/// - `max_degree`: the degree bound `n` of the transcript. The transcript holds
///   `2n-1` G1 powers of tau, `n` G2 powers and `n` alpha/beta powers.
/// - `lagrange_degree`: size of the Lagrange evaluation domain. `None` selects
///   the largest power of two not exceeding `max_degree`.
/// - `backend`: backend and curve configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetupParameters {
    /// Degree bound `n` of the powers-of-tau transcript
    pub max_degree: usize,
    /// Lagrange domain size (power of two, at most `max_degree`)
    #[serde(default)]
    pub lagrange_degree: Option<usize>,
    /// Backend and curve configuration
    #[serde(default)]
    pub backend: BackendConfig,
}

impl SetupParameters {
    /// Creates and validates setup parameters.
    pub fn new(
        max_degree: usize,
        lagrange_degree: Option<usize>,
        backend: BackendConfig,
    ) -> Result<Self, Error> {
        let params = Self {
            max_degree,
            lagrange_degree,
            backend,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates the parameters.
    ///
    /// This checks that:
    /// - The backend/curve combination is supported
    /// - The transcript holds at least one power (`max_degree >= 1`)
    /// - The Lagrange domain size, if set, is a power of two no larger than `max_degree`
    ///
    /// # Example
    ///
    /// ```rust
    /// use pot_srs::{BackendConfig, SetupParameters};
    ///
    /// let params = SetupParameters {
    ///     max_degree: 16,
    ///     lagrange_degree: Some(12), // Invalid: not a power of two!
    ///     backend: BackendConfig::default(),
    /// };
    ///
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), Error> {
        self.backend.ensure_supported().map_err(Error::Backend)?;
        if self.max_degree == 0 {
            return Err(Error::InvalidConfig(
                "transcript must contain at least one power".into(),
            ));
        }
        if let Some(degree) = self.lagrange_degree {
            if !degree.is_power_of_two() {
                return Err(Error::InvalidConfig(format!(
                    "lagrange domain size {degree} is not a power of two"
                )));
            }
            if degree > self.max_degree {
                return Err(Error::InvalidConfig(format!(
                    "lagrange domain size {degree} exceeds transcript degree {}",
                    self.max_degree
                )));
            }
        }
        Ok(())
    }

    /// Lagrange domain size to use for this transcript.
    pub fn lagrange_degree(&self) -> usize {
        match self.lagrange_degree {
            Some(degree) => degree,
            // largest power of two <= max_degree
            None => 1 << self.max_degree.max(1).ilog2(),
        }
    }
}
