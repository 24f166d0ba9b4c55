//! Radix-2 multiplicative evaluation domains.
//!
//! A domain of size `n` is the subgroup `{ω^0, ω^1, …, ω^{n-1}}` of the scalar
//! field, where `ω` is a primitive `n`-th root of unity. Only power-of-two sizes
//! up to `2^TWO_ADICITY` are supported.
//!
//! The FFT itself is the backend's [`EvaluationDomain`], which transforms
//! vectors of curve points: the Lagrange transform needs `IFFT([τ^j]G)` without
//! ever learning `τ`.

use crate::backend::{EvaluationDomain, PairingBackend};
use crate::errors::Error;

/// Builds the radix-2 evaluation domain of exactly `size` elements.
///
/// # Errors
///
/// [`Error::InvalidDomain`] if `size` is zero, not a power of two, or larger
/// than the scalar field's two-adicity allows.
///
/// # Example
///
/// ```rust
/// use pot_srs::backend::{ArkworksBn254, EvaluationDomain};
/// use pot_srs::radix2_domain;
///
/// let domain = radix2_domain::<ArkworksBn254>(8).unwrap();
/// assert_eq!(domain.size(), 8);
/// assert!(radix2_domain::<ArkworksBn254>(12).is_err());
/// ```
pub fn radix2_domain<B: PairingBackend>(size: usize) -> Result<B::Domain, Error> {
    B::Domain::new(size).ok_or(Error::InvalidDomain(size))
}
