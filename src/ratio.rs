//! Same-ratio checks over pairings.
//!
//! Two pairs `(a1, b1) ∈ G1²` and `(a2, b2) ∈ G2²` have the *same ratio* when
//! `b1 = s·a1` and `b2 = s·a2` for one scalar `s`, which holds exactly when
//! `e(a1, b2) = e(b1, a2)`.
//!
//! Vector variants fold many such checks into one by taking a random linear
//! combination: if any pair is off, the combined pair is off except with
//! probability about `1/r`. The randomness must be unpredictable to whoever
//! produced the points, so the plain forms seed a fresh [`ChaCha20Rng`] from OS
//! entropy on every call. The `*_with_rng` forms accept any [`CryptoRng`] for
//! reproducible tests.
//!
//! # Example
//!
//! ```rust
//! use pot_srs::backend::{ArkworksBn254, CurvePoint, FieldElement, PairingBackend};
//! use pot_srs::ratio::same_ratio;
//!
//! type Fr = <ArkworksBn254 as PairingBackend>::Scalar;
//! type G1 = <ArkworksBn254 as PairingBackend>::G1;
//! type G2 = <ArkworksBn254 as PairingBackend>::G2;
//!
//! let k = Fr::from_u64(42);
//! let (g1, g2) = (G1::generator(), G2::generator());
//! assert!(same_ratio::<ArkworksBn254>(&g1, &g1.mul_scalar(&k), &g2, &g2.mul_scalar(&k)));
//! ```

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use tracing::trace;

use crate::backend::{CurvePoint, FieldElement, MsmProvider, PairingBackend, TargetGroup};
use crate::errors::Error;

/// Returns true iff `e(a1, b2) == e(b1, a2)`.
///
/// Evaluated as the single product `e(a1, b2) · e(-b1, a2) == 1`.
pub fn same_ratio<B: PairingBackend>(a1: &B::G1, b1: &B::G1, a2: &B::G2, b2: &B::G2) -> bool {
    match B::multi_pairing(&[*a1, b1.negate()], &[*b2, *a2]) {
        Ok(product) => product.is_identity(),
        Err(_) => false,
    }
}

fn random_scalars<B: PairingBackend, R: RngCore + CryptoRng>(
    rng: &mut R,
    count: usize,
) -> Vec<B::Scalar> {
    (0..count).map(|_| B::Scalar::random(rng)).collect()
}

/// Checks `same_ratio(a1s[i], b1s[i], a2, b2)` for every `i` in one pairing check.
pub fn same_ratio_vectors_g1<B: PairingBackend>(
    a1s: &[B::G1],
    b1s: &[B::G1],
    a2: &B::G2,
    b2: &B::G2,
) -> Result<bool, Error> {
    same_ratio_vectors_g1_with_rng::<B, _>(a1s, b1s, a2, b2, &mut ChaCha20Rng::from_entropy())
}

/// [`same_ratio_vectors_g1`] with caller-supplied batching randomness.
pub fn same_ratio_vectors_g1_with_rng<B: PairingBackend, R: RngCore + CryptoRng>(
    a1s: &[B::G1],
    b1s: &[B::G1],
    a2: &B::G2,
    b2: &B::G2,
    rng: &mut R,
) -> Result<bool, Error> {
    if a1s.len() != b1s.len() {
        return Err(Error::LengthMismatch(format!(
            "same-ratio G1 vectors have lengths {} and {}",
            a1s.len(),
            b1s.len()
        )));
    }
    if a1s.is_empty() {
        return Ok(true);
    }
    let scalars = random_scalars::<B, _>(rng, a1s.len());
    let a1 = B::Msm::msm_g1(a1s, &scalars)?;
    let b1 = B::Msm::msm_g1(b1s, &scalars)?;
    trace!(len = a1s.len(), "batched G1 same-ratio check");
    Ok(same_ratio::<B>(&a1, &b1, a2, b2))
}

/// Checks `same_ratio(a1, b1, a2s[i], b2s[i])` for every `i` in one pairing check.
pub fn same_ratio_vectors_g2<B: PairingBackend>(
    a1: &B::G1,
    b1: &B::G1,
    a2s: &[B::G2],
    b2s: &[B::G2],
) -> Result<bool, Error> {
    same_ratio_vectors_g2_with_rng::<B, _>(a1, b1, a2s, b2s, &mut ChaCha20Rng::from_entropy())
}

/// [`same_ratio_vectors_g2`] with caller-supplied batching randomness.
pub fn same_ratio_vectors_g2_with_rng<B: PairingBackend, R: RngCore + CryptoRng>(
    a1: &B::G1,
    b1: &B::G1,
    a2s: &[B::G2],
    b2s: &[B::G2],
    rng: &mut R,
) -> Result<bool, Error> {
    if a2s.len() != b2s.len() {
        return Err(Error::LengthMismatch(format!(
            "same-ratio G2 vectors have lengths {} and {}",
            a2s.len(),
            b2s.len()
        )));
    }
    if a2s.is_empty() {
        return Ok(true);
    }
    let scalars = random_scalars::<B, _>(rng, a2s.len());
    let a2 = B::Msm::msm_g2(a2s, &scalars)?;
    let b2 = B::Msm::msm_g2(b2s, &scalars)?;
    trace!(len = a2s.len(), "batched G2 same-ratio check");
    Ok(same_ratio::<B>(a1, b1, &a2, &b2))
}

/// Checks that each element of `a1s` is the previous one times the ratio `(a2, b2)`.
///
/// Sequences with fewer than two elements pass.
pub fn same_ratio_consecutive_g1<B: PairingBackend>(
    a1s: &[B::G1],
    a2: &B::G2,
    b2: &B::G2,
) -> Result<bool, Error> {
    same_ratio_consecutive_g1_with_rng::<B, _>(a1s, a2, b2, &mut ChaCha20Rng::from_entropy())
}

pub fn same_ratio_consecutive_g1_with_rng<B: PairingBackend, R: RngCore + CryptoRng>(
    a1s: &[B::G1],
    a2: &B::G2,
    b2: &B::G2,
    rng: &mut R,
) -> Result<bool, Error> {
    if a1s.len() < 2 {
        return Ok(true);
    }
    let m = a1s.len();
    same_ratio_vectors_g1_with_rng::<B, _>(&a1s[..m - 1], &a1s[1..], a2, b2, rng)
}

/// Checks that each element of `a2s` is the previous one times the ratio `(a1, b1)`.
///
/// Sequences with fewer than two elements pass.
pub fn same_ratio_consecutive_g2<B: PairingBackend>(
    a1: &B::G1,
    b1: &B::G1,
    a2s: &[B::G2],
) -> Result<bool, Error> {
    same_ratio_consecutive_g2_with_rng::<B, _>(a1, b1, a2s, &mut ChaCha20Rng::from_entropy())
}

pub fn same_ratio_consecutive_g2_with_rng<B: PairingBackend, R: RngCore + CryptoRng>(
    a1: &B::G1,
    b1: &B::G1,
    a2s: &[B::G2],
    rng: &mut R,
) -> Result<bool, Error> {
    if a2s.len() < 2 {
        return Ok(true);
    }
    let m = a2s.len();
    same_ratio_vectors_g2_with_rng::<B, _>(a1, b1, &a2s[..m - 1], &a2s[1..], rng)
}
