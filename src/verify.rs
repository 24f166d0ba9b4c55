//! Well-formedness of a powers-of-tau SRS.
//!
//! A transcript is well-formed when a single `(τ, α, β)` explains every point
//! in it. The check uses a constant number of pairings regardless of the
//! degree, because each sequence is reduced to one same-ratio check by the
//! batched helpers in [`crate::ratio`].
//!
//! Checks, in order:
//!
//! 0. `tau_powers_g1[0]` and `tau_powers_g2[0]` are the generators; the
//!    encodings of `τ`, `α` and `β` are not the identity.
//! 1. consecutive `tau_powers_g1` share the ratio `(tau_powers_g2[0], tau_powers_g2[1])`.
//! 2. consecutive `tau_powers_g2` share the ratio `(tau_powers_g1[0], tau_powers_g1[1])`.
//! 3. consecutive `alpha_tau_powers_g1` share the τ ratio.
//! 4. consecutive `beta_tau_powers_g1` share the τ ratio, and `beta_g2` carries
//!    the same `β` as `beta_tau_powers_g1[0]`.
//!
//! With degree one there is no `τ` witness in G2, so steps 1 to 3 and the
//! `τ` identity check are skipped.

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use tracing::{debug, instrument};

use crate::backend::{CurvePoint, PairingBackend};
use crate::errors::Error;
use crate::ratio::{
    same_ratio, same_ratio_consecutive_g1_with_rng, same_ratio_consecutive_g2_with_rng,
};
use crate::srs::PowersOfTau;

/// Returns whether `srs` is internally consistent.
///
/// Batching randomness is drawn from a [`ChaCha20Rng`] seeded from OS entropy.
/// Never panics on adversarial input; every failure is reported as `false`
/// and logged at `debug` level.
///
/// # Example
///
/// ```rust
/// use pot_srs::backend::ArkworksBn254;
/// use pot_srs::{dummy_powersoftau, is_well_formed};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, 8).unwrap();
/// assert!(is_well_formed(&srs));
/// ```
pub fn is_well_formed<B: PairingBackend>(srs: &PowersOfTau<B>) -> bool {
    is_well_formed_with_rng(srs, &mut ChaCha20Rng::from_entropy())
}

fn accept(step: &'static str, outcome: Result<bool, Error>) -> bool {
    match outcome {
        Ok(true) => true,
        Ok(false) => {
            debug!(step, "srs failed ratio check");
            false
        }
        Err(err) => {
            debug!(step, error = %err, "srs ratio check could not be evaluated");
            false
        }
    }
}

/// [`is_well_formed`] with caller-supplied batching randomness.
#[instrument(level = "info", skip_all, fields(degree = srs.degree()))]
pub fn is_well_formed_with_rng<B: PairingBackend, R: RngCore + CryptoRng>(
    srs: &PowersOfTau<B>,
    rng: &mut R,
) -> bool {
    let tau_g1 = srs.tau_powers_g1();
    let tau_g2 = srs.tau_powers_g2();
    let alpha_g1 = srs.alpha_tau_powers_g1();
    let beta_g1 = srs.beta_tau_powers_g1();
    let n = srs.degree();

    if n == 0 || tau_g1.len() != 2 * n - 1 || alpha_g1.len() != n || beta_g1.len() != n {
        debug!("srs sequences have inconsistent lengths");
        return false;
    }

    let g1 = B::G1::generator();
    let g2 = B::G2::generator();
    if tau_g1[0] != g1 {
        debug!("first G1 power of tau is not the generator");
        return false;
    }
    if tau_g2[0] != g2 {
        debug!("first G2 power of tau is not the generator");
        return false;
    }
    if n > 1 && tau_g1[1].is_identity() {
        debug!("tau is zero");
        return false;
    }
    if alpha_g1[0].is_identity() {
        debug!("alpha is zero");
        return false;
    }
    if beta_g1[0].is_identity() {
        debug!("beta is zero");
        return false;
    }

    if n > 1 {
        let tau2 = &tau_g2[1];
        if !accept(
            "tau_powers_g1",
            same_ratio_consecutive_g1_with_rng::<B, _>(tau_g1, &g2, tau2, rng),
        ) {
            return false;
        }
        if !accept(
            "tau_powers_g2",
            same_ratio_consecutive_g2_with_rng::<B, _>(&g1, &tau_g1[1], tau_g2, rng),
        ) {
            return false;
        }
        if !accept(
            "alpha_tau_powers_g1",
            same_ratio_consecutive_g1_with_rng::<B, _>(alpha_g1, &g2, tau2, rng),
        ) {
            return false;
        }
        if !accept(
            "beta_tau_powers_g1",
            same_ratio_consecutive_g1_with_rng::<B, _>(beta_g1, &g2, tau2, rng),
        ) {
            return false;
        }
    }

    if !same_ratio::<B>(&g1, &beta_g1[0], &g2, srs.beta_g2()) {
        debug!("beta_g2 does not match beta_tau_powers_g1[0]");
        return false;
    }
    true
}
