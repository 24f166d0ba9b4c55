//! Conversion of a powers-of-tau SRS into the Lagrange basis.
//!
//! Over a domain `H = {ω^i}` of size `N`, the Lagrange polynomial `L_i` has
//! coefficients `ω^{-ij} / N`, so
//!
//! ```text
//! L_i(τ) = (1/N) · Σ_j ω^{-ij} · τ^j
//! ```
//!
//! which is the inverse DFT of `(τ^0, …, τ^{N-1})`. Since the DFT is linear it
//! can be applied to the encodings `[τ^j]` directly, giving `[L_i(τ)]` without
//! knowledge of `τ` in `O(N log N)` group operations.

use rayon::join;
use tracing::instrument;

use crate::backend::{EvaluationDomain, PairingBackend};
use crate::domain::radix2_domain;
use crate::errors::Error;
use crate::srs::{LagrangeEvaluations, PowersOfTau};

/// Computes `[L_i(τ)]_1`, `[L_i(τ)]_2`, `[α·L_i(τ)]_1` and `[β·L_i(τ)]_1`
/// over the radix-2 domain of size `degree`.
///
/// # Errors
///
/// - [`Error::InsufficientDegree`] if `degree` exceeds the SRS degree. This is
///   checked before the domain shape.
/// - [`Error::InvalidDomain`] if `degree` is zero, not a power of two, or
///   larger than the scalar field's two-adicity allows.
///
/// # Example
///
/// ```rust
/// use pot_srs::backend::ArkworksBn254;
/// use pot_srs::{compute_lagrange_evaluations, dummy_powersoftau};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(2);
/// let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, 16).unwrap();
/// let evals = compute_lagrange_evaluations(&srs, 8).unwrap();
/// assert_eq!(evals.degree(), 8);
/// assert!(evals.is_well_formed());
/// ```
#[instrument(level = "info", skip(srs), fields(available = srs.degree()))]
pub fn compute_lagrange_evaluations<B: PairingBackend>(
    srs: &PowersOfTau<B>,
    degree: usize,
) -> Result<LagrangeEvaluations<B>, Error> {
    if degree > srs.degree() {
        return Err(Error::InsufficientDegree {
            requested: degree,
            available: srs.degree(),
        });
    }
    let domain = radix2_domain::<B>(degree)?;

    let ((g1, g2), (alpha, beta)) = join(
        || {
            join(
                || domain.ifft_g1(&srs.tau_powers_g1()[..degree]),
                || domain.ifft_g2(&srs.tau_powers_g2()[..degree]),
            )
        },
        || {
            join(
                || domain.ifft_g1(&srs.alpha_tau_powers_g1()[..degree]),
                || domain.ifft_g1(&srs.beta_tau_powers_g1()[..degree]),
            )
        },
    );

    LagrangeEvaluations::new(g1?, g2?, alpha?, beta?)
}

#[cfg(test)]
mod tests {
    use ark_poly::{EvaluationDomain, Evaluations, Polynomial, Radix2EvaluationDomain};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    #[cfg(feature = "ark_bls12381")]
    use crate::backend::ArkworksBls12;
    use crate::backend::{ArkBnG1, ArkBnG2, ArkworksBn254, CurvePoint, FieldElement};
    use crate::srs::{dummy_powersoftau, dummy_powersoftau_from_secrets};

    type Fr = ark_bn254::Fr;

    /// `L_i(τ)` for every `i`, by interpolating the indicator of `ω^i` with ark-poly.
    fn reference_lagrange_at(tau: Fr, size: usize) -> Vec<Fr> {
        let domain = Radix2EvaluationDomain::<Fr>::new(size).unwrap();
        (0..size)
            .map(|i| {
                let mut evals = vec![Fr::zero(); size];
                evals[i] = Fr::one();
                Evaluations::from_vec_and_domain(evals, domain)
                    .interpolate()
                    .evaluate(&tau)
            })
            .collect()
    }

    fn check_against_reference(n: usize, degree: usize) {
        let tau = Fr::from_u64(123_456_789);
        let alpha = Fr::from_u64(31);
        let beta = Fr::from_u64(47);
        let srs = dummy_powersoftau_from_secrets::<ArkworksBn254>(tau, alpha, beta, n).unwrap();
        let evals = compute_lagrange_evaluations(&srs, degree).unwrap();
        assert_eq!(evals.degree(), degree);

        let expected = reference_lagrange_at(tau, degree);
        for (i, l) in expected.iter().enumerate() {
            assert_eq!(evals.lagrange_g1()[i], ArkBnG1::generator().mul_scalar(l), "g1[{i}]");
            assert_eq!(evals.lagrange_g2()[i], ArkBnG2::generator().mul_scalar(l), "g2[{i}]");
            assert_eq!(
                evals.alpha_lagrange_g1()[i],
                ArkBnG1::generator().mul_scalar(&(alpha * *l)),
                "alpha[{i}]"
            );
            assert_eq!(
                evals.beta_lagrange_g1()[i],
                ArkBnG1::generator().mul_scalar(&(beta * *l)),
                "beta[{i}]"
            );
        }
    }

    #[test]
    fn matches_interpolated_lagrange_polynomials() {
        check_against_reference(4, 4);
        check_against_reference(8, 8);
        // domain smaller than the transcript
        check_against_reference(8, 4);
    }

    #[test]
    fn degree_one_is_the_generator() {
        let mut rng = StdRng::seed_from_u64(61);
        let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, 3).unwrap();
        let evals = compute_lagrange_evaluations(&srs, 1).unwrap();
        assert_eq!(evals.lagrange_g1(), &[ArkBnG1::generator()]);
        assert_eq!(evals.lagrange_g2(), &[ArkBnG2::generator()]);
        assert_eq!(evals.alpha_lagrange_g1(), &srs.alpha_tau_powers_g1()[..1]);
    }

    #[test]
    fn rejects_degree_above_srs() {
        let mut rng = StdRng::seed_from_u64(62);
        let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, 4).unwrap();
        // 5 is not a power of two either; the degree bound wins
        assert!(matches!(
            compute_lagrange_evaluations(&srs, 5),
            Err(Error::InsufficientDegree { requested: 5, available: 4 })
        ));
        assert!(matches!(
            compute_lagrange_evaluations(&srs, 8),
            Err(Error::InsufficientDegree { requested: 8, available: 4 })
        ));
    }

    #[test]
    fn rejects_unsupported_domains() {
        let mut rng = StdRng::seed_from_u64(63);
        let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, 4).unwrap();
        assert!(matches!(
            compute_lagrange_evaluations(&srs, 3),
            Err(Error::InvalidDomain(3))
        ));
        assert!(matches!(
            compute_lagrange_evaluations(&srs, 0),
            Err(Error::InvalidDomain(0))
        ));
    }

    fn well_formed_output_helper<B: PairingBackend>() {
        let mut rng = StdRng::seed_from_u64(64);
        let srs = dummy_powersoftau::<B, _>(&mut rng, 16).unwrap();
        for degree in [1usize, 2, 16] {
            let evals = compute_lagrange_evaluations(&srs, degree).unwrap();
            assert!(evals.is_well_formed(), "degree {degree}");
        }
    }

    #[test]
    fn output_is_well_formed() {
        well_formed_output_helper::<ArkworksBn254>();
        #[cfg(feature = "ark_bls12381")]
        well_formed_output_helper::<ArkworksBls12>();
    }
}
