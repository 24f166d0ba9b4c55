use std::io::{Read, Write};

use rand_core::RngCore;
use rayon::prelude::*;
use tracing::instrument;

use crate::backend::{CurvePoint, FieldElement, PairingBackend};
use crate::codec::TranscriptCodec;
use crate::errors::Error;

/// Powers-of-tau SRS for secrets `(τ, α, β)` and degree bound `n`.
///
/// | field                 | length   | contents       |
/// |-----------------------|----------|----------------|
/// | `tau_powers_g1`       | `2n - 1` | `[τ^i]_1`      |
/// | `tau_powers_g2`       | `n`      | `[τ^i]_2`      |
/// | `alpha_tau_powers_g1` | `n`      | `[α·τ^i]_1`    |
/// | `beta_tau_powers_g1`  | `n`      | `[β·τ^i]_1`    |
/// | `beta_g2`             | 1        | `[β]_2`        |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowersOfTau<B: PairingBackend> {
    tau_powers_g1: Vec<B::G1>,
    tau_powers_g2: Vec<B::G2>,
    alpha_tau_powers_g1: Vec<B::G1>,
    beta_tau_powers_g1: Vec<B::G1>,
    beta_g2: B::G2,
}

impl<B: PairingBackend> PowersOfTau<B> {
    /// Assembles an SRS, checking the `2n-1`/`n`/`n`/`n` shape with `n >= 1`.
    ///
    /// No cryptographic check is performed; see [`PowersOfTau::is_well_formed`].
    pub fn new(
        tau_powers_g1: Vec<B::G1>,
        tau_powers_g2: Vec<B::G2>,
        alpha_tau_powers_g1: Vec<B::G1>,
        beta_tau_powers_g1: Vec<B::G1>,
        beta_g2: B::G2,
    ) -> Result<Self, Error> {
        let n = tau_powers_g2.len();
        let g1_len = tau_powers_g1_len(n)?;
        if tau_powers_g1.len() != g1_len {
            return Err(Error::LengthMismatch(format!(
                "expected {g1_len} G1 powers of tau for degree {n}, got {}",
                tau_powers_g1.len()
            )));
        }
        if alpha_tau_powers_g1.len() != n {
            return Err(Error::LengthMismatch(format!(
                "expected {n} alpha powers, got {}",
                alpha_tau_powers_g1.len()
            )));
        }
        if beta_tau_powers_g1.len() != n {
            return Err(Error::LengthMismatch(format!(
                "expected {n} beta powers, got {}",
                beta_tau_powers_g1.len()
            )));
        }
        Ok(Self {
            tau_powers_g1,
            tau_powers_g2,
            alpha_tau_powers_g1,
            beta_tau_powers_g1,
            beta_g2,
        })
    }

    /// Degree bound `n`.
    pub fn degree(&self) -> usize {
        self.tau_powers_g2.len()
    }

    pub fn tau_powers_g1(&self) -> &[B::G1] {
        &self.tau_powers_g1
    }

    pub fn tau_powers_g2(&self) -> &[B::G2] {
        &self.tau_powers_g2
    }

    pub fn alpha_tau_powers_g1(&self) -> &[B::G1] {
        &self.alpha_tau_powers_g1
    }

    pub fn beta_tau_powers_g1(&self) -> &[B::G1] {
        &self.beta_tau_powers_g1
    }

    pub fn beta_g2(&self) -> &B::G2 {
        &self.beta_g2
    }

    /// Checks that one `(τ, α, β)` was applied consistently across the SRS.
    ///
    /// Shorthand for [`crate::verify::is_well_formed`].
    pub fn is_well_formed(&self) -> bool {
        crate::verify::is_well_formed(self)
    }
}

impl<B: TranscriptCodec> PowersOfTau<B> {
    /// Reads a transcript of degree `n` from `reader`.
    ///
    /// The layout is `2n-1` G1 points, `n` G2 points, `n` G1 points, `n` G1
    /// points and one G2 point, with no framing.
    #[instrument(level = "info", skip(reader))]
    pub fn load<R: Read>(reader: &mut R, n: usize) -> Result<Self, Error> {
        let tau_powers_g1 = B::read_g1_vec(reader, tau_powers_g1_len(n)?)?;
        let tau_powers_g2 = B::read_g2_vec(reader, n)?;
        let alpha_tau_powers_g1 = B::read_g1_vec(reader, n)?;
        let beta_tau_powers_g1 = B::read_g1_vec(reader, n)?;
        let beta_g2 = B::read_g2(reader)?;
        Self::new(
            tau_powers_g1,
            tau_powers_g2,
            alpha_tau_powers_g1,
            beta_tau_powers_g1,
            beta_g2,
        )
    }

    /// Writes the SRS in the layout accepted by [`PowersOfTau::load`].
    #[instrument(level = "info", skip_all, fields(degree = self.degree()))]
    pub fn store<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        B::write_g1_slice(&self.tau_powers_g1, writer)?;
        B::write_g2_slice(&self.tau_powers_g2, writer)?;
        B::write_g1_slice(&self.alpha_tau_powers_g1, writer)?;
        B::write_g1_slice(&self.beta_tau_powers_g1, writer)?;
        B::write_g2(&self.beta_g2, writer)
    }
}

/// Number of G1 powers of tau, `2n - 1`, for degree bound `n >= 1`.
fn tau_powers_g1_len(n: usize) -> Result<usize, Error> {
    if n == 0 {
        return Err(Error::LengthMismatch(
            "powers of tau must contain at least one G2 power".into(),
        ));
    }
    n.checked_mul(2).map(|len| len - 1).ok_or_else(|| {
        Error::LengthMismatch(format!("degree {n} overflows the G1 power count"))
    })
}

fn scalar_powers<F: FieldElement>(base: F, count: usize) -> Vec<F> {
    let mut powers = Vec::with_capacity(count);
    let mut cur = F::one();
    for _ in 0..count {
        powers.push(cur);
        cur *= base;
    }
    powers
}

/// Builds the SRS for known secrets. Only meaningful for tests and benchmarks:
/// whoever holds `tau` can forge proofs against it.
#[instrument(level = "info", skip(tau, alpha, beta))]
pub fn dummy_powersoftau_from_secrets<B: PairingBackend>(
    tau: B::Scalar,
    alpha: B::Scalar,
    beta: B::Scalar,
    n: usize,
) -> Result<PowersOfTau<B>, Error> {
    let taus = scalar_powers(tau, tau_powers_g1_len(n)?);
    let g1 = B::G1::generator();
    let g2 = B::G2::generator();

    let tau_powers_g1: Vec<B::G1> = taus.par_iter().map(|t| g1.mul_scalar(t)).collect();
    let tau_powers_g2: Vec<B::G2> = taus[..n].par_iter().map(|t| g2.mul_scalar(t)).collect();
    let alpha_tau_powers_g1: Vec<B::G1> = taus[..n]
        .par_iter()
        .map(|t| g1.mul_scalar(&(alpha * *t)))
        .collect();
    let beta_tau_powers_g1: Vec<B::G1> = taus[..n]
        .par_iter()
        .map(|t| g1.mul_scalar(&(beta * *t)))
        .collect();

    PowersOfTau::new(
        tau_powers_g1,
        tau_powers_g2,
        alpha_tau_powers_g1,
        beta_tau_powers_g1,
        g2.mul_scalar(&beta),
    )
}

/// Builds an SRS of degree `n` for secrets sampled from `rng`.
pub fn dummy_powersoftau<B: PairingBackend, R: RngCore + ?Sized>(
    rng: &mut R,
    n: usize,
) -> Result<PowersOfTau<B>, Error> {
    let tau = B::Scalar::random(rng);
    let alpha = B::Scalar::random(rng);
    let beta = B::Scalar::random(rng);
    dummy_powersoftau_from_secrets(tau, alpha, beta, n)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    #[cfg(feature = "ark_bls12381")]
    use crate::backend::ArkworksBls12;
    use crate::backend::ArkworksBn254;

    type Fr = <ArkworksBn254 as PairingBackend>::Scalar;
    type G1 = <ArkworksBn254 as PairingBackend>::G1;
    type G2 = <ArkworksBn254 as PairingBackend>::G2;

    fn dummy_shape_helper<B: PairingBackend>() {
        let mut rng = StdRng::seed_from_u64(21);
        let srs = dummy_powersoftau::<B, _>(&mut rng, 4).unwrap();
        assert_eq!(srs.degree(), 4);
        assert_eq!(srs.tau_powers_g1().len(), 7);
        assert_eq!(srs.tau_powers_g2().len(), 4);
        assert_eq!(srs.alpha_tau_powers_g1().len(), 4);
        assert_eq!(srs.beta_tau_powers_g1().len(), 4);
        assert_eq!(srs.tau_powers_g1()[0], B::G1::generator());
        assert_eq!(srs.tau_powers_g2()[0], B::G2::generator());
    }

    #[test]
    fn dummy_srs_has_expected_shape() {
        dummy_shape_helper::<ArkworksBn254>();
        #[cfg(feature = "ark_bls12381")]
        dummy_shape_helper::<ArkworksBls12>();
    }

    #[test]
    fn dummy_srs_from_known_secrets() {
        let tau = Fr::from_u64(3);
        let alpha = Fr::from_u64(5);
        let beta = Fr::from_u64(7);
        let srs = dummy_powersoftau_from_secrets::<ArkworksBn254>(tau, alpha, beta, 3).unwrap();

        let g1 = G1::generator();
        assert_eq!(srs.tau_powers_g1()[4], g1.mul_scalar(&Fr::from_u64(81)));
        assert_eq!(srs.tau_powers_g2()[2], G2::generator().mul_scalar(&Fr::from_u64(9)));
        assert_eq!(srs.alpha_tau_powers_g1()[1], g1.mul_scalar(&Fr::from_u64(15)));
        assert_eq!(srs.beta_tau_powers_g1()[2], g1.mul_scalar(&Fr::from_u64(63)));
        assert_eq!(*srs.beta_g2(), G2::generator().mul_scalar(&beta));
    }

    #[test]
    fn new_rejects_bad_lengths() {
        let g1 = G1::generator();
        let g2 = G2::generator();
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::new(vec![], vec![], vec![], vec![], g2),
            Err(Error::LengthMismatch(_))
        ));
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::new(vec![g1; 2], vec![g2; 2], vec![g1; 2], vec![g1; 2], g2),
            Err(Error::LengthMismatch(_))
        ));
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::new(vec![g1; 3], vec![g2; 2], vec![g1; 1], vec![g1; 2], g2),
            Err(Error::LengthMismatch(_))
        ));
        assert!(
            PowersOfTau::<ArkworksBn254>::new(vec![g1; 3], vec![g2; 2], vec![g1; 2], vec![g1; 2], g2)
                .is_ok()
        );
        assert!(matches!(
            dummy_powersoftau_from_secrets::<ArkworksBn254>(Fr::one(), Fr::one(), Fr::one(), 0),
            Err(Error::LengthMismatch(_))
        ));
    }

    #[test]
    fn store_then_load_round_trips() {
        let mut rng = StdRng::seed_from_u64(22);
        let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, 5).unwrap();

        let mut bytes = Vec::new();
        srs.store(&mut bytes).unwrap();
        // (2n-1) + n + n G1 points at 65 bytes, n + 1 G2 points at 129 bytes
        assert_eq!(bytes.len(), 17 * 65 + 6 * 129);

        let loaded = PowersOfTau::<ArkworksBn254>::load(&mut bytes.as_slice(), 5).unwrap();
        assert_eq!(loaded, srs);
    }

    #[test]
    fn load_reports_truncation() {
        let mut rng = StdRng::seed_from_u64(23);
        let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, 2).unwrap();
        let mut bytes = Vec::new();
        srs.store(&mut bytes).unwrap();

        bytes.pop();
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::load(&mut bytes.as_slice(), 2),
            Err(Error::TruncatedInput { .. })
        ));
        // asking for a larger degree than was written runs off the end
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::load(&mut bytes.as_slice(), 3),
            Err(Error::TruncatedInput { .. }) | Err(Error::MalformedEncoding(_))
        ));
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::load(&mut bytes.as_slice(), 0),
            Err(Error::LengthMismatch(_))
        ));
    }

    #[test]
    fn rejects_degree_overflowing_g1_count() {
        let huge = usize::MAX / 2 + 1;
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::load(&mut [0u8; 0].as_slice(), huge),
            Err(Error::LengthMismatch(_))
        ));
        assert!(matches!(
            dummy_powersoftau_from_secrets::<ArkworksBn254>(Fr::one(), Fr::one(), Fr::one(), huge),
            Err(Error::LengthMismatch(_))
        ));
        // 2n - 1 still fits; the empty stream runs out first
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::load(&mut [0u8; 0].as_slice(), usize::MAX / 2),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn load_rejects_corrupted_point() {
        let mut rng = StdRng::seed_from_u64(24);
        let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, 2).unwrap();
        let mut bytes = Vec::new();
        srs.store(&mut bytes).unwrap();

        // flip the last byte of the second G1 point's y coordinate
        bytes[2 * 65 - 1] ^= 1;
        assert!(matches!(
            PowersOfTau::<ArkworksBn254>::load(&mut bytes.as_slice(), 2),
            Err(Error::MalformedEncoding(_))
        ));
    }
}
