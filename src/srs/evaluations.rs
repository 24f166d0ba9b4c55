use std::io::{Read, Write};

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use tracing::{debug, instrument};

use crate::backend::{CurvePoint, FieldElement, MsmProvider, PairingBackend};
use crate::codec::{TranscriptCodec, read_exact};
use crate::errors::Error;
use crate::ratio::same_ratio;

/// Lagrange-basis SRS over a radix-2 domain of size `degree`.
///
/// Entry `i` of each sequence encodes `L_i(τ)` (scaled by `α` or `β` where the
/// name says so), where `L_i` is the Lagrange polynomial that is one at `ω^i`
/// and zero on the rest of the domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LagrangeEvaluations<B: PairingBackend> {
    lagrange_g1: Vec<B::G1>,
    lagrange_g2: Vec<B::G2>,
    alpha_lagrange_g1: Vec<B::G1>,
    beta_lagrange_g1: Vec<B::G1>,
}

impl<B: PairingBackend> LagrangeEvaluations<B> {
    /// Assembles the evaluations; all four sequences must have the same non-zero length.
    pub fn new(
        lagrange_g1: Vec<B::G1>,
        lagrange_g2: Vec<B::G2>,
        alpha_lagrange_g1: Vec<B::G1>,
        beta_lagrange_g1: Vec<B::G1>,
    ) -> Result<Self, Error> {
        let degree = lagrange_g1.len();
        if degree == 0 {
            return Err(Error::LengthMismatch(
                "lagrange evaluations must not be empty".into(),
            ));
        }
        let lengths = [
            lagrange_g2.len(),
            alpha_lagrange_g1.len(),
            beta_lagrange_g1.len(),
        ];
        if lengths.iter().any(|&len| len != degree) {
            return Err(Error::LengthMismatch(format!(
                "lagrange sequences differ in length: {degree}, {}, {}, {}",
                lengths[0], lengths[1], lengths[2]
            )));
        }
        Ok(Self {
            lagrange_g1,
            lagrange_g2,
            alpha_lagrange_g1,
            beta_lagrange_g1,
        })
    }

    /// Domain size.
    pub fn degree(&self) -> usize {
        self.lagrange_g1.len()
    }

    pub fn lagrange_g1(&self) -> &[B::G1] {
        &self.lagrange_g1
    }

    pub fn lagrange_g2(&self) -> &[B::G2] {
        &self.lagrange_g2
    }

    pub fn alpha_lagrange_g1(&self) -> &[B::G1] {
        &self.alpha_lagrange_g1
    }

    pub fn beta_lagrange_g1(&self) -> &[B::G1] {
        &self.beta_lagrange_g1
    }

    /// Sanity-checks the evaluations, drawing batching randomness from OS entropy.
    ///
    /// See [`LagrangeEvaluations::is_well_formed_with_rng`].
    pub fn is_well_formed(&self) -> bool {
        self.is_well_formed_with_rng(&mut ChaCha20Rng::from_entropy())
    }

    /// Checks that:
    /// - the four sequences have the same length
    /// - `Σ [L_i(τ)]_1 = [1]_1` and `Σ [L_i(τ)]_2 = [1]_2`, since the Lagrange
    ///   basis sums to the constant polynomial one
    /// - `lagrange_g1[i]` and `lagrange_g2[i]` encode the same scalar, for every
    ///   `i`, via one randomized pairing check
    ///
    /// The `α` and `β` sequences cannot be tied to `α` and `β` without the
    /// originating transcript and are only length-checked.
    #[instrument(level = "info", skip_all, fields(degree = self.degree()))]
    pub fn is_well_formed_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R) -> bool {
        let degree = self.degree();
        if self.lagrange_g2.len() != degree
            || self.alpha_lagrange_g1.len() != degree
            || self.beta_lagrange_g1.len() != degree
        {
            debug!("lagrange sequences differ in length");
            return false;
        }

        let sum_g1 = self
            .lagrange_g1
            .iter()
            .fold(B::G1::identity(), |acc, p| acc.add(p));
        if sum_g1 != B::G1::generator() {
            debug!("G1 lagrange evaluations do not sum to the generator");
            return false;
        }
        let sum_g2 = self
            .lagrange_g2
            .iter()
            .fold(B::G2::identity(), |acc, p| acc.add(p));
        if sum_g2 != B::G2::generator() {
            debug!("G2 lagrange evaluations do not sum to the generator");
            return false;
        }

        let scalars: Vec<B::Scalar> = (0..degree).map(|_| B::Scalar::random(rng)).collect();
        let combined = B::Msm::msm_g1(&self.lagrange_g1, &scalars)
            .and_then(|g1| B::Msm::msm_g2(&self.lagrange_g2, &scalars).map(|g2| (g1, g2)));
        match combined {
            Ok((g1, g2)) => {
                let consistent =
                    same_ratio::<B>(&B::G1::generator(), &g1, &B::G2::generator(), &g2);
                if !consistent {
                    debug!("G1 and G2 lagrange evaluations encode different scalars");
                }
                consistent
            }
            Err(err) => {
                debug!(error = %err, "msm failed while checking lagrange evaluations");
                false
            }
        }
    }
}

impl<B: TranscriptCodec> LagrangeEvaluations<B> {
    /// Writes the evaluations: an 8-byte big-endian `degree`, then
    /// `lagrange_g1`, `lagrange_g2`, `alpha_lagrange_g1` and `beta_lagrange_g1`
    /// in transcript encoding.
    #[instrument(level = "info", skip_all, fields(degree = self.degree()))]
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_all(&(self.degree() as u64).to_be_bytes())?;
        B::write_g1_slice(&self.lagrange_g1, writer)?;
        B::write_g2_slice(&self.lagrange_g2, writer)?;
        B::write_g1_slice(&self.alpha_lagrange_g1, writer)?;
        B::write_g1_slice(&self.beta_lagrange_g1, writer)
    }

    /// Reads evaluations written by [`LagrangeEvaluations::write`].
    #[instrument(level = "info", skip_all)]
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let mut header = [0u8; 8];
        read_exact(reader, &mut header, "lagrange degree")?;
        let degree = usize::try_from(u64::from_be_bytes(header)).map_err(|_| {
            Error::MalformedEncoding("lagrange degree does not fit in usize".into())
        })?;
        let lagrange_g1 = B::read_g1_vec(reader, degree)?;
        let lagrange_g2 = B::read_g2_vec(reader, degree)?;
        let alpha_lagrange_g1 = B::read_g1_vec(reader, degree)?;
        let beta_lagrange_g1 = B::read_g1_vec(reader, degree)?;
        Self::new(lagrange_g1, lagrange_g2, alpha_lagrange_g1, beta_lagrange_g1)
    }
}
