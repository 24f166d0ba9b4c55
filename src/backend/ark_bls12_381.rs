//! Arkworks BLS12-381 backend.
//!
//! Second instantiation of the backend traits. The verifier and the Lagrange
//! transform are curve-generic and run unchanged on it; the transcript codec
//! does not, since ceremony transcripts are BN254-only.

use ark_bls12_381::{
    Bls12_381, Fr as BlsFr, G1Affine as BlsG1Affine, G1Projective as BlsG1,
    G2Affine as BlsG2Affine, G2Projective as BlsG2,
};
use ark_ec::{
    CurveGroup, PrimeGroup,
    pairing::{Pairing, PairingOutput},
    scalar_mul::variable_base::VariableBaseMSM,
};
use ark_ff::{One, PrimeField, UniformRand, Zero};
use ark_poly::{EvaluationDomain as ArkEvaluationDomain, Radix2EvaluationDomain};
use rand_core::RngCore;
use tracing::instrument;

use crate::backend::{
    CurvePoint, EvaluationDomain, FieldElement, MsmProvider, PairingBackend, TargetGroup,
    domain_input,
};
use crate::config::CurveId;
use crate::errors::BackendError;

impl FieldElement for BlsFr {
    fn zero() -> Self {
        Zero::zero()
    }

    fn one() -> Self {
        One::one()
    }

    fn from_u64(n: u64) -> Self {
        BlsFr::from(n)
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        <BlsFr as UniformRand>::rand(rng)
    }

}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// G1 group element wrapper for the Arkworks BLS12-381 backend.
pub struct ArkBlsG1(pub BlsG1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// G2 group element wrapper for the Arkworks BLS12-381 backend.
pub struct ArkBlsG2(pub BlsG2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Target group wrapper for the Arkworks BLS12-381 backend.
pub struct ArkBlsGt(pub PairingOutput<Bls12_381>);

impl CurvePoint<BlsFr> for ArkBlsG1 {
    type Affine = BlsG1Affine;

    fn identity() -> Self {
        ArkBlsG1(BlsG1::zero())
    }

    fn generator() -> Self {
        ArkBlsG1(BlsG1::generator())
    }

    fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    fn add(&self, other: &Self) -> Self {
        ArkBlsG1(self.0 + other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        ArkBlsG1(self.0 - other.0)
    }

    fn negate(&self) -> Self {
        ArkBlsG1(-self.0)
    }

    fn mul_scalar(&self, scalar: &BlsFr) -> Self {
        ArkBlsG1(self.0 * scalar)
    }

    fn batch_normalize(points: &[Self]) -> Vec<Self::Affine> {
        let projectives: Vec<BlsG1> = points.iter().map(|p| p.0).collect();
        BlsG1::normalize_batch(&projectives)
    }
}

impl CurvePoint<BlsFr> for ArkBlsG2 {
    type Affine = BlsG2Affine;

    fn identity() -> Self {
        ArkBlsG2(BlsG2::zero())
    }

    fn generator() -> Self {
        ArkBlsG2(BlsG2::generator())
    }

    fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    fn add(&self, other: &Self) -> Self {
        ArkBlsG2(self.0 + other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        ArkBlsG2(self.0 - other.0)
    }

    fn negate(&self) -> Self {
        ArkBlsG2(-self.0)
    }

    fn mul_scalar(&self, scalar: &BlsFr) -> Self {
        ArkBlsG2(self.0 * scalar)
    }

    fn batch_normalize(points: &[Self]) -> Vec<Self::Affine> {
        let projectives: Vec<BlsG2> = points.iter().map(|p| p.0).collect();
        BlsG2::normalize_batch(&projectives)
    }
}

impl TargetGroup for ArkBlsGt {
    fn identity() -> Self {
        ArkBlsGt(PairingOutput::<Bls12_381>::zero())
    }
}

impl EvaluationDomain<ArkworksBls12> for Radix2EvaluationDomain<BlsFr> {
    fn new(size: usize) -> Option<Self> {
        // ark-poly rounds other sizes up
        if !size.is_power_of_two() {
            return None;
        }
        <Self as ArkEvaluationDomain<BlsFr>>::new(size)
    }

    fn size(&self) -> usize {
        <Self as ArkEvaluationDomain<BlsFr>>::size(self)
    }

    fn group_gen(&self) -> BlsFr {
        <Self as ArkEvaluationDomain<BlsFr>>::group_gen(self)
    }

    fn elements(&self) -> Vec<BlsFr> {
        <Self as ArkEvaluationDomain<BlsFr>>::elements(self).collect()
    }

    #[instrument(level = "debug", skip_all, fields(size = points.len()))]
    fn fft_g1(&self, points: &[ArkBlsG1]) -> Result<Vec<ArkBlsG1>, BackendError> {
        let mut raw = domain_input(EvaluationDomain::size(self), points, |p| p.0)?;
        ArkEvaluationDomain::fft_in_place(self, &mut raw);
        Ok(raw.into_iter().map(ArkBlsG1).collect())
    }

    #[instrument(level = "debug", skip_all, fields(size = points.len()))]
    fn ifft_g1(&self, points: &[ArkBlsG1]) -> Result<Vec<ArkBlsG1>, BackendError> {
        let mut raw = domain_input(EvaluationDomain::size(self), points, |p| p.0)?;
        ArkEvaluationDomain::ifft_in_place(self, &mut raw);
        Ok(raw.into_iter().map(ArkBlsG1).collect())
    }

    #[instrument(level = "debug", skip_all, fields(size = points.len()))]
    fn fft_g2(&self, points: &[ArkBlsG2]) -> Result<Vec<ArkBlsG2>, BackendError> {
        let mut raw = domain_input(EvaluationDomain::size(self), points, |p| p.0)?;
        ArkEvaluationDomain::fft_in_place(self, &mut raw);
        Ok(raw.into_iter().map(ArkBlsG2).collect())
    }

    #[instrument(level = "debug", skip_all, fields(size = points.len()))]
    fn ifft_g2(&self, points: &[ArkBlsG2]) -> Result<Vec<ArkBlsG2>, BackendError> {
        let mut raw = domain_input(EvaluationDomain::size(self), points, |p| p.0)?;
        ArkEvaluationDomain::ifft_in_place(self, &mut raw);
        Ok(raw.into_iter().map(ArkBlsG2).collect())
    }
}

fn convert_bls_scalars(scalars: &[BlsFr]) -> Vec<<BlsFr as PrimeField>::BigInt> {
    scalars.iter().map(|s| s.into_bigint()).collect()
}

#[derive(Debug)]
pub struct BlsMsm;

impl MsmProvider<ArkworksBls12> for BlsMsm {
    #[instrument(level = "trace", skip_all, fields(len = bases.len()))]
    fn msm_g1(bases: &[ArkBlsG1], scalars: &[BlsFr]) -> Result<ArkBlsG1, BackendError> {
        if bases.len() != scalars.len() {
            return Err(BackendError::Math("msm length mismatch"));
        }
        let affines = ArkBlsG1::batch_normalize(bases);
        let coeffs = convert_bls_scalars(scalars);
        Ok(ArkBlsG1(BlsG1::msm_bigint(&affines, &coeffs)))
    }

    #[instrument(level = "trace", skip_all, fields(len = bases.len()))]
    fn msm_g2(bases: &[ArkBlsG2], scalars: &[BlsFr]) -> Result<ArkBlsG2, BackendError> {
        if bases.len() != scalars.len() {
            return Err(BackendError::Math("msm length mismatch"));
        }
        let affines = ArkBlsG2::batch_normalize(bases);
        let coeffs = convert_bls_scalars(scalars);
        Ok(ArkBlsG2(BlsG2::msm_bigint(&affines, &coeffs)))
    }
}

/// Arkworks BLS12-381 pairing backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArkworksBls12;

impl PairingBackend for ArkworksBls12 {
    type Scalar = BlsFr;
    type G1 = ArkBlsG1;
    type G2 = ArkBlsG2;
    type Target = ArkBlsGt;
    type Domain = Radix2EvaluationDomain<BlsFr>;
    type Msm = BlsMsm;

    const CURVE: CurveId = CurveId::Bls12_381;

    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target {
        ArkBlsGt(Bls12_381::pairing(g1.0.into_affine(), g2.0.into_affine()))
    }

    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError> {
        if g1.len() != g2.len() {
            return Err(BackendError::Math("pairing length mismatch"));
        }
        let lhs = ArkBlsG1::batch_normalize(g1);
        let rhs = ArkBlsG2::batch_normalize(g2);
        Ok(ArkBlsGt(Bls12_381::multi_pairing(lhs, rhs)))
    }
}
