//! Arkworks BN254 (alt_bn128) backend.
//!
//! BN254 is the curve used by the powers-of-tau ceremony tool whose transcripts
//! this crate reads, so this backend is always compiled.
//!
//! # Groups
//!
//! - **G1**: First source group for pairings (points on E(Fq))
//! - **G2**: Second source group for pairings (points on E'(Fq2))
//! - **Gt**: Target group for pairings (elements in Fq12)

use ark_bn254::{
    Bn254, Fr as BnFr, G1Affine as BnG1Affine, G1Projective as BnG1, G2Affine as BnG2Affine,
    G2Projective as BnG2,
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

impl FieldElement for BnFr {
    fn zero() -> Self {
        Zero::zero()
    }

    fn one() -> Self {
        One::one()
    }

    fn from_u64(n: u64) -> Self {
        BnFr::from(n)
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        <BnFr as UniformRand>::rand(rng)
    }

}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// G1 group element wrapper for the Arkworks BN254 backend.
pub struct ArkBnG1(pub BnG1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// G2 group element wrapper for the Arkworks BN254 backend.
pub struct ArkBnG2(pub BnG2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Target group wrapper for the Arkworks BN254 backend.
pub struct ArkBnGt(pub PairingOutput<Bn254>);

impl CurvePoint<BnFr> for ArkBnG1 {
    type Affine = BnG1Affine;

    fn identity() -> Self {
        ArkBnG1(BnG1::zero())
    }

    fn generator() -> Self {
        ArkBnG1(BnG1::generator())
    }

    fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    fn add(&self, other: &Self) -> Self {
        ArkBnG1(self.0 + other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        ArkBnG1(self.0 - other.0)
    }

    fn negate(&self) -> Self {
        ArkBnG1(-self.0)
    }

    fn mul_scalar(&self, scalar: &BnFr) -> Self {
        ArkBnG1(self.0 * scalar)
    }

    fn batch_normalize(points: &[Self]) -> Vec<Self::Affine> {
        let projectives: Vec<BnG1> = points.iter().map(|p| p.0).collect();
        BnG1::normalize_batch(&projectives)
    }
}

impl CurvePoint<BnFr> for ArkBnG2 {
    type Affine = BnG2Affine;

    fn identity() -> Self {
        ArkBnG2(BnG2::zero())
    }

    fn generator() -> Self {
        ArkBnG2(BnG2::generator())
    }

    fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    fn add(&self, other: &Self) -> Self {
        ArkBnG2(self.0 + other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        ArkBnG2(self.0 - other.0)
    }

    fn negate(&self) -> Self {
        ArkBnG2(-self.0)
    }

    fn mul_scalar(&self, scalar: &BnFr) -> Self {
        ArkBnG2(self.0 * scalar)
    }

    fn batch_normalize(points: &[Self]) -> Vec<Self::Affine> {
        let projectives: Vec<BnG2> = points.iter().map(|p| p.0).collect();
        BnG2::normalize_batch(&projectives)
    }
}

impl TargetGroup for ArkBnGt {
    fn identity() -> Self {
        ArkBnGt(PairingOutput::<Bn254>::zero())
    }
}

impl EvaluationDomain<ArkworksBn254> for Radix2EvaluationDomain<BnFr> {
    fn new(size: usize) -> Option<Self> {
        // ark-poly rounds other sizes up
        if !size.is_power_of_two() {
            return None;
        }
        <Self as ArkEvaluationDomain<BnFr>>::new(size)
    }

    fn size(&self) -> usize {
        <Self as ArkEvaluationDomain<BnFr>>::size(self)
    }

    fn group_gen(&self) -> BnFr {
        <Self as ArkEvaluationDomain<BnFr>>::group_gen(self)
    }

    fn elements(&self) -> Vec<BnFr> {
        <Self as ArkEvaluationDomain<BnFr>>::elements(self).collect()
    }

    #[instrument(level = "debug", skip_all, fields(size = points.len()))]
    fn fft_g1(&self, points: &[ArkBnG1]) -> Result<Vec<ArkBnG1>, BackendError> {
        let mut raw = domain_input(EvaluationDomain::size(self), points, |p| p.0)?;
        ArkEvaluationDomain::fft_in_place(self, &mut raw);
        Ok(raw.into_iter().map(ArkBnG1).collect())
    }

    #[instrument(level = "debug", skip_all, fields(size = points.len()))]
    fn ifft_g1(&self, points: &[ArkBnG1]) -> Result<Vec<ArkBnG1>, BackendError> {
        let mut raw = domain_input(EvaluationDomain::size(self), points, |p| p.0)?;
        ArkEvaluationDomain::ifft_in_place(self, &mut raw);
        Ok(raw.into_iter().map(ArkBnG1).collect())
    }

    #[instrument(level = "debug", skip_all, fields(size = points.len()))]
    fn fft_g2(&self, points: &[ArkBnG2]) -> Result<Vec<ArkBnG2>, BackendError> {
        let mut raw = domain_input(EvaluationDomain::size(self), points, |p| p.0)?;
        ArkEvaluationDomain::fft_in_place(self, &mut raw);
        Ok(raw.into_iter().map(ArkBnG2).collect())
    }

    #[instrument(level = "debug", skip_all, fields(size = points.len()))]
    fn ifft_g2(&self, points: &[ArkBnG2]) -> Result<Vec<ArkBnG2>, BackendError> {
        let mut raw = domain_input(EvaluationDomain::size(self), points, |p| p.0)?;
        ArkEvaluationDomain::ifft_in_place(self, &mut raw);
        Ok(raw.into_iter().map(ArkBnG2).collect())
    }
}

fn convert_bn_scalars(scalars: &[BnFr]) -> Vec<<BnFr as PrimeField>::BigInt> {
    scalars.iter().map(|s| s.into_bigint()).collect()
}

#[derive(Debug)]
pub struct BnMsm;

impl MsmProvider<ArkworksBn254> for BnMsm {
    #[instrument(level = "trace", skip_all, fields(len = bases.len()))]
    fn msm_g1(bases: &[ArkBnG1], scalars: &[BnFr]) -> Result<ArkBnG1, BackendError> {
        if bases.len() != scalars.len() {
            return Err(BackendError::Math("msm length mismatch"));
        }
        let affines = ArkBnG1::batch_normalize(bases);
        let coeffs = convert_bn_scalars(scalars);
        Ok(ArkBnG1(BnG1::msm_bigint(&affines, &coeffs)))
    }

    #[instrument(level = "trace", skip_all, fields(len = bases.len()))]
    fn msm_g2(bases: &[ArkBnG2], scalars: &[BnFr]) -> Result<ArkBnG2, BackendError> {
        if bases.len() != scalars.len() {
            return Err(BackendError::Math("msm length mismatch"));
        }
        let affines = ArkBnG2::batch_normalize(bases);
        let coeffs = convert_bn_scalars(scalars);
        Ok(ArkBnG2(BnG2::msm_bigint(&affines, &coeffs)))
    }
}

/// Arkworks BN254 pairing backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArkworksBn254;

impl PairingBackend for ArkworksBn254 {
    type Scalar = BnFr;
    type G1 = ArkBnG1;
    type G2 = ArkBnG2;
    type Target = ArkBnGt;
    type Domain = Radix2EvaluationDomain<BnFr>;
    type Msm = BnMsm;

    const CURVE: CurveId = CurveId::Bn254;

    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target {
        ArkBnGt(Bn254::pairing(g1.0.into_affine(), g2.0.into_affine()))
    }

    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError> {
        if g1.len() != g2.len() {
            return Err(BackendError::Math("pairing length mismatch"));
        }
        let lhs = ArkBnG1::batch_normalize(g1);
        let rhs = ArkBnG2::batch_normalize(g2);
        Ok(ArkBnGt(Bn254::multi_pairing(lhs, rhs)))
    }
}
