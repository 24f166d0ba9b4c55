//! Backend trait abstractions for the pairing arithmetic.
//!
//! The SRS algorithms never touch a concrete curve library directly. They are
//! written against the trait family defined here, and each supported curve
//! provides one implementation of it.
//!
//! # Architecture
//!
//! - **[`FieldElement`]**: Scalar field operations (zero, one, random)
//! - **[`CurvePoint`]**: Elliptic curve point operations for G1/G2 groups
//! - **[`TargetGroup`]**: Pairing output group (GT) identity test
//! - **[`EvaluationDomain`]**: Radix-2 FFT domain acting on G1/G2 vectors
//! - **[`MsmProvider`]**: Multi-scalar multiplication (MSM) provider
//! - **[`PairingBackend`]**: Umbrella trait that ties all operations together
//!
//! # Available Backends
//!
//! - **[`ArkworksBn254`]** (always available): alt_bn128 / BN254 using arkworks.
//!   This is the curve of the ceremony transcripts handled by [`crate::codec`].
//! - **`ArkworksBls12`** (feature: `ark_bls12381`): BLS12-381 using arkworks.
//!
//! # Example
//!
//! ```rust
//! use pot_srs::backend::{ArkworksBn254, CurvePoint, FieldElement, PairingBackend};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! type Scalar = <ArkworksBn254 as PairingBackend>::Scalar;
//! type G1 = <ArkworksBn254 as PairingBackend>::G1;
//! type G2 = <ArkworksBn254 as PairingBackend>::G2;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let k = Scalar::random(&mut rng);
//!
//! // e(k*P, Q) == e(P, k*Q)
//! let lhs = ArkworksBn254::pairing(&G1::generator().mul_scalar(&k), &G2::generator());
//! let rhs = ArkworksBn254::pairing(&G1::generator(), &G2::generator().mul_scalar(&k));
//! assert_eq!(lhs, rhs);
//! ```

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;

use crate::config::CurveId;
use crate::errors::BackendError;

/// Field element abstraction for scalar field operations.
///
/// This trait abstracts over the scalar field Fr of the pairing-friendly curve.
/// Arithmetic goes through the standard operator traits so generic code reads
/// like ordinary field code.
pub trait FieldElement:
    Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Eq
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Returns the additive identity (zero) element.
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) element.
    fn one() -> Self;

    /// Converts a small integer into the field.
    fn from_u64(n: u64) -> Self;

    /// Samples a uniformly random field element.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;
}

/// Elliptic curve point abstraction for G1 and G2 groups.
///
/// Points are kept in projective coordinates; equality is group equality.
pub trait CurvePoint<F: FieldElement>:
    Copy + Send + Sync + Debug + PartialEq + Eq + 'static
{
    /// Associated affine representation.
    type Affine: Clone + Debug + Send + Sync + 'static;

    /// Returns the point at infinity (identity element).
    fn identity() -> Self;

    /// Returns the standard generator for this group.
    fn generator() -> Self;

    /// Checks if this point is the identity element.
    fn is_identity(&self) -> bool;

    /// Performs elliptic curve point addition.
    fn add(&self, other: &Self) -> Self;

    /// Performs elliptic curve point subtraction.
    fn sub(&self, other: &Self) -> Self;

    /// Returns the additive inverse of this point.
    fn negate(&self) -> Self;

    /// Performs scalar multiplication: returns `scalar * self`.
    fn mul_scalar(&self, scalar: &F) -> Self;

    /// Batch normalizes multiple projective points to affine coordinates.
    fn batch_normalize(points: &[Self]) -> Vec<Self::Affine>;
}

/// Pairing target group (GT) abstraction.
///
/// Every check in this crate is of the form "this product of pairings is the
/// identity", so only the identity test is needed.
pub trait TargetGroup: Clone + Send + Sync + Debug + PartialEq + Eq + 'static {
    /// Returns the identity element.
    fn identity() -> Self;

    /// Checks if this element is the identity.
    fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

/// FFT evaluation domain over a multiplicative subgroup of the scalar field.
///
/// The transforms act on vectors of group elements rather than scalars. The
/// DFT is linear, so transforming `[f_j]` yields the encodings of the
/// transformed scalars without knowing any `f_j`. Inputs must have exactly
/// [`size`](EvaluationDomain::size) entries.
pub trait EvaluationDomain<B: PairingBackend>: Clone + Send + Sync + Debug + 'static {
    /// Builds the domain of exactly `size` elements.
    ///
    /// Returns `None` unless `size` is a power of two that the scalar field's
    /// two-adicity supports.
    fn new(size: usize) -> Option<Self>;

    /// Returns the size of this evaluation domain.
    fn size(&self) -> usize;

    /// Primitive `size`-th root of unity generating the domain.
    fn group_gen(&self) -> B::Scalar;

    /// Returns all elements in the domain: `ω^0, ω^1, …, ω^{size-1}`.
    fn elements(&self) -> Vec<B::Scalar>;

    /// Forward transform in G1: `out[k] = Σ_j points[j] · ω^{jk}`.
    fn fft_g1(&self, points: &[B::G1]) -> Result<Vec<B::G1>, BackendError>;

    /// Inverse transform in G1: `out[k] = size⁻¹ · Σ_j points[j] · ω^{-jk}`.
    fn ifft_g1(&self, points: &[B::G1]) -> Result<Vec<B::G1>, BackendError>;

    /// Forward transform in G2.
    fn fft_g2(&self, points: &[B::G2]) -> Result<Vec<B::G2>, BackendError>;

    /// Inverse transform in G2.
    fn ifft_g2(&self, points: &[B::G2]) -> Result<Vec<B::G2>, BackendError>;
}

/// Multi-scalar multiplication (MSM) provider.
///
/// MSM computes `∑ scalars[i] * bases[i]`. The batched ratio checks form their
/// random linear combinations through this trait.
pub trait MsmProvider<B: PairingBackend>: Send + Sync + Debug + 'static {
    /// Computes multi-scalar multiplication in G1: `∑ scalars[i] * bases[i]`.
    fn msm_g1(bases: &[B::G1], scalars: &[B::Scalar]) -> Result<B::G1, BackendError>;

    /// Computes multi-scalar multiplication in G2: `∑ scalars[i] * bases[i]`.
    fn msm_g2(bases: &[B::G2], scalars: &[B::Scalar]) -> Result<B::G2, BackendError>;
}

/// Main backend trait that ties together all cryptographic operations.
///
/// # Type Parameters
///
/// - `Scalar`: The scalar field type (Fr)
/// - `G1`: The first elliptic curve group
/// - `G2`: The second elliptic curve group
/// - `Target`: The pairing target group (GT)
/// - `Domain`: FFT evaluation domain
/// - `Msm`: Multi-scalar multiplication provider
pub trait PairingBackend:
    Send + Sync + Debug + Clone + PartialEq + Eq + Sized + 'static
{
    /// Scalar field type (Fr).
    type Scalar: FieldElement;
    /// First curve group (G1).
    type G1: CurvePoint<Self::Scalar>;
    /// Second curve group (G2).
    type G2: CurvePoint<Self::Scalar>;
    /// Pairing target group (GT).
    type Target: TargetGroup;
    /// FFT evaluation domain.
    type Domain: EvaluationDomain<Self>;
    /// Multi-scalar multiplication provider.
    type Msm: MsmProvider<Self>;

    /// Curve this backend instantiates.
    const CURVE: CurveId;

    /// Computes the bilinear pairing: `e(g1, g2) -> GT`.
    ///
    /// The pairing satisfies bilinearity: `e(a*P, b*Q) = e(P, Q)^(ab)`.
    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target;

    /// Computes a product of pairings: `∏ e(g1[i], g2[i])`.
    ///
    /// Shares a single final exponentiation across all terms.
    /// Returns an error if the input arrays have different lengths.
    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError>;
}

/// Unwraps `points` for an ark-poly transform over a domain of `size` elements.
fn domain_input<P, T>(
    size: usize,
    points: &[P],
    unwrap: impl Fn(&P) -> T,
) -> Result<Vec<T>, BackendError> {
    if points.len() != size {
        return Err(BackendError::Math("fft length does not match domain size"));
    }
    Ok(points.iter().map(unwrap).collect())
}

mod ark_bn254;
pub use self::ark_bn254::*;

#[cfg(feature = "ark_bls12381")]
mod ark_bls12_381;
#[cfg(feature = "ark_bls12381")]
pub use self::ark_bls12_381::*;

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::{
        CurvePoint, EvaluationDomain, FieldElement, MsmProvider, PairingBackend, TargetGroup,
    };
    #[cfg(feature = "ark_bls12381")]
    use crate::backend::ArkworksBls12;
    use crate::backend::ArkworksBn254;

    fn bilinearity_helper<E: PairingBackend>() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = E::Scalar::random(&mut rng);
        let b = E::Scalar::random(&mut rng);
        let p = E::G1::generator().mul_scalar(&a);
        let q = E::G2::generator().mul_scalar(&b);

        let lhs = E::pairing(&p, &q);
        let rhs = E::pairing(&E::G1::generator().mul_scalar(&(a * b)), &E::G2::generator());
        assert_eq!(lhs, rhs);

        // e(P, Q) * e(-P, Q) == 1
        let product = E::multi_pairing(&[p, p.negate()], &[q, q]).expect("equal lengths");
        assert!(product.is_identity());
        assert!(E::multi_pairing(&[p], &[q, q]).is_err());
    }

    fn msm_helper<E: PairingBackend>() {
        let mut rng = StdRng::seed_from_u64(12);
        let bases: Vec<E::G1> = (0..5)
            .map(|_| E::G1::generator().mul_scalar(&E::Scalar::random(&mut rng)))
            .collect();
        let scalars: Vec<E::Scalar> = (0..5).map(|_| E::Scalar::random(&mut rng)).collect();

        let expected = bases
            .iter()
            .zip(scalars.iter())
            .fold(E::G1::identity(), |acc, (p, s)| acc.add(&p.mul_scalar(s)));
        let msm = E::Msm::msm_g1(&bases, &scalars).expect("msm");
        assert_eq!(msm, expected);
        assert!(E::Msm::msm_g1(&bases[..4], &scalars).is_err());
    }

    fn domain_helper<E: PairingBackend>() {
        let domain = E::Domain::new(8).expect("radix-2 size");
        assert_eq!(domain.size(), 8);
        let elements = domain.elements();
        assert_eq!(elements[0], E::Scalar::one());
        assert_ne!(elements[4], E::Scalar::one());
        assert_eq!(elements[7] * domain.group_gen(), E::Scalar::one());

        let mut rng = StdRng::seed_from_u64(13);
        let points: Vec<E::G2> = (0..8)
            .map(|_| E::G2::generator().mul_scalar(&E::Scalar::random(&mut rng)))
            .collect();
        let evals = domain.fft_g2(&points).expect("fft");
        assert_eq!(domain.ifft_g2(&evals).expect("ifft"), points);
        assert!(domain.ifft_g2(&points[..7]).is_err());
    }

    #[test]
    fn pairing_is_bilinear() {
        bilinearity_helper::<ArkworksBn254>();
        #[cfg(feature = "ark_bls12381")]
        bilinearity_helper::<ArkworksBls12>();
    }

    #[test]
    fn msm_matches_naive_sum() {
        msm_helper::<ArkworksBn254>();
        #[cfg(feature = "ark_bls12381")]
        msm_helper::<ArkworksBls12>();
    }

    #[test]
    fn domain_transforms_round_trip() {
        domain_helper::<ArkworksBn254>();
        #[cfg(feature = "ark_bls12381")]
        domain_helper::<ArkworksBls12>();
    }
}
