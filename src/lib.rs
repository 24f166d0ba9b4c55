//! # pot-srs: Powers-of-Tau SRS Verification and Lagrange Transformation
//!
//! pot-srs reads the transcript of a "powers-of-tau" trusted-setup ceremony,
//! checks that it is internally consistent, and converts it into the
//! Lagrange-basis structured reference string (SRS) that pairing-based proof
//! systems consume during their own setup.
//!
//! ## Overview
//!
//! A ceremony for degree bound `n` publishes, for secrets `τ`, `α`, `β` that no
//! single party knows:
//!
//! - `[τ^i]_1` for `i < 2n-1`, `[τ^i]_2` for `i < n`
//! - `[α·τ^i]_1` and `[β·τ^i]_1` for `i < n`
//! - `[β]_2`
//!
//! This crate does not take part in the ceremony. It validates and transforms
//! what the ceremony produced.
//!
//! ## Architecture
//!
//! - **[`backend`]**: Trait abstractions for fields, curve groups, pairings and MSM,
//!   with arkworks implementations for BN254 and (optionally) BLS12-381.
//!
//! - **[`codec`]**: The [`TranscriptCodec`](codec::TranscriptCodec) trait and the
//!   alt_bn128 transcript encoding of field elements and points.
//!
//! - **[`srs`]**: [`PowersOfTau`] and [`LagrangeEvaluations`], with load/store and
//!   test-only constructors from known secrets.
//!
//! - **[`ratio`]**: Same-ratio pairing checks, single and batched.
//!
//! - **[`verify`]**: [`is_well_formed`], the consistency check for a transcript.
//!
//! - **[`domain`]** and **[`lagrange`]**: Radix-2 evaluation domains (FFT over
//!   group elements via ark-poly) and [`compute_lagrange_evaluations`].
//!
//! - **[`config`]**: [`SetupParameters`], [`BackendConfig`], [`CurveId`] and [`BackendId`].
//!
//! - **`errors`**: [`Error`] and [`BackendError`], re-exported at the crate root.
//!
//! ## Quick Example
//!
//! ```rust
//! use pot_srs::backend::ArkworksBn254;
//! use pot_srs::{
//!     BackendConfig, LagrangeEvaluations, PowersOfTau, SetupParameters,
//!     compute_lagrange_evaluations, dummy_powersoftau,
//! };
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! # fn main() -> Result<(), pot_srs::Error> {
//! let params = SetupParameters::new(16, Some(8), BackendConfig::default())?;
//!
//! // Stand-in for a real transcript file
//! let mut rng = StdRng::seed_from_u64(0);
//! let srs = dummy_powersoftau::<ArkworksBn254, _>(&mut rng, params.max_degree)?;
//! let mut transcript = Vec::new();
//! srs.store(&mut transcript)?;
//!
//! // Load, verify, transform
//! let loaded = PowersOfTau::<ArkworksBn254>::load(&mut transcript.as_slice(), params.max_degree)?;
//! assert!(loaded.is_well_formed());
//!
//! let evals = compute_lagrange_evaluations(&loaded, params.lagrange_degree())?;
//! let mut cached = Vec::new();
//! evals.write(&mut cached)?;
//! assert_eq!(LagrangeEvaluations::<ArkworksBn254>::read(&mut cached.as_slice())?, evals);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - **`ark_bls12381`**: Arkworks backend for BLS12-381. Verification and the
//!   Lagrange transform are curve-generic; the transcript codec is BN254 only.
//!
//! ## Performance
//!
//! Verification costs a constant number of pairings plus a few MSMs of size `n`.
//! The Lagrange transform is an `O(N log N)` FFT over group elements. Rayon
//! runs the four independent transforms concurrently and parallelises the
//! scalar multiplications in the test-only constructors; ark-poly's `parallel`
//! feature parallelises each FFT.
//!
//! ## Security Considerations
//!
//! - A loaded transcript is untrusted until [`is_well_formed`] accepts it.
//! - Batched checks draw fresh randomness from OS entropy on every call. Only
//!   pass a deterministic RNG to the `*_with_rng` variants in tests.
//! - [`dummy_powersoftau`] and [`dummy_powersoftau_from_secrets`] know `τ`;
//!   never use their output outside tests and benchmarks.

pub mod backend;
pub mod codec;
pub mod config;
pub mod domain;
mod errors;
pub mod lagrange;
pub mod ratio;
pub mod srs;
pub mod verify;

pub use backend::PairingBackend;
pub use codec::TranscriptCodec;
pub use config::{BackendConfig, BackendId, CurveId, SetupParameters};
pub use domain::radix2_domain;
pub use errors::*;
pub use lagrange::compute_lagrange_evaluations;
pub use srs::{LagrangeEvaluations, PowersOfTau, dummy_powersoftau, dummy_powersoftau_from_secrets};
pub use verify::{is_well_formed, is_well_formed_with_rng};
