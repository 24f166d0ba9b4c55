//! Structured reference strings produced and consumed by this crate.
//!
//! - [`PowersOfTau`]: the ceremony output in monomial form, `[τ^i]`, `[α·τ^i]`,
//!   `[β·τ^i]` and `[β]_2`.
//! - [`LagrangeEvaluations`]: the same secrets re-expressed over a radix-2
//!   domain, `[L_i(τ)]`, `[α·L_i(τ)]_1` and `[β·L_i(τ)]_1`.
//!
//! Both are immutable once built. A transcript read from disk is untrusted
//! until [`PowersOfTau::is_well_formed`] accepts it.

mod evaluations;
mod powers;

pub use evaluations::LagrangeEvaluations;
pub use powers::{PowersOfTau, dummy_powersoftau, dummy_powersoftau_from_secrets};
