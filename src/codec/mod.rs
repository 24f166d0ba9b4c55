//! Binary codec for ceremony transcripts.
//!
//! # Encoding Strategy
//!
//! - **Field elements** (Fr, Fq): 32-byte big-endian canonical integers, never
//!   Montgomery form. Values `>=` the modulus are rejected.
//! - **Fq2**: one 64-byte big-endian integer `c1·q + c0`, where `q` is the base
//!   field modulus. Values `>=` `q²` are rejected.
//! - **Curve points** (G1, G2): one marker byte. `0x00` is the point at
//!   infinity with no payload, `0x04` is followed by affine `x` then `y`.
//!   Decoded points are checked against the curve equation and the prime-order
//!   subgroup.
//!
//! There are no length prefixes; callers know how many values to expect.
//!
//! # Example
//!
//! ```rust
//! use pot_srs::backend::{ArkworksBn254, CurvePoint, PairingBackend};
//! use pot_srs::codec::TranscriptCodec;
//!
//! type G1 = <ArkworksBn254 as PairingBackend>::G1;
//!
//! let mut bytes = Vec::new();
//! ArkworksBn254::write_g1(&G1::generator(), &mut bytes).unwrap();
//! assert_eq!(bytes.len(), 65);
//!
//! let decoded = ArkworksBn254::read_g1(&mut bytes.as_slice()).unwrap();
//! assert_eq!(decoded, G1::generator());
//! ```

use std::io::{ErrorKind, Read, Write};

use crate::backend::PairingBackend;
use crate::errors::Error;

mod ark_bn254;
pub use self::ark_bn254::{read_fq2, write_fq2};

/// Marker byte for the point at infinity.
pub const POINT_AT_INFINITY: u8 = 0x00;
/// Marker byte for an uncompressed affine point.
pub const POINT_UNCOMPRESSED: u8 = 0x04;
/// Size in bytes of one encoded base or scalar field element.
pub const FIELD_ELEMENT_BYTES: usize = 32;
/// Size in bytes of one encoded Fq2 element.
pub const FQ2_ELEMENT_BYTES: usize = 64;

/// Transcript encoding for the groups and scalar field of a backend.
///
/// Implemented only for backends whose curve has a ceremony transcript format.
pub trait TranscriptCodec: PairingBackend {
    fn read_scalar<R: Read>(reader: &mut R) -> Result<Self::Scalar, Error>;

    fn write_scalar<W: Write>(scalar: &Self::Scalar, writer: &mut W) -> Result<(), Error>;

    fn read_g1<R: Read>(reader: &mut R) -> Result<Self::G1, Error>;

    fn write_g1<W: Write>(point: &Self::G1, writer: &mut W) -> Result<(), Error>;

    fn read_g2<R: Read>(reader: &mut R) -> Result<Self::G2, Error>;

    fn write_g2<W: Write>(point: &Self::G2, writer: &mut W) -> Result<(), Error>;

    /// Reads `count` consecutive G1 points.
    fn read_g1_vec<R: Read>(reader: &mut R, count: usize) -> Result<Vec<Self::G1>, Error> {
        (0..count).map(|_| Self::read_g1(reader)).collect()
    }

    /// Reads `count` consecutive G2 points.
    fn read_g2_vec<R: Read>(reader: &mut R, count: usize) -> Result<Vec<Self::G2>, Error> {
        (0..count).map(|_| Self::read_g2(reader)).collect()
    }

    fn write_g1_slice<W: Write>(points: &[Self::G1], writer: &mut W) -> Result<(), Error> {
        points.iter().try_for_each(|p| Self::write_g1(p, writer))
    }

    fn write_g2_slice<W: Write>(points: &[Self::G2], writer: &mut W) -> Result<(), Error> {
        points.iter().try_for_each(|p| Self::write_g2(p, writer))
    }
}

/// Fills `buf` from `reader`, reporting a short stream as [`Error::TruncatedInput`].
pub(crate) fn read_exact<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    context: &'static str,
) -> Result<(), Error> {
    let expected = buf.len();
    reader.read_exact(buf).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => Error::TruncatedInput { expected, context },
        _ => Error::Io(err),
    })
}

pub(crate) fn read_u8<R: Read>(reader: &mut R, context: &'static str) -> Result<u8, Error> {
    let mut byte = [0u8; 1];
    read_exact(reader, &mut byte, context)?;
    Ok(byte[0])
}
