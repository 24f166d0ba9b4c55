//! alt_bn128 transcript encoding on top of the arkworks BN254 types.

use std::io::{Read, Write};

use ark_bn254::{Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInt, BigInteger, PrimeField};
use num_bigint::BigUint;

use super::{
    FIELD_ELEMENT_BYTES, FQ2_ELEMENT_BYTES, POINT_AT_INFINITY, POINT_UNCOMPRESSED,
    TranscriptCodec, read_exact, read_u8,
};
use crate::backend::{ArkBnG1, ArkBnG2, ArkworksBn254};
use crate::errors::Error;

fn read_prime_field<F, R>(reader: &mut R, context: &'static str) -> Result<F, Error>
where
    F: PrimeField<BigInt = BigInt<4>>,
    R: Read,
{
    let mut bytes = [0u8; FIELD_ELEMENT_BYTES];
    read_exact(reader, &mut bytes, context)?;

    // big-endian bytes, little-endian limbs
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    F::from_bigint(BigInt::new(limbs)).ok_or_else(|| {
        Error::MalformedEncoding(format!("{context}: value is not below the field modulus"))
    })
}

fn write_prime_field<F, W>(value: &F, writer: &mut W) -> Result<(), Error>
where
    F: PrimeField<BigInt = BigInt<4>>,
    W: Write,
{
    writer.write_all(&value.into_bigint().to_bytes_be())?;
    Ok(())
}

/// Reads an Fq2 element stored as the 512-bit big-endian integer `c1·q + c0`.
///
/// Values at or above `q²` are rejected, so every element has exactly one
/// encoding.
pub fn read_fq2<R: Read>(reader: &mut R, context: &'static str) -> Result<Fq2, Error> {
    let mut bytes = [0u8; FQ2_ELEMENT_BYTES];
    read_exact(reader, &mut bytes, context)?;

    let modulus = BigUint::from(Fq::MODULUS);
    let value = BigUint::from_bytes_be(&bytes);
    let (c1, c0) = (&value / &modulus, &value % &modulus);
    if c1 >= modulus {
        return Err(Error::MalformedEncoding(format!(
            "{context}: value is not below the squared field modulus"
        )));
    }
    Ok(Fq2::new(Fq::from(c0), Fq::from(c1)))
}

/// Writes an Fq2 element as the 512-bit big-endian integer `c1·q + c0`.
pub fn write_fq2<W: Write>(value: &Fq2, writer: &mut W) -> Result<(), Error> {
    let modulus = BigUint::from(Fq::MODULUS);
    let combined = BigUint::from(value.c1) * modulus + BigUint::from(value.c0);
    let digits = combined.to_bytes_be();

    let mut bytes = [0u8; FQ2_ELEMENT_BYTES];
    bytes[FQ2_ELEMENT_BYTES - digits.len()..].copy_from_slice(&digits);
    writer.write_all(&bytes)?;
    Ok(())
}

fn validate(
    on_curve: bool,
    in_subgroup: impl FnOnce() -> bool,
    group: &'static str,
) -> Result<(), Error> {
    if !on_curve {
        return Err(Error::MalformedEncoding(format!(
            "{group} point is not on the curve"
        )));
    }
    if !in_subgroup() {
        return Err(Error::MalformedEncoding(format!(
            "{group} point is not in the prime-order subgroup"
        )));
    }
    Ok(())
}

fn unknown_marker(group: &'static str, marker: u8) -> Error {
    Error::MalformedEncoding(format!("unknown {group} point marker 0x{marker:02x}"))
}

impl TranscriptCodec for ArkworksBn254 {
    fn read_scalar<R: Read>(reader: &mut R) -> Result<Fr, Error> {
        read_prime_field(reader, "scalar")
    }

    fn write_scalar<W: Write>(scalar: &Fr, writer: &mut W) -> Result<(), Error> {
        write_prime_field(scalar, writer)
    }

    fn read_g1<R: Read>(reader: &mut R) -> Result<ArkBnG1, Error> {
        let affine = match read_u8(reader, "g1 marker")? {
            POINT_AT_INFINITY => G1Affine::identity(),
            POINT_UNCOMPRESSED => {
                let x = read_prime_field::<Fq, _>(reader, "g1 x coordinate")?;
                let y = read_prime_field::<Fq, _>(reader, "g1 y coordinate")?;
                let point = G1Affine::new_unchecked(x, y);
                validate(
                    point.is_on_curve(),
                    || point.is_in_correct_subgroup_assuming_on_curve(),
                    "g1",
                )?;
                point
            }
            marker => return Err(unknown_marker("g1", marker)),
        };
        Ok(ArkBnG1(affine.into_group()))
    }

    fn write_g1<W: Write>(point: &ArkBnG1, writer: &mut W) -> Result<(), Error> {
        let affine = point.0.into_affine();
        if affine.infinity {
            writer.write_all(&[POINT_AT_INFINITY])?;
            return Ok(());
        }
        writer.write_all(&[POINT_UNCOMPRESSED])?;
        write_prime_field(&affine.x, writer)?;
        write_prime_field(&affine.y, writer)
    }

    fn read_g2<R: Read>(reader: &mut R) -> Result<ArkBnG2, Error> {
        let affine = match read_u8(reader, "g2 marker")? {
            POINT_AT_INFINITY => G2Affine::identity(),
            POINT_UNCOMPRESSED => {
                let x = read_fq2(reader, "g2 x coordinate")?;
                let y = read_fq2(reader, "g2 y coordinate")?;
                let point = G2Affine::new_unchecked(x, y);
                validate(
                    point.is_on_curve(),
                    || point.is_in_correct_subgroup_assuming_on_curve(),
                    "g2",
                )?;
                point
            }
            marker => return Err(unknown_marker("g2", marker)),
        };
        Ok(ArkBnG2(affine.into_group()))
    }

    fn write_g2<W: Write>(point: &ArkBnG2, writer: &mut W) -> Result<(), Error> {
        let affine = point.0.into_affine();
        if affine.infinity {
            writer.write_all(&[POINT_AT_INFINITY])?;
            return Ok(());
        }
        writer.write_all(&[POINT_UNCOMPRESSED])?;
        write_fq2(&affine.x, writer)?;
        write_fq2(&affine.y, writer)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::backend::{CurvePoint, FieldElement};

    fn g1_bytes(x: u8, y: u8) -> Vec<u8> {
        let mut bytes = vec![POINT_UNCOMPRESSED];
        bytes.extend_from_slice(&[0u8; 31]);
        bytes.push(x);
        bytes.extend_from_slice(&[0u8; 31]);
        bytes.push(y);
        bytes
    }

    #[test]
    fn g1_generator_has_known_encoding() {
        let mut bytes = Vec::new();
        ArkworksBn254::write_g1(&ArkBnG1::generator(), &mut bytes).unwrap();
        assert_eq!(bytes, g1_bytes(1, 2));

        let decoded = ArkworksBn254::read_g1(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, ArkBnG1::generator());
    }

    /// 64-byte big-endian encoding of a hex integer.
    fn be512(hex: &str) -> Vec<u8> {
        let digits = BigUint::parse_bytes(hex.as_bytes(), 16).unwrap().to_bytes_be();
        let mut bytes = vec![0u8; 64 - digits.len()];
        bytes.extend_from_slice(&digits);
        bytes
    }

    #[test]
    fn g2_generator_has_known_encoding() {
        // x and y as c1·q + c0
        let mut expected = vec![POINT_UNCOMPRESSED];
        expected.extend(be512(
            "04d4bf3239f77cee7b47c7245e9281b3e9c1182d6381a87bbf81f9f2a6254b73\
             1df569cda95e060bee91ba69b3f2d103658a7aea6b10e5bdc761e5715e7ee4bb",
        ));
        expected.extend(be512(
            "01b4c328f0cbdb4aada63b3d09100d792376b94d07a6004e46054eeec849e8de\
             9835158a11d28483dd8db236ea49f3630edc9e41944e494c5aacfc36af3b66e7",
        ));

        let mut bytes = Vec::new();
        ArkworksBn254::write_g2(&ArkBnG2::generator(), &mut bytes).unwrap();
        assert_eq!(bytes, expected);

        let decoded = ArkworksBn254::read_g2(&mut expected.as_slice()).unwrap();
        assert_eq!(decoded, ArkBnG2::generator());
    }

    #[test]
    fn fq2_packs_c1_times_modulus_plus_c0() {
        let mut bytes = Vec::new();
        write_fq2(&Fq2::new(Fq::from(5u64), Fq::from(0u64)), &mut bytes).unwrap();
        assert_eq!(bytes, be512("5"));

        // c1 = 1, c0 = 0 is the modulus itself
        let mut bytes = Vec::new();
        write_fq2(&Fq2::new(Fq::from(0u64), Fq::from(1u64)), &mut bytes).unwrap();
        let modulus = be512("30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47");
        assert_eq!(bytes, modulus);
        assert_eq!(
            read_fq2(&mut modulus.as_slice(), "fq2").unwrap(),
            Fq2::new(Fq::from(0u64), Fq::from(1u64))
        );
    }

    #[test]
    fn rejects_fq2_at_or_above_squared_modulus() {
        let all_ones = [0xffu8; 64];
        assert!(matches!(
            read_fq2(&mut all_ones.as_slice(), "fq2"),
            Err(Error::MalformedEncoding(_))
        ));

        let modulus = BigUint::from(Fq::MODULUS);
        let squared = (&modulus * &modulus).to_bytes_be();
        let mut bytes = vec![0u8; 64 - squared.len()];
        bytes.extend_from_slice(&squared);
        assert!(matches!(
            read_fq2(&mut bytes.as_slice(), "fq2"),
            Err(Error::MalformedEncoding(_))
        ));

        // q² - 1 is the largest valid encoding
        let below = (&modulus * &modulus - 1u32).to_bytes_be();
        let mut bytes = vec![0u8; 64 - below.len()];
        bytes.extend_from_slice(&below);
        let value = read_fq2(&mut bytes.as_slice(), "fq2").unwrap();
        assert_eq!(value, Fq2::new(-Fq::from(1u64), -Fq::from(1u64)));
    }

    #[test]
    fn scalar_is_big_endian_canonical() {
        let mut bytes = Vec::new();
        ArkworksBn254::write_scalar(&Fr::from_u64(0x0102), &mut bytes).unwrap();
        let mut expected = [0u8; 32];
        expected[30] = 0x01;
        expected[31] = 0x02;
        assert_eq!(bytes, expected);

        let mut rng = StdRng::seed_from_u64(3);
        let value = <Fr as FieldElement>::random(&mut rng);
        let mut bytes = Vec::new();
        ArkworksBn254::write_scalar(&value, &mut bytes).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(ArkworksBn254::read_scalar(&mut bytes.as_slice()).unwrap(), value);
    }

    #[test]
    fn rejects_scalar_at_or_above_modulus() {
        let modulus = Fr::MODULUS.to_bytes_be();
        assert!(matches!(
            ArkworksBn254::read_scalar(&mut modulus.as_slice()),
            Err(Error::MalformedEncoding(_))
        ));

        let all_ones = [0xffu8; 32];
        assert!(matches!(
            ArkworksBn254::read_scalar(&mut all_ones.as_slice()),
            Err(Error::MalformedEncoding(_))
        ));
    }

    #[test]
    fn rejects_off_curve_points() {
        // 1 != 1 + 3
        let bytes = g1_bytes(1, 1);
        assert!(matches!(
            ArkworksBn254::read_g1(&mut bytes.as_slice()),
            Err(Error::MalformedEncoding(_))
        ));

        let mut bytes = vec![POINT_UNCOMPRESSED];
        write_fq2(&Fq2::new(Fq::from(1u64), Fq::from(0u64)), &mut bytes).unwrap();
        write_fq2(&Fq2::new(Fq::from(1u64), Fq::from(0u64)), &mut bytes).unwrap();
        assert!(matches!(
            ArkworksBn254::read_g2(&mut bytes.as_slice()),
            Err(Error::MalformedEncoding(_))
        ));
    }

    #[test]
    fn rejects_unknown_marker() {
        let mut bytes = g1_bytes(1, 2);
        bytes[0] = 0x02;
        assert!(matches!(
            ArkworksBn254::read_g1(&mut bytes.as_slice()),
            Err(Error::MalformedEncoding(_))
        ));
        let bytes = [0x01u8];
        assert!(matches!(
            ArkworksBn254::read_g2(&mut bytes.as_slice()),
            Err(Error::MalformedEncoding(_))
        ));
    }

    #[test]
    fn short_input_is_truncated() {
        let bytes = g1_bytes(1, 2);
        assert!(matches!(
            ArkworksBn254::read_g1(&mut &bytes[..40]),
            Err(Error::TruncatedInput { expected: 32, .. })
        ));
        assert!(matches!(
            ArkworksBn254::read_g1(&mut &[0u8; 0][..]),
            Err(Error::TruncatedInput { expected: 1, .. })
        ));
        assert!(matches!(
            ArkworksBn254::read_scalar(&mut &[0u8; 31][..]),
            Err(Error::TruncatedInput { expected: 32, .. })
        ));
    }

    #[test]
    fn identity_is_single_byte() {
        let mut bytes = Vec::new();
        ArkworksBn254::write_g1(&ArkBnG1::identity(), &mut bytes).unwrap();
        ArkworksBn254::write_g2(&ArkBnG2::identity(), &mut bytes).unwrap();
        assert_eq!(bytes, vec![POINT_AT_INFINITY, POINT_AT_INFINITY]);

        let mut reader = bytes.as_slice();
        assert!(ArkworksBn254::read_g1(&mut reader).unwrap().is_identity());
        assert!(ArkworksBn254::read_g2(&mut reader).unwrap().is_identity());
        assert!(reader.is_empty());
    }

    #[test]
    fn g2_points_round_trip() {
        let mut rng = StdRng::seed_from_u64(9);
        let points: Vec<ArkBnG2> = (0..3)
            .map(|_| ArkBnG2::generator().mul_scalar(&<Fr as FieldElement>::random(&mut rng)))
            .collect();

        let mut bytes = Vec::new();
        ArkworksBn254::write_g2_slice(&points, &mut bytes).unwrap();
        assert_eq!(bytes.len(), 3 * 129);

        let decoded = ArkworksBn254::read_g2_vec(&mut bytes.as_slice(), 3).unwrap();
        assert_eq!(decoded, points);
    }
}
