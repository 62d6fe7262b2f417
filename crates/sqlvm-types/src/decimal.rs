//! Lossless codec between exact decimals and fixed-width two's-complement
//! storage bytes.
//!
//! The codec never checks magnitude. A value wider than the target width
//! keeps only its low-order bytes, so callers range-check with
//! [`DataType::min_max`] before encoding.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, Zero};
use tracing::trace;

use crate::{CodecError, DataType, Major};

/// Integer part of `value`, truncated toward zero.
///
/// Only the low `bits` bits of the result are exact: a positive exponent
/// of at least `bits` makes every low bit zero, so the product is never
/// materialized.
fn truncate(value: &BigDecimal, bits: u64) -> BigInt {
    let (digits, scale) = value.as_bigint_and_exponent();
    if scale > 0 {
        // |digits| < 2^n <= 2^(3 * scale) < 10^scale
        let n = digits.magnitude().bits();
        if scale.unsigned_abs().saturating_mul(3) >= n {
            return BigInt::zero();
        }
        return value.with_scale(0).into_bigint_and_exponent().0;
    }
    match u32::try_from(scale.unsigned_abs()) {
        Ok(exponent) if u64::from(exponent) < bits => digits * BigInt::from(10u8).pow(exponent),
        _ => BigInt::zero(),
    }
}

/// Multiplies `value` by `10^digits` without rounding.
fn shift(value: &BigDecimal, digits: i64) -> BigDecimal {
    let (int, scale) = value.as_bigint_and_exponent();
    BigDecimal::new(int, scale.saturating_sub(digits))
}

/// Copies the low `out.len()` bytes of `bytes` right-aligned into `out`.
fn copy_right_aligned(out: &mut [u8], bytes: &[u8]) {
    let n = bytes.len().min(out.len());
    let out_len = out.len();
    out[out_len - n..].copy_from_slice(&bytes[bytes.len() - n..]);
}

fn encode_int(size: usize, value: &BigDecimal) -> Vec<u8> {
    let mut out = vec![0u8; size];
    let int = truncate(value, size as u64 * 8);
    match int.sign() {
        Sign::NoSign => {}
        Sign::Plus => copy_right_aligned(&mut out, &int.magnitude().to_bytes_be()),
        Sign::Minus => {
            // ~(|v| - 1) == v in two's complement.
            let reduced = int.magnitude() - BigUint::one();
            copy_right_aligned(&mut out, &reduced.to_bytes_be());
            for b in out.iter_mut() {
                *b = !*b;
            }
        }
    }
    out
}

fn decode_int(signed: bool, bytes: &[u8]) -> BigInt {
    let negative = signed && bytes.first().is_some_and(|b| b & 0x80 != 0);
    if !negative {
        return BigInt::from_bytes_be(Sign::Plus, bytes);
    }
    let complement: Vec<u8> = bytes.iter().map(|b| !b).collect();
    let magnitude = BigUint::from_bytes_be(&complement) + BigUint::one();
    BigInt::from_biguint(Sign::Minus, magnitude)
}

/// Encodes `value` into exactly `dt.size()` bytes.
///
/// Integers are stored big-endian two's complement; fixed-point values are
/// scaled by `10^fractional_digits` first, and any remaining fraction is
/// truncated. Only `int`, `uint`, `fixed` and `ufixed` have an encoding.
pub fn encode(dt: DataType, value: &BigDecimal) -> Result<Vec<u8>, CodecError> {
    let (major, minor) = dt.decompose();
    trace!(data_type = %dt, "decimal encode");
    match major {
        Major::INT | Major::UINT => Ok(encode_int(minor.0 as usize + 1, value)),
        _ if major.is_fixed_range() || major.is_ufixed_range() => {
            Ok(encode_int(dt.size(), &shift(value, minor.0 as i64)))
        }
        _ => Err(CodecError::Encode(dt)),
    }
}

/// Decodes bytes produced by [`encode`] back into the logical value.
pub fn decode(dt: DataType, bytes: &[u8]) -> Result<BigDecimal, CodecError> {
    let (major, minor) = dt.decompose();
    trace!(data_type = %dt, len = bytes.len(), "decimal decode");
    let scaled = |signed: bool| BigDecimal::new(decode_int(signed, bytes), minor.0 as i64);
    match major {
        Major::INT => Ok(BigDecimal::new(decode_int(true, bytes), 0)),
        Major::UINT => Ok(BigDecimal::new(decode_int(false, bytes), 0)),
        _ if major.is_fixed_range() => Ok(scaled(true)),
        _ if major.is_ufixed_range() => Ok(scaled(false)),
        _ => Err(CodecError::Decode(dt)),
    }
}

/// Narrows a non-negative decimal to `u64`, truncating the fraction.
///
/// Magnitudes above `u64::MAX` keep their low 64 bits.
pub fn decimal_to_u64(value: &BigDecimal) -> Result<u64, CodecError> {
    if value.is_zero() {
        return Ok(0);
    }
    if value.is_negative() {
        return Err(CodecError::NegativeToUint64(value.to_string()));
    }
    Ok(truncate(value, u64::BITS.into()).magnitude().iter_u64_digits().next().unwrap_or(0))
}
