//! Point representations and the textbook Jacobian group law.
//!
//! Conversion between external affine octets and internal Jacobian word
//! arrays is explicit and happens only here. The Jacobian doubling uses
//! the halved-M variant: M = (3X² + aZ⁴)·2⁻¹ with the curve record's
//! precomputed `inverse_2`, which trades the 4/8 multiples of the
//! textbook formula for one extra field multiplication.

use core::cmp::Ordering;

use crate::bignum::core as bn;
use crate::bignum::modular::Modulus;
use crate::ecc::curves::Curve;
use crate::ecc::{AffinePoint, ECC_MAX_WORDS};
use crate::error::CryptoError;
use crate::utils;

/// A point in Jacobian coordinates, (X/Z², Y/Z³) affine-equivalent.
///
/// The point at infinity is represented by Z = 0.
#[derive(Clone)]
pub(crate) struct JacobianPoint {
    pub x: [u32; ECC_MAX_WORDS],
    pub y: [u32; ECC_MAX_WORDS],
    pub z: [u32; ECC_MAX_WORDS],
}

impl JacobianPoint {
    pub(crate) fn infinity() -> Self {
        JacobianPoint {
            x: [0; ECC_MAX_WORDS],
            y: [0; ECC_MAX_WORDS],
            z: [0; ECC_MAX_WORDS],
        }
    }

    pub(crate) fn is_infinity(&self, words: usize) -> bool {
        bn::is_zero(&self.z[..words])
    }
}

/// Decodes one big-endian coordinate of exactly `curve.byte_size` bytes
/// into a word array.
pub(crate) fn decode_coord(
    curve: &Curve,
    src: &[u8],
) -> Result<[u32; ECC_MAX_WORDS], CryptoError> {
    if src.len() != curve.byte_size {
        return Err(CryptoError::InvalidLength);
    }

    let mut words = [0u32; ECC_MAX_WORDS];
    utils::be_bytes_to_words(&mut words[..curve.word_size], src)?;

    Ok(words)
}

/// Checks that an external affine point satisfies the curve equation.
///
/// Fails with `NotOnCurve` when a coordinate is not a canonical field
/// element or when y² ≠ x³ + ax + b. The point at infinity has no affine
/// encoding and is therefore rejected by construction.
pub fn point_on_curve(curve: &Curve, point: &AffinePoint<'_>) -> Result<(), CryptoError> {
    let x = decode_coord(curve, point.x)?;
    let y = decode_coord(curve, point.y)?;

    on_curve_words(curve, &x[..curve.word_size], &y[..curve.word_size])
}

/// Word-level on-curve predicate: y² − (x³ + ax + b) ≡ 0 mod p.
pub(crate) fn on_curve_words(curve: &Curve, x: &[u32], y: &[u32]) -> Result<(), CryptoError> {
    let nw = curve.word_size;
    let m = Modulus::new(curve.p)?;

    if bn::compare(x, curve.p) != Ordering::Less || bn::compare(y, curve.p) != Ordering::Less {
        return Err(CryptoError::NotOnCurve);
    }

    let mut lhs = [0u32; ECC_MAX_WORDS];
    let mut t1 = [0u32; ECC_MAX_WORDS];
    let mut t2 = [0u32; ECC_MAX_WORDS];

    m.square(y, &mut lhs[..nw])?;
    m.square(x, &mut t1[..nw])?;
    m.add(&t1[..nw], curve.a, &mut t2[..nw]);
    m.mult(&t2[..nw], x, &mut t1[..nw])?;
    m.add(&t1[..nw], curve.b, &mut t2[..nw]);

    if bn::compare(&lhs[..nw], &t2[..nw]) != Ordering::Equal {
        return Err(CryptoError::NotOnCurve);
    }

    Ok(())
}

/// Lifts affine word coordinates to Jacobian form with Z = 1.
pub(crate) fn from_affine_words(curve: &Curve, x: &[u32], y: &[u32]) -> JacobianPoint {
    let nw = curve.word_size;
    let mut p = JacobianPoint::infinity();

    p.x[..nw].copy_from_slice(x);
    p.y[..nw].copy_from_slice(y);
    p.z[0] = 1;

    p
}

/// Projects a Jacobian point back to affine word coordinates.
///
/// Fails with `InvalidInput` for the point at infinity, which has no
/// affine form.
pub(crate) fn to_affine_words(
    curve: &Curve,
    pt: &JacobianPoint,
) -> Result<([u32; ECC_MAX_WORDS], [u32; ECC_MAX_WORDS]), CryptoError> {
    let nw = curve.word_size;

    if pt.is_infinity(nw) {
        return Err(CryptoError::InvalidInput);
    }

    let m = Modulus::new(curve.p)?;

    let mut zinv = [0u32; ECC_MAX_WORDS];
    let mut zinv2 = [0u32; ECC_MAX_WORDS];
    let mut zinv3 = [0u32; ECC_MAX_WORDS];
    let mut x = [0u32; ECC_MAX_WORDS];
    let mut y = [0u32; ECC_MAX_WORDS];

    m.inv(&pt.z[..nw], &mut zinv[..nw])?;
    m.square(&zinv[..nw], &mut zinv2[..nw])?;
    m.mult(&zinv2[..nw], &zinv[..nw], &mut zinv3[..nw])?;
    m.mult(&pt.x[..nw], &zinv2[..nw], &mut x[..nw])?;
    m.mult(&pt.y[..nw], &zinv3[..nw], &mut y[..nw])?;

    Ok((x, y))
}

/// Jacobian doubling: 2P.
///
/// Doubling the point at infinity, or a point with Y = 0, yields
/// infinity.
pub(crate) fn double_jacobian(
    curve: &Curve,
    pt: &JacobianPoint,
) -> Result<JacobianPoint, CryptoError> {
    let nw = curve.word_size;

    if pt.is_infinity(nw) {
        return Ok(JacobianPoint::infinity());
    }

    let m = Modulus::new(curve.p)?;
    let x = &pt.x[..nw];
    let y = &pt.y[..nw];
    let z = &pt.z[..nw];

    let mut t1 = [0u32; ECC_MAX_WORDS];
    let mut t2 = [0u32; ECC_MAX_WORDS];
    let mut t3 = [0u32; ECC_MAX_WORDS];
    let mut t4 = [0u32; ECC_MAX_WORDS];
    let mut t5 = [0u32; ECC_MAX_WORDS];
    let mut out = JacobianPoint::infinity();

    // M = (3X² + aZ⁴)·2⁻¹
    m.square(z, &mut t1[..nw])?;
    m.square(&t1[..nw], &mut t2[..nw])?;
    m.mult(curve.a, &t2[..nw], &mut t1[..nw])?;
    m.square(x, &mut t2[..nw])?;
    m.add(&t2[..nw], &t2[..nw], &mut t3[..nw]);
    m.add(&t3[..nw], &t2[..nw], &mut t4[..nw]);
    m.add(&t4[..nw], &t1[..nw], &mut t2[..nw]);
    m.mult(&t2[..nw], curve.inverse_2, &mut t1[..nw])?;

    // S = X·Y², plus Y⁴ for the y-coordinate
    m.square(y, &mut t2[..nw])?;
    m.mult(x, &t2[..nw], &mut t3[..nw])?;
    m.square(&t2[..nw], &mut t4[..nw])?;

    // X' = M² − 2S
    m.square(&t1[..nw], &mut t2[..nw])?;
    m.sub(&t2[..nw], &t3[..nw], &mut t5[..nw]);
    m.sub(&t5[..nw], &t3[..nw], &mut out.x[..nw]);

    // Y' = M(S − X') − Y⁴
    m.sub(&t3[..nw], &out.x[..nw], &mut t2[..nw]);
    m.mult(&t1[..nw], &t2[..nw], &mut t5[..nw])?;
    m.sub(&t5[..nw], &t4[..nw], &mut out.y[..nw]);

    // Z' = Y·Z
    m.mult(y, z, &mut out.z[..nw])?;

    Ok(out)
}

/// Jacobian addition: P + Q.
///
/// Falls back to doubling when P = Q and yields infinity when P = −Q.
pub(crate) fn add_jacobian(
    curve: &Curve,
    p: &JacobianPoint,
    q: &JacobianPoint,
) -> Result<JacobianPoint, CryptoError> {
    let nw = curve.word_size;

    if p.is_infinity(nw) {
        return Ok(q.clone());
    }
    if q.is_infinity(nw) {
        return Ok(p.clone());
    }

    let m = Modulus::new(curve.p)?;

    let mut z1z1 = [0u32; ECC_MAX_WORDS];
    let mut z2z2 = [0u32; ECC_MAX_WORDS];
    let mut u1 = [0u32; ECC_MAX_WORDS];
    let mut u2 = [0u32; ECC_MAX_WORDS];
    let mut s1 = [0u32; ECC_MAX_WORDS];
    let mut s2 = [0u32; ECC_MAX_WORDS];
    let mut h = [0u32; ECC_MAX_WORDS];
    let mut r = [0u32; ECC_MAX_WORDS];
    let mut t = [0u32; ECC_MAX_WORDS];

    m.square(&p.z[..nw], &mut z1z1[..nw])?;
    m.square(&q.z[..nw], &mut z2z2[..nw])?;
    m.mult(&p.x[..nw], &z2z2[..nw], &mut u1[..nw])?;
    m.mult(&q.x[..nw], &z1z1[..nw], &mut u2[..nw])?;

    m.mult(&p.y[..nw], &q.z[..nw], &mut t[..nw])?;
    m.mult(&t[..nw], &z2z2[..nw], &mut s1[..nw])?;
    m.mult(&q.y[..nw], &p.z[..nw], &mut t[..nw])?;
    m.mult(&t[..nw], &z1z1[..nw], &mut s2[..nw])?;

    m.sub(&u2[..nw], &u1[..nw], &mut h[..nw]);
    m.sub(&s2[..nw], &s1[..nw], &mut r[..nw]);

    if bn::is_zero(&h[..nw]) {
        if bn::is_zero(&r[..nw]) {
            return double_jacobian(curve, p);
        }
        return Ok(JacobianPoint::infinity());
    }

    let mut hh = [0u32; ECC_MAX_WORDS];
    let mut hhh = [0u32; ECC_MAX_WORDS];
    let mut v = [0u32; ECC_MAX_WORDS];
    let mut out = JacobianPoint::infinity();

    m.square(&h[..nw], &mut hh[..nw])?;
    m.mult(&h[..nw], &hh[..nw], &mut hhh[..nw])?;
    m.mult(&u1[..nw], &hh[..nw], &mut v[..nw])?;

    // X3 = R² − H³ − 2V
    m.square(&r[..nw], &mut t[..nw])?;
    m.sub(&t[..nw], &hhh[..nw], &mut u2[..nw]);
    m.sub(&u2[..nw], &v[..nw], &mut t[..nw]);
    m.sub(&t[..nw], &v[..nw], &mut out.x[..nw]);

    // Y3 = R(V − X3) − S1·H³
    m.sub(&v[..nw], &out.x[..nw], &mut t[..nw]);
    m.mult(&r[..nw], &t[..nw], &mut u2[..nw])?;
    m.mult(&s1[..nw], &hhh[..nw], &mut t[..nw])?;
    m.sub(&u2[..nw], &t[..nw], &mut out.y[..nw]);

    // Z3 = Z1·Z2·H
    m.mult(&p.z[..nw], &q.z[..nw], &mut t[..nw])?;
    m.mult(&t[..nw], &h[..nw], &mut out.z[..nw])?;

    Ok(out)
}
