//! Scalar multiplication via a co-Z Montgomery ladder.
//!
//! The ladder keeps two running points R0 = u·P and R1 = (u+1)·P sharing
//! one Z coordinate, where u is the consumed prefix of the scalar. Every
//! bit executes the same two co-Z operations — one conjugate addition
//! (XYcZ-ADDC) followed by one addition-with-update (XYcZ-ADD) — so the
//! operation sequence is independent of the scalar bits.
//!
//! Base-point multiplications seed the ladder from the curve record's
//! precomputed 2·G (both points affine, shared Z = 1); any other point
//! is seeded with an initial co-Z doubling. The shared Z is tracked
//! explicitly and inverted once at the end to recover the affine result.
//!
//! The scalar n − 1 is the single value in [1, n−1] whose ladder state
//! degenerates (R0 + R1 passes through infinity on the last bit); it is
//! answered directly as −P.

use core::cmp::Ordering;

use crate::bignum::core as bn;
use crate::bignum::modular::Modulus;
use crate::ecc::curves::Curve;
use crate::ecc::point::{self, JacobianPoint};
use crate::ecc::{AffinePoint, ECC_MAX_WORDS};
use crate::error::CryptoError;
use crate::utils;

/// XYcZ-ADD. Inputs P = (px, py) and Q = (qx, qy) share `z`.
/// On return Q holds P + Q, P holds the co-Z update of the input P, and
/// `z` is the new common Z.
fn zaddu(
    m: &Modulus,
    px: &mut [u32],
    py: &mut [u32],
    qx: &mut [u32],
    qy: &mut [u32],
    z: &mut [u32],
) -> Result<(), CryptoError> {
    let nw = px.len();

    let mut e = [0u32; ECC_MAX_WORDS];
    let mut c = [0u32; ECC_MAX_WORDS];
    let mut w1 = [0u32; ECC_MAX_WORDS];
    let mut w2 = [0u32; ECC_MAX_WORDS];
    let mut t1 = [0u32; ECC_MAX_WORDS];
    let mut t2 = [0u32; ECC_MAX_WORDS];

    let e = &mut e[..nw];
    let c = &mut c[..nw];
    let w1 = &mut w1[..nw];
    let w2 = &mut w2[..nw];
    let t1 = &mut t1[..nw];
    let t2 = &mut t2[..nw];

    m.sub(px, qx, e);
    m.square(e, c)?;
    m.mult(px, c, w1)?;
    m.mult(qx, c, w2)?;
    m.mult(z, e, t1)?;
    z.copy_from_slice(t1);

    m.sub(py, qy, e);
    m.square(e, t1)?;
    m.sub(w1, w2, t2);
    m.mult(py, t2, c)?;

    m.sub(t1, w1, t2);
    m.sub(t2, w2, qx);
    m.sub(w1, qx, t1);
    m.mult(e, t1, t2)?;
    m.sub(t2, c, qy);

    px.copy_from_slice(w1);
    py.copy_from_slice(c);

    Ok(())
}

/// XYcZ-ADDC. Inputs P and Q share `z`. On return Q holds P + Q, P holds
/// P − Q, and `z` is the new common Z.
fn zaddc(
    m: &Modulus,
    px: &mut [u32],
    py: &mut [u32],
    qx: &mut [u32],
    qy: &mut [u32],
    z: &mut [u32],
) -> Result<(), CryptoError> {
    let nw = px.len();

    let mut e = [0u32; ECC_MAX_WORDS];
    let mut c = [0u32; ECC_MAX_WORDS];
    let mut w1 = [0u32; ECC_MAX_WORDS];
    let mut w2 = [0u32; ECC_MAX_WORDS];
    let mut a1 = [0u32; ECC_MAX_WORDS];
    let mut t1 = [0u32; ECC_MAX_WORDS];
    let mut t2 = [0u32; ECC_MAX_WORDS];

    let e = &mut e[..nw];
    let c = &mut c[..nw];
    let w1 = &mut w1[..nw];
    let w2 = &mut w2[..nw];
    let a1 = &mut a1[..nw];
    let t1 = &mut t1[..nw];
    let t2 = &mut t2[..nw];

    m.sub(px, qx, e);
    m.square(e, c)?;
    m.mult(px, c, w1)?;
    m.mult(qx, c, w2)?;
    m.mult(z, e, t1)?;
    z.copy_from_slice(t1);

    m.sub(w1, w2, t1);
    m.mult(py, t1, a1)?;
    m.sub(py, qy, e);
    m.add(py, qy, c);

    // Sum into Q.
    m.square(e, t1)?;
    m.sub(t1, w1, t2);
    m.sub(t2, w2, qx);
    m.sub(w1, qx, t1);
    m.mult(e, t1, t2)?;
    m.sub(t2, a1, qy);

    // Difference into P.
    m.square(c, t1)?;
    m.sub(t1, w1, t2);
    m.sub(t2, w2, px);
    m.sub(w1, px, t1);
    m.mult(c, t1, t2)?;
    m.sub(t2, a1, py);

    Ok(())
}

/// Initial co-Z doubling of an affine point: produces 2P into R1 and the
/// co-Z update of P into R0, with the shared Z in `z`.
fn coz_idbl(
    m: &Modulus,
    curve: &Curve,
    x: &[u32],
    y: &[u32],
    r0x: &mut [u32],
    r0y: &mut [u32],
    r1x: &mut [u32],
    r1y: &mut [u32],
    z: &mut [u32],
) -> Result<(), CryptoError> {
    let nw = curve.word_size;

    let mut t1 = [0u32; ECC_MAX_WORDS];
    let mut t2 = [0u32; ECC_MAX_WORDS];
    let mut t3 = [0u32; ECC_MAX_WORDS];
    let mut e = [0u32; ECC_MAX_WORDS];

    let t1 = &mut t1[..nw];
    let t2 = &mut t2[..nw];
    let t3 = &mut t3[..nw];
    let e = &mut e[..nw];

    // M = (3X² + a)·2⁻¹  (Z = 1)
    m.square(x, t1)?;
    m.add(t1, t1, t2);
    m.add(t2, t1, t3);
    m.add(t3, curve.a, t1);
    m.mult(t1, curve.inverse_2, t2)?;

    // R0 = (X·Y², Y⁴); shared Z becomes Y
    m.square(y, e)?;
    m.mult(x, e, r0x)?;
    m.square(e, r0y)?;

    // R1 = (M² − 2S, M(S − X1') − Y⁴)
    m.square(t2, t1)?;
    m.sub(t1, r0x, t3);
    m.sub(t3, r0x, r1x);
    m.sub(r0x, r1x, t1);
    m.mult(t2, t1, t3)?;
    m.sub(t3, r0y, r1y);

    z.copy_from_slice(y);

    Ok(())
}

/// Word-level co-Z scalar multiplication: k·P in affine words.
///
/// Fails with `InvalidInput` when k = 0 or k ≥ n, and with `NotOnCurve`
/// when P does not satisfy the curve equation.
pub(crate) fn mult_coz_words(
    curve: &Curve,
    px: &[u32],
    py: &[u32],
    k: &[u32],
) -> Result<([u32; ECC_MAX_WORDS], [u32; ECC_MAX_WORDS]), CryptoError> {
    let nw = curve.word_size;

    if bn::is_zero(k) {
        return Err(CryptoError::InvalidInput);
    }
    if bn::compare_len_diff(k, curve.n) != Ordering::Less {
        return Err(CryptoError::InvalidInput);
    }

    point::on_curve_words(curve, px, py)?;

    let m = Modulus::new(curve.p)?;

    // k = n − 1 collapses the ladder state on its last bit; answer −P.
    let mut nm1 = [0u32; ECC_MAX_WORDS];
    nm1[..nw].copy_from_slice(curve.n);
    let mut one = [0u32; ECC_MAX_WORDS];
    one[0] = 1;
    bn::sub(&mut nm1[..nw], &one[..nw]);
    if bn::compare_len_diff(k, &nm1[..nw]) == Ordering::Equal {
        let mut out_x = [0u32; ECC_MAX_WORDS];
        let mut out_y = [0u32; ECC_MAX_WORDS];
        out_x[..nw].copy_from_slice(px);
        let zero = [0u32; ECC_MAX_WORDS];
        m.sub(&zero[..nw], py, &mut out_y[..nw]);
        return Ok((out_x, out_y));
    }

    let msb = bn::get_msb_set(k).unwrap_or(0);
    if msb == 0 {
        // k = 1: the ladder degenerates to P itself.
        let mut out_x = [0u32; ECC_MAX_WORDS];
        let mut out_y = [0u32; ECC_MAX_WORDS];
        out_x[..nw].copy_from_slice(px);
        out_y[..nw].copy_from_slice(py);
        return Ok((out_x, out_y));
    }

    let mut r0x = [0u32; ECC_MAX_WORDS];
    let mut r0y = [0u32; ECC_MAX_WORDS];
    let mut r1x = [0u32; ECC_MAX_WORDS];
    let mut r1y = [0u32; ECC_MAX_WORDS];
    let mut z = [0u32; ECC_MAX_WORDS];

    if bn::compare(px, curve.gx) == Ordering::Equal && bn::compare(py, curve.gy) == Ordering::Equal
    {
        // Base point: seed from the precomputed double, both affine, Z = 1.
        r0x[..nw].copy_from_slice(curve.gx);
        r0y[..nw].copy_from_slice(curve.gy);
        r1x[..nw].copy_from_slice(curve.g2x);
        r1y[..nw].copy_from_slice(curve.g2y);
        z[0] = 1;
    } else {
        coz_idbl(
            &m,
            curve,
            px,
            py,
            &mut r0x[..nw],
            &mut r0y[..nw],
            &mut r1x[..nw],
            &mut r1y[..nw],
            &mut z[..nw],
        )?;
    }

    for i in (0..msb).rev() {
        if bn::get_bit(k, i) {
            zaddc(
                &m,
                &mut r1x[..nw],
                &mut r1y[..nw],
                &mut r0x[..nw],
                &mut r0y[..nw],
                &mut z[..nw],
            )?;
            zaddu(
                &m,
                &mut r0x[..nw],
                &mut r0y[..nw],
                &mut r1x[..nw],
                &mut r1y[..nw],
                &mut z[..nw],
            )?;
        } else {
            zaddc(
                &m,
                &mut r0x[..nw],
                &mut r0y[..nw],
                &mut r1x[..nw],
                &mut r1y[..nw],
                &mut z[..nw],
            )?;
            zaddu(
                &m,
                &mut r1x[..nw],
                &mut r1y[..nw],
                &mut r0x[..nw],
                &mut r0y[..nw],
                &mut z[..nw],
            )?;
        }
    }

    let mut result = JacobianPoint::infinity();
    result.x[..nw].copy_from_slice(&r0x[..nw]);
    result.y[..nw].copy_from_slice(&r0y[..nw]);
    result.z[..nw].copy_from_slice(&z[..nw]);

    point::to_affine_words(curve, &result)
}

/// Scalar multiplication at the octet-string boundary: k·P.
///
/// The scalar is a big-endian octet string of at most `curve.byte_size`
/// bytes; coordinates are written as `curve.byte_size`-byte big-endian
/// strings.
pub fn scalar_mult(
    curve: &Curve,
    point: &AffinePoint<'_>,
    scalar: &[u8],
    x_out: &mut [u8],
    y_out: &mut [u8],
) -> Result<(), CryptoError> {
    let nw = curve.word_size;
    let nb = curve.byte_size;

    if scalar.is_empty() || scalar.len() > nb {
        return Err(CryptoError::InvalidLength);
    }
    if x_out.len() < nb || y_out.len() < nb {
        return Err(CryptoError::InvalidOutput);
    }

    let px = point::decode_coord(curve, point.x)?;
    let py = point::decode_coord(curve, point.y)?;

    let mut k = [0u32; ECC_MAX_WORDS];
    utils::be_bytes_to_words(&mut k[..nw], scalar)?;

    let (x, y) = mult_coz_words(curve, &px[..nw], &py[..nw], &k[..nw])?;

    utils::words_to_be_bytes(&mut x_out[..nb], &x[..nw])?;
    utils::words_to_be_bytes(&mut y_out[..nb], &y[..nw])?;

    Ok(())
}
