//! ECDSA signature generation and verification.
//!
//! Signatures are pairs (r, s) of big-endian octet strings of the curve
//! byte size, with 1 ≤ r, s ≤ n−1 for any accepted signature. The nonce
//! is drawn uniformly from [1, n−1] by strict rejection sampling; a zero
//! r or s restarts the signature with a fresh nonce. Those two retry
//! loops are the only failures recovered internally.
//!
//! ## Hash-length policy
//!
//! The message hash must be a SHA-2 digest (28, 32, 48, or 64 bytes).
//! A digest shorter than the curve byte size would cap the signature
//! strength at the digest, so it is rejected with `WeakHash` — except on
//! SECP521R1, where SHA-512 is the strongest digest available and is
//! accepted despite 64 < 66. A digest longer than the curve byte size
//! keeps its leftmost (most significant) bytes.

use core::cmp::Ordering;

use crate::bignum::core as bn;
use crate::bignum::modular::Modulus;
use crate::ecc::curves::{Curve, CurveKind};
use crate::ecc::mult::mult_coz_words;
use crate::ecc::point;
use crate::ecc::{AffinePoint, ECC_MAX_WORDS};
use crate::error::CryptoError;
use crate::rng::{self, TrngSource};
use crate::utils;

/// A signature in external form: borrowed big-endian r and s octets.
pub struct EcdsaSignature<'a> {
    /// Signature element r, big-endian, `curve.byte_size` bytes.
    pub r: &'a [u8],
    /// Signature element s, big-endian, `curve.byte_size` bytes.
    pub s: &'a [u8],
}

/// Digest lengths accepted for signing and verification.
const HASH_SIZES: [usize; 4] = [28, 32, 48, 64];

fn check_hash_policy(curve: &Curve, hash_len: usize) -> Result<(), CryptoError> {
    if !HASH_SIZES.contains(&hash_len) {
        return Err(CryptoError::InvalidLength);
    }
    if curve.byte_size > hash_len && curve.kind != CurveKind::Secp521r1 {
        return Err(CryptoError::WeakHash);
    }

    Ok(())
}

/// Builds the message representative e: the hash truncated to the
/// leftmost `curve.byte_size` bytes or zero-extended on the left, then
/// reduced modulo n.
fn message_scalar(
    curve: &Curve,
    order: &Modulus,
    hash: &[u8],
) -> Result<[u32; ECC_MAX_WORDS], CryptoError> {
    let nw = curve.word_size;
    let src = if hash.len() > curve.byte_size {
        &hash[..curve.byte_size]
    } else {
        hash
    };

    let mut raw = [0u32; ECC_MAX_WORDS];
    utils::be_bytes_to_words(&mut raw[..nw], src)?;

    let mut e = [0u32; ECC_MAX_WORDS];
    order.reduce(&raw[..nw], &mut e[..nw])?;

    Ok(e)
}

/// Signs a message hash, writing r and s as `curve.byte_size`-byte
/// big-endian octet strings.
///
/// The private key is a big-endian octet string of the curve byte size
/// in [1, n−1]. Nonce draws that exhaust the TRNG fail with `RngError`.
pub fn sign(
    curve: &Curve,
    trng: &mut dyn TrngSource,
    priv_key: &[u8],
    hash: &[u8],
    r_out: &mut [u8],
    s_out: &mut [u8],
) -> Result<(), CryptoError> {
    let nb = curve.byte_size;
    let nw = curve.word_size;

    if priv_key.len() != nb {
        return Err(CryptoError::InvalidLength);
    }
    check_hash_policy(curve, hash.len())?;
    if r_out.len() < nb || s_out.len() < nb {
        return Err(CryptoError::InvalidOutput);
    }

    let order = Modulus::new(curve.n)?;

    let mut d = [0u32; ECC_MAX_WORDS];
    utils::be_bytes_to_words(&mut d[..nw], priv_key)?;
    if bn::is_zero(&d[..nw]) || bn::compare(&d[..nw], curve.n) != Ordering::Less {
        return Err(CryptoError::InvalidInput);
    }

    let e = message_scalar(curve, &order, hash)?;

    // Nonce interval [1, n−1].
    let mut upper = [0u32; ECC_MAX_WORDS];
    upper[..nw].copy_from_slice(curve.n);
    let mut one = [0u32; ECC_MAX_WORDS];
    one[0] = 1;
    bn::sub(&mut upper[..nw], &one[..nw]);

    let mut k = [0u32; ECC_MAX_WORDS];
    let mut r = [0u32; ECC_MAX_WORDS];
    let mut s = [0u32; ECC_MAX_WORDS];
    let mut t1 = [0u32; ECC_MAX_WORDS];
    let mut t2 = [0u32; ECC_MAX_WORDS];

    loop {
        rng::random_rejection(trng, &one[..nw], &upper[..nw], &mut k[..nw])?;

        // r = x-coordinate of k·G, mod n
        let (x1, _y1) = mult_coz_words(curve, curve.gx, curve.gy, &k[..nw])?;
        order.reduce(&x1[..nw], &mut r[..nw])?;
        if bn::is_zero(&r[..nw]) {
            continue;
        }

        // s = k⁻¹·(e + r·d) mod n
        order.mult(&r[..nw], &d[..nw], &mut t1[..nw])?;
        order.add(&e[..nw], &t1[..nw], &mut t2[..nw]);
        order.inv(&k[..nw], &mut t1[..nw])?;
        order.mult(&t1[..nw], &t2[..nw], &mut s[..nw])?;
        if bn::is_zero(&s[..nw]) {
            continue;
        }

        utils::words_to_be_bytes(&mut r_out[..nb], &r[..nw])?;
        utils::words_to_be_bytes(&mut s_out[..nb], &s[..nw])?;
        return Ok(());
    }
}

/// Verifies a signature against a public key and message hash.
///
/// Returns `Ok(())` only for a valid signature; range failures and
/// mismatches fail with `InvalidSignature`, a bad public key with
/// `InvalidKey`.
pub fn verify(
    curve: &Curve,
    pub_key: &AffinePoint<'_>,
    signature: &EcdsaSignature<'_>,
    hash: &[u8],
) -> Result<(), CryptoError> {
    let nb = curve.byte_size;
    let nw = curve.word_size;

    check_hash_policy(curve, hash.len())?;
    if signature.r.len() != nb || signature.s.len() != nb {
        return Err(CryptoError::InvalidLength);
    }

    let mut r = [0u32; ECC_MAX_WORDS];
    let mut s = [0u32; ECC_MAX_WORDS];
    utils::be_bytes_to_words(&mut r[..nw], signature.r)?;
    utils::be_bytes_to_words(&mut s[..nw], signature.s)?;

    // 1 ≤ r, s ≤ n−1, both sides strict.
    if bn::is_zero(&r[..nw])
        || bn::is_zero(&s[..nw])
        || bn::compare(&r[..nw], curve.n) != Ordering::Less
        || bn::compare(&s[..nw], curve.n) != Ordering::Less
    {
        return Err(CryptoError::InvalidSignature);
    }

    // The public key must be a finite on-curve point.
    point::point_on_curve(curve, pub_key).map_err(|_| CryptoError::InvalidKey)?;
    let qx = point::decode_coord(curve, pub_key.x)?;
    let qy = point::decode_coord(curve, pub_key.y)?;

    let order = Modulus::new(curve.n)?;
    let e = message_scalar(curve, &order, hash)?;

    // w = s⁻¹, u1 = e·w, u2 = r·w, all mod n
    let mut w = [0u32; ECC_MAX_WORDS];
    let mut u1 = [0u32; ECC_MAX_WORDS];
    let mut u2 = [0u32; ECC_MAX_WORDS];
    order.inv(&s[..nw], &mut w[..nw])?;
    order.mult(&e[..nw], &w[..nw], &mut u1[..nw])?;
    order.mult(&r[..nw], &w[..nw], &mut u2[..nw])?;

    // R = u1·G + u2·Q; u2 is a unit, u1 may be zero.
    let (bx, by) = mult_coz_words(curve, &qx[..nw], &qy[..nw], &u2[..nw])?;

    let (x1, _) = if bn::is_zero(&u1[..nw]) {
        (bx, by)
    } else {
        let (ax, ay) = mult_coz_words(curve, curve.gx, curve.gy, &u1[..nw])?;

        let pa = point::from_affine_words(curve, &ax[..nw], &ay[..nw]);
        let pb = point::from_affine_words(curve, &bx[..nw], &by[..nw]);
        let sum = point::add_jacobian(curve, &pa, &pb)?;
        if sum.is_infinity(nw) {
            return Err(CryptoError::InvalidSignature);
        }

        point::to_affine_words(curve, &sum)?
    };

    // Accept iff x1 mod n == r.
    let mut v = [0u32; ECC_MAX_WORDS];
    order.reduce(&x1[..nw], &mut v[..nw])?;
    if bn::compare(&v[..nw], &r[..nw]) != Ordering::Equal {
        return Err(CryptoError::InvalidSignature);
    }

    Ok(())
}
