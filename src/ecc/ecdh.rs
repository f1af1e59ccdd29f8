//! Elliptic-curve Diffie-Hellman key agreement.

use core::cmp::Ordering;

use crate::bignum::core as bn;
use crate::ecc::curves::Curve;
use crate::ecc::mult::mult_coz_words;
use crate::ecc::point;
use crate::ecc::{AffinePoint, ECC_MAX_WORDS};
use crate::error::CryptoError;
use crate::utils;

/// Computes the shared secret d·P and writes its x-coordinate as a
/// `curve.byte_size`-byte big-endian octet string, returning the number
/// of bytes written.
///
/// The peer's public point is validated against the curve equation
/// before the multiplication; an off-curve peer fails with `NotOnCurve`
/// and produces no output.
pub fn shared_secret(
    curve: &Curve,
    priv_key: &[u8],
    peer_pub_key: &AffinePoint<'_>,
    shared: &mut [u8],
) -> Result<usize, CryptoError> {
    let nb = curve.byte_size;
    let nw = curve.word_size;

    if priv_key.len() != nb {
        return Err(CryptoError::InvalidLength);
    }
    if shared.len() < nb {
        return Err(CryptoError::InvalidLength);
    }

    let px = point::decode_coord(curve, peer_pub_key.x)?;
    let py = point::decode_coord(curve, peer_pub_key.y)?;
    point::on_curve_words(curve, &px[..nw], &py[..nw])?;

    let mut d = [0u32; ECC_MAX_WORDS];
    utils::be_bytes_to_words(&mut d[..nw], priv_key)?;
    if bn::is_zero(&d[..nw]) || bn::compare(&d[..nw], curve.n) != Ordering::Less {
        return Err(CryptoError::InvalidInput);
    }

    let (x, _y) = mult_coz_words(curve, &px[..nw], &py[..nw], &d[..nw])?;

    utils::words_to_be_bytes(&mut shared[..nb], &x[..nw])?;

    Ok(nb)
}
