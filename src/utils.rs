//! Low-level byte utilities shared by the rest of the crate.
//!
//! Big integers live internally as little-endian arrays of 32-bit words
//! while every external buffer is a big-endian octet string. The
//! conversions here are the only place where that boundary is crossed.

use crate::error::CryptoError;

/// Loads a big-endian octet string into a little-endian word array.
///
/// `src` may be any length up to `4 * dst.len()`; the destination is
/// zero-filled first so short inputs are zero-extended on the left.
pub(crate) fn be_bytes_to_words(dst: &mut [u32], src: &[u8]) -> Result<(), CryptoError> {
    // ceil(src.len() / 4)
    if ((src.len() + 3) >> 2) > dst.len() {
        return Err(CryptoError::InvalidLength);
    }

    dst.fill(0);

    for (i, &byte) in src.iter().rev().enumerate() {
        dst[i >> 2] |= (byte as u32) << ((i & 3) << 3);
    }

    Ok(())
}

/// Stores a little-endian word array as a big-endian octet string of
/// exactly `dst.len()` bytes.
///
/// Words beyond the requested byte length are ignored; callers guarantee
/// they are zero (values are reduced below the curve modulus).
pub(crate) fn words_to_be_bytes(dst: &mut [u8], src: &[u32]) -> Result<(), CryptoError> {
    if dst.len() > src.len() * 4 {
        return Err(CryptoError::InvalidLength);
    }

    for (i, byte) in dst.iter_mut().rev().enumerate() {
        *byte = (src[i >> 2] >> ((i & 3) << 3)) as u8;
    }

    Ok(())
}

/// Constant-time byte-slice equality.
///
/// Mismatched lengths return false immediately; the byte comparison
/// itself does not branch on the data.
#[inline(never)]
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut r: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        r |= x ^ y;
    }

    r == 0
}
