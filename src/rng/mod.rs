//! True-random gate: bounded big integers from a word oracle.
//!
//! The physical entropy source is an external collaborator modelled by
//! the [`TrngSource`] trait — a blocking oracle handing out one 32-bit
//! word per call. This module turns that stream into big integers inside
//! a caller-chosen interval with one of two policies:
//!
//! - [`random_rejection`] — *strict*: draw exactly enough words for the
//!   upper bound, mask the excess bits of the top word, and accept only
//!   samples already inside the interval. The output distribution is
//!   exactly uniform; the cost is a retry loop, bounded by
//!   [`REJECTION_RETRY_LIMIT`] draws.
//!
//! - [`random_modular`] — *bounded bias*: draw a sample twice as wide as
//!   the interval and reduce modulo the interval size. A single draw
//!   always succeeds; the bias is negligible at twice the width.
//!
//! ECDSA nonce and key generation use the strict policy with the
//! interval [1, n−1].

use core::cmp::Ordering;

use crate::bignum::core as bn;
use crate::bignum::modular::{MAX_MOD_WORDS, Modulus};
use crate::error::CryptoError;

/// Word oracle over the physical TRNG.
///
/// Implementations may fail with `RngError` when entropy is exhausted or
/// `ReseedRequired` as a health hint; both are propagated unchanged.
pub trait TrngSource {
    /// Produces the next 32-bit word of entropy, blocking if necessary.
    fn next_word(&mut self) -> Result<u32, CryptoError>;
}

/// Hard ceiling on rejection-sampling redraws before giving up.
pub const REJECTION_RETRY_LIMIT: usize = 128;

/// Draws a uniform big integer in [lower, upper] by strict rejection.
///
/// `out` and `upper` must be the same width; `lower` may be narrower and
/// is zero-extended for the comparison. Fails with `RngError` after
/// [`REJECTION_RETRY_LIMIT`] rejected draws.
pub fn random_rejection(
    trng: &mut dyn TrngSource,
    lower: &[u32],
    upper: &[u32],
    out: &mut [u32],
) -> Result<(), CryptoError> {
    if out.len() != upper.len() {
        return Err(CryptoError::InvalidLength);
    }

    let msb = bn::get_msb_set(upper).ok_or(CryptoError::InvalidInput)?;
    let top_word = msb >> 5;
    let top_bits = (msb & 31) + 1;

    for _ in 0..REJECTION_RETRY_LIMIT {
        for w in out.iter_mut() {
            *w = trng.next_word()?;
        }

        // Mask the draw down to bitlen(upper) bits.
        if top_bits < 32 {
            out[top_word] &= (1u32 << top_bits) - 1;
        }
        for w in out[top_word + 1..].iter_mut() {
            *w = 0;
        }

        if bn::compare_len_diff(out, lower) != Ordering::Less
            && bn::compare(out, upper) != Ordering::Greater
        {
            return Ok(());
        }
    }

    Err(CryptoError::RngError)
}

/// Draws a big integer in [lower, upper] by wide draw and reduction.
///
/// The sample is drawn at twice the interval width and reduced modulo
/// `upper − lower + 1`, bounding the bias; the result is then offset by
/// `lower`. `out`, `lower`, and `upper` must share one width.
pub fn random_modular(
    trng: &mut dyn TrngSource,
    lower: &[u32],
    upper: &[u32],
    out: &mut [u32],
) -> Result<(), CryptoError> {
    let nw = upper.len();
    if out.len() != nw || lower.len() != nw || nw > MAX_MOD_WORDS {
        return Err(CryptoError::InvalidLength);
    }
    if bn::compare(lower, upper) == Ordering::Greater {
        return Err(CryptoError::InvalidInput);
    }

    // range = upper − lower + 1
    let mut range = [0u32; MAX_MOD_WORDS];
    range[..nw].copy_from_slice(upper);
    bn::sub(&mut range[..nw], lower);
    if bn::inc(&mut range[..nw]) != 0 {
        // Interval covers the full word width: a raw draw is exact.
        for w in out.iter_mut() {
            *w = trng.next_word()?;
        }
        return Ok(());
    }

    let mut wide = [0u32; 2 * MAX_MOD_WORDS];
    for w in wide[..2 * nw].iter_mut() {
        *w = trng.next_word()?;
    }

    let m = Modulus::new(&range[..nw])?;
    m.reduce(&wide[..2 * nw], out)?;

    let carry = bn::add(out, lower);
    debug_assert_eq!(carry, 0);

    Ok(())
}
