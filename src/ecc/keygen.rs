//! ECC key-pair generation.

use crate::bignum::core as bn;
use crate::ecc::curves::Curve;
use crate::ecc::mult::mult_coz_words;
use crate::ecc::ECC_MAX_WORDS;
use crate::error::CryptoError;
use crate::rng::{self, TrngSource};
use crate::utils;

/// Generates a key pair: a private scalar d uniform in [1, n−1] and the
/// public point Q = d·G.
///
/// All three outputs are big-endian octet strings of `curve.byte_size`
/// bytes. A TRNG that cannot produce an in-range sample within the
/// rejection ceiling fails with `RngError`, leaving the outputs
/// untouched.
pub fn generate_keypair(
    curve: &Curve,
    trng: &mut dyn TrngSource,
    priv_out: &mut [u8],
    pub_x_out: &mut [u8],
    pub_y_out: &mut [u8],
) -> Result<(), CryptoError> {
    let nb = curve.byte_size;
    let nw = curve.word_size;

    if priv_out.len() < nb || pub_x_out.len() < nb || pub_y_out.len() < nb {
        return Err(CryptoError::InvalidOutput);
    }

    // d in [1, n−1]
    let mut upper = [0u32; ECC_MAX_WORDS];
    upper[..nw].copy_from_slice(curve.n);
    let mut one = [0u32; ECC_MAX_WORDS];
    one[0] = 1;
    bn::sub(&mut upper[..nw], &one[..nw]);

    let mut d = [0u32; ECC_MAX_WORDS];
    rng::random_rejection(trng, &one[..nw], &upper[..nw], &mut d[..nw])?;

    let (x, y) = mult_coz_words(curve, curve.gx, curve.gy, &d[..nw])?;

    utils::words_to_be_bytes(&mut priv_out[..nb], &d[..nw])?;
    utils::words_to_be_bytes(&mut pub_x_out[..nb], &x[..nw])?;
    utils::words_to_be_bytes(&mut pub_y_out[..nb], &y[..nw])?;

    Ok(())
}
