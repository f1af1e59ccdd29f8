//! AES-GCM authenticated encryption per SP 800-38D.
//!
//! GHASH is computed over GF(2¹²⁸) with the standard bit-reflected
//! reduction polynomial, one conditional xor and shift per bit; the
//! hash subkey H is the encryption of the zero block. A 96-bit IV forms
//! the pre-counter block directly; any other IV length is itself
//! GHASH-compressed.

use crate::aes::block::AesKey;
use crate::aes::AES_BLOCK_SIZE;
use crate::error::CryptoError;
use crate::utils;

/// R: the reduction constant, bit-reflected.
const R: u128 = 0xe1 << 120;

/// Multiplication in GF(2¹²⁸) per the SP 800-38D bit ordering.
fn gf_mult(x: u128, y: u128) -> u128 {
    let mut z: u128 = 0;
    let mut v = y;

    for i in 0..128 {
        if (x >> (127 - i)) & 1 == 1 {
            z ^= v;
        }
        let lsb = v & 1;
        v >>= 1;
        if lsb == 1 {
            v ^= R;
        }
    }

    z
}

/// GHASH accumulator.
struct Ghash {
    h: u128,
    y: u128,
}

impl Ghash {
    fn new(h: &[u8; 16]) -> Self {
        Ghash {
            h: u128::from_be_bytes(*h),
            y: 0,
        }
    }

    /// Absorbs a byte string, zero-padding the final partial block.
    fn absorb(&mut self, data: &[u8]) {
        for chunk in data.chunks(AES_BLOCK_SIZE) {
            let mut block = [0u8; 16];
            block[..chunk.len()].copy_from_slice(chunk);
            self.y = gf_mult(self.y ^ u128::from_be_bytes(block), self.h);
        }
    }

    /// Absorbs the 64-bit bit lengths of the AAD and ciphertext.
    fn absorb_lengths(&mut self, aad_len: usize, ct_len: usize) {
        let mut block = [0u8; 16];
        block[..8].copy_from_slice(&((aad_len as u64) << 3).to_be_bytes());
        block[8..].copy_from_slice(&((ct_len as u64) << 3).to_be_bytes());
        self.y = gf_mult(self.y ^ u128::from_be_bytes(block), self.h);
    }

    fn output(&self) -> [u8; 16] {
        self.y.to_be_bytes()
    }
}

/// Derives the pre-counter block J0 from the IV.
fn derive_j0(iv: &[u8], h: &[u8; 16]) -> Result<[u8; 16], CryptoError> {
    if iv.is_empty() {
        return Err(CryptoError::InvalidInput);
    }

    if iv.len() == 12 {
        let mut j0 = [0u8; 16];
        j0[..12].copy_from_slice(iv);
        j0[15] = 1;
        return Ok(j0);
    }

    let mut g = Ghash::new(h);
    g.absorb(iv);
    let mut block = [0u8; 16];
    block[8..].copy_from_slice(&((iv.len() as u64) << 3).to_be_bytes());
    g.y = gf_mult(g.y ^ u128::from_be_bytes(block), g.h);

    Ok(g.output())
}

fn check_tag_len(tag_len: usize) -> Result<(), CryptoError> {
    // Full-width truncations plus the two short tags the standard allows.
    if (12..=16).contains(&tag_len) || tag_len == 8 || tag_len == 4 {
        return Ok(());
    }

    Err(CryptoError::InvalidLength)
}

/// GCTR keystream application starting at the given counter block.
fn gctr(key: &AesKey, icb: &[u8; 16], input: &[u8], output: &mut [u8]) {
    let mut ctr = *icb;
    for (src, dst) in input
        .chunks(AES_BLOCK_SIZE)
        .zip(output.chunks_mut(AES_BLOCK_SIZE))
    {
        let mut keystream = ctr;
        key.encrypt_block(&mut keystream);
        for (i, (d, s)) in dst.iter_mut().zip(src.iter()).enumerate() {
            *d = s ^ keystream[i];
        }
        inc32(&mut ctr);
    }
}

/// Increments the low 32 bits of the counter block, wrapping.
fn inc32(block: &mut [u8; 16]) {
    let mut ctr = u32::from_be_bytes(block[12..16].try_into().unwrap());
    ctr = ctr.wrapping_add(1);
    block[12..16].copy_from_slice(&ctr.to_be_bytes());
}

/// GCM encryption: writes the ciphertext and the authentication tag.
pub fn gcm_encrypt(
    key: &AesKey,
    iv: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    ciphertext: &mut [u8],
    tag: &mut [u8],
) -> Result<(), CryptoError> {
    check_tag_len(tag.len())?;
    if ciphertext.len() != plaintext.len() {
        return Err(CryptoError::InvalidLength);
    }

    let mut h = [0u8; 16];
    key.encrypt_block(&mut h);

    let j0 = derive_j0(iv, &h)?;

    let mut icb = j0;
    inc32(&mut icb);
    gctr(key, &icb, plaintext, ciphertext);

    let mut g = Ghash::new(&h);
    g.absorb(aad);
    g.absorb(ciphertext);
    g.absorb_lengths(aad.len(), ciphertext.len());

    let mut full_tag = [0u8; 16];
    gctr(key, &j0, &g.output(), &mut full_tag);
    tag.copy_from_slice(&full_tag[..tag.len()]);

    Ok(())
}

/// GCM decryption and verification.
///
/// On tag mismatch the plaintext buffer is zeroed and the call fails
/// with `InvalidTag`.
pub fn gcm_decrypt(
    key: &AesKey,
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    plaintext: &mut [u8],
    tag: &[u8],
) -> Result<(), CryptoError> {
    check_tag_len(tag.len())?;
    if plaintext.len() != ciphertext.len() {
        return Err(CryptoError::InvalidLength);
    }

    let mut h = [0u8; 16];
    key.encrypt_block(&mut h);

    let j0 = derive_j0(iv, &h)?;

    let mut g = Ghash::new(&h);
    g.absorb(aad);
    g.absorb(ciphertext);
    g.absorb_lengths(aad.len(), ciphertext.len());

    let mut full_tag = [0u8; 16];
    gctr(key, &j0, &g.output(), &mut full_tag);

    let mut icb = j0;
    inc32(&mut icb);
    gctr(key, &icb, ciphertext, plaintext);

    if !utils::ct_eq(&full_tag[..tag.len()], tag) {
        plaintext.fill(0);
        return Err(CryptoError::InvalidTag);
    }

    Ok(())
}
