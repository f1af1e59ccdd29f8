//! AES-CCM authenticated encryption per SP 800-38C.
//!
//! CCM is CBC-MAC over a formatted header followed by CTR encryption.
//! The nonce is 7–13 bytes (the 15 − q split between nonce and message
//! length field); tags are an even length between 4 and 16 bytes.
//! Decryption recomputes the MAC over the recovered plaintext and
//! compares tags in constant time, zeroing the plaintext on mismatch.

use crate::aes::block::AesKey;
use crate::aes::modes::increment_block;
use crate::aes::AES_BLOCK_SIZE;
use crate::error::CryptoError;
use crate::utils;

fn check_params(nonce: &[u8], tag_len: usize) -> Result<usize, CryptoError> {
    if !(7..=13).contains(&nonce.len()) {
        return Err(CryptoError::InvalidInput);
    }
    if tag_len < 4 || tag_len > 16 || tag_len % 2 != 0 {
        return Err(CryptoError::InvalidLength);
    }

    // q: octets of the message-length field
    Ok(15 - nonce.len())
}

/// CBC-MAC over B0, the encoded associated data, and the payload.
fn cbc_mac(
    key: &AesKey,
    nonce: &[u8],
    aad: &[u8],
    payload: &[u8],
    tag_len: usize,
) -> Result<[u8; 16], CryptoError> {
    let q = 15 - nonce.len();

    if q < core::mem::size_of::<usize>() && payload.len() >> (8 * q) != 0 {
        return Err(CryptoError::InvalidLength);
    }

    // B0: flags | nonce | message length
    let mut b0 = [0u8; 16];
    b0[0] = (((!aad.is_empty()) as u8) << 6) | ((((tag_len - 2) / 2) as u8) << 3) | (q as u8 - 1);
    b0[1..1 + nonce.len()].copy_from_slice(nonce);
    let len_bytes = (payload.len() as u64).to_be_bytes();
    b0[16 - q..].copy_from_slice(&len_bytes[8 - q..]);

    let mut x = b0;
    key.encrypt_block(&mut x);

    // Associated data with its length encoding, zero-padded to blocks.
    if !aad.is_empty() {
        let mut block = [0u8; 16];
        let mut fill;

        if aad.len() < 0xff00 {
            block[..2].copy_from_slice(&(aad.len() as u16).to_be_bytes());
            fill = 2;
        } else if aad.len() as u64 <= u32::MAX as u64 {
            block[0] = 0xff;
            block[1] = 0xfe;
            block[2..6].copy_from_slice(&(aad.len() as u32).to_be_bytes());
            fill = 6;
        } else {
            block[0] = 0xff;
            block[1] = 0xff;
            block[2..10].copy_from_slice(&(aad.len() as u64).to_be_bytes());
            fill = 10;
        }

        for &byte in aad.iter() {
            block[fill] = byte;
            fill += 1;
            if fill == AES_BLOCK_SIZE {
                for (xb, bb) in x.iter_mut().zip(block.iter()) {
                    *xb ^= bb;
                }
                key.encrypt_block(&mut x);
                block = [0u8; 16];
                fill = 0;
            }
        }
        if fill != 0 {
            for (xb, bb) in x.iter_mut().zip(block.iter()) {
                *xb ^= bb;
            }
            key.encrypt_block(&mut x);
        }
    }

    // Payload, zero-padded to blocks.
    for chunk in payload.chunks(AES_BLOCK_SIZE) {
        for (xb, bb) in x.iter_mut().zip(chunk.iter()) {
            *xb ^= bb;
        }
        key.encrypt_block(&mut x);
    }

    Ok(x)
}

/// Initial counter block A0: flags | nonce | zero counter.
fn counter_block(nonce: &[u8]) -> [u8; 16] {
    let q = 15 - nonce.len();
    let mut a = [0u8; 16];
    a[0] = q as u8 - 1;
    a[1..1 + nonce.len()].copy_from_slice(nonce);
    a
}

/// CCM encryption: writes the ciphertext and the authentication tag.
pub fn ccm_encrypt(
    key: &AesKey,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    ciphertext: &mut [u8],
    tag: &mut [u8],
) -> Result<(), CryptoError> {
    check_params(nonce, tag.len())?;
    if ciphertext.len() != plaintext.len() {
        return Err(CryptoError::InvalidLength);
    }

    let mac = cbc_mac(key, nonce, aad, plaintext, tag.len())?;

    // S0 masks the tag; the payload keystream starts at counter 1.
    let mut a = counter_block(nonce);
    let mut s0 = a;
    key.encrypt_block(&mut s0);

    increment_block(&mut a);
    ctr_stream(key, &mut a, plaintext, ciphertext);

    for (i, t) in tag.iter_mut().enumerate() {
        *t = mac[i] ^ s0[i];
    }

    Ok(())
}

/// CCM decryption and verification.
///
/// On tag mismatch the plaintext buffer is zeroed and the call fails
/// with `InvalidTag`.
pub fn ccm_decrypt(
    key: &AesKey,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    plaintext: &mut [u8],
    tag: &[u8],
) -> Result<(), CryptoError> {
    check_params(nonce, tag.len())?;
    if plaintext.len() != ciphertext.len() {
        return Err(CryptoError::InvalidLength);
    }

    let mut a = counter_block(nonce);
    let mut s0 = a;
    key.encrypt_block(&mut s0);

    increment_block(&mut a);
    ctr_stream(key, &mut a, ciphertext, plaintext);

    let mac = cbc_mac(key, nonce, aad, plaintext, tag.len())?;

    let mut expected = [0u8; 16];
    for i in 0..tag.len() {
        expected[i] = mac[i] ^ s0[i];
    }

    if !utils::ct_eq(&expected[..tag.len()], tag) {
        plaintext.fill(0);
        return Err(CryptoError::InvalidTag);
    }

    Ok(())
}

/// CTR keystream application starting at the given counter block.
fn ctr_stream(key: &AesKey, counter: &mut [u8; 16], input: &[u8], output: &mut [u8]) {
    for (src, dst) in input
        .chunks(AES_BLOCK_SIZE)
        .zip(output.chunks_mut(AES_BLOCK_SIZE))
    {
        let mut keystream = *counter;
        key.encrypt_block(&mut keystream);
        for (i, (d, s)) in dst.iter_mut().zip(src.iter()).enumerate() {
            *d = s ^ keystream[i];
        }
        increment_block(counter);
    }
}
