//! Confidentiality modes per SP 800-38A.
//!
//! ECB and CBC require whole-block inputs; CFB (128-bit feedback), OFB,
//! and CTR are stream-shaped and accept any length, keeping the final
//! partial keystream block. CTR increments the whole counter block as a
//! 128-bit big-endian integer.

use crate::aes::block::AesKey;
use crate::aes::AES_BLOCK_SIZE;
use crate::error::CryptoError;

fn check_io(input: &[u8], output: &[u8], whole_blocks: bool) -> Result<(), CryptoError> {
    if output.len() != input.len() {
        return Err(CryptoError::InvalidLength);
    }
    if whole_blocks && input.len() % AES_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidLength);
    }

    Ok(())
}

/// ECB encryption. Input must be a multiple of the block size.
pub fn ecb_encrypt(key: &AesKey, input: &[u8], output: &mut [u8]) -> Result<(), CryptoError> {
    check_io(input, output, true)?;

    for (src, dst) in input
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        let mut block: [u8; 16] = src.try_into().unwrap();
        key.encrypt_block(&mut block);
        dst.copy_from_slice(&block);
    }

    Ok(())
}

/// ECB decryption. Input must be a multiple of the block size.
pub fn ecb_decrypt(key: &AesKey, input: &[u8], output: &mut [u8]) -> Result<(), CryptoError> {
    check_io(input, output, true)?;

    for (src, dst) in input
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        let mut block: [u8; 16] = src.try_into().unwrap();
        key.decrypt_block(&mut block);
        dst.copy_from_slice(&block);
    }

    Ok(())
}

/// CBC encryption. Input must be a multiple of the block size.
pub fn cbc_encrypt(
    key: &AesKey,
    iv: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    check_io(input, output, true)?;

    let mut chain = *iv;
    for (src, dst) in input
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        for (c, s) in chain.iter_mut().zip(src.iter()) {
            *c ^= s;
        }
        key.encrypt_block(&mut chain);
        dst.copy_from_slice(&chain);
    }

    Ok(())
}

/// CBC decryption. Input must be a multiple of the block size.
pub fn cbc_decrypt(
    key: &AesKey,
    iv: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    check_io(input, output, true)?;

    let mut chain = *iv;
    for (src, dst) in input
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(output.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        let ct: [u8; 16] = src.try_into().unwrap();
        let mut block = ct;
        key.decrypt_block(&mut block);
        for (b, c) in block.iter_mut().zip(chain.iter()) {
            *b ^= c;
        }
        dst.copy_from_slice(&block);
        chain = ct;
    }

    Ok(())
}

/// CFB-128 encryption. Any input length.
pub fn cfb_encrypt(
    key: &AesKey,
    iv: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    check_io(input, output, false)?;

    let mut feedback = *iv;
    for (src, dst) in input
        .chunks(AES_BLOCK_SIZE)
        .zip(output.chunks_mut(AES_BLOCK_SIZE))
    {
        key.encrypt_block(&mut feedback);
        for (i, (d, s)) in dst.iter_mut().zip(src.iter()).enumerate() {
            *d = s ^ feedback[i];
        }
        feedback[..dst.len()].copy_from_slice(dst);
    }

    Ok(())
}

/// CFB-128 decryption. Any input length.
pub fn cfb_decrypt(
    key: &AesKey,
    iv: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    check_io(input, output, false)?;

    let mut feedback = *iv;
    for (src, dst) in input
        .chunks(AES_BLOCK_SIZE)
        .zip(output.chunks_mut(AES_BLOCK_SIZE))
    {
        key.encrypt_block(&mut feedback);
        for (i, (d, s)) in dst.iter_mut().zip(src.iter()).enumerate() {
            *d = s ^ feedback[i];
        }
        feedback[..src.len()].copy_from_slice(src);
    }

    Ok(())
}

fn ofb_xcrypt(
    key: &AesKey,
    iv: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    check_io(input, output, false)?;

    let mut keystream = *iv;
    for (src, dst) in input
        .chunks(AES_BLOCK_SIZE)
        .zip(output.chunks_mut(AES_BLOCK_SIZE))
    {
        key.encrypt_block(&mut keystream);
        for (i, (d, s)) in dst.iter_mut().zip(src.iter()).enumerate() {
            *d = s ^ keystream[i];
        }
    }

    Ok(())
}

/// OFB encryption. Any input length.
pub fn ofb_encrypt(
    key: &AesKey,
    iv: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    ofb_xcrypt(key, iv, input, output)
}

/// OFB decryption. Any input length.
pub fn ofb_decrypt(
    key: &AesKey,
    iv: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    ofb_xcrypt(key, iv, input, output)
}

/// Increments a counter block as a 128-bit big-endian integer.
pub(crate) fn increment_block(block: &mut [u8; 16]) {
    for b in block.iter_mut().rev() {
        let (v, overflow) = b.overflowing_add(1);
        *b = v;
        if !overflow {
            break;
        }
    }
}

fn ctr_xcrypt(
    key: &AesKey,
    counter: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    check_io(input, output, false)?;

    let mut ctr = *counter;
    for (src, dst) in input
        .chunks(AES_BLOCK_SIZE)
        .zip(output.chunks_mut(AES_BLOCK_SIZE))
    {
        let mut keystream = ctr;
        key.encrypt_block(&mut keystream);
        for (i, (d, s)) in dst.iter_mut().zip(src.iter()).enumerate() {
            *d = s ^ keystream[i];
        }
        increment_block(&mut ctr);
    }

    Ok(())
}

/// CTR encryption. Any input length.
pub fn ctr_encrypt(
    key: &AesKey,
    counter: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    ctr_xcrypt(key, counter, input, output)
}

/// CTR decryption. Any input length.
pub fn ctr_decrypt(
    key: &AesKey,
    counter: &[u8; 16],
    input: &[u8],
    output: &mut [u8],
) -> Result<(), CryptoError> {
    ctr_xcrypt(key, counter, input, output)
}
