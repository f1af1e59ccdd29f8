//! Software streaming context for SHA-224/256/384/512.
//!
//! The context is a tagged union over the two FIPS 180-4 families: the
//! 32-bit family keeps an 8×u32 state, a 64-bit message-bit counter, and
//! a 64-byte block buffer; the 64-bit family an 8×u64 state, a 128-bit
//! counter, and a 128-byte buffer. The number of buffered tail bytes is
//! always `(bitlen / 8) mod block_size` — it is derived from the
//! counter, never stored separately.

use crate::error::CryptoError;
use crate::hash::{Endianness, HashMode, ShaEngine, sha256, sha512};

enum ShaState {
    W32 {
        h: [u32; 8],
        bitlen: u64,
        buffer: [u8; 64],
    },
    W64 {
        h: [u64; 8],
        bitlen: u128,
        buffer: [u8; 128],
    },
}

/// Software-backed streaming hash context.
pub struct SoftSha {
    mode: HashMode,
    state: ShaState,
    done: bool,
}

impl SoftSha {
    /// Initialises a context for the given mode.
    ///
    /// Only big-endian input data is supported; little-endian fails with
    /// `InvalidMode`.
    pub fn new(mode: HashMode, data_endianness: Endianness) -> Result<Self, CryptoError> {
        if data_endianness != Endianness::BigEndian {
            return Err(CryptoError::InvalidMode);
        }

        Ok(Self::new_big_endian(mode))
    }

    pub(crate) fn new_big_endian(mode: HashMode) -> Self {
        let state = match mode {
            HashMode::Sha224 => ShaState::W32 {
                h: sha256::SHA224_INIT,
                bitlen: 0,
                buffer: [0; 64],
            },
            HashMode::Sha256 => ShaState::W32 {
                h: sha256::SHA256_INIT,
                bitlen: 0,
                buffer: [0; 64],
            },
            HashMode::Sha384 => ShaState::W64 {
                h: sha512::SHA384_INIT,
                bitlen: 0,
                buffer: [0; 128],
            },
            HashMode::Sha512 => ShaState::W64 {
                h: sha512::SHA512_INIT,
                bitlen: 0,
                buffer: [0; 128],
            },
        };

        SoftSha {
            mode,
            state,
            done: false,
        }
    }

    /// One-shot convenience: hashes `input` into `digest`, which must be
    /// at least `mode.digest_size()` bytes.
    pub(crate) fn digest(mode: HashMode, input: &[u8], digest: &mut [u8]) {
        let mut ctx = Self::new_big_endian(mode);
        ctx.absorb(input);
        ctx.finalize(digest);
    }

    fn absorb(&mut self, data: &[u8]) {
        match &mut self.state {
            ShaState::W32 { h, bitlen, buffer } => {
                let fill = ((*bitlen >> 3) & 63) as usize;
                let mut off = 0;

                if fill != 0 {
                    let take = (64 - fill).min(data.len());
                    buffer[fill..fill + take].copy_from_slice(&data[..take]);
                    off = take;
                    if fill + take == 64 {
                        sha256::compress(h, buffer);
                    }
                }

                while data.len() - off >= 64 {
                    sha256::compress(h, data[off..off + 64].try_into().unwrap());
                    off += 64;
                }

                let rem = data.len() - off;
                if rem > 0 {
                    buffer[..rem].copy_from_slice(&data[off..]);
                }

                *bitlen = bitlen.wrapping_add((data.len() as u64) << 3);
            }
            ShaState::W64 { h, bitlen, buffer } => {
                let fill = ((*bitlen >> 3) & 127) as usize;
                let mut off = 0;

                if fill != 0 {
                    let take = (128 - fill).min(data.len());
                    buffer[fill..fill + take].copy_from_slice(&data[..take]);
                    off = take;
                    if fill + take == 128 {
                        sha512::compress(h, buffer);
                    }
                }

                while data.len() - off >= 128 {
                    sha512::compress(h, data[off..off + 128].try_into().unwrap());
                    off += 128;
                }

                let rem = data.len() - off;
                if rem > 0 {
                    buffer[..rem].copy_from_slice(&data[off..]);
                }

                *bitlen = bitlen.wrapping_add((data.len() as u128) << 3);
            }
        }
    }

    fn finalize(&mut self, digest: &mut [u8]) -> usize {
        let ds = self.mode.digest_size();

        match &mut self.state {
            ShaState::W32 { h, bitlen, buffer } => {
                let fill = ((*bitlen >> 3) & 63) as usize;

                buffer[fill] = 0x80;
                buffer[fill + 1..].fill(0);

                // No room left for the 64-bit length field.
                if fill >= 56 {
                    sha256::compress(h, buffer);
                    buffer.fill(0);
                }

                buffer[56..].copy_from_slice(&bitlen.to_be_bytes());
                sha256::compress(h, buffer);

                for (chunk, word) in digest[..ds].chunks_mut(4).zip(h.iter()) {
                    chunk.copy_from_slice(&word.to_be_bytes());
                }
            }
            ShaState::W64 { h, bitlen, buffer } => {
                let fill = ((*bitlen >> 3) & 127) as usize;

                buffer[fill] = 0x80;
                buffer[fill + 1..].fill(0);

                // No room left for the 128-bit length field.
                if fill >= 112 {
                    sha512::compress(h, buffer);
                    buffer.fill(0);
                }

                buffer[112..].copy_from_slice(&bitlen.to_be_bytes());
                sha512::compress(h, buffer);

                for (chunk, word) in digest[..ds].chunks_mut(8).zip(h.iter()) {
                    chunk.copy_from_slice(&word.to_be_bytes());
                }
            }
        }

        ds
    }
}

impl ShaEngine for SoftSha {
    fn mode(&self) -> HashMode {
        self.mode
    }

    fn reinit(&mut self) -> Result<(), CryptoError> {
        *self = Self::new_big_endian(self.mode);
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.done {
            return Err(CryptoError::InvalidInput);
        }

        self.absorb(data);
        Ok(())
    }

    fn finish(&mut self, digest: &mut [u8]) -> Result<usize, CryptoError> {
        if self.done {
            return Err(CryptoError::InvalidInput);
        }
        if digest.len() < self.mode.digest_size() {
            return Err(CryptoError::InvalidOutput);
        }

        self.done = true;
        Ok(self.finalize(digest))
    }
}
