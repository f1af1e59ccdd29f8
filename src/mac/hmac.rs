//! Streaming HMAC over an enclosed hash context.
//!
//! The HMAC context borrows its hash context rather than owning one:
//! the enclosed context must outlive the HMAC computation, and it is
//! driven through init/update/finish cycles for the inner and outer
//! passes. Because the borrow is generic over [`ShaEngine`], HMAC runs
//! identically over the software and hardware backends.
//!
//! Keys longer than the block size are replaced by their digest; all
//! keys are then zero-padded to the block size and split into the
//! 0x36-xor and 0x5C-xor pads.

use crate::error::CryptoError;
use crate::hash::ShaEngine;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Widest supported block (SHA-384/512).
const MAX_BLOCK: usize = 128;

/// Streaming HMAC computation.
pub struct HmacContext<'a, H: ShaEngine> {
    sha: &'a mut H,
    opad_key: [u8; MAX_BLOCK],
    done: bool,
}

impl<'a, H: ShaEngine> HmacContext<'a, H> {
    /// Starts an HMAC computation with the given key.
    ///
    /// The hash context is re-initialised and fed the inner pad; any
    /// state it held is discarded.
    pub fn init(sha: &'a mut H, key: &[u8]) -> Result<Self, CryptoError> {
        let bs = sha.mode().block_size();
        let ds = sha.mode().digest_size();

        let mut key_block = [0u8; MAX_BLOCK];
        if key.len() > bs {
            sha.reinit()?;
            sha.update(key)?;
            sha.finish(&mut key_block[..ds])?;
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        let mut ipad_key = [0u8; MAX_BLOCK];
        let mut opad_key = [0u8; MAX_BLOCK];
        for i in 0..bs {
            ipad_key[i] = key_block[i] ^ IPAD;
            opad_key[i] = key_block[i] ^ OPAD;
        }

        sha.reinit()?;
        sha.update(&ipad_key[..bs])?;

        Ok(HmacContext {
            sha,
            opad_key,
            done: false,
        })
    }

    /// Feeds message bytes into the computation.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.done {
            return Err(CryptoError::InvalidInput);
        }

        self.sha.update(data)
    }

    /// Completes the computation, writing `mac.len()` bytes of the tag.
    ///
    /// A tag shorter than the hash size is a truncation; one longer is
    /// rejected with `InvalidLength`. Returns the number of bytes
    /// written.
    pub fn finish(&mut self, mac: &mut [u8]) -> Result<usize, CryptoError> {
        if self.done {
            return Err(CryptoError::InvalidInput);
        }

        let bs = self.sha.mode().block_size();
        let ds = self.sha.mode().digest_size();
        if mac.len() > ds {
            return Err(CryptoError::InvalidLength);
        }

        let mut inner = [0u8; 64];
        self.sha.finish(&mut inner[..ds])?;

        let mut outer = [0u8; 64];
        self.sha.reinit()?;
        self.sha.update(&self.opad_key[..bs])?;
        self.sha.update(&inner[..ds])?;
        self.sha.finish(&mut outer[..ds])?;

        mac.copy_from_slice(&outer[..mac.len()]);
        self.done = true;

        Ok(mac.len())
    }
}
