//! ANSI X9.63 key derivation (X9.63 §5.6.3 / SEC 1 §3.6.1).
//!
//! Derived keys are the concatenation of successive digests
//! `Hash(Z ∥ counter ∥ SharedInfo)` for counter = 1, 2, …, with the
//! counter encoded as a 32-bit big-endian integer. The context borrows
//! its hash context — the enclosed context must stay alive until
//! [`X963Kdf::derive`] has run — and the shared-info octets by
//! reference.

use crate::error::CryptoError;
use crate::hash::ShaEngine;

/// X9.63 KDF context.
pub struct X963Kdf<'a, H: ShaEngine> {
    sha: &'a mut H,
    shared_info: &'a [u8],
}

impl<'a, H: ShaEngine> X963Kdf<'a, H> {
    /// Binds a hash context and the optional shared info.
    pub fn init(sha: &'a mut H, shared_info: &'a [u8]) -> Self {
        X963Kdf { sha, shared_info }
    }

    /// Derives `derived_key.len()` bytes from the input key material.
    ///
    /// The derivation-counter loop is internal; requesting more than
    /// (2³² − 1) · hash_size bytes fails with `InvalidLength`.
    pub fn derive(
        &mut self,
        input_key: &[u8],
        derived_key: &mut [u8],
    ) -> Result<(), CryptoError> {
        let ds = self.sha.mode().digest_size();

        // ceil(len / ds) must fit the 32-bit counter
        let blocks = derived_key.len().div_ceil(ds);
        if blocks as u64 > u32::MAX as u64 {
            return Err(CryptoError::InvalidLength);
        }

        let mut block = [0u8; 64];
        let mut counter: u32 = 1;

        for out in derived_key.chunks_mut(ds) {
            self.sha.reinit()?;
            self.sha.update(input_key)?;
            self.sha.update(&counter.to_be_bytes())?;
            self.sha.update(self.shared_info)?;
            self.sha.finish(&mut block[..ds])?;

            out.copy_from_slice(&block[..out.len()]);
            counter = counter.wrapping_add(1);
        }

        Ok(())
    }
}
