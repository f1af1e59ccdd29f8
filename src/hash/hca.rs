//! Hardware-accelerated streaming context.
//!
//! The accelerator itself is an external collaborator reached through
//! the [`HcaRegisters`] trait — the minimal register-file surface the
//! driver needs: mode setup, a block FIFO, a ready bit, a last-block
//! (finalize) trigger, and word-indexed digest readout. Production code
//! implements the trait over volatile MMIO; tests implement it with an
//! in-memory model.
//!
//! The driver owns everything message-shaped: it tracks the bit counter
//! and block buffer, cuts the stream into whole 512- or 1024-bit blocks,
//! and computes the canonical padding for the final block(s). The
//! accelerator keeps the intermediate hash state internally between
//! blocks; it is only read back once, after the finalize trigger.
//!
//! Every block write is followed by a busy-poll of the ready bit bounded
//! by the caller's poll budget; exhausting the budget fails with
//! `HwTimeout`.

use crate::error::CryptoError;
use crate::hash::{Endianness, HashMode, ShaEngine};

/// Register-file surface of the hash accelerator.
pub trait HcaRegisters {
    /// Selects the digest mode and resets the accelerator's state.
    fn init_hash(&mut self, mode: HashMode);

    /// Pushes one 32-bit word of the current message block into the
    /// input FIFO, most-significant block word first.
    fn write_fifo(&mut self, word: u32);

    /// True when the accelerator has consumed the FIFO and is ready for
    /// the next block.
    fn is_ready(&self) -> bool;

    /// Marks the next block as the last one of the message.
    fn set_last_block(&mut self);

    /// Reads 32-bit word `index` of the digest, most significant first.
    fn read_digest(&self, index: usize) -> u32;
}

/// Hardware-backed streaming hash context.
///
/// Borrows the register file exclusively for its whole lifetime; the
/// accelerator is a single shared resource and arbitration between
/// clients is the caller's responsibility.
pub struct HcaSha<'a, R: HcaRegisters> {
    regs: &'a mut R,
    mode: HashMode,
    bitlen: u128,
    buffer: [u8; 128],
    poll_budget: u32,
    done: bool,
}

impl<'a, R: HcaRegisters> HcaSha<'a, R> {
    /// Initialises the accelerator for the given mode.
    ///
    /// `poll_budget` bounds the ready-bit busy-poll after each block.
    /// Only big-endian input data is supported.
    pub fn new(
        regs: &'a mut R,
        mode: HashMode,
        data_endianness: Endianness,
        poll_budget: u32,
    ) -> Result<Self, CryptoError> {
        if data_endianness != Endianness::BigEndian {
            return Err(CryptoError::InvalidMode);
        }

        regs.init_hash(mode);

        Ok(HcaSha {
            regs,
            mode,
            bitlen: 0,
            buffer: [0; 128],
            poll_budget,
            done: false,
        })
    }

    fn wait_ready(&self) -> Result<(), CryptoError> {
        for _ in 0..self.poll_budget {
            if self.regs.is_ready() {
                return Ok(());
            }
        }

        Err(CryptoError::HwTimeout)
    }

    /// Writes one complete block to the FIFO and waits for the engine.
    fn push_block(&mut self, block: &[u8]) -> Result<(), CryptoError> {
        for chunk in block.chunks_exact(4) {
            self.regs.write_fifo(u32::from_be_bytes(chunk.try_into().unwrap()));
        }

        self.wait_ready()
    }
}

impl<R: HcaRegisters> ShaEngine for HcaSha<'_, R> {
    fn mode(&self) -> HashMode {
        self.mode
    }

    fn reinit(&mut self) -> Result<(), CryptoError> {
        self.regs.init_hash(self.mode);
        self.bitlen = 0;
        self.buffer = [0; 128];
        self.done = false;
        Ok(())
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        if self.done {
            return Err(CryptoError::InvalidInput);
        }

        let bs = self.mode.block_size();
        let fill = ((self.bitlen >> 3) as usize) % bs;
        let mut off = 0;

        if fill != 0 {
            let take = (bs - fill).min(data.len());
            self.buffer[fill..fill + take].copy_from_slice(&data[..take]);
            off = take;
            if fill + take == bs {
                let block = self.buffer;
                self.push_block(&block[..bs])?;
            }
        }

        while data.len() - off >= bs {
            self.push_block(&data[off..off + bs])?;
            off += bs;
        }

        let rem = data.len() - off;
        if rem > 0 {
            self.buffer[..rem].copy_from_slice(&data[off..]);
        }

        self.bitlen = self.bitlen.wrapping_add((data.len() as u128) << 3);

        Ok(())
    }

    fn finish(&mut self, digest: &mut [u8]) -> Result<usize, CryptoError> {
        if self.done {
            return Err(CryptoError::InvalidInput);
        }

        let ds = self.mode.digest_size();
        if digest.len() < ds {
            return Err(CryptoError::InvalidOutput);
        }

        let bs = self.mode.block_size();
        // Offset of the big-endian bit-length field in the last block.
        let len_offset = if bs == 64 { 56 } else { 112 };
        let fill = ((self.bitlen >> 3) as usize) % bs;

        let mut block = [0u8; 128];
        block[..fill].copy_from_slice(&self.buffer[..fill]);
        block[fill] = 0x80;

        if fill >= len_offset {
            // The length field does not fit: flush this block first.
            self.push_block(&block[..bs])?;
            block = [0u8; 128];
        }

        if bs == 64 {
            block[56..64].copy_from_slice(&(self.bitlen as u64).to_be_bytes());
        } else {
            block[112..128].copy_from_slice(&self.bitlen.to_be_bytes());
        }

        self.regs.set_last_block();
        self.push_block(&block[..bs])?;

        for (i, chunk) in digest[..ds].chunks_mut(4).enumerate() {
            chunk.copy_from_slice(&self.regs.read_digest(i).to_be_bytes());
        }

        self.done = true;
        Ok(ds)
    }
}
