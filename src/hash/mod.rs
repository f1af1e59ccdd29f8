//! Streaming SHA-2 engine with software and hardware backends.
//!
//! The engine exposes one three-call streaming contract — init, update,
//! finish — over four digest modes (SHA-224/256/384/512) and two
//! interchangeable backends:
//!
//! - [`soft::SoftSha`]
//!   The portable software backend: FIPS 180-4 compression in pure Rust.
//!
//! - [`hca::HcaSha`]
//!   The hardware backend: a driver pushing whole message blocks through
//!   a memory-mapped accelerator behind the [`hca::HcaRegisters`]
//!   collaborator trait.
//!
//! Both backends implement [`ShaEngine`] and must produce byte-identical
//! digests for identical input. HMAC and the X9.63 KDF are generic over
//! the trait, so either backend can carry them.
//!
//! ## Streaming semantics
//!
//! `update` may be called any number of times with arbitrary chunk
//! boundaries; the digest depends only on the concatenated message.
//! `finish` appends the canonical padding, writes the digest, and
//! invalidates the context — further calls fail until `reinit`. Only
//! big-endian data is supported; requesting little-endian at
//! construction fails with `InvalidMode`.

pub mod hca;
pub mod sha256;
pub mod sha512;
pub mod soft;

use crate::error::CryptoError;

/// Digest mode tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMode {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashMode {
    /// Digest size in bytes (28, 32, 48, or 64).
    pub const fn digest_size(self) -> usize {
        match self {
            HashMode::Sha224 => 28,
            HashMode::Sha256 => 32,
            HashMode::Sha384 => 48,
            HashMode::Sha512 => 64,
        }
    }

    /// Message block size in bytes (64 for the 32-bit family, 128 for
    /// the 64-bit family).
    pub const fn block_size(self) -> usize {
        match self {
            HashMode::Sha224 | HashMode::Sha256 => 64,
            HashMode::Sha384 | HashMode::Sha512 => 128,
        }
    }
}

/// Declared byte order of the input data.
///
/// Only big-endian input is supported; the flag exists so callers state
/// their intent explicitly at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

/// The three-call streaming contract shared by both backends.
pub trait ShaEngine {
    /// The digest mode this context was initialised with.
    fn mode(&self) -> HashMode;

    /// Restores a finished (or in-progress) context to its freshly
    /// initialised state for reuse.
    fn reinit(&mut self) -> Result<(), CryptoError>;

    /// Appends bytes to the logical message.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Appends the canonical padding, writes the digest, and invalidates
    /// the context. Returns the digest length in bytes.
    fn finish(&mut self, digest: &mut [u8]) -> Result<usize, CryptoError>;
}

/// One-shot SHA-224 of a complete message.
pub fn sha224(input: &[u8]) -> [u8; 28] {
    let mut out = [0u8; 28];
    soft::SoftSha::digest(HashMode::Sha224, input, &mut out);
    out
}

/// One-shot SHA-256 of a complete message.
pub fn sha256(input: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    soft::SoftSha::digest(HashMode::Sha256, input, &mut out);
    out
}

/// One-shot SHA-384 of a complete message.
pub fn sha384(input: &[u8]) -> [u8; 48] {
    let mut out = [0u8; 48];
    soft::SoftSha::digest(HashMode::Sha384, input, &mut out);
    out
}

/// One-shot SHA-512 of a complete message.
pub fn sha512(input: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    soft::SoftSha::digest(HashMode::Sha512, input, &mut out);
    out
}
