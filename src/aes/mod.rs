//! AES block cipher and mode wrappers.
//!
//! The block primitive and key schedule follow FIPS 197; the
//! confidentiality modes ECB/CBC/CFB/OFB/CTR follow SP 800-38A, and the
//! authenticated modes CCM and GCM follow SP 800-38C and SP 800-38D.
//!
//! Every mode streams a caller-provided input to an equal-length output
//! buffer; the authenticated modes additionally consume associated data
//! and produce or verify a tag. Authenticated decryption zeroes the
//! plaintext buffer and fails with `InvalidTag` on a tag mismatch, so a
//! partial result can never be mistaken for success.

pub mod block;
pub mod ccm;
pub mod gcm;
pub mod modes;

pub use block::{AesKey, AesKeySize};

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;
