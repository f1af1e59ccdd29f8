//! Embedded cryptographic core for RISC-class microcontrollers
//!
//! This crate is the cryptographic core of an embedded crypto stack: a
//! unified API over a portable software backend and a memory-mapped
//! hardware-accelerator backend, providing SHA-2 hashing, HMAC, X9.63
//! key derivation, the AES block cipher with its standard modes, and
//! ECDSA/ECDH/key generation over eight named prime curves.
//!
//! The focus is on **clarity, predictability, and auditability**. All
//! components are dependency-free, explicit in their semantics, and
//! sized for bare-metal targets: no heap allocations, fixed stack
//! buffers bounded by the largest supported curve, and synchronous
//! blocking calls throughout.
//!
//! # Module overview
//!
//! - `bignum`
//!   Multi-precision arithmetic over little-endian 32-bit word arrays:
//!   the comparison/add/sub/mul/div layer and modular arithmetic against
//!   an explicit modulus. This engine underlies every asymmetric
//!   operation.
//!
//! - `ecc`
//!   Short-Weierstrass elliptic-curve cryptography: compile-time domain
//!   parameters for the NIST, Koblitz, and Brainpool curves, Jacobian
//!   point arithmetic, a co-Z Montgomery ladder, and the ECDSA, ECDH,
//!   and key-generation protocols.
//!
//! - `hash`
//!   Streaming SHA-224/256/384/512 behind one three-call contract with
//!   two interchangeable backends: pure-software compression and a
//!   driver for a memory-mapped hash accelerator. Both backends produce
//!   byte-identical digests.
//!
//! - `mac`, `kdf`
//!   HMAC and the ANSI X9.63 key derivation function, generic over the
//!   streaming hash contract so they run on either backend.
//!
//! - `aes`
//!   FIPS 197 block cipher with ECB/CBC/CFB/OFB/CTR mode wrappers and
//!   the CCM and GCM authenticated modes.
//!
//! - `rng`
//!   The true-random gate: rejection- and reduction-based sampling of
//!   bounded big integers from an external word oracle.
//!
//! - `error`
//!   The crate-wide error enumeration with its stable integer codes.
//!
//! # Collaborators
//!
//! The hardware accelerator register file and the TRNG entropy source
//! are external collaborators, reached through the
//! [`hash::hca::HcaRegisters`] and [`rng::TrngSource`] traits. Tests
//! inject deterministic implementations of both.
//!
//! # Concurrency model
//!
//! Single-threaded and cooperative. Every call is synchronous; the only
//! bounded blocking points are the accelerator's status poll (bounded by
//! a caller-set budget) and the TRNG rejection loop (bounded by a hard
//! retry ceiling). Contexts are caller-owned and must not be shared.
//!
//! # What this crate does not do
//!
//! No side-channel hardening beyond the ladder's regular schedule: the
//! software field arithmetic and the AES S-box lookups are not
//! constant-time. No key persistence or transport encodings — every key,
//! coordinate, and signature is a raw big-endian octet string.

mod utils;

pub mod aes;
pub mod bignum;
pub mod ecc;
pub mod error;
pub mod hash;
pub mod kdf;
pub mod mac;
pub mod rng;
