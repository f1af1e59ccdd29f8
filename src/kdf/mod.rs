//! Key derivation functions.
//!
//! Currently the ANSI X9.63 counter-mode KDF over any
//! [`crate::hash::ShaEngine`] backend.

pub mod x963;

pub use x963::X963Kdf;
