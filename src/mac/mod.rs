//! Message authentication codes.
//!
//! Currently HMAC (FIPS 198-1) over any [`crate::hash::ShaEngine`]
//! backend, software or hardware.

pub mod hmac;

pub use hmac::HmacContext;
