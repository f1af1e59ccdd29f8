//! Elliptic-curve cryptography over short-Weierstrass prime curves.
//!
//! This module implements the asymmetric half of the crate: curve domain
//! parameters, point arithmetic, scalar multiplication, and the ECDSA,
//! ECDH, and key-generation protocols built on top of them.
//!
//! ## Layout
//!
//! - [`curves`]
//!   Compile-time domain-parameter tables for the eight supported curves
//!   and the [`curves::CurveKind`] registry tag.
//!
//! - [`point`]
//!   Affine and Jacobian point representations, explicit conversions
//!   between them, the on-curve predicate, and the textbook Jacobian
//!   double and add used by signature verification.
//!
//! - [`mult`]
//!   The scalar-multiplication primitive: a co-Z Montgomery ladder with
//!   a fixed two-operation schedule per scalar bit.
//!
//! - [`ecdsa`], [`ecdh`], [`keygen`]
//!   The protocol layer. All key, coordinate, and signature material at
//!   this level is big-endian octet strings of the curve byte size.
//!
//! ## Representations
//!
//! Internally every coordinate is a little-endian word array of
//! `curve.word_size` words, carried in fixed buffers sized for the
//! largest supported curve. The point at infinity exists only in
//! Jacobian form, as Z = 0; it is never expressible at the affine
//! octet-string boundary.

pub mod curves;
pub mod ecdh;
pub mod ecdsa;
pub mod keygen;
pub mod mult;
pub mod point;

/// Coordinate words of the widest supported curve (SECP521R1).
pub const ECC_MAX_WORDS: usize = 17;

/// Coordinate bytes of the widest supported curve (SECP521R1).
pub const ECC_MAX_BYTES: usize = 66;

/// An affine point in external form: borrowed big-endian coordinate
/// octet strings, each exactly `curve.byte_size` bytes.
pub struct AffinePoint<'a> {
    /// x-coordinate, big-endian.
    pub x: &'a [u8],
    /// y-coordinate, big-endian.
    pub y: &'a [u8],
}
