//! Multi-precision integer arithmetic over prime fields.
//!
//! This module is the arithmetic engine underneath all asymmetric
//! operations. Big integers are little-endian slices of 32-bit words
//! (least-significant word at index 0) with the length carried by the
//! slice itself; 64-bit accumulators are used for every intermediate
//! product so no partial result can overflow.
//!
//! The module is split into two layers:
//!
//! - [`core`]
//!   Plain word arithmetic: comparison, addition and subtraction with
//!   explicit carry/borrow results, schoolbook multiplication and
//!   squaring, bit shifts, bit probing, and Knuth Algorithm D division.
//!
//! - [`modular`]
//!   Arithmetic modulo an explicit [`modular::Modulus`]: reduction,
//!   add/sub with single conditional correction, multiply, square, and
//!   binary extended-GCD inversion.
//!
//! ## Conventions
//!
//! - Word order is always little-endian; octet strings at the public API
//!   are big-endian and converted at subsystem boundaries.
//! - Operand slices of the same logical width must have equal lengths;
//!   widths are never inferred.
//! - Modular operands must already be reduced below the modulus unless a
//!   function documents otherwise.
//!
//! No heap allocations are performed; scratch space is fixed-size and
//! bounded by the largest supported curve (17 words for SECP521R1).

pub mod core;
pub mod modular;
