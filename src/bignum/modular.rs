//! Arithmetic modulo an explicit prime modulus.
//!
//! A [`Modulus`] wraps a borrowed little-endian word array and provides
//! the reduced arithmetic the curve layers build on. The modulus is an
//! explicit parameter of every computation; there is no ambient
//! module-level modulus, so independent computations can interleave
//! freely.
//!
//! All operands and results are `modulus.words()`-word arrays. Inputs to
//! [`Modulus::add`] and [`Modulus::sub`] must already be reduced;
//! [`Modulus::mult`] and [`Modulus::square`] accept anything their
//! double-width scratch can hold and reduce by division.

use ::core::cmp::Ordering;

use crate::bignum::core;
use crate::error::CryptoError;

/// Upper bound on modulus width: the largest supported curve field
/// (SECP521R1) spans 17 words.
pub const MAX_MOD_WORDS: usize = 17;

/// A borrowed modulus for reduced arithmetic.
pub struct Modulus<'a> {
    p: &'a [u32],
}

impl<'a> Modulus<'a> {
    /// Installs `p` as the modulus for subsequent operations.
    ///
    /// Fails with `InvalidInput` for a zero modulus and `InvalidLength`
    /// for one wider than the largest supported field.
    pub fn new(p: &'a [u32]) -> Result<Self, CryptoError> {
        if core::is_zero(p) {
            return Err(CryptoError::InvalidInput);
        }
        if p.len() > MAX_MOD_WORDS {
            return Err(CryptoError::InvalidLength);
        }

        Ok(Modulus { p })
    }

    /// Width of the modulus in words.
    pub fn words(&self) -> usize {
        self.p.len()
    }

    /// The raw modulus words.
    pub fn raw(&self) -> &[u32] {
        self.p
    }

    /// Reduces `a` (up to double width) into `r`.
    pub fn reduce(&self, a: &[u32], r: &mut [u32]) -> Result<(), CryptoError> {
        if r.len() != self.p.len() {
            return Err(CryptoError::InvalidOutput);
        }

        let mut quot = [0u32; 2 * MAX_MOD_WORDS];
        let mut rem = [0u32; MAX_MOD_WORDS];
        core::div(a, self.p, &mut quot[..a.len().max(self.p.len())], &mut rem[..self.p.len()])?;
        r.copy_from_slice(&rem[..self.p.len()]);

        Ok(())
    }

    /// `r = (a + b) mod p` for reduced inputs.
    ///
    /// A raw carry or a sum at or above `p` is corrected by exactly one
    /// subtraction of `p`.
    pub fn add(&self, a: &[u32], b: &[u32], r: &mut [u32]) {
        debug_assert_eq!(a.len(), self.p.len());
        debug_assert_eq!(b.len(), self.p.len());
        debug_assert_eq!(r.len(), self.p.len());

        r.copy_from_slice(a);
        let carry = core::add(r, b);

        if carry != 0 || core::compare(r, self.p) != Ordering::Less {
            core::sub(r, self.p);
        }
    }

    /// `r = (a - b) mod p` for reduced inputs.
    ///
    /// A raw borrow is corrected by exactly one addition of `p`.
    pub fn sub(&self, a: &[u32], b: &[u32], r: &mut [u32]) {
        debug_assert_eq!(a.len(), self.p.len());
        debug_assert_eq!(b.len(), self.p.len());
        debug_assert_eq!(r.len(), self.p.len());

        r.copy_from_slice(a);
        let borrow = core::sub(r, b);

        if borrow != 0 {
            core::add(r, self.p);
        }
    }

    /// `r = (a * b) mod p`.
    ///
    /// Operand lengths may differ, up to one full field width each.
    pub fn mult(&self, a: &[u32], b: &[u32], r: &mut [u32]) -> Result<(), CryptoError> {
        if a.len() > MAX_MOD_WORDS || b.len() > MAX_MOD_WORDS {
            return Err(CryptoError::InvalidLength);
        }

        let mut product = [0u32; 2 * MAX_MOD_WORDS];
        core::mult(&mut product[..a.len() + b.len()], a, b);
        self.reduce(&product[..a.len() + b.len()], r)
    }

    /// `r = a² mod p` using the optimized squaring.
    pub fn square(&self, a: &[u32], r: &mut [u32]) -> Result<(), CryptoError> {
        if a.len() > MAX_MOD_WORDS {
            return Err(CryptoError::InvalidLength);
        }

        let mut product = [0u32; 2 * MAX_MOD_WORDS];
        core::square(&mut product[..2 * a.len()], a);
        self.reduce(&product[..2 * a.len()], r)
    }

    /// `r = a⁻¹ mod p` by binary extended GCD.
    ///
    /// Requires an odd modulus (every supported curve field and order is
    /// odd). Fails with `NotInvertible` when gcd(a, p) ≠ 1.
    pub fn inv(&self, a: &[u32], r: &mut [u32]) -> Result<(), CryptoError> {
        let n = self.p.len();
        if a.len() != n || r.len() != n {
            return Err(CryptoError::InvalidLength);
        }
        if self.p[0] & 1 == 0 {
            return Err(CryptoError::InvalidInput);
        }

        let mut u = [0u32; MAX_MOD_WORDS];
        let mut v = [0u32; MAX_MOD_WORDS];
        let mut x1 = [0u32; MAX_MOD_WORDS];
        let mut x2 = [0u32; MAX_MOD_WORDS];

        let u = &mut u[..n];
        let v = &mut v[..n];
        let x1 = &mut x1[..n];
        let x2 = &mut x2[..n];

        if core::compare(a, self.p) == Ordering::Less {
            u.copy_from_slice(a);
        } else {
            self.reduce(a, u)?;
        }
        v.copy_from_slice(self.p);
        x1[0] = 1;

        if core::is_zero(u) {
            return Err(CryptoError::NotInvertible);
        }

        while !core::is_zero(u) {
            while u[0] & 1 == 0 {
                core::shift_right(u, 1);
                halve_mod(x1, self.p);
            }
            while v[0] & 1 == 0 {
                core::shift_right(v, 1);
                halve_mod(x2, self.p);
            }

            if core::compare(u, v) != Ordering::Less {
                core::sub(u, v);
                let tmp = sub_mod_copy(x1, x2, self.p);
                x1.copy_from_slice(&tmp[..n]);
            } else {
                core::sub(v, u);
                let tmp = sub_mod_copy(x2, x1, self.p);
                x2.copy_from_slice(&tmp[..n]);
            }
        }

        // v now holds gcd(a, p).
        let mut one = [0u32; MAX_MOD_WORDS];
        one[0] = 1;
        if core::compare(v, &one[..n]) != Ordering::Equal {
            return Err(CryptoError::NotInvertible);
        }

        r.copy_from_slice(x2);
        Ok(())
    }
}

/// `x <- x / 2 mod p` for odd `p`: halve directly when even, else add
/// `p` first and fold the carry bit into the top of the shift.
fn halve_mod(x: &mut [u32], p: &[u32]) {
    if x[0] & 1 == 0 {
        core::shift_right(x, 1);
    } else {
        let carry = core::add(x, p);
        core::shift_right(x, 1);
        if carry != 0 {
            let top = x.len() - 1;
            x[top] |= 1 << 31;
        }
    }
}

/// `(a - b) mod p` into a fresh buffer, for reduced operands.
fn sub_mod_copy(a: &[u32], b: &[u32], p: &[u32]) -> [u32; MAX_MOD_WORDS] {
    let mut out = [0u32; MAX_MOD_WORDS];
    let r = &mut out[..a.len()];

    r.copy_from_slice(a);
    if core::sub(r, b) != 0 {
        core::add(r, p);
    }

    out
}
