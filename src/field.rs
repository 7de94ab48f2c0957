//! Arithmetic over GF(2^8) reduced by the AES polynomial x⁸ + x⁴ + x³ + x + 1.
//!
//! Multiplication and division go through exponent/logarithm tables built at
//! compile time from the generator `0x03`. The tables fix the encoding of every
//! share, so they must match any other implementation over the same field.

use core::iter::{Product, Sum};
use core::ops::{Add, Mul, Sub};

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

#[cfg(feature = "zeroize_memory")]
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Irreducible polynomial used for reduction: x⁸ + x⁴ + x³ + x + 1 (Rijndael).
pub const POLY: u16 = 0x11b;

/// Generator of the multiplicative group used to build the tables.
pub const GENERATOR: u8 = 0x03;

// Order of the multiplicative group.
const ORDER: usize = 255;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];

    let mut x: u16 = 1;
    let mut i = 0;
    while i < ORDER {
        exp[i] = x as u8;
        log[x as usize] = i as u8;

        // x * 3 == x * 2 + x
        let mut doubled = x << 1;
        if doubled & 0x100 != 0 {
            doubled ^= POLY;
        }
        x = doubled ^ x;
        i += 1;
    }
    exp[ORDER] = exp[0];

    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

/// `EXP[e] = 3^e`. Entry 255 wraps around to `EXP[0]`.
pub static EXP: [u8; 256] = TABLES.0;

/// Inverse of [`EXP`] on non-zero elements. `LOG[0]` is meaningless.
pub static LOG: [u8; 256] = TABLES.1;

/// An element of GF(256).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
#[cfg_attr(feature = "zeroize_memory", derive(Zeroize))]
pub struct GF256(pub u8);

impl GF256 {
    pub const ZERO: GF256 = GF256(0);
    pub const ONE: GF256 = GF256(1);

    /// `3^e`, with `e` reduced modulo the group order.
    #[inline]
    pub fn exp(e: usize) -> GF256 {
        GF256(EXP[e % ORDER])
    }

    /// Discrete logarithm to base 3, `None` for zero.
    #[inline]
    pub fn log(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(LOG[self.0 as usize])
        }
    }

    /// Divides `self` by `rhs`.
    ///
    /// Returns [`Error::DivisionByZero`] when `rhs` is zero, before any table is touched.
    #[inline]
    pub fn checked_div(self, rhs: GF256) -> Result<GF256> {
        if rhs.0 == 0 {
            return Err(Error::DivisionByZero);
        }
        if self.0 == 0 {
            return Ok(GF256::ZERO);
        }

        let log_a = LOG[self.0 as usize] as usize;
        let log_b = LOG[rhs.0 as usize] as usize;
        Ok(GF256(EXP[(log_a + ORDER - log_b) % ORDER]))
    }

    /// Multiplicative inverse.
    #[inline]
    pub fn inverse(self) -> Result<GF256> {
        GF256::ONE.checked_div(self)
    }
}

impl From<u8> for GF256 {
    fn from(value: u8) -> Self {
        GF256(value)
    }
}

impl From<GF256> for u8 {
    fn from(value: GF256) -> Self {
        value.0
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Add for GF256 {
    type Output = GF256;

    #[inline]
    fn add(self, other: GF256) -> GF256 {
        GF256(self.0 ^ other.0)
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for GF256 {
    type Output = GF256;

    #[inline]
    fn sub(self, other: GF256) -> GF256 {
        GF256(self.0 ^ other.0)
    }
}

impl Mul for GF256 {
    type Output = GF256;

    #[inline]
    fn mul(self, rhs: GF256) -> GF256 {
        if self.0 == 0 || rhs.0 == 0 {
            return GF256::ZERO;
        }

        let log_a = LOG[self.0 as usize] as usize;
        let log_b = LOG[rhs.0 as usize] as usize;
        GF256(EXP[(log_a + log_b) % ORDER])
    }
}

impl Sum for GF256 {
    fn sum<I: Iterator<Item = GF256>>(iter: I) -> GF256 {
        iter.fold(GF256::ZERO, |acc, x| acc + x)
    }
}

impl Product for GF256 {
    fn product<I: Iterator<Item = GF256>>(iter: I) -> GF256 {
        iter.fold(GF256::ONE, |acc, x| acc * x)
    }
}
