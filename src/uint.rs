// Written in 2014 by Andrew Poelstra <apoelstra@wpsoftware.net>
// SPDX-License-Identifier: CC0-1.0

//! Big unsigned integer types.
//!
//! Fixed-width unsigned integers stored as little-endian arrays of 32-bit
//! words. Every operation wraps modulo 2^BITS like a hardware integer would;
//! consensus code relies on that (e.g. negation through two's complement), so
//! nothing here panics on overflow.

mod string;

use crate::error::UintError;
use core::cmp::Ordering;
use core::ops;

/// Little-endian large integer made of `N` 32-bit words.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Uint<const N: usize>([u32; N]);

/// The 256-bit instantiation used for proof-of-work targets and hashes.
pub type Uint256 = Uint<8>;

impl<const N: usize> Uint<N> {
    /// Width in bits.
    pub const BITS: usize = N * 32;

    pub const ZERO: Self = Uint([0; N]);
    pub const ONE: Self = Self::from_u64(1);
    pub const MAX: Self = Uint([u32::MAX; N]);

    // Post-monomorphization check, evaluated by anything that needs two words.
    const AT_LEAST_64_BITS: () = assert!(N >= 2, "Uint needs at least two words");

    #[inline]
    pub const fn from_words(words: [u32; N]) -> Self {
        Uint(words)
    }

    #[inline]
    pub fn as_words(&self) -> &[u32; N] {
        &self.0
    }

    /// Create an object from a given unsigned 64-bit integer
    #[inline]
    pub const fn from_u64(init: u64) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::AT_LEAST_64_BITS;
        let mut ret = [0; N];
        ret[0] = init as u32;
        ret[1] = (init >> 32) as u32;
        Uint(ret)
    }

    /// Conversion to u32
    #[inline]
    pub fn low_u32(&self) -> u32 {
        self.0[0]
    }

    /// Conversion to u64, keeping words 0 and 1
    #[inline]
    pub fn low_u64(&self) -> u64 {
        #[allow(clippy::let_unit_value)]
        let () = Self::AT_LEAST_64_BITS;
        self.0[0] as u64 | (self.0[1] as u64) << 32
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Is bit `idx` set? Bits past the width read as unset.
    #[inline]
    pub fn bit(&self, idx: usize) -> bool {
        idx < Self::BITS && self.0[idx / 32] & (1 << (idx % 32)) != 0
    }

    /// Return the least number of bits needed to represent the number
    #[inline]
    pub fn bits(&self) -> usize {
        for (i, &word) in self.0.iter().enumerate().rev() {
            if word != 0 {
                return 32 * i + (32 - word.leading_zeros() as usize);
            }
        }
        0
    }

    /// Floating point approximation of the value.
    ///
    /// Precision is lost past 53 bits. Only meant for displaying difficulty,
    /// never for consensus decisions.
    pub fn as_f64(&self) -> f64 {
        let mut ret = 0.0;
        let mut fact = 1.0;
        for &word in self.0.iter() {
            ret += fact * word as f64;
            fact *= 4294967296.0;
        }
        ret
    }

    pub fn wrapping_add(self, other: Self) -> Self {
        let mut ret = [0u32; N];
        let mut carry = 0u64;
        for i in 0..N {
            let n = carry + self.0[i] as u64 + other.0[i] as u64;
            ret[i] = n as u32;
            carry = n >> 32;
        }
        Uint(ret)
    }

    /// Two's complement negation: `!self + 1`.
    #[inline]
    pub fn wrapping_neg(self) -> Self {
        let mut ret = !self;
        ret.increment();
        ret
    }

    #[inline]
    pub fn wrapping_sub(self, other: Self) -> Self {
        self.wrapping_add(other.wrapping_neg())
    }

    /// Multiplication by u32
    pub fn mul_u32(self, other: u32) -> Self {
        let mut ret = [0u32; N];
        let mut carry = 0u64;
        for i in 0..N {
            let n = carry + other as u64 * self.0[i] as u64;
            ret[i] = n as u32;
            carry = n >> 32;
        }
        Uint(ret)
    }

    /// Schoolbook multiplication; partial products past the width are lost.
    pub fn wrapping_mul(self, other: Self) -> Self {
        let mut ret = Self::ZERO;
        for (i, &word) in other.0.iter().enumerate() {
            if word != 0 {
                ret = ret.wrapping_add(self.mul_u32(word) << (32 * i));
            }
        }
        ret
    }

    /// Bitwise long division.
    ///
    /// Fails with [`UintError::DivideByZero`] when `divisor` is zero.
    pub fn checked_div(self, divisor: Self) -> Result<Self, UintError> {
        let my_bits = self.bits();
        let your_bits = divisor.bits();

        if your_bits == 0 {
            return Err(UintError::DivideByZero);
        }

        let mut ret = [0u32; N];
        if my_bits < your_bits {
            return Ok(Uint(ret));
        }

        let mut remainder = self;
        let mut shift = my_bits - your_bits;
        let mut shifted = divisor << shift;
        loop {
            if remainder >= shifted {
                ret[shift / 32] |= 1 << (shift % 32);
                remainder = remainder.wrapping_sub(shifted);
            }
            shifted = shifted >> 1;
            if shift == 0 {
                break;
            }
            shift -= 1;
        }

        Ok(Uint(ret))
    }

    /// Increment by 1, wrapping to zero past the maximum
    #[inline]
    pub fn increment(&mut self) {
        for word in self.0.iter_mut() {
            *word = word.wrapping_add(1);
            if *word != 0 {
                break;
            }
        }
    }

    /// Decrement by 1, wrapping to the maximum below zero
    #[inline]
    pub fn decrement(&mut self) {
        for word in self.0.iter_mut() {
            *word = word.wrapping_sub(1);
            if *word != u32::MAX {
                break;
            }
        }
    }
}

impl Uint256 {
    /// Reads 32 little-endian bytes, least significant byte of word 0 first.
    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        let mut ret = [0u32; 8];
        for (word, chunk) in ret.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Uint(ret)
    }

    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut ret = [0u8; 32];
        for (chunk, word) in ret.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        ret
    }
}

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<u64> for Uint<N> {
    fn from(init: u64) -> Self {
        Self::from_u64(init)
    }
}

impl<const N: usize> From<[u32; N]> for Uint<N> {
    fn from(v: [u32; N]) -> Self {
        Uint(v)
    }
}

impl<'a, const N: usize> TryFrom<&'a [u8]> for Uint<N> {
    type Error = UintError;

    /// Little-endian bytes; the slice must be exactly `N * 4` long.
    fn try_from(data: &'a [u8]) -> Result<Self, Self::Error> {
        if data.len() != N * 4 {
            return Err(UintError::InvalidLength {
                expected: N * 4,
                actual: data.len(),
            });
        }
        let mut ret = [0u32; N];
        for (word, chunk) in ret.iter_mut().zip(data.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Uint(ret))
    }
}

impl<const N: usize> PartialEq<u64> for Uint<N> {
    fn eq(&self, other: &u64) -> bool {
        self.0[2..].iter().all(|&w| w == 0) && self.low_u64() == *other
    }
}

impl<const N: usize> PartialOrd for Uint<N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Uint<N> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // Words are little-endian, so a derived (lexicographic) ordering
        // would start at the least significant word
        for i in (0..N).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl<const N: usize> ops::Add for Uint<N> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.wrapping_add(other)
    }
}

impl<const N: usize> ops::AddAssign for Uint<N> {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = self.wrapping_add(other);
    }
}

impl<const N: usize> ops::Sub for Uint<N> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        self.wrapping_sub(other)
    }
}

impl<const N: usize> ops::SubAssign for Uint<N> {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = self.wrapping_sub(other);
    }
}

impl<const N: usize> ops::Neg for Uint<N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl<const N: usize> ops::Mul for Uint<N> {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        self.wrapping_mul(other)
    }
}

impl<const N: usize> ops::Mul<u32> for Uint<N> {
    type Output = Self;

    #[inline]
    fn mul(self, other: u32) -> Self {
        self.mul_u32(other)
    }
}

impl<const N: usize> ops::BitAnd for Uint<N> {
    type Output = Self;

    #[inline]
    fn bitand(self, other: Self) -> Self {
        let mut ret = [0u32; N];
        for i in 0..N {
            ret[i] = self.0[i] & other.0[i];
        }
        Uint(ret)
    }
}

impl<const N: usize> ops::BitXor for Uint<N> {
    type Output = Self;

    #[inline]
    fn bitxor(self, other: Self) -> Self {
        let mut ret = [0u32; N];
        for i in 0..N {
            ret[i] = self.0[i] ^ other.0[i];
        }
        Uint(ret)
    }
}

impl<const N: usize> ops::BitOr for Uint<N> {
    type Output = Self;

    #[inline]
    fn bitor(self, other: Self) -> Self {
        let mut ret = [0u32; N];
        for i in 0..N {
            ret[i] = self.0[i] | other.0[i];
        }
        Uint(ret)
    }
}

impl<const N: usize> ops::Not for Uint<N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        let mut ret = [0u32; N];
        for i in 0..N {
            ret[i] = !self.0[i];
        }
        Uint(ret)
    }
}

impl<const N: usize> ops::Shl<usize> for Uint<N> {
    type Output = Self;

    fn shl(self, shift: usize) -> Self {
        let word_shift = shift / 32;
        let bit_shift = shift % 32;
        if word_shift >= N {
            return Self::ZERO;
        }

        let Uint(ref original) = self;
        let mut ret = [0u32; N];
        for i in 0..N - word_shift {
            // Shift
            ret[i + word_shift] |= original[i] << bit_shift;
            // Carry
            if bit_shift > 0 && i + word_shift + 1 < N {
                ret[i + word_shift + 1] |= original[i] >> (32 - bit_shift);
            }
        }
        Uint(ret)
    }
}

impl<const N: usize> ops::Shr<usize> for Uint<N> {
    type Output = Self;

    fn shr(self, shift: usize) -> Self {
        let word_shift = shift / 32;
        let bit_shift = shift % 32;
        if word_shift >= N {
            return Self::ZERO;
        }

        let Uint(ref original) = self;
        let mut ret = [0u32; N];
        for i in word_shift..N {
            // Shift
            ret[i - word_shift] |= original[i] >> bit_shift;
            // Carry
            if bit_shift > 0 && i + 1 < N {
                ret[i - word_shift] |= original[i + 1] << (32 - bit_shift);
            }
        }
        Uint(ret)
    }
}

impl<const N: usize> ops::ShlAssign<usize> for Uint<N> {
    #[inline]
    fn shl_assign(&mut self, shift: usize) {
        *self = *self << shift;
    }
}

impl<const N: usize> ops::ShrAssign<usize> for Uint<N> {
    #[inline]
    fn shr_assign(&mut self, shift: usize) {
        *self = *self >> shift;
    }
}
