//! Compact "nBits" targets.
//!
//! The compact format is a base-256 float: the top byte is the exponent
//! (number of significant bytes), bit 23 is a sign and the low 23 bits are
//! the mantissa. `0x1234560000` is `0x05123456`, and `0xc0de000000` is
//! `0x0600c0de` because a mantissa may never have its top bit set.

use crate::hash::Hash256;
use crate::uint::Uint256;
use log::debug;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Result of decoding an nBits value.
///
/// `target` is always defined, but only usable for consensus when neither
/// flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactTarget {
    pub target: Uint256,
    pub negative: bool,
    pub overflow: bool,
}

impl CompactTarget {
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.negative && !self.overflow
    }
}

pub fn u256_from_compact_target(bits: u32) -> CompactTarget {
    let size = bits >> 24;
    let mut word = bits & MANTISSA_MASK;
    let target = if size <= 3 {
        word >>= 8 * (3 - size);
        Uint256::from(word as u64)
    } else {
        Uint256::from(word as u64) << (8 * (size as usize - 3))
    };

    // Both flags look at the mantissa after any right shift above
    let negative = word != 0 && bits & SIGN_BIT != 0;
    let overflow = word != 0
        && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

    CompactTarget {
        target,
        negative,
        overflow,
    }
}

pub fn u256_to_compact_target(target: &Uint256, negative: bool) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (*target >> (8 * (size - 3))).low_u32()
    };

    // Keep bit 23 free for the sign
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }

    compact |= (size as u32) << 24;
    if negative && compact & MANTISSA_MASK != 0 {
        compact |= SIGN_BIT;
    }
    compact
}

/// Checks that `hash` meets the target encoded in `bits`, and that the
/// target itself is no easier than `pow_limit`.
pub fn check_proof_of_work(hash: &Hash256, bits: u32, pow_limit: &Uint256) -> bool {
    let decoded = u256_from_compact_target(bits);
    if !decoded.is_valid() || decoded.target.is_zero() || decoded.target > *pow_limit {
        debug!("nBits {bits:#010x} below minimum work");
        return false;
    }

    if Uint256::from(*hash) > decoded.target {
        debug!("Hash {hash} does not match nBits {bits:#010x}");
        return false;
    }
    true
}

/// Expected number of hashes to find a block at `bits`, i.e.
/// `2^256 / (target + 1)`. Zero for targets that fail to decode.
pub fn block_proof(bits: u32) -> Uint256 {
    let decoded = u256_from_compact_target(bits);
    if !decoded.is_valid() || decoded.target.is_zero() {
        return Uint256::ZERO;
    }

    // 2^256 / (target + 1) == ~target / (target + 1) + 1, which fits in 256 bits
    let mut divisor = decoded.target;
    divisor.increment();
    match (!decoded.target).checked_div(divisor) {
        Ok(work) => work + Uint256::ONE,
        // A decoded target never reaches Uint256::MAX
        Err(_) => Uint256::ZERO,
    }
}

/// How many times harder `bits` is than the easiest allowed target.
/// Approximate; for display only.
pub fn difficulty(bits: u32, pow_limit: &Uint256) -> f64 {
    let decoded = u256_from_compact_target(bits);
    if decoded.target.is_zero() {
        return 0.0;
    }
    pow_limit.as_f64() / decoded.target.as_f64()
}
