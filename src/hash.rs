//! Canonical 256-bit hash type.
//!
//! `Hash256` is the byte form used in headers and checkpoint tables;
//! [`Uint256`] is the arithmetic form. Both are the same 32 little-endian
//! bytes, so converting between them never changes a byte.

use crate::error::UintError;
use crate::uint::Uint256;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    pub const ZERO: Self = Hash256([0; 32]);

    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 32]
    }

    /// Hex with the last byte first, the order block hashes are printed in.
    pub fn to_hex(&self) -> String {
        let mut be = self.0;
        be.reverse();
        hex::encode(be)
    }

    /// Lenient parse of the printed form, see [`Uint256::from_hex`].
    pub fn from_hex(s: &str) -> Self {
        Uint256::from_hex(s).into()
    }
}

impl Uint256 {
    #[inline]
    pub fn to_canonical_hash(&self) -> Hash256 {
        Hash256(self.to_le_bytes())
    }

    #[inline]
    pub fn from_canonical_hash(hash: &Hash256) -> Self {
        Uint256::from_le_bytes(hash.0)
    }

    /// Salted 64-bit hash for hash tables keyed by 256-bit values.
    ///
    /// Bob Jenkins' lookup3 mixing over the words xored with `salt`.
    pub fn salted_hash(&self, salt: &Uint256) -> u64 {
        let pn = self.as_words();
        let sn = salt.as_words();

        let mut a = 0xdead_beefu32.wrapping_add((pn.len() as u32) << 2);
        let mut b = a;
        let mut c = a;

        a = a.wrapping_add(pn[0] ^ sn[0]);
        b = b.wrapping_add(pn[1] ^ sn[1]);
        c = c.wrapping_add(pn[2] ^ sn[2]);
        mix(&mut a, &mut b, &mut c);
        a = a.wrapping_add(pn[3] ^ sn[3]);
        b = b.wrapping_add(pn[4] ^ sn[4]);
        c = c.wrapping_add(pn[5] ^ sn[5]);
        mix(&mut a, &mut b, &mut c);
        a = a.wrapping_add(pn[6] ^ sn[6]);
        b = b.wrapping_add(pn[7] ^ sn[7]);
        finalize(&mut a, &mut b, &mut c);

        (b as u64) << 32 | c as u64
    }
}

fn mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(4);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(6);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(8);
    *b = b.wrapping_add(*a);
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(16);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(19);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(4);
    *b = b.wrapping_add(*a);
}

fn finalize(a: &mut u32, b: &mut u32, c: &mut u32) {
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(14));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(11));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(25));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(16));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(4));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(14));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(24));
}

impl From<Uint256> for Hash256 {
    fn from(v: Uint256) -> Self {
        v.to_canonical_hash()
    }
}

impl From<Hash256> for Uint256 {
    fn from(h: Hash256) -> Self {
        Uint256::from_canonical_hash(&h)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Hash256 {
    type Err = UintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uint256::from_hex_strict(s).map(Hash256::from)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl Serialize for Hash256 {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Uint256::deserialize(d).map(Hash256::from)
    }
}

/// Parses the printed form of a hash into raw little-endian bytes, requiring
/// exactly 64 digits.
pub fn hash_from_hex(s: &str) -> Result<Hash256, hex::FromHexError> {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(s, &mut bytes)?;
    bytes.reverse();
    Ok(Hash256(bytes))
}
