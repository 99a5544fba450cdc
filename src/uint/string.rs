//! Hexadecimal text form of [`Uint`].
//!
//! The lenient parser accepts what node configuration has always accepted
//! (optional prefix, short strings, trailing junk); the strict parser is for
//! user input that must be rejected when malformed.

use super::Uint;
use crate::error::UintError;
use core::fmt;
use core::str::FromStr;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

impl<const N: usize> Uint<N> {
    /// Lowercase, zero padded, most significant nibble first.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }

    /// Parses hex leniently.
    ///
    /// Leading whitespace and a `0x` prefix are skipped, parsing stops at the
    /// first non-hex character, and only the least significant `N * 8` digits
    /// are kept. Never fails; an empty string yields zero.
    pub fn from_hex(s: &str) -> Self {
        let s = strip_hex_prefix(s.trim_start());
        let end = s
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(s.len());

        let mut ret = [0u32; N];
        for (i, c) in s[..end].chars().rev().take(N * 8).enumerate() {
            // Only hex digits remain in the slice
            let nibble = c.to_digit(16).unwrap_or(0);
            ret[i / 8] |= nibble << (4 * (i % 8));
        }
        Uint(ret)
    }

    /// Parses hex, rejecting anything [`Uint::from_hex`] would silently skip.
    pub fn from_hex_strict(s: &str) -> Result<Self, UintError> {
        let digits = strip_hex_prefix(s);
        let offset = s.len() - digits.len();
        if digits.is_empty() {
            return Err(UintError::EmptyHex);
        }
        if let Some((position, character)) = digits
            .char_indices()
            .find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(UintError::MalformedHex {
                position: position + offset,
                character,
            });
        }
        if digits.len() > N * 8 {
            return Err(UintError::HexOverflow {
                digits: digits.len(),
                max: N * 8,
            });
        }
        Ok(Self::from_hex(digits))
    }
}

impl<const N: usize> FromStr for Uint<N> {
    type Err = UintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_strict(s)
    }
}

impl<const N: usize> fmt::LowerHex for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for word in self.0.iter().rev() {
            write!(f, "{:08x}", word)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Display for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl<const N: usize> fmt::Debug for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self)
    }
}

impl<const N: usize> Serialize for Uint<N> {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.to_hex())
    }
}

struct UintVisitor<const N: usize>;

impl<'de, const N: usize> de::Visitor<'de> for UintVisitor<N> {
    type Value = Uint<N>;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "a hex string of at most {} digits", N * 8)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Uint::from_hex_strict(v).map_err(E::custom)
    }
}

impl<'de, const N: usize> Deserialize<'de> for Uint<N> {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_str(UintVisitor)
    }
}

#[cfg(test)]
mod test {
    use crate::error::UintError;
    use crate::uint::{Uint, Uint256};

    const POW_LIMIT: &str = "000007fff0000000000000000000000000000000000000000000000000000000";

    #[test]
    fn to_hex_is_full_width() {
        assert_eq!(Uint256::ZERO.to_hex(), "0".repeat(64));
        assert_eq!(
            Uint256::from(0xabcu64).to_hex(),
            format!("{}abc", "0".repeat(61))
        );
        assert_eq!(Uint256::MAX.to_hex(), "f".repeat(64));
        assert_eq!(Uint::<4>::ONE.to_hex().len(), 32);
        assert_eq!(format!("{:?}", Uint::<2>::from(0x1fu64)), "0x000000000000001f");
        assert_eq!(Uint256::from(7u64).to_string(), Uint256::from(7u64).to_hex());
    }

    #[test]
    fn from_hex_round_trip() {
        let limit = Uint256::from_hex(POW_LIMIT);
        assert_eq!(limit.to_hex(), POW_LIMIT);
        assert_eq!(limit, Uint256::from(0x07fff0u64) << (8 * 27));
    }

    #[test]
    fn from_hex_lenient() {
        let want = Uint256::from(0x1234u64);
        assert_eq!(Uint256::from_hex("1234"), want);
        assert_eq!(Uint256::from_hex("0x1234"), want);
        assert_eq!(Uint256::from_hex("0X1234"), want);
        assert_eq!(Uint256::from_hex("   0x1234"), want);
        assert_eq!(Uint256::from_hex("1234zz99"), want);
        assert_eq!(Uint256::from_hex("0x001"), Uint256::ONE);
        assert_eq!(Uint256::from_hex(""), Uint256::ZERO);
        assert_eq!(Uint256::from_hex("0x"), Uint256::ZERO);
        assert_eq!(Uint256::from_hex("hello"), Uint256::ZERO);
    }

    #[test]
    fn from_hex_truncates_long_input() {
        // 66 digits: the two most significant ones fall off
        let s = format!("ab{}", "0".repeat(63) + "1");
        assert_eq!(Uint256::from_hex(&s), Uint256::ONE);
        let long = "f".repeat(1000);
        assert_eq!(Uint256::from_hex(&long), Uint256::MAX);
        assert_eq!(
            Uint::<2>::from_hex("123456789abcdef012"),
            Uint::<2>::from(0x3456_789a_bcde_f012u64)
        );
    }

    #[test]
    fn from_hex_strict() {
        assert_eq!(
            Uint256::from_hex_strict("0x1234"),
            Ok(Uint256::from(0x1234u64))
        );
        assert_eq!("00ff".parse::<Uint256>(), Ok(Uint256::from(0xffu64)));
        assert_eq!(Uint256::from_hex_strict(""), Err(UintError::EmptyHex));
        assert_eq!(Uint256::from_hex_strict("0x"), Err(UintError::EmptyHex));
        assert_eq!(
            Uint256::from_hex_strict("0x12g4"),
            Err(UintError::MalformedHex {
                position: 4,
                character: 'g'
            })
        );
        assert_eq!(
            Uint256::from_hex_strict(" 12"),
            Err(UintError::MalformedHex {
                position: 0,
                character: ' '
            })
        );
        assert_eq!(
            Uint256::from_hex_strict(&"1".repeat(65)),
            Err(UintError::HexOverflow {
                digits: 65,
                max: 64
            })
        );
        assert!(Uint256::from_hex_strict(&"1".repeat(64)).is_ok());
    }

    #[test]
    fn serde() {
        let limit = Uint256::from_hex(POW_LIMIT);
        let json = serde_json::to_string(&limit).unwrap();
        assert_eq!(json, format!("\"{}\"", POW_LIMIT));
        let back: Uint256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, limit);

        assert!(serde_json::from_str::<Uint256>("\"xyz\"").is_err());
        assert!(serde_json::from_str::<Uint256>("12").is_err());
    }
}
