//! SQL three-valued boolean logic.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A SQL boolean: `TRUE`, `FALSE`, or `UNKNOWN` (NULL).
///
/// The stored byte starts at 1; zero is never a valid value, so raw bytes go
/// through [`BoolValue::try_from`] at every deserialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum BoolValue {
    True = 1,
    False = 2,
    Unknown = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid bool value {0}")]
pub struct InvalidBoolValue(pub u8);

use BoolValue::{False as F, True as T, Unknown as U};

const AND_TABLE: [[BoolValue; 3]; 3] = [
    // True   False  Unknown
    [T, F, U], // True
    [F, F, F], // False
    [U, F, U], // Unknown
];

const OR_TABLE: [[BoolValue; 3]; 3] = [
    [T, T, T],
    [T, F, U],
    [T, U, U],
];

const NOT_TABLE: [BoolValue; 3] = [F, T, U];

impl BoolValue {
    /// Whether `raw` encodes one of the three values.
    pub fn valid(raw: u8) -> bool {
        raw.wrapping_sub(1) < 3
    }

    fn index(self) -> usize {
        self as usize - 1
    }

    pub fn and(self, other: BoolValue) -> BoolValue {
        AND_TABLE[self.index()][other.index()]
    }

    pub fn or(self, other: BoolValue) -> BoolValue {
        OR_TABLE[self.index()][other.index()]
    }

    /// Converts to a nullable native boolean; `Unknown` maps to `None`.
    pub fn to_option(self) -> Option<bool> {
        match self {
            BoolValue::True => Some(true),
            BoolValue::False => Some(false),
            BoolValue::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoolValue::True => "TRUE",
            BoolValue::False => "FALSE",
            BoolValue::Unknown => "UNKNOWN",
        }
    }
}

impl Not for BoolValue {
    type Output = BoolValue;

    fn not(self) -> BoolValue {
        NOT_TABLE[self.index()]
    }
}

impl BitAnd for BoolValue {
    type Output = BoolValue;

    fn bitand(self, rhs: BoolValue) -> BoolValue {
        self.and(rhs)
    }
}

impl BitOr for BoolValue {
    type Output = BoolValue;

    fn bitor(self, rhs: BoolValue) -> BoolValue {
        self.or(rhs)
    }
}

impl TryFrom<u8> for BoolValue {
    type Error = InvalidBoolValue;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(BoolValue::True),
            2 => Ok(BoolValue::False),
            3 => Ok(BoolValue::Unknown),
            _ => Err(InvalidBoolValue(raw)),
        }
    }
}

impl From<BoolValue> for u8 {
    fn from(value: BoolValue) -> Self {
        value as u8
    }
}

impl From<bool> for BoolValue {
    fn from(value: bool) -> Self {
        if value {
            BoolValue::True
        } else {
            BoolValue::False
        }
    }
}

impl From<Option<bool>> for BoolValue {
    fn from(value: Option<bool>) -> Self {
        value.map_or(BoolValue::Unknown, BoolValue::from)
    }
}

impl fmt::Display for BoolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BoolValue; 3] = [BoolValue::True, BoolValue::False, BoolValue::Unknown];

    #[test]
    fn test_and_truth_table() {
        let expected = [
            (T, T, T),
            (T, F, F),
            (T, U, U),
            (F, T, F),
            (F, F, F),
            (F, U, F),
            (U, T, U),
            (U, F, F),
            (U, U, U),
        ];
        for (a, b, out) in expected {
            assert_eq!(a.and(b), out, "{a} AND {b}");
            assert_eq!(a & b, out);
        }
    }

    #[test]
    fn test_or_truth_table() {
        let expected = [
            (T, T, T),
            (T, F, T),
            (T, U, T),
            (F, T, T),
            (F, F, F),
            (F, U, U),
            (U, T, T),
            (U, F, U),
            (U, U, U),
        ];
        for (a, b, out) in expected {
            assert_eq!(a.or(b), out, "{a} OR {b}");
            assert_eq!(a | b, out);
        }
    }

    #[test]
    fn test_not() {
        assert_eq!(!T, F);
        assert_eq!(!F, T);
        assert_eq!(!U, U);
        for v in ALL {
            assert_eq!(!!v, v);
        }
    }

    #[test]
    fn test_commutative() {
        for a in ALL {
            for b in ALL {
                assert_eq!(a & b, b & a);
                assert_eq!(a | b, b | a);
            }
        }
    }

    #[test]
    fn test_strings() {
        assert_eq!(T.to_string(), "TRUE");
        assert_eq!(F.to_string(), "FALSE");
        assert_eq!(U.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_to_option() {
        assert_eq!(T.to_option(), Some(true));
        assert_eq!(F.to_option(), Some(false));
        assert_eq!(U.to_option(), None);
        for v in ALL {
            assert_eq!(BoolValue::from(v.to_option()), v);
        }
    }

    #[test]
    fn test_zero_is_invalid() {
        assert!(!BoolValue::valid(0));
        assert!(BoolValue::valid(1));
        assert!(BoolValue::valid(3));
        assert!(!BoolValue::valid(4));
        assert!(!BoolValue::valid(255));
        assert_eq!(BoolValue::try_from(0), Err(InvalidBoolValue(0)));
        assert_eq!(BoolValue::try_from(2), Ok(F));
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert_eq!(serde_json::to_string(&U).unwrap(), "3");
        assert_eq!(serde_json::from_str::<BoolValue>("1").unwrap(), T);
        assert!(serde_json::from_str::<BoolValue>("0").is_err());
    }
}
