//! Packed 16-bit encoding of every scalar SQL type.
//!
//! A [`DataType`] is `(major << 8) | minor`. The major byte selects the
//! family; for `fixed`/`ufixed` it is a 32-wide band whose offset is the byte
//! width minus one. The minor byte is a family-specific qualifier.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

/// Width in bytes of the hash referencing a dynamic bytes value.
pub const HASH_LENGTH: usize = 32;

/// Width in bytes of an account address.
pub const ADDRESS_LENGTH: usize = 20;

/// Largest valid fractional digit count of `fixed`/`ufixed`.
pub const MAX_FRACTIONAL_DIGITS: u8 = 80;

/// Number of consecutive majors in the `fixed`/`ufixed` bands.
const FIXED_BAND_WIDTH: u8 = 0x20;

/// High byte of a [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Major(pub u8);

impl Major {
    pub const PENDING: Major = Major(0x00);
    pub const SPECIAL: Major = Major(0x01);
    pub const BOOL: Major = Major(0x02);
    pub const ADDRESS: Major = Major(0x03);
    pub const INT: Major = Major(0x04);
    pub const UINT: Major = Major(0x05);
    pub const FIXED_BYTES: Major = Major(0x06);
    pub const DYNAMIC_BYTES: Major = Major(0x07);
    pub const FIXED: Major = Major(0x10);
    pub const UFIXED: Major = Major(0x30);

    /// Whether this major lies in the signed fixed-point band.
    pub fn is_fixed_range(self) -> bool {
        self.0 >= Self::FIXED.0 && self.0 - Self::FIXED.0 < FIXED_BAND_WIDTH
    }

    /// Whether this major lies in the unsigned fixed-point band.
    pub fn is_ufixed_range(self) -> bool {
        self.0 >= Self::UFIXED.0 && self.0 - Self::UFIXED.0 < FIXED_BAND_WIDTH
    }

    /// Offset into the fixed/ufixed band, if this major belongs to one.
    fn band_offset(self) -> Option<u8> {
        if self.is_fixed_range() {
            Some(self.0 - Self::FIXED.0)
        } else if self.is_ufixed_range() {
            Some(self.0 - Self::UFIXED.0)
        } else {
            None
        }
    }
}

/// Low byte of a [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minor(pub u8);

impl Minor {
    pub const DONT_CARE: Minor = Minor(0x00);
    pub const SPECIAL_NULL: Minor = Minor(0x00);
    pub const SPECIAL_ANY: Minor = Minor(0x01);
    pub const SPECIAL_DEFAULT: Minor = Minor(0x02);
}

/// Encoded scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataType(pub u16);

impl DataType {
    /// Type not yet resolved by analysis.
    pub const PENDING: DataType = DataType::compose(Major::PENDING, Minor::DONT_CARE);
    /// Canonical invalid type; distinct from [`DataType::PENDING`].
    pub const BAD: DataType = DataType(u16::MAX);

    pub const BOOL: DataType = DataType::compose(Major::BOOL, Minor::DONT_CARE);
    pub const ADDRESS: DataType = DataType::compose(Major::ADDRESS, Minor::DONT_CARE);
    pub const DYNAMIC_BYTES: DataType = DataType::compose(Major::DYNAMIC_BYTES, Minor::DONT_CARE);
    pub const NULL: DataType = DataType::compose(Major::SPECIAL, Minor::SPECIAL_NULL);
    pub const ANY: DataType = DataType::compose(Major::SPECIAL, Minor::SPECIAL_ANY);
    pub const DEFAULT: DataType = DataType::compose(Major::SPECIAL, Minor::SPECIAL_DEFAULT);

    pub const fn compose(major: Major, minor: Minor) -> DataType {
        DataType(((major.0 as u16) << 8) | minor.0 as u16)
    }

    pub const fn decompose(self) -> (Major, Minor) {
        (Major((self.0 >> 8) as u8), Minor((self.0 & 0xff) as u8))
    }

    pub const fn major(self) -> Major {
        self.decompose().0
    }

    pub const fn minor(self) -> Minor {
        self.decompose().1
    }

    /// Bytes occupied by a value of this type in storage.
    ///
    /// # Panics
    ///
    /// Panics for majors without a storage width (pending, special, unused
    /// majors). Reaching that branch means an upstream pass skipped
    /// validation.
    pub fn size(self) -> usize {
        let (major, minor) = self.decompose();
        if let Some(offset) = major.band_offset() {
            return offset as usize + 1;
        }
        match major {
            Major::BOOL => 1,
            Major::DYNAMIC_BYTES => HASH_LENGTH,
            Major::ADDRESS => ADDRESS_LENGTH,
            Major::INT | Major::UINT | Major::FIXED_BYTES => minor.0 as usize + 1,
            _ => panic!("unknown data type {self}"),
        }
    }

    /// Exact inclusive bounds of the values this type can hold.
    ///
    /// `None` means the type has no fixed integer range (fixed-point,
    /// dynamic bytes, special); it never means an empty range.
    pub fn min_max(self) -> Option<&'static Bounds> {
        DECIMAL_MIN_MAX.get(&self)
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::PENDING
    }
}

impl From<u16> for DataType {
    fn from(value: u16) -> Self {
        DataType(value)
    }
}

impl From<DataType> for u16 {
    fn from(value: DataType) -> Self {
        value.0
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.decompose();
        match major {
            _ if *self == DataType::BAD => return f.write_str("bad"),
            Major::PENDING => return f.write_str("pending"),
            Major::SPECIAL => match minor {
                Minor::SPECIAL_NULL => return f.write_str("null"),
                Minor::SPECIAL_ANY => return f.write_str("any"),
                Minor::SPECIAL_DEFAULT => return f.write_str("default"),
                _ => {}
            },
            Major::BOOL if minor.0 == 0 => return f.write_str("bool"),
            Major::ADDRESS if minor.0 == 0 => return f.write_str("address"),
            Major::DYNAMIC_BYTES if minor.0 == 0 => return f.write_str("bytes"),
            Major::INT if minor.0 < 0x20 => return write!(f, "int{}", (minor.0 as u32 + 1) * 8),
            Major::UINT if minor.0 < 0x20 => return write!(f, "uint{}", (minor.0 as u32 + 1) * 8),
            Major::FIXED_BYTES if minor.0 < 0x20 => return write!(f, "bytes{}", minor.0 as u32 + 1),
            _ => {}
        }
        if minor.0 <= MAX_FRACTIONAL_DIGITS {
            if let Some(offset) = major.band_offset() {
                let name = if major.is_fixed_range() { "fixed" } else { "ufixed" };
                return write!(f, "{}{}x{}", name, (offset as u32 + 1) * 8, minor.0);
            }
        }
        write!(f, "unknown(0x{:04x})", self.0)
    }
}

/// Inclusive value bounds of a data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub min: BigDecimal,
    pub max: BigDecimal,
}

impl Bounds {
    pub fn contains(&self, value: &BigDecimal) -> bool {
        &self.min <= value && value <= &self.max
    }
}

/// `2^bits - 1`
fn unsigned_max(bits: usize) -> BigInt {
    (BigInt::one() << bits) - BigInt::one()
}

static DECIMAL_MIN_MAX: LazyLock<HashMap<DataType, Bounds>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(
        DataType::BOOL,
        Bounds {
            min: BigDecimal::zero(),
            max: BigDecimal::one(),
        },
    );

    m.insert(
        DataType::ADDRESS,
        Bounds {
            min: BigDecimal::zero(),
            max: BigDecimal::new(unsigned_max(ADDRESS_LENGTH * 8), 0),
        },
    );

    for i in 0..0x20u8 {
        let bits = (i as usize + 1) * 8;

        // uint{N} and bytes{N} share the unsigned range.
        let max = BigDecimal::new(unsigned_max(bits), 0);
        for major in [Major::UINT, Major::FIXED_BYTES] {
            m.insert(
                DataType::compose(major, Minor(i)),
                Bounds {
                    min: BigDecimal::zero(),
                    max: max.clone(),
                },
            );
        }

        let half = BigInt::one() << (bits - 1);
        m.insert(
            DataType::compose(Major::INT, Minor(i)),
            Bounds {
                min: BigDecimal::new(-half.clone(), 0),
                max: BigDecimal::new(half - BigInt::one(), 0),
            },
        );
    }

    m
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_compose_decompose_inverse() {
        for major in 0..=u8::MAX {
            for minor in 0..=u8::MAX {
                let dt = DataType::compose(Major(major), Minor(minor));
                assert_eq!(dt.decompose(), (Major(major), Minor(minor)));
            }
        }
        for raw in 0..=u16::MAX {
            let (major, minor) = DataType(raw).decompose();
            assert_eq!(DataType::compose(major, minor), DataType(raw));
        }
    }

    #[test]
    fn test_fixed_ranges() {
        assert!(!Major(0x0f).is_fixed_range());
        assert!(Major(0x10).is_fixed_range());
        assert!(Major(0x2f).is_fixed_range());
        assert!(!Major(0x30).is_fixed_range());
        assert!(Major(0x30).is_ufixed_range());
        assert!(Major(0x4f).is_ufixed_range());
        assert!(!Major(0x50).is_ufixed_range());
        assert!(!Major(0xff).is_ufixed_range());
    }

    #[test]
    fn test_pending_and_bad_are_distinct() {
        assert_ne!(DataType::PENDING, DataType::BAD);
        assert_eq!(DataType::PENDING.0, 0);
        assert_eq!(DataType::BAD.0, 0xffff);
        assert_eq!(DataType::default(), DataType::PENDING);
    }

    #[test]
    fn test_size() {
        assert_eq!(DataType::BOOL.size(), 1);
        assert_eq!(DataType::ADDRESS.size(), ADDRESS_LENGTH);
        assert_eq!(DataType::DYNAMIC_BYTES.size(), HASH_LENGTH);
        assert_eq!(DataType::compose(Major::INT, Minor(0)).size(), 1);
        assert_eq!(DataType::compose(Major::UINT, Minor(31)).size(), 32);
        assert_eq!(DataType::compose(Major::FIXED_BYTES, Minor(3)).size(), 4);
        assert_eq!(DataType::compose(Major(0x17), Minor(18)).size(), 8);
        assert_eq!(DataType::compose(Major(0x4f), Minor(0)).size(), 32);
    }

    #[test]
    #[should_panic(expected = "unknown data type")]
    fn test_size_of_special_panics() {
        DataType::NULL.size();
    }

    #[test]
    #[should_panic(expected = "unknown data type")]
    fn test_size_of_pending_panics() {
        DataType::PENDING.size();
    }

    #[test]
    fn test_min_max_bounds() {
        let bool_range = DataType::BOOL.min_max().unwrap();
        assert_eq!(bool_range.min, dec("0"));
        assert_eq!(bool_range.max, dec("1"));

        let uint8 = DataType::compose(Major::UINT, Minor(0)).min_max().unwrap();
        assert_eq!(uint8.min, dec("0"));
        assert_eq!(uint8.max, dec("255"));

        let int8 = DataType::compose(Major::INT, Minor(0)).min_max().unwrap();
        assert_eq!(int8.min, dec("-128"));
        assert_eq!(int8.max, dec("127"));

        let int16 = DataType::compose(Major::INT, Minor(1)).min_max().unwrap();
        assert_eq!(int16.min, dec("-32768"));
        assert_eq!(int16.max, dec("32767"));

        let bytes32 = DataType::compose(Major::FIXED_BYTES, Minor(31)).min_max().unwrap();
        assert_eq!(
            bytes32.max,
            dec("115792089237316195423570985008687907853269984665640564039457584007913129639935")
        );

        let address = DataType::ADDRESS.min_max().unwrap();
        assert_eq!(address.max, dec("1461501637330902918203684832716283019655932542975"));
    }

    #[test]
    fn test_min_max_absent_is_not_zero_range() {
        assert!(DataType::DYNAMIC_BYTES.min_max().is_none());
        assert!(DataType::compose(Major::FIXED, Minor(2)).min_max().is_none());
        assert!(DataType::compose(Major::UFIXED, Minor(0)).min_max().is_none());
        assert!(DataType::NULL.min_max().is_none());
        assert!(DataType::PENDING.min_max().is_none());
        assert!(DataType::compose(Major::UINT, Minor(32)).min_max().is_none());
    }

    #[test]
    fn test_bounds_contains() {
        let int8 = DataType::compose(Major::INT, Minor(0)).min_max().unwrap();
        assert!(int8.contains(&dec("-128")));
        assert!(int8.contains(&dec("127")));
        assert!(!int8.contains(&dec("128")));
        assert!(!int8.contains(&dec("-129")));
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::BOOL.to_string(), "bool");
        assert_eq!(DataType::ADDRESS.to_string(), "address");
        assert_eq!(DataType::DYNAMIC_BYTES.to_string(), "bytes");
        assert_eq!(DataType::compose(Major::UINT, Minor(31)).to_string(), "uint256");
        assert_eq!(DataType::compose(Major::INT, Minor(0)).to_string(), "int8");
        assert_eq!(DataType::compose(Major::FIXED_BYTES, Minor(31)).to_string(), "bytes32");
        assert_eq!(DataType::compose(Major(0x1f), Minor(18)).to_string(), "fixed128x18");
        assert_eq!(DataType::compose(Major(0x37), Minor(2)).to_string(), "ufixed64x2");
        assert_eq!(DataType::PENDING.to_string(), "pending");
        assert_eq!(DataType::NULL.to_string(), "null");
        assert_eq!(DataType::ANY.to_string(), "any");
        assert_eq!(DataType::DEFAULT.to_string(), "default");
        assert_eq!(DataType::BAD.to_string(), "bad");
        assert_eq!(DataType::compose(Major::FIXED, Minor(81)).to_string(), "unknown(0x1051)");
        assert_eq!(DataType::compose(Major(0x08), Minor(0)).to_string(), "unknown(0x0800)");
    }

    #[test]
    fn test_serde_is_raw_u16() {
        let dt = DataType::compose(Major::UINT, Minor(31));
        assert_eq!(serde_json::to_string(&dt).unwrap(), "1311");
        let back: DataType = serde_json::from_str("1311").unwrap();
        assert_eq!(back, dt);
    }
}
