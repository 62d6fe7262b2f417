//! Declared types as they appear in `CREATE TABLE` and `CAST`.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlvm_types::{DataType, ErrorCode, Major, Minor, TypeError, MAX_FRACTIONAL_DIGITS};
use tracing::debug;

use crate::span::node;
use crate::{Node, NodeRef, Span};

const MAX_BITS: u32 = 256;
const MAX_FIXED_BYTES: u32 = 32;

fn invalid(code: ErrorCode, message: String) -> TypeError {
    debug!(%code, %message, "invalid declared type");
    TypeError::new(code, message)
}

/// Checks a bit width shared by `int`, `uint`, `fixed` and `ufixed`.
///
/// `codes` is `[not_multiple_of_8, zero, too_large]`.
fn check_bits(name: &str, size: u32, codes: [ErrorCode; 3]) -> Result<(), TypeError> {
    if size % 8 != 0 {
        return Err(invalid(
            codes[0],
            format!("{name} size {size} is not a multiple of 8"),
        ));
    }
    if size == 0 {
        return Err(invalid(codes[1], format!("{name} size cannot be zero")));
    }
    if size > MAX_BITS {
        return Err(invalid(
            codes[2],
            format!("{name} size {size} cannot be larger than {MAX_BITS}"),
        ));
    }
    Ok(())
}

/// `int{N}` / `uint{N}`; `size` is in bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntTypeNode {
    pub span: Span,
    pub unsigned: bool,
    pub size: u32,
}

impl IntTypeNode {
    pub fn new(unsigned: bool, size: u32) -> Self {
        Self {
            span: Span::default(),
            unsigned,
            size,
        }
    }

    fn name(&self) -> &'static str {
        if self.unsigned {
            "uint"
        } else {
            "int"
        }
    }

    pub fn data_type(&self) -> Result<DataType, TypeError> {
        let (major, codes) = if self.unsigned {
            (
                Major::UINT,
                [
                    ErrorCode::UintSizeNotMultipleOf8,
                    ErrorCode::UintSizeZero,
                    ErrorCode::UintSizeTooLarge,
                ],
            )
        } else {
            (
                Major::INT,
                [
                    ErrorCode::IntSizeNotMultipleOf8,
                    ErrorCode::IntSizeZero,
                    ErrorCode::IntSizeTooLarge,
                ],
            )
        };
        check_bits(self.name(), self.size, codes)?;
        Ok(DataType::compose(major, Minor((self.size / 8 - 1) as u8)))
    }
}

node!(IntTypeNode);

/// `fixed{M}x{N}` / `ufixed{M}x{N}`; `size` is M in bits, N is
/// `fractional_digits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedTypeNode {
    pub span: Span,
    pub unsigned: bool,
    pub size: u32,
    pub fractional_digits: u32,
}

impl FixedTypeNode {
    pub fn new(unsigned: bool, size: u32, fractional_digits: u32) -> Self {
        Self {
            span: Span::default(),
            unsigned,
            size,
            fractional_digits,
        }
    }

    fn name(&self) -> &'static str {
        if self.unsigned {
            "ufixed"
        } else {
            "fixed"
        }
    }

    pub fn data_type(&self) -> Result<DataType, TypeError> {
        let (base, codes, digits_code) = if self.unsigned {
            (
                Major::UFIXED,
                [
                    ErrorCode::UfixedSizeNotMultipleOf8,
                    ErrorCode::UfixedSizeZero,
                    ErrorCode::UfixedSizeTooLarge,
                ],
                ErrorCode::UfixedFractionalDigitsOutOfRange,
            )
        } else {
            (
                Major::FIXED,
                [
                    ErrorCode::FixedSizeNotMultipleOf8,
                    ErrorCode::FixedSizeZero,
                    ErrorCode::FixedSizeTooLarge,
                ],
                ErrorCode::FixedFractionalDigitsOutOfRange,
            )
        };
        // Size problems take priority over fractional digits.
        check_bits(self.name(), self.size, codes)?;
        if self.fractional_digits > MAX_FRACTIONAL_DIGITS as u32 {
            return Err(invalid(
                digits_code,
                format!(
                    "{} fractional digits {} cannot be larger than {}",
                    self.name(),
                    self.fractional_digits,
                    MAX_FRACTIONAL_DIGITS
                ),
            ));
        }
        let major = Major(base.0 + (self.size / 8 - 1) as u8);
        Ok(DataType::compose(major, Minor(self.fractional_digits as u8)))
    }
}

node!(FixedTypeNode);

/// `bytes` without a size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicBytesTypeNode {
    pub span: Span,
}

node!(DynamicBytesTypeNode);

/// `bytes{N}`; `size` is in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedBytesTypeNode {
    pub span: Span,
    pub size: u32,
}

impl FixedBytesTypeNode {
    pub fn new(size: u32) -> Self {
        Self {
            span: Span::default(),
            size,
        }
    }

    pub fn data_type(&self) -> Result<DataType, TypeError> {
        if self.size == 0 {
            return Err(invalid(
                ErrorCode::BytesSizeZero,
                "bytes size cannot be zero".to_string(),
            ));
        }
        if self.size > MAX_FIXED_BYTES {
            return Err(invalid(
                ErrorCode::BytesSizeTooLarge,
                format!(
                    "bytes size {} cannot be larger than {MAX_FIXED_BYTES}",
                    self.size
                ),
            ));
        }
        Ok(DataType::compose(
            Major::FIXED_BYTES,
            Minor((self.size - 1) as u8),
        ))
    }
}

node!(FixedBytesTypeNode);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressTypeNode {
    pub span: Span,
}

node!(AddressTypeNode);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolTypeNode {
    pub span: Span,
}

node!(BoolTypeNode);

/// Any declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeNode {
    Int(IntTypeNode),
    Fixed(FixedTypeNode),
    DynamicBytes(DynamicBytesTypeNode),
    FixedBytes(FixedBytesTypeNode),
    Address(AddressTypeNode),
    Bool(BoolTypeNode),
}

impl TypeNode {
    /// Resolves the declared type, reporting the first rule it breaks.
    pub fn data_type(&self) -> Result<DataType, TypeError> {
        match self {
            TypeNode::Int(n) => n.data_type(),
            TypeNode::Fixed(n) => n.data_type(),
            TypeNode::DynamicBytes(_) => Ok(DataType::DYNAMIC_BYTES),
            TypeNode::FixedBytes(n) => n.data_type(),
            TypeNode::Address(_) => Ok(DataType::ADDRESS),
            TypeNode::Bool(_) => Ok(DataType::BOOL),
        }
    }

    /// Same as [`TypeNode::data_type`], flattened for callers collecting
    /// diagnostics: failures yield [`DataType::BAD`] with a code and message.
    pub fn resolve_or_bad(&self) -> (DataType, Option<ErrorCode>, String) {
        match self.data_type() {
            Ok(dt) => (dt, None, String::new()),
            Err(err) => (DataType::BAD, Some(err.code), err.message),
        }
    }

    /// Builds the declaration of an encodable data type.
    ///
    /// Returns `None` for types with no declared syntax, such as pending,
    /// special or out-of-range minors.
    pub fn from_data_type(dt: DataType) -> Option<TypeNode> {
        let (major, minor) = dt.decompose();
        let bits = (minor.0 as u32 + 1) * 8;
        match major {
            Major::BOOL if minor.0 == 0 => return Some(TypeNode::Bool(BoolTypeNode::default())),
            Major::ADDRESS if minor.0 == 0 => {
                return Some(TypeNode::Address(AddressTypeNode::default()))
            }
            Major::DYNAMIC_BYTES if minor.0 == 0 => {
                return Some(TypeNode::DynamicBytes(DynamicBytesTypeNode::default()))
            }
            Major::BOOL | Major::ADDRESS | Major::DYNAMIC_BYTES => return None,
            Major::INT if minor.0 < 0x20 => {
                return Some(TypeNode::Int(IntTypeNode::new(false, bits)))
            }
            Major::UINT if minor.0 < 0x20 => {
                return Some(TypeNode::Int(IntTypeNode::new(true, bits)))
            }
            Major::FIXED_BYTES if minor.0 < 0x20 => {
                return Some(TypeNode::FixedBytes(FixedBytesTypeNode::new(
                    minor.0 as u32 + 1,
                )))
            }
            _ => {}
        }
        if minor.0 > MAX_FRACTIONAL_DIGITS {
            return None;
        }
        let (unsigned, base) = if major.is_fixed_range() {
            (false, Major::FIXED)
        } else if major.is_ufixed_range() {
            (true, Major::UFIXED)
        } else {
            return None;
        };
        let size = (major.0 - base.0) as u32 * 8 + 8;
        Some(TypeNode::Fixed(FixedTypeNode::new(
            unsigned,
            size,
            minor.0 as u32,
        )))
    }
}

impl TryFrom<DataType> for TypeNode {
    type Error = DataType;

    fn try_from(dt: DataType) -> Result<Self, Self::Error> {
        TypeNode::from_data_type(dt).ok_or(dt)
    }
}

impl Node for TypeNode {
    fn span(&self) -> Span {
        match self {
            TypeNode::Int(n) => n.span(),
            TypeNode::Fixed(n) => n.span(),
            TypeNode::DynamicBytes(n) => n.span(),
            TypeNode::FixedBytes(n) => n.span(),
            TypeNode::Address(n) => n.span(),
            TypeNode::Bool(n) => n.span(),
        }
    }

    fn set_span(&mut self, span: Span) {
        match self {
            TypeNode::Int(n) => n.set_span(span),
            TypeNode::Fixed(n) => n.set_span(span),
            TypeNode::DynamicBytes(n) => n.set_span(span),
            TypeNode::FixedBytes(n) => n.set_span(span),
            TypeNode::Address(n) => n.set_span(span),
            TypeNode::Bool(n) => n.set_span(span),
        }
    }

    fn children(&self) -> Vec<NodeRef<'_>> {
        Vec::new()
    }
}

/// Renders the declaration as written in SQL, e.g. `ufixed64x2`.
impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Int(n) => write!(f, "{}{}", n.name(), n.size),
            TypeNode::Fixed(n) => write!(f, "{}{}x{}", n.name(), n.size, n.fractional_digits),
            TypeNode::DynamicBytes(_) => f.write_str("bytes"),
            TypeNode::FixedBytes(n) => write!(f, "bytes{}", n.size),
            TypeNode::Address(_) => f.write_str("address"),
            TypeNode::Bool(_) => f.write_str("bool"),
        }
    }
}
