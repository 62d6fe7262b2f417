//! Parses SQL type names such as `uint256` or `ufixed64x2` into type nodes.
//!
//! Only the shape of the name is checked here. Size limits are reported by
//! [`TypeNode::data_type`] so the tool shows the same diagnostics analysis
//! would.

use sqlvm_ast::{
    AddressTypeNode, BoolTypeNode, DynamicBytesTypeNode, FixedBytesTypeNode, FixedTypeNode,
    IntTypeNode, TypeNode,
};
use thiserror::Error;

const DEFAULT_INT_BITS: u32 = 256;
const DEFAULT_FIXED_BITS: u32 = 128;
const DEFAULT_FIXED_DIGITS: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeNameError {
    #[error("unknown type name: {0}")]
    Unknown(String),

    #[error("invalid number {number:?} in type name {name}")]
    InvalidNumber { name: String, number: String },
}

fn number(name: &str, digits: &str) -> Result<u32, TypeNameError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TypeNameError::InvalidNumber {
            name: name.to_string(),
            number: digits.to_string(),
        });
    }
    digits.parse().map_err(|_| TypeNameError::InvalidNumber {
        name: name.to_string(),
        number: digits.to_string(),
    })
}

fn fixed(name: &str, unsigned: bool, rest: &str) -> Result<TypeNode, TypeNameError> {
    let (size, digits) = if rest.is_empty() {
        (DEFAULT_FIXED_BITS, DEFAULT_FIXED_DIGITS)
    } else {
        let (m, n) = rest
            .split_once('x')
            .ok_or_else(|| TypeNameError::Unknown(name.to_string()))?;
        (number(name, m)?, number(name, n)?)
    };
    Ok(TypeNode::Fixed(FixedTypeNode::new(unsigned, size, digits)))
}

fn int(name: &str, unsigned: bool, rest: &str) -> Result<TypeNode, TypeNameError> {
    let size = if rest.is_empty() {
        DEFAULT_INT_BITS
    } else {
        number(name, rest)?
    };
    Ok(TypeNode::Int(IntTypeNode::new(unsigned, size)))
}

/// Parses a type name. Matching is case-insensitive.
pub fn parse(name: &str) -> Result<TypeNode, TypeNameError> {
    let lower = name.trim().to_ascii_lowercase();
    let name = lower.as_str();
    match name {
        "bool" => return Ok(TypeNode::Bool(BoolTypeNode::default())),
        "address" => return Ok(TypeNode::Address(AddressTypeNode::default())),
        "bytes" => return Ok(TypeNode::DynamicBytes(DynamicBytesTypeNode::default())),
        _ => {}
    }
    if let Some(rest) = name.strip_prefix("ufixed") {
        fixed(name, true, rest)
    } else if let Some(rest) = name.strip_prefix("fixed") {
        fixed(name, false, rest)
    } else if let Some(rest) = name.strip_prefix("uint") {
        int(name, true, rest)
    } else if let Some(rest) = name.strip_prefix("int") {
        int(name, false, rest)
    } else if let Some(rest) = name.strip_prefix("bytes") {
        Ok(TypeNode::FixedBytes(FixedBytesTypeNode::new(number(name, rest)?)))
    } else {
        Err(TypeNameError::Unknown(name.to_string()))
    }
}
