//! Error codes and typed errors shared by the type system and codec.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DataType;

/// Error codes surfaced to the caller of a statement.
///
/// The numbering is owned by the VM; this crate only picks among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    IntSizeNotMultipleOf8,
    IntSizeZero,
    IntSizeTooLarge,
    UintSizeNotMultipleOf8,
    UintSizeZero,
    UintSizeTooLarge,
    FixedSizeNotMultipleOf8,
    FixedSizeZero,
    FixedSizeTooLarge,
    UfixedSizeNotMultipleOf8,
    UfixedSizeZero,
    UfixedSizeTooLarge,
    FixedFractionalDigitsOutOfRange,
    UfixedFractionalDigitsOutOfRange,
    BytesSizeZero,
    BytesSizeTooLarge,
    NegDecimalToUint64,
    DecimalEncode,
    DecimalDecode,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::IntSizeNotMultipleOf8 => "int_size_not_multiple_of_8",
            ErrorCode::IntSizeZero => "int_size_zero",
            ErrorCode::IntSizeTooLarge => "int_size_too_large",
            ErrorCode::UintSizeNotMultipleOf8 => "uint_size_not_multiple_of_8",
            ErrorCode::UintSizeZero => "uint_size_zero",
            ErrorCode::UintSizeTooLarge => "uint_size_too_large",
            ErrorCode::FixedSizeNotMultipleOf8 => "fixed_size_not_multiple_of_8",
            ErrorCode::FixedSizeZero => "fixed_size_zero",
            ErrorCode::FixedSizeTooLarge => "fixed_size_too_large",
            ErrorCode::UfixedSizeNotMultipleOf8 => "ufixed_size_not_multiple_of_8",
            ErrorCode::UfixedSizeZero => "ufixed_size_zero",
            ErrorCode::UfixedSizeTooLarge => "ufixed_size_too_large",
            ErrorCode::FixedFractionalDigitsOutOfRange => "fixed_fractional_digits_out_of_range",
            ErrorCode::UfixedFractionalDigitsOutOfRange => {
                "ufixed_fractional_digits_out_of_range"
            }
            ErrorCode::BytesSizeZero => "bytes_size_zero",
            ErrorCode::BytesSizeTooLarge => "bytes_size_too_large",
            ErrorCode::NegDecimalToUint64 => "neg_decimal_to_uint64",
            ErrorCode::DecimalEncode => "decimal_encode",
            ErrorCode::DecimalDecode => "decimal_decode",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared type that failed validation.
///
/// Carries the code for aggregation and a message for the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TypeError {
    pub code: ErrorCode,
    pub message: String,
}

impl TypeError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failures of the decimal codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("cannot convert negative decimal {0} to uint64")]
    NegativeToUint64(String),

    #[error("no decimal encoding for data type {0}")]
    Encode(DataType),

    #[error("no decimal decoding for data type {0}")]
    Decode(DataType),
}

impl CodecError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CodecError::NegativeToUint64(_) => ErrorCode::NegDecimalToUint64,
            CodecError::Encode(_) => ErrorCode::DecimalEncode,
            CodecError::Decode(_) => ErrorCode::DecimalDecode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_codes() {
        assert_eq!(
            CodecError::NegativeToUint64("-1".to_string()).code(),
            ErrorCode::NegDecimalToUint64
        );
        assert_eq!(CodecError::Encode(DataType::BOOL).code(), ErrorCode::DecimalEncode);
        assert_eq!(CodecError::Decode(DataType::NULL).code(), ErrorCode::DecimalDecode);
    }

    #[test]
    fn test_error_code_serializes_as_name() {
        let json = serde_json::to_string(&ErrorCode::UintSizeZero).unwrap();
        assert_eq!(json, "\"uint_size_zero\"");
        assert_eq!(ErrorCode::UintSizeZero.to_string(), "uint_size_zero");
    }

    #[test]
    fn test_type_error_displays_message() {
        let err = TypeError::new(ErrorCode::BytesSizeZero, "bytes size cannot be zero");
        assert_eq!(err.to_string(), "bytes size cannot be zero");
    }
}
