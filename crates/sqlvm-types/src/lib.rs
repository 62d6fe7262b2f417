//! SQLVM types - scalar type encoding, three-valued logic and the decimal
//! storage codec.
//!
//! Every scalar type is packed into a 16-bit [`DataType`]. Numeric values
//! live in memory as exact [`BigDecimal`]s and are stored as fixed-width
//! two's-complement bytes via [`decimal::encode`] / [`decimal::decode`].

mod bool_value;
mod data_type;
pub mod decimal;
mod error;

pub use bigdecimal::BigDecimal;
pub use bool_value::{BoolValue, InvalidBoolValue};
pub use data_type::{
    Bounds, DataType, Major, Minor, ADDRESS_LENGTH, HASH_LENGTH, MAX_FRACTIONAL_DIGITS,
};
pub use decimal::decimal_to_u64;
pub use error::{CodecError, ErrorCode, TypeError};
