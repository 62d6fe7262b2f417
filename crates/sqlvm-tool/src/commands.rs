//! Subcommand implementations. Each returns the text to print.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use sqlvm_ast::TypeNode;
use sqlvm_types::{decimal, BigDecimal, DataType};
use tracing::{debug, info};

use crate::config::DisplayConfig;
use crate::type_name;

fn resolve(name: &str) -> Result<(TypeNode, DataType)> {
    let node = type_name::parse(name)?;
    let dt = node
        .data_type()
        .map_err(|err| anyhow!("{} ({})", err.message, err.code))?;
    debug!(name, data_type = %dt, "resolved type name");
    Ok((node, dt))
}

fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        bail!("hex string {text} contains non-hex characters");
    }
    if digits.len() % 2 != 0 {
        bail!("hex string {text} has an odd number of digits");
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte {:?}", &digits[i..i + 2]))
        })
        .collect()
}

pub fn type_info(name: &str) -> Result<String> {
    let (node, dt) = resolve(name)?;
    let (major, minor) = dt.decompose();
    Ok(format!(
        "{node}: 0x{:04x} (major 0x{:02x}, minor 0x{:02x}), {} bytes",
        dt.0,
        major.0,
        minor.0,
        dt.size()
    ))
}

pub fn range(name: &str) -> Result<String> {
    let (node, dt) = resolve(name)?;
    match dt.min_max() {
        Some(bounds) => Ok(format!("{node}: [{}, {}]", bounds.min, bounds.max)),
        None => Ok(format!("{node}: no fixed range")),
    }
}

pub fn encode(name: &str, value: &str, wrap: bool, display: &DisplayConfig) -> Result<String> {
    let (node, dt) = resolve(name)?;
    let value = BigDecimal::from_str(value).with_context(|| format!("invalid decimal {value:?}"))?;
    if let Some(bounds) = dt.min_max() {
        if !bounds.contains(&value) {
            if !wrap {
                bail!(
                    "{value} is outside {node} range [{}, {}]",
                    bounds.min,
                    bounds.max
                );
            }
            info!(%value, data_type = %dt, "encoding out-of-range value");
        }
    }
    let bytes = decimal::encode(dt, &value)?;
    Ok(display.hex(&bytes))
}

pub fn decode(name: &str, hex: &str) -> Result<String> {
    let (node, dt) = resolve(name)?;
    let bytes = parse_hex(hex)?;
    if bytes.len() != dt.size() {
        bail!(
            "{node} takes {} bytes, got {}",
            dt.size(),
            bytes.len()
        );
    }
    let value = decimal::decode(dt, &bytes)?;
    Ok(value.to_string())
}
