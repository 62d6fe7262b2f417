//! Command-line interface for sqlvm-tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sqlvm-tool")]
#[command(about = "Inspect SQLVM data types and run the decimal storage codec", long_about = None)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a type name to its 16-bit encoding
    Type {
        /// Type name, e.g. uint256, ufixed64x2, bytes32
        name: String,
    },
    /// Print the value range of an integer-like type
    Range { name: String },
    /// Encode a decimal value into storage bytes
    Encode {
        name: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Encode even when the value is outside the type's range
        #[arg(long)]
        wrap: bool,
    },
    /// Decode hex storage bytes into a decimal value
    Decode { name: String, hex: String },
}
