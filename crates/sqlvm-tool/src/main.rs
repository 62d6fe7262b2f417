//! sqlvm-tool entry point.
//!
//! Resolves SQL type names and runs the decimal storage codec from the
//! command line:
//!
//! ```bash
//! sqlvm-tool type ufixed64x2
//! sqlvm-tool range int8
//! sqlvm-tool encode int16 -128
//! sqlvm-tool decode int16 0xff80
//! ```

mod cli;
mod commands;
mod config;
mod logging;
mod type_name;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.logging)?;

    let output = match &cli.command {
        Command::Type { name } => commands::type_info(name)?,
        Command::Range { name } => commands::range(name)?,
        Command::Encode { name, value, wrap } => {
            commands::encode(name, value, *wrap, &config.display)?
        }
        Command::Decode { name, hex } => commands::decode(name, hex)?,
    };
    println!("{output}");
    Ok(())
}
