//! Structured logging for sqlvm-tool
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber that renders them. Logs go to stderr so command output on
//! stdout stays machine-readable.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Log format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format for development
    Pretty,
    /// JSON format (structured logging)
    Json,
    /// Compact single-line format
    Compact,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Log to the terminal only
    Stdout,
    /// Log to file only
    File,
    /// Log to both terminal and file
    Both,
}

impl LogOutput {
    pub fn parse(value: &str) -> Self {
        match value {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            _ => LogOutput::Stdout,
        }
    }
}

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn terminal_layer(format: LogFormat) -> BoxedLayer {
    let layer = fmt::layer().with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => layer.pretty().with_target(true).boxed(),
        LogFormat::Json => layer.json().with_current_span(true).boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

fn file_layer(directory: &str) -> std::io::Result<BoxedLayer> {
    std::fs::create_dir_all(directory)?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, "sqlvm-tool.log");
    Ok(fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .boxed())
}

/// Initialize the logging system from the resolved configuration.
///
/// Examples:
/// ```bash
/// # Show why a declared type was rejected
/// RUST_LOG=sqlvm_ast=debug sqlvm-tool type uint7
///
/// # Trace every codec call as JSON into ./logs
/// RUST_LOG=sqlvm_types=trace LOG_FORMAT=json LOG_OUTPUT=file sqlvm-tool encode int16 -128
/// ```
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let format = LogFormat::parse(&config.format);
    let output = LogOutput::parse(&config.output);

    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("warn"));

    let layers: Vec<BoxedLayer> = match output {
        LogOutput::Stdout => vec![terminal_layer(format)],
        LogOutput::File => vec![file_layer(&config.directory)?],
        LogOutput::Both => vec![terminal_layer(format), file_layer(&config.directory)?],
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    tracing::debug!(
        format = ?format,
        output = ?output,
        level = %config.level,
        "logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("other"), LogFormat::Compact);
    }

    #[test]
    fn test_log_output_parse() {
        assert_eq!(LogOutput::parse("file"), LogOutput::File);
        assert_eq!(LogOutput::parse("both"), LogOutput::Both);
        assert_eq!(LogOutput::parse("stdout"), LogOutput::Stdout);
        assert_eq!(LogOutput::parse(""), LogOutput::Stdout);
    }
}
