//! Command handlers

pub mod download;
pub mod hash;
pub mod search;

use crate::cli::OutputFormat;
use serde::Serialize;

/// Print `value` as pretty JSON, or `text` otherwise
pub(crate) fn emit<T: Serialize>(format: OutputFormat, value: &T, text: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{text}"),
    }
    Ok(())
}
