//! Rendering of command results.

pub mod json;
pub mod pretty;

use crate::cli::OutputFormat;

/// Renders `value` as compact JSON, or through `pretty` for humans.
pub fn render<T, F>(value: &T, format: OutputFormat, pretty: F) -> String
where
    T: serde::Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => pretty(value),
    }
}
