//! Rendering of audit reports.
//!
//! This module provides exporters for writing a [`Report`] as colored
//! terminal text, JSON, CSV, or Markdown.

pub mod csv;
pub mod json;
pub mod markdown;
pub mod text;

use crate::report::Report;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Human-readable terminal report
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - spreadsheet-friendly
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Switches shared by all exporters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Emit ANSI colors (text format only).
    pub color: bool,
    /// Include direct dependencies missing from `pubspec.lock`.
    pub show_unlocked: bool,
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    report: &Report,
    options: ExportOptions,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter::new(options).export(report, writer),
        ExportFormat::Json => json::JsonExporter::new(options).export(report, writer),
        ExportFormat::Csv => csv::CsvExporter::new(options).export(report, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter::new(options).export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(
    format: ExportFormat,
    report: &Report,
    options: ExportOptions,
) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, options, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(
            "markdown".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert_eq!(
            "md".parse::<ExportFormat>().unwrap(),
            ExportFormat::Markdown
        );
        assert!("invalid".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_display() {
        assert_eq!(format!("{}", ExportFormat::Text), "text");
        assert_eq!(format!("{}", ExportFormat::Json), "json");
        assert_eq!(format!("{}", ExportFormat::Csv), "csv");
        assert_eq!(format!("{}", ExportFormat::Markdown), "markdown");
    }

    #[test]
    fn test_export_to_string_is_deterministic() {
        let report = fixtures::sample_report();
        for format in [
            ExportFormat::Text,
            ExportFormat::Json,
            ExportFormat::Csv,
            ExportFormat::Markdown,
        ] {
            let first = export_to_string(format, &report, ExportOptions::default()).unwrap();
            let second = export_to_string(format, &report, ExportOptions::default()).unwrap();
            assert_eq!(first, second, "format {}", format);
        }
    }
}
