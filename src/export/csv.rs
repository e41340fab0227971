//! CSV export implementation.
//!
//! Exports audit reports in CSV format for spreadsheet use.

use super::{ExportOptions, Exporter};
use crate::report::Report;
use std::io::{self, Write};

/// CSV exporter implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter {
    show_unlocked: bool,
}

impl CsvExporter {
    /// Creates a CSV exporter.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            show_unlocked: options.show_unlocked,
        }
    }

    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        // Write header
        writeln!(writer, "name,version,source,classification")?;

        // Every classified entry, including `other`
        for entry in &report.entries {
            writeln!(
                writer,
                "{},{},{},{}",
                Self::escape_field(&entry.name),
                Self::escape_field(&entry.version),
                Self::escape_field(entry.source.label()),
                entry.classification.label()
            )?;
        }

        if self.show_unlocked {
            for name in &report.unlocked {
                writeln!(writer, "{},,,unlocked", Self::escape_field(name))?;
            }
        }

        Ok(())
    }
}
