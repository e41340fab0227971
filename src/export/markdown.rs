//! Markdown export implementation.
//!
//! Exports audit reports in Markdown format for documentation and reporting.

use super::{ExportOptions, Exporter};
use crate::report::Report;
use std::io::{self, Write};

/// Markdown exporter implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExporter {
    show_unlocked: bool,
}

impl MarkdownExporter {
    /// Creates a Markdown exporter.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            show_unlocked: options.show_unlocked,
        }
    }
}

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Dependency Audit Report")?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Total Dependencies | {} |", report.summary.total)?;
        writeln!(writer, "| Git | {} |", report.summary.git)?;
        writeln!(writer, "| Hosted | {} |", report.summary.hosted)?;
        writeln!(writer, "| Possibly Unused | {} |", report.summary.unused)?;
        if self.show_unlocked {
            writeln!(writer, "| Not Locked | {} |", report.unlocked.len())?;
        }
        writeln!(writer)?;

        if !report.sdks.is_empty() {
            let sdks: Vec<String> = report
                .sdks
                .iter()
                .map(|(name, constraint)| format!("{} `{}`", name, constraint))
                .collect();
            writeln!(writer, "**SDKs:** {}", sdks.join(", "))?;
            writeln!(writer)?;
        }

        // Classified packages
        let entries: Vec<_> = report.reported_entries().collect();
        if !entries.is_empty() {
            writeln!(writer, "## Packages")?;
            writeln!(writer)?;
            writeln!(writer, "| Package | Version | Source | Status |")?;
            writeln!(writer, "|---------|---------|--------|--------|")?;
            for entry in &entries {
                writeln!(
                    writer,
                    "| {} | {} | {} | {} |",
                    entry.name, entry.version, entry.source, entry.classification
                )?;
            }
            writeln!(writer)?;
        }

        // Issues
        if report.unused.is_empty() {
            writeln!(writer, "All dependencies appear to be in use.")?;
            writeln!(writer)?;
        } else {
            writeln!(writer, "## Possibly Unused ({})", report.unused.len())?;
            writeln!(writer)?;
            writeln!(
                writer,
                "The following packages do not appear in any direct import:"
            )?;
            writeln!(writer)?;
            for name in &report.unused {
                writeln!(writer, "- `{}`", name)?;
            }
            writeln!(writer)?;
        }

        if self.show_unlocked && !report.unlocked.is_empty() {
            writeln!(writer, "## Declared but Not Locked ({})", report.unlocked.len())?;
            writeln!(writer)?;
            for name in &report.unlocked {
                writeln!(writer, "- `{}`", name)?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by pubscope*")?;

        Ok(())
    }
}
