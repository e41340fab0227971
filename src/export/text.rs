//! Terminal report.
//!
//! Writes one line per git, unused and hosted package, a summary block,
//! and either the unused list with an advisory or a success line.

use super::{ExportOptions, Exporter};
use crate::report::{Classification, PackageEntry, Report};
use crossterm::style::{style, Color, Stylize};
use std::io::{self, Write};

/// Human-readable exporter with optional ANSI colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter {
    color: bool,
    show_unlocked: bool,
}

impl TextExporter {
    /// Creates a text exporter.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            color: options.color,
            show_unlocked: options.show_unlocked,
        }
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.color {
            style(text).with(color).to_string()
        } else {
            text
        }
    }

    fn entry_line(&self, entry: &PackageEntry) -> Option<String> {
        match entry.classification {
            Classification::Git => Some(self.paint(
                format!("📌 {}: {} (git)", entry.name, entry.version),
                Color::DarkGrey,
            )),
            Classification::Unused => Some(self.paint(
                format!("❌ {}: version {} (unused)", entry.name, entry.version),
                Color::Red,
            )),
            Classification::HostedUsed => Some(self.paint(
                format!("📦 {}: version {}", entry.name, entry.version),
                Color::Cyan,
            )),
            Classification::Other => None,
        }
    }
}

impl Exporter for TextExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "{}",
            self.paint("🔍 Checking dependencies...".to_string(), Color::Blue)
        )?;
        writeln!(
            writer,
            "{}",
            self.paint("🔍 Analyzing dependencies...".to_string(), Color::Blue)
        )?;

        for line in report.entries.iter().filter_map(|e| self.entry_line(e)) {
            writeln!(writer, "{}", line)?;
        }

        let summary = &report.summary;
        writeln!(writer, "{}", self.paint("📊 Summary:".to_string(), Color::Blue))?;
        writeln!(
            writer,
            "{}",
            self.paint(format!("   Total dependencies: {}", summary.total), Color::Blue)
        )?;
        writeln!(
            writer,
            "{}",
            self.paint(format!("   Git dependencies: {}", summary.git), Color::Blue)
        )?;
        writeln!(
            writer,
            "{}",
            self.paint(format!("   Hosted dependencies: {}", summary.hosted), Color::Blue)
        )?;

        if report.unused.is_empty() {
            writeln!(
                writer,
                "{}",
                self.paint(
                    "✅ All dependencies appear to be in use!".to_string(),
                    Color::Green
                )
            )?;
        } else {
            writeln!(
                writer,
                "{}",
                self.paint(
                    format!("   Possibly unused packages: {}", report.unused.len()),
                    Color::Red
                )
            )?;
            writeln!(
                writer,
                "{}",
                self.paint(
                    "⚠️  The following packages do not appear in any direct import:".to_string(),
                    Color::Yellow
                )
            )?;
            for name in &report.unused {
                writeln!(writer, "{}", self.paint(format!("   - {}", name), Color::Yellow))?;
            }
            writeln!(
                writer,
                "{}",
                self.paint(
                    "   You may consider removing them, but check that they are not used indirectly."
                        .to_string(),
                    Color::Yellow
                )
            )?;
        }

        if self.show_unlocked && !report.unlocked.is_empty() {
            writeln!(
                writer,
                "{}",
                self.paint(
                    format!("⚠️  Declared but not locked: {}", report.unlocked.len()),
                    Color::Yellow
                )
            )?;
            for name in &report.unlocked {
                writeln!(writer, "{}", self.paint(format!("   - {}", name), Color::Yellow))?;
            }
            writeln!(
                writer,
                "{}",
                self.paint(
                    "   Run 'flutter pub get' or 'dart pub get' to update pubspec.lock.".to_string(),
                    Color::Yellow
                )
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::{clean_report, sample_report};

    fn render(report: &Report, options: ExportOptions) -> String {
        let mut output = Vec::new();
        TextExporter::new(options).export(report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_export_lines() {
        let text = render(&sample_report(), ExportOptions::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "🔍 Checking dependencies...");
        assert_eq!(lines[1], "🔍 Analyzing dependencies...");
        // lock order: http, local_utils (other, no line), my_fork, provider
        assert_eq!(lines[2], "📦 http: version 1.2.1");
        assert_eq!(lines[3], "📌 my_fork: 0.3.0 (git)");
        assert_eq!(lines[4], "❌ provider: version 6.1.2 (unused)");
        assert_eq!(lines[5], "📊 Summary:");
        assert_eq!(lines[6], "   Total dependencies: 6");
        assert_eq!(lines[7], "   Git dependencies: 1");
        assert_eq!(lines[8], "   Hosted dependencies: 1");
        assert_eq!(lines[9], "   Possibly unused packages: 1");
        assert!(lines.contains(&"   - provider"));
    }

    #[test]
    fn test_text_export_skips_exempt_and_other() {
        let text = render(&sample_report(), ExportOptions::default());

        assert!(!text.contains("flutter:"));
        assert!(!text.contains("local_utils"));
    }

    #[test]
    fn test_text_export_clean() {
        let text = render(&clean_report(), ExportOptions::default());

        assert!(text.contains("✅ All dependencies appear to be in use!"));
        assert!(!text.contains("Possibly unused"));
    }

    #[test]
    fn test_text_export_unlocked_opt_in() {
        let report = sample_report();

        let text = render(&report, ExportOptions::default());
        assert!(!text.contains("ghost"));

        let text = render(
            &report,
            ExportOptions {
                show_unlocked: true,
                ..ExportOptions::default()
            },
        );
        assert!(text.contains("Declared but not locked: 1"));
        assert!(text.contains("   - ghost"));
    }

    #[test]
    fn test_text_export_plain_has_no_escape_codes() {
        let text = render(&sample_report(), ExportOptions::default());
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_text_export_starts_with_banner() {
        let text = render(&clean_report(), ExportOptions::default());
        assert!(text.starts_with("🔍 Checking dependencies...\n"));
    }
}
