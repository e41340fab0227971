//! JSON export implementation.
//!
//! Exports audit reports in JSON format for machine-readable output.

use super::{ExportOptions, Exporter};
use crate::report::{Classification, Report, Summary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// JSON exporter implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    show_unlocked: bool,
}

impl JsonExporter {
    /// Creates a JSON exporter.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            show_unlocked: options.show_unlocked,
        }
    }
}

/// Serializable package entry for JSON output.
#[derive(Serialize)]
struct JsonPackage<'a> {
    name: &'a str,
    version: &'a str,
    source: &'a str,
    classification: Classification,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    summary: &'a Summary,
    packages: Vec<JsonPackage<'a>>,
    unused: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    unlocked: Option<&'a [String]>,
    #[serde(skip_serializing_if = "no_sdks")]
    sdks: &'a BTreeMap<String, String>,
}

fn no_sdks(sdks: &&BTreeMap<String, String>) -> bool {
    sdks.is_empty()
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &Report, writer: &mut W) -> io::Result<()> {
        let packages: Vec<JsonPackage> = report
            .reported_entries()
            .map(|e| JsonPackage {
                name: &e.name,
                version: &e.version,
                source: e.source.label(),
                classification: e.classification,
            })
            .collect();

        let export = JsonExport {
            summary: &report.summary,
            packages,
            unused: &report.unused,
            unlocked: self.show_unlocked.then_some(report.unlocked.as_slice()),
            sdks: &report.sdks,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::{clean_report, sample_report};

    fn render(report: &Report, options: ExportOptions) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter::new(options).export(report, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_export_summary() {
        let parsed = render(&sample_report(), ExportOptions::default());

        assert_eq!(parsed["summary"]["total"], 6);
        assert_eq!(parsed["summary"]["git"], 1);
        assert_eq!(parsed["summary"]["hosted"], 1);
        assert_eq!(parsed["summary"]["unused"], 1);
    }

    #[test]
    fn test_json_export_packages() {
        let parsed = render(&sample_report(), ExportOptions::default());

        let packages = parsed["packages"].as_array().unwrap();
        assert_eq!(packages.len(), 3);

        assert_eq!(packages[0]["name"], "http");
        assert_eq!(packages[0]["version"], "1.2.1");
        assert_eq!(packages[0]["source"], "hosted");
        assert_eq!(packages[0]["classification"], "hosted-used");
        assert_eq!(packages[1]["classification"], "git");
        assert_eq!(packages[2]["classification"], "unused");
    }

    #[test]
    fn test_json_export_unused_and_sdks() {
        let parsed = render(&sample_report(), ExportOptions::default());

        assert_eq!(parsed["unused"], serde_json::json!(["provider"]));
        assert_eq!(parsed["sdks"]["dart"], ">=3.3.0 <4.0.0");
        assert!(parsed.get("unlocked").is_none());
    }

    #[test]
    fn test_json_export_unlocked_opt_in() {
        let parsed = render(
            &sample_report(),
            ExportOptions {
                show_unlocked: true,
                ..ExportOptions::default()
            },
        );

        assert_eq!(parsed["unlocked"], serde_json::json!(["ghost"]));
    }

    #[test]
    fn test_json_export_clean_omits_sdks() {
        let parsed = render(&clean_report(), ExportOptions::default());

        assert_eq!(parsed["unused"].as_array().unwrap().len(), 0);
        assert!(parsed.get("sdks").is_none());
    }
}
