//! Command-line document checker, behind the `cli` Cargo feature.
//!
//! `geocfg <file>` loads a configuration document, reports reconciliation
//! diagnostics and business-rule violations, and optionally verifies that a
//! load/save cycle would preserve the document. Output is human-readable
//! text or `--json` for tooling.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::diff::{DiffReport, diff};
use crate::document::ConfigDocument;
use crate::error::GeocfgError;
use crate::file;

#[derive(Debug, Parser)]
#[command(name = "geocfg", version, about = "Check a service configuration document")]
pub struct CheckArgs {
    /// Path to the configuration document.
    pub file: PathBuf,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Also verify that a load/save cycle preserves the document.
    #[arg(long)]
    pub round_trip: bool,
}

/// Everything the check learned about one document.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub missing: Vec<String>,
    pub wrong_type: Vec<String>,
    pub invalid: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_trip: Option<DiffReport>,
}

impl CheckReport {
    /// Whether a save would be allowed: no business-rule violations and, if
    /// checked, a lossless round trip.
    pub fn passes(&self) -> bool {
        self.invalid.is_empty()
            && self
                .round_trip
                .as_ref()
                .is_none_or(DiffReport::is_lossless)
    }
}

/// Load the document and build the report.
pub fn run(args: &CheckArgs) -> Result<CheckReport, GeocfgError> {
    let raw = file::read_document(&args.file)?;
    let mut document = ConfigDocument::default();
    let diagnostics = document.apply(&raw);
    let round_trip = args
        .round_trip
        .then(|| diff(&raw, &document.to_value()).without_flagged(&diagnostics.all()));
    Ok(CheckReport {
        missing: diagnostics.missing,
        wrong_type: diagnostics.wrong_type,
        invalid: document.invalid_fields(),
        round_trip,
    })
}

/// Render a report for the terminal.
pub fn render(report: &CheckReport, json: bool) -> String {
    if json {
        return match serde_json::to_string_pretty(report) {
            Ok(rendered) => rendered,
            Err(e) => format!("{{\"error\": \"{e}\"}}"),
        };
    }

    let mut out = String::new();
    render_list(&mut out, "missing", &report.missing);
    render_list(&mut out, "wrong type", &report.wrong_type);
    render_list(&mut out, "invalid", &report.invalid);
    if let Some(round_trip) = &report.round_trip {
        if round_trip.is_lossless() {
            out.push_str("round trip: lossless\n");
        } else {
            out.push_str("round trip: LOSSY\n");
            for entry in &round_trip.removed {
                out.push_str(&format!("  removed {}\n", entry.path));
            }
            for entry in &round_trip.changed {
                out.push_str(&format!("  changed {}\n", entry.path));
            }
        }
    }
    if report.passes() && report.missing.is_empty() && report.wrong_type.is_empty() {
        out.push_str("ok\n");
    }
    out
}

fn render_list(out: &mut String, label: &str, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    out.push_str(&format!("{label} ({}):\n", paths.len()));
    for path in paths {
        out.push_str(&format!("  - {path}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::SAMPLE_YAML;
    use std::fs;
    use tempfile::TempDir;

    fn args(path: PathBuf) -> CheckArgs {
        CheckArgs {
            file: path,
            json: false,
            round_trip: true,
        }
    }

    #[test]
    fn clean_document_passes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, SAMPLE_YAML).unwrap();
        let report = run(&args(path)).unwrap();
        assert!(report.passes());
        assert!(report.missing.is_empty());
        assert!(report.round_trip.as_ref().unwrap().is_lossless());
        let rendered = render(&report, false);
        assert!(rendered.contains("round trip: lossless"));
        assert!(rendered.contains("ok"));
    }

    #[test]
    fn sparse_document_reports_missing_and_blocks_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "server: {url: http://svc}\n").unwrap();
        let report = run(&args(path)).unwrap();
        assert!(!report.missing.is_empty());
        // defaults carry empty identification, which blocks a save
        assert!(report.invalid.contains(&"metadata.identification.title".to_string()));
        assert!(!report.passes());
    }

    #[test]
    fn json_output_is_parseable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, SAMPLE_YAML).unwrap();
        let report = run(&args(path)).unwrap();
        let rendered = render(&report, true);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value.get("invalid").unwrap().as_array().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = run(&args(dir.path().join("absent.yml")));
        assert!(matches!(result, Err(GeocfgError::Io { .. })));
    }
}
