use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::model::RegistrationRecord;
use crate::registrar::ScanSummary;

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub annotation: String,
    pub summary: ScanSummary,
    pub duration_ms: u64,
    pub records: Vec<RegistrationRecord>,
}

pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("annotation: {}\n", report.annotation));
            out.push_str(&format!("occurrences: {}\n", report.summary.occurrences));
            out.push_str(&format!("records: {}\n", report.summary.records));
            out.push_str(&format!(
                "resolution_failures: {}\n",
                report.summary.resolution_failures
            ));
            out.push_str(&format!("duration_ms: {}\n", report.duration_ms));
            for r in &report.records {
                out.push_str(&format!(
                    "- {} methods={} fields={}\n",
                    r.class_name, r.include_methods, r.include_fields
                ));
            }
            out
        }
    })
}

/// Writes to `output` when given, else to stdout.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
    } else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
