use super::OutputFormatter;
use crate::progress::utils::{format_bytes, format_duration};
use anyhow::Result;
use colored::*;
use filehash_core::{
    AlgorithmId, BatchResult, FileReport, HashResult, ProcessingStatus, combined_digest,
};
use serde_json::{Value, json};

/// Sort a report's results by canonical algorithm id for stable output
fn sorted_results(report: &FileReport) -> Vec<(&AlgorithmId, &HashResult)> {
    let mut results: Vec<_> = report.hashes.iter().collect();
    results.sort_by_key(|(algo, _)| algo.to_string());
    results
}

fn status_label(status: ProcessingStatus) -> &'static str {
    match status {
        ProcessingStatus::Completed => "completed",
        ProcessingStatus::Failed => "failed",
        ProcessingStatus::Skipped => "skipped",
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
    show_combined: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool, show_combined: bool) -> Self {
        Self {
            use_color,
            show_combined,
        }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &FileReport) -> Result<String> {
        let mut output = String::new();

        // File information
        output.push_str(&format!("File: {}\n", report.file_name));
        output.push_str(&format!(
            "Size: {} ({})\n",
            format_bytes(report.file_size),
            report.file_size
        ));
        output.push_str(&format!("Status: {}\n", status_label(report.status)));

        // Digest results
        if !report.hashes.is_empty() {
            output.push_str("\nDigests:\n");

            for (algo, result) in sorted_results(report) {
                let algo_str = self.colorize(algo.display_name(), |s| s.yellow());
                match (&result.digest, &result.error) {
                    (Some(digest), _) => {
                        let digest_str = self.colorize(digest, |s| s.cyan());
                        output.push_str(&format!("  {algo_str}: {digest_str}\n"));
                    }
                    (None, Some(error)) => {
                        let error_str = self.colorize(error, |s| s.red());
                        output.push_str(&format!("  {algo_str}: {error_str}\n"));
                    }
                    (None, None) => {
                        output.push_str(&format!("  {algo_str}: <no result>\n"));
                    }
                }
            }

            if self.show_combined
                && let Some(combined) = combined_digest(&report.hashes, AlgorithmId::SHA256)
            {
                let label = self.colorize("Combined (sha256)", |s| s.yellow());
                let digest_str = self.colorize(&combined, |s| s.cyan());
                output.push_str(&format!("  {label}: {digest_str}\n"));
            }
        }

        // Processing time
        output.push_str(&format!(
            "\nProcessing time: {}\n",
            format_duration(report.processing_time)
        ));

        Ok(output)
    }

    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        let mut output = String::new();

        for report in &result.reports {
            output.push_str(&self.format_report(report)?);
            output.push('\n');
        }

        output.push_str(&format!(
            "Batch: {} file(s), {} succeeded, {} failed, {} skipped in {}\n",
            result.total_files,
            result.successful,
            result.failed,
            result.skipped,
            format_duration(result.total_time)
        ));

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
    show_combined: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool, show_combined: bool) -> Self {
        Self {
            pretty,
            show_combined,
        }
    }

    fn report_value(&self, report: &FileReport) -> Value {
        let mut json_result = json!({
            "file_name": report.file_name,
            "file_size": report.file_size,
            "status": status_label(report.status),
            "processing_time_ms": report.processing_time.as_millis(),
            "digests": {},
        });

        if let Some(digests_obj) = json_result
            .get_mut("digests")
            .and_then(|v| v.as_object_mut())
        {
            for (algo, result) in sorted_results(report) {
                digests_obj.insert(
                    algo.to_string(),
                    json!({
                        "digest": result.digest,
                        "error": result.error,
                    }),
                );
            }
        }

        if self.show_combined
            && let Some(combined) = combined_digest(&report.hashes, AlgorithmId::SHA256)
        {
            json_result["combined_digest"] = json!(combined);
        }

        json_result
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &FileReport) -> Result<String> {
        let value = self.report_value(report);
        if self.pretty {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }

    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        let value = json!({
            "total_files": result.total_files,
            "successful": result.successful,
            "failed": result.failed,
            "skipped": result.skipped,
            "total_time_ms": result.total_time.as_millis(),
            "files": result.reports.iter().map(|r| self.report_value(r)).collect::<Vec<_>>(),
        });

        if self.pretty {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }
}

/// CSV formatter for tabular output, one row per (file, algorithm)
pub struct CsvFormatter;

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    const HEADERS: [&'static str; 7] = [
        "file_name",
        "file_size",
        "status",
        "algorithm",
        "digest",
        "duration_ms",
        "error",
    ];

    fn write_rows(writer: &mut csv::Writer<Vec<u8>>, report: &FileReport) -> Result<()> {
        let size = report.file_size.to_string();
        let file_time = report.processing_time.as_millis().to_string();

        if report.hashes.is_empty() {
            writer.write_record([
                report.file_name.as_str(),
                size.as_str(),
                status_label(report.status),
                "",
                "",
                file_time.as_str(),
                "",
            ])?;
            return Ok(());
        }

        for (algo, result) in sorted_results(report) {
            let algo_id = algo.to_string();
            let duration = result.duration.as_millis().to_string();
            writer.write_record([
                report.file_name.as_str(),
                size.as_str(),
                status_label(report.status),
                algo_id.as_str(),
                result.digest.as_deref().unwrap_or(""),
                duration.as_str(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }

        Ok(())
    }

    fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("failed to flush csv writer: {e}"))?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &FileReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(Self::HEADERS)?;
        Self::write_rows(&mut writer, report)?;
        Self::finish(writer)
    }

    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(Self::HEADERS)?;
        for report in &result.reports {
            Self::write_rows(&mut writer, report)?;
        }
        Self::finish(writer)
    }
}
