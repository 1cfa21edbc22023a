//! Output formatting for batch results

mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter};

use anyhow::Result;
use filehash_core::{BatchResult, FileReport};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }

    /// File extension for exported output
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a single file report
    fn format_report(&self, report: &FileReport) -> Result<String>;

    /// Format a whole batch
    fn format_batch(&self, result: &BatchResult) -> Result<String> {
        // Default implementation concatenates per-file reports
        let formatted: Result<Vec<String>> =
            result.reports.iter().map(|r| self.format_report(r)).collect();

        Ok(formatted?.join("\n"))
    }
}

/// Create a formatter based on output format
pub fn create_formatter(
    format: OutputFormat,
    use_color: bool,
    show_combined: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color, show_combined)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true, show_combined)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
