/*!
 * Reporting functionality for copy-for-ai
 *
 * Summarises an invocation as a console table using the tabled crate.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::payload::Payload;
use crate::types::Mode;
use crate::utils::{format_file_size, format_number};

/// Everything shown after an invocation
#[derive(Debug, Clone)]
pub struct RunReport<'a> {
    /// The delivered payload
    pub payload: &'a Payload,
    /// Where the payload went
    pub destination: String,
    /// Time taken to walk and deliver
    pub duration: Duration,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    key: String,

    #[tabled(rename = "Value")]
    value: String,
}

impl SummaryRow {
    fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// One-line confirmation, as shown to the user after copying
pub fn completion_message(report: &RunReport<'_>) -> String {
    let stats = &report.payload.statistics;
    let suffix = if stats.cancelled { " (cancelled, partial)" } else { "" };
    match report.payload.mode {
        Mode::Dump => format!(
            "Copied {} files to {} for AI context{}.",
            stats.files_processed, report.destination, suffix
        ),
        Mode::Tree => format!(
            "File tree copied to {} for AI context{}.",
            report.destination, suffix
        ),
    }
}

/// Render the summary table
pub fn generate_report(report: &RunReport<'_>) -> String {
    let payload = report.payload;
    let stats = &payload.statistics;

    let mut rows = vec![
        SummaryRow::new("📋 Mode", payload.mode.to_string()),
        SummaryRow::new("📂 Workspace", payload.workspace_root.display().to_string()),
        SummaryRow::new("📄 Files", format_number(stats.files_processed)),
    ];

    match payload.mode {
        Mode::Dump => {
            rows.push(SummaryRow::new("✅ Included", format_number(stats.included)));
            if stats.skipped_size > 0 {
                rows.push(SummaryRow::new("📏 Too Large", format_number(stats.skipped_size)));
            }
            if stats.skipped_binary > 0 {
                rows.push(SummaryRow::new("🧱 Binary", format_number(stats.skipped_binary)));
            }
            if stats.excluded > 0 {
                rows.push(SummaryRow::new("🙈 Excluded", format_number(stats.excluded)));
            }
            if stats.failed > 0 {
                rows.push(SummaryRow::new("⚠️ Errors", format_number(stats.failed)));
            }
        }
        Mode::Tree => {
            rows.push(SummaryRow::new("📁 Directories", format_number(stats.directories)));
        }
    }

    if stats.unreadable_dirs > 0 {
        rows.push(SummaryRow::new(
            "🚫 Unreadable Dirs",
            format_number(stats.unreadable_dirs),
        ));
    }

    rows.push(SummaryRow::new(
        "📦 Payload",
        format_file_size(payload.text.len() as u64),
    ));
    rows.push(SummaryRow::new(
        "🔤 LLM Tokens",
        format!(
            "{} tokens (estimated)",
            format_number(payload.text.chars().count() / 4)
        ),
    ));
    rows.push(SummaryRow::new("🎯 Destination", report.destination.clone()));
    rows.push(SummaryRow::new("⏱️ Time", format!("{:.4?}", report.duration)));
    if stats.cancelled {
        rows.push(SummaryRow::new("🛑 Cancelled", "yes"));
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));

    table.to_string()
}

/// Print the summary to stderr, keeping stdout free for the payload
pub fn print_report(report: &RunReport<'_>) {
    eprintln!("\n{}\n{}", generate_report(report), completion_message(report));
}
