/*!
 * Reporting functionality for filebundle
 *
 * Renders the outcome of a bundling request as console tables using the
 * tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::BundleResult;
use crate::utils::format_file_size;

/// Skipped entries listed in full up to this many; beyond it only a count
const MAX_SKIPPED_ROWS: usize = 25;

/// Everything shown in a run report
#[derive(Debug, Clone)]
pub struct BundleReport<'a> {
    /// Where the bundle went
    pub destination: String,
    /// Time taken to bundle
    pub duration: Duration,
    /// The bundling result
    pub result: &'a BundleResult,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    /// Single status line, e.g. `Included: 2 | Skipped: 1 | Total: 3`
    StatusLine,
}

/// Report generator for bundle results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &BundleReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
            ReportFormat::StatusLine => report.result.status_line(),
        }
    }

    /// Print the report to stderr so stdout stays clean for the bundle
    pub fn print_report(&self, report: &BundleReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &BundleReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.result.stats;
        let chars = report.result.output.chars().count();

        let rows = vec![
            SummaryRow {
                key: "📂 Output".to_string(),
                value: report.destination.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "✅ Included".to_string(),
                value: self.format_number(stats.included),
            },
            SummaryRow {
                key: "🚫 Skipped".to_string(),
                value: self.format_number(stats.skipped),
            },
            SummaryRow {
                key: "📄 Total".to_string(),
                value: self.format_number(stats.total),
            },
            SummaryRow {
                key: "📦 Bundle Size".to_string(),
                value: format_file_size(report.result.output.len() as u64),
            },
            SummaryRow {
                key: "🔢 LLM Tokens".to_string(),
                value: format!("{} tokens (estimated)", self.format_number(chars / 4)),
            },
        ];

        self.style(Table::new(rows))
    }

    fn create_skipped_table(&self, report: &BundleReport) -> String {
        #[derive(Tabled)]
        struct SkippedRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Reason")]
            reason: String,
        }

        let skipped = &report.result.files.skipped;
        let mut rows: Vec<SkippedRow> = skipped
            .iter()
            .take(MAX_SKIPPED_ROWS)
            .map(|entry| SkippedRow {
                path: entry.path.clone(),
                reason: entry.reason.to_string(),
            })
            .collect();

        if skipped.len() > MAX_SKIPPED_ROWS {
            rows.push(SkippedRow {
                path: format!("... and {} more", skipped.len() - MAX_SKIPPED_ROWS),
                reason: String::new(),
            });
        }

        self.style(Table::new(rows))
    }

    fn style(&self, mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &BundleReport) -> String {
        let summary = format!("✅  BUNDLE COMPLETE\n{}", self.create_summary_table(report));

        if report.result.files.skipped.is_empty() {
            return summary;
        }

        format!(
            "🚫  SKIPPED FILES\n{}\n\n{}",
            self.create_skipped_table(report),
            summary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BundleFileLists, BundleStats, SkipReason, SkippedFile};

    fn result_with_skips(skips: usize) -> BundleResult {
        BundleResult {
            output: "a.txt:\nhello".to_string(),
            stats: BundleStats {
                included: 1,
                skipped: skips,
                total: skips + 1,
            },
            files: BundleFileLists {
                included: vec!["a.txt".to_string()],
                skipped: (0..skips)
                    .map(|i| SkippedFile {
                        path: format!("img{}.png", i),
                        reason: SkipReason::IgnoredExtension,
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_status_line() {
        let result = result_with_skips(1);
        let report = BundleReport {
            destination: "stdout".to_string(),
            duration: Duration::from_millis(5),
            result: &result,
        };
        assert_eq!(
            Reporter::new(ReportFormat::StatusLine).generate_report(&report),
            "Included: 1 | Skipped: 1 | Total: 2"
        );
    }

    #[test]
    fn test_console_report_lists_skipped_files() {
        let result = result_with_skips(2);
        let report = BundleReport {
            destination: "stdout".to_string(),
            duration: Duration::from_millis(5),
            result: &result,
        };
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report);
        assert!(text.contains("SKIPPED FILES"));
        assert!(text.contains("img1.png"));
        assert!(text.contains("ignored extension"));
        assert!(text.contains("BUNDLE COMPLETE"));
    }

    #[test]
    fn test_console_report_truncates_long_skip_lists() {
        let result = result_with_skips(MAX_SKIPPED_ROWS + 3);
        let report = BundleReport {
            destination: "out.txt".to_string(),
            duration: Duration::from_millis(5),
            result: &result,
        };
        let text = Reporter::new(ReportFormat::ConsoleTable).generate_report(&report);
        assert!(text.contains("... and 3 more"));
        assert!(!text.contains(&format!("img{}.png", MAX_SKIPPED_ROWS)));
    }

    #[test]
    fn test_format_number() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        assert_eq!(reporter.format_number(999), "999");
        assert_eq!(reporter.format_number(1_500), "1.5K");
        assert_eq!(reporter.format_number(2_000_000), "2.0M");
    }
}
