use console::style;

use super::series::{entry_diff, EntryDiff};
use super::summary::{ReportSummary, Trend};
use crate::models::mismatch::MismatchStatus;

/// Render one summary as a styled terminal block.
pub fn format_summary(summary: &ReportSummary) -> String {
    let (Some(ref_type), Some(ts), Some(total)) = (
        summary.reference_type(),
        summary.report_date_time(),
        summary.total_mismatches(),
    ) else {
        return format!("{}\n", style("No report available").dim());
    };

    let mut out = format!(
        "{} {} {}\n",
        style("▶").green().bold(),
        style(ref_type).cyan().bold(),
        style(ts.format("%-m/%d/%Y %H:%M")).white(),
    );
    out.push_str(&format!("  {} {}\n", style("Total mismatches:").dim(), style(total).bold()));

    for status in MismatchStatus::ALL {
        let count = summary.status_count(status);
        if count > 0 {
            out.push_str(&format!("  {:<12} {}\n", status.as_str(), count));
        }
    }

    let breakdown = summary.type_breakdown();
    if !breakdown.is_empty() {
        out.push_str(&format!("\n  {:<26} {:>6} {:>7}\n", style("Type").dim(), style("Open").dim(), style("Change").dim()));
        for row in breakdown {
            let arrow = match row.trend {
                Trend::Up => style("▲").red().to_string(),
                Trend::Down => style("▼").green().to_string(),
                Trend::Flat => style("–").dim().to_string(),
            };
            out.push_str(&format!(
                "  {:<26} {:>6} {:>6} {}\n",
                row.mismatch_type.as_str(),
                row.open,
                row.net_change.abs(),
                arrow,
            ));
        }
    }
    out
}

/// Render summaries (newest first) as a table with the change in total
/// mismatches against the previous report.
pub fn format_summary_table(summaries: &[&ReportSummary]) -> String {
    let mut out = format!(
        "{:<20} {:<20} {:>8} {:>6}\n",
        style("Report").dim(),
        style("Reference").dim(),
        style("Total").dim(),
        style("Δ").dim(),
    );
    for (idx, summary) in summaries.iter().enumerate() {
        let (Some(ts), Some(total)) = (summary.report_date_time(), summary.total_mismatches()) else {
            continue;
        };
        let previous = summaries
            .get(idx + 1)
            .and_then(|s| s.total_mismatches());
        let delta = match previous {
            Some(prev) => {
                let label = entry_diff(total, prev);
                match EntryDiff::classify(total, prev) {
                    EntryDiff::Positive => style(label).red().to_string(),
                    EntryDiff::Negative => style(label).green().to_string(),
                    EntryDiff::Hidden => label,
                }
            }
            None => String::new(),
        };
        out.push_str(&format!(
            "{:<20} {:<20} {:>8} {:>6}\n",
            ts.format("%Y-%m-%d %H:%M"),
            summary.reference_type().unwrap_or("-"),
            total,
            delta,
        ));
    }
    out
}
