//! Chart series across a run of report summaries.
//!
//! Inputs are ordered newest first, the order report listings use. Every
//! series is returned oldest first so it can be plotted left to right.
//! Summaries without a report are skipped.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::summary::ReportSummary;
use crate::models::mismatch::{MismatchStatus, MismatchType, TypeGroup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<u64>,
}

fn oldest_first<'a>(summaries: &'a [&'a ReportSummary]) -> impl Iterator<Item = &'a ReportSummary> {
    summaries.iter().rev().copied().filter(|s| s.is_available())
}

/// Resolved, New/Regression and Existing counts per report.
pub fn status_series(summaries: &[&ReportSummary]) -> Vec<Series> {
    let mut resolved = Vec::new();
    let mut new_regression = Vec::new();
    let mut existing = Vec::new();
    for summary in oldest_first(summaries) {
        resolved.push(summary.status_count(MismatchStatus::Resolved));
        new_regression.push(
            summary.status_count(MismatchStatus::New) + summary.status_count(MismatchStatus::Regression),
        );
        existing.push(summary.status_count(MismatchStatus::Existing));
    }
    vec![
        Series { name: "Resolved".into(), data: resolved },
        Series { name: "New/Regression".into(), data: new_regression },
        Series { name: "Existing".into(), data: existing },
    ]
}

pub fn report_date_series(summaries: &[&ReportSummary]) -> Vec<NaiveDateTime> {
    oldest_first(summaries)
        .filter_map(|s| s.report_date_time())
        .collect()
}

/// Open mismatch count of every chart group per report.
pub fn type_group_series(summaries: &[&ReportSummary]) -> Vec<Series> {
    TypeGroup::ALL
        .iter()
        .map(|group| Series {
            name: group.label().to_string(),
            data: oldest_first(summaries)
                .map(|summary| {
                    MismatchType::ALL
                        .iter()
                        .filter(|ty| ty.group() == *group)
                        .map(|ty| summary.open_mismatch_count(*ty))
                        .sum()
                })
                .collect(),
        })
        .collect()
}

/// Change between two consecutive report counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDiff {
    Positive,
    Negative,
    Hidden,
}

impl EntryDiff {
    pub fn classify(current: u64, previous: u64) -> Self {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => EntryDiff::Positive,
            std::cmp::Ordering::Less => EntryDiff::Negative,
            std::cmp::Ordering::Equal => EntryDiff::Hidden,
        }
    }
}

/// Signed difference label, e.g. `+3` or `-2`; empty when unchanged.
pub fn entry_diff(current: u64, previous: u64) -> String {
    match EntryDiff::classify(current, previous) {
        EntryDiff::Positive => format!("+{}", current - previous),
        EntryDiff::Negative => format!("-{}", previous - current),
        EntryDiff::Hidden => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mismatch::MismatchRecord;
    use crate::models::report::{ReportId, SpotCheckRefType, SpotCheckReport};
    use MismatchStatus::*;
    use MismatchType::*;

    fn summary(ts: &str, records: &[(MismatchType, MismatchStatus)]) -> ReportSummary {
        let id = ReportId::new(SpotCheckRefType::LbdcDaybreak, ts.parse().unwrap());
        let report = SpotCheckReport::new(
            id,
            records.iter().map(|(t, s)| MismatchRecord::new(*t, *s)).collect(),
        );
        ReportSummary::from_report(Some(&report))
    }

    #[test]
    fn test_status_series_oldest_first() {
        let newer = summary("2015-03-02T00:00:00", &[(BillTitle, New), (BillTitle, Regression), (BillAction, Existing)]);
        let older = summary("2015-03-01T00:00:00", &[(BillTitle, Resolved)]);
        let series = status_series(&[&newer, &older]);
        assert_eq!(series[0], Series { name: "Resolved".into(), data: vec![1, 0] });
        assert_eq!(series[1], Series { name: "New/Regression".into(), data: vec![0, 2] });
        assert_eq!(series[2], Series { name: "Existing".into(), data: vec![0, 1] });
    }

    #[test]
    fn test_report_dates_skip_absent_reports() {
        let newer = summary("2015-03-02T00:00:00", &[]);
        let missing = ReportSummary::empty();
        let dates = report_date_series(&[&newer, &missing]);
        assert_eq!(dates, vec!["2015-03-02T00:00:00".parse::<NaiveDateTime>().unwrap()]);
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        let series = status_series(&[]);
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.data.is_empty()));
        assert!(report_date_series(&[]).is_empty());
    }

    #[test]
    fn test_type_group_series_merges_types() {
        let s = summary(
            "2015-03-02T00:00:00",
            &[(BillCosponsor, New), (BillMultisponsor, Existing), (BillMultisponsor, Resolved), (BillSponsor, New)],
        );
        let series = type_group_series(&[&s]);
        let co = series.iter().find(|x| x.name == "Co/Multi Sponsor").unwrap();
        assert_eq!(co.data, vec![2]);
        let sponsor = series.iter().find(|x| x.name == "Sponsor").unwrap();
        assert_eq!(sponsor.data, vec![1]);
        assert_eq!(series.len(), TypeGroup::ALL.len());
    }

    #[test]
    fn test_entry_diff() {
        assert_eq!(entry_diff(5, 2), "+3");
        assert_eq!(entry_diff(2, 4), "-2");
        assert_eq!(entry_diff(7, 7), "");
        assert_eq!(EntryDiff::classify(0, 0), EntryDiff::Hidden);
        assert_eq!(EntryDiff::classify(1, 0), EntryDiff::Positive);
        assert_eq!(EntryDiff::classify(0, 1), EntryDiff::Negative);
    }
}
