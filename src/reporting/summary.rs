//! Read-only report summary served to web clients.
//!
//! A summary is built once from an optional report. When there is no report
//! every field stays `None` (serialized as `null`), which is a different state
//! from a report with zero mismatches (empty maps and a total of 0).

use chrono::NaiveDateTime;
use serde::Serialize;

use super::aggregate::{MismatchCounts, StatusCounts, TypeStatusCounts};
use crate::models::mismatch::{MismatchStatus, MismatchType};
use crate::models::report::{SpotCheckRefType, SpotCheckReport};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    reference_type: Option<String>,
    report_date_time: Option<NaiveDateTime>,
    mismatch_statuses: Option<StatusCounts>,
    mismatch_types: Option<TypeStatusCounts>,
    total_mismatches: Option<u64>,
}

impl ReportSummary {
    pub fn from_report(report: Option<&SpotCheckReport>) -> Self {
        match report {
            Some(report) => Self::from_counts(
                report.reference_type(),
                report.report_date_time(),
                report.counts().clone(),
            ),
            None => Self::empty(),
        }
    }

    pub fn from_counts(
        reference_type: SpotCheckRefType,
        report_date_time: NaiveDateTime,
        counts: MismatchCounts,
    ) -> Self {
        let total = counts.total();
        Self {
            reference_type: Some(reference_type.name().to_string()),
            report_date_time: Some(report_date_time),
            mismatch_statuses: Some(counts.statuses().clone()),
            mismatch_types: Some(counts.types().clone()),
            total_mismatches: Some(total),
        }
    }

    /// The "no report available" summary.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.reference_type.is_some()
    }

    pub fn reference_type(&self) -> Option<&str> {
        self.reference_type.as_deref()
    }

    pub fn report_date_time(&self) -> Option<NaiveDateTime> {
        self.report_date_time
    }

    pub fn mismatch_statuses(&self) -> Option<&StatusCounts> {
        self.mismatch_statuses.as_ref()
    }

    pub fn mismatch_types(&self) -> Option<&TypeStatusCounts> {
        self.mismatch_types.as_ref()
    }

    pub fn total_mismatches(&self) -> Option<u64> {
        self.total_mismatches
    }

    /// Count of mismatches with the given status; 0 when absent.
    pub fn status_count(&self, status: MismatchStatus) -> u64 {
        self.mismatch_statuses
            .as_ref()
            .and_then(|m| m.get(&status))
            .copied()
            .unwrap_or(0)
    }

    fn type_status_count(&self, mismatch_type: MismatchType, status: MismatchStatus) -> u64 {
        self.mismatch_types
            .as_ref()
            .and_then(|m| m.get(&mismatch_type))
            .and_then(|inner| inner.get(&status))
            .copied()
            .unwrap_or(0)
    }

    /// NEW + EXISTING + REGRESSION mismatches of one type.
    pub fn open_mismatch_count(&self, mismatch_type: MismatchType) -> u64 {
        MismatchStatus::ALL
            .iter()
            .filter(|s| s.is_open())
            .map(|s| self.type_status_count(mismatch_type, *s))
            .sum()
    }

    /// Mismatches of one type introduced by this report minus those it
    /// resolved: NEW + REGRESSION - RESOLVED.
    pub fn net_change(&self, mismatch_type: MismatchType) -> i64 {
        let added = self.type_status_count(mismatch_type, MismatchStatus::New)
            + self.type_status_count(mismatch_type, MismatchStatus::Regression);
        let resolved = self.type_status_count(mismatch_type, MismatchStatus::Resolved);
        i64::try_from(added).unwrap_or(i64::MAX) - i64::try_from(resolved).unwrap_or(i64::MAX)
    }

    pub fn trend(&self, mismatch_type: MismatchType) -> Trend {
        Trend::from_change(self.net_change(mismatch_type))
    }

    /// Per-type open count, net change and trend for every type present in
    /// the summary, in type order.
    pub fn type_breakdown(&self) -> Vec<TypeBreakdown> {
        let Some(types) = self.mismatch_types.as_ref() else {
            return Vec::new();
        };
        types
            .keys()
            .map(|ty| TypeBreakdown {
                mismatch_type: *ty,
                open: self.open_mismatch_count(*ty),
                net_change: self.net_change(*ty),
                trend: self.trend(*ty),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn from_change(change: i64) -> Self {
        match change.signum() {
            1 => Trend::Up,
            -1 => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub mismatch_type: MismatchType,
    pub open: u64,
    pub net_change: i64,
    pub trend: Trend,
}
