use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::mismatch::{MismatchRecord, RawMismatch};
use crate::errors::SpotcheckError;
use crate::reporting::aggregate::{self, MismatchCounts, StatusCounts, TypeStatusCounts};

/// External reference source a report was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotCheckRefType {
    LbdcDaybreak,
    LbdcActiveList,
    LbdcCalendarAlert,
    LbdcAgendaAlert,
    LbdcScrapedBill,
}

impl SpotCheckRefType {
    pub const ALL: [SpotCheckRefType; 5] = [
        SpotCheckRefType::LbdcDaybreak,
        SpotCheckRefType::LbdcActiveList,
        SpotCheckRefType::LbdcCalendarAlert,
        SpotCheckRefType::LbdcAgendaAlert,
        SpotCheckRefType::LbdcScrapedBill,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::LbdcDaybreak => "LBDC_DAYBREAK",
            Self::LbdcActiveList => "LBDC_ACTIVE_LIST",
            Self::LbdcCalendarAlert => "LBDC_CALENDAR_ALERT",
            Self::LbdcAgendaAlert => "LBDC_AGENDA_ALERT",
            Self::LbdcScrapedBill => "LBDC_SCRAPED_BILL",
        }
    }
}

impl fmt::Display for SpotCheckRefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpotCheckRefType {
    type Err = SpotcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| SpotcheckError::InvalidRecord(format!("unknown reference type '{}'", s)))
    }
}

/// Identifies one report: at most one report per reference source and
/// generation timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportId {
    pub reference_type: SpotCheckRefType,
    pub report_date_time: NaiveDateTime,
}

impl ReportId {
    pub fn new(reference_type: SpotCheckRefType, report_date_time: NaiveDateTime) -> Self {
        Self { reference_type, report_date_time }
    }
}

/// A finalized spotcheck report. The mismatch counts are computed once at
/// construction and never change afterwards.
#[derive(Debug, Clone)]
pub struct SpotCheckReport {
    id: ReportId,
    notes: Option<String>,
    mismatches: Vec<MismatchRecord>,
    counts: MismatchCounts,
}

impl SpotCheckReport {
    pub fn new(id: ReportId, mismatches: Vec<MismatchRecord>) -> Self {
        let counts = MismatchCounts::from_records(&mismatches);
        Self { id, notes: None, mismatches, counts }
    }

    /// Build a report from counts the pipeline already produced. Such a
    /// report carries no individual mismatch records.
    pub fn from_counts(id: ReportId, counts: MismatchCounts) -> Self {
        Self { id, notes: None, mismatches: Vec::new(), counts }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn reference_type(&self) -> SpotCheckRefType {
        self.id.reference_type
    }

    pub fn report_date_time(&self) -> NaiveDateTime {
        self.id.report_date_time
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn mismatches(&self) -> &[MismatchRecord] {
        &self.mismatches
    }

    pub fn counts(&self) -> &MismatchCounts {
        &self.counts
    }

    pub fn mismatch_status_counts(&self) -> &StatusCounts {
        self.counts.statuses()
    }

    pub fn mismatch_type_status_counts(&self) -> &TypeStatusCounts {
        self.counts.types()
    }
}

/// Report as written by the reporting pipeline. Enumerated values are still
/// strings; conversion into [`SpotCheckReport`] validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpotCheckReport {
    pub reference_type: String,
    pub report_date_time: NaiveDateTime,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub mismatches: Option<Vec<RawMismatch>>,
    #[serde(default)]
    pub mismatch_status_counts: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    pub mismatch_type_status_counts: Option<BTreeMap<String, BTreeMap<String, u64>>>,
}

impl TryFrom<RawSpotCheckReport> for SpotCheckReport {
    type Error = SpotcheckError;

    fn try_from(raw: RawSpotCheckReport) -> Result<Self, Self::Error> {
        let id = ReportId::new(raw.reference_type.parse()?, raw.report_date_time);

        let precomputed = match (raw.mismatch_status_counts, raw.mismatch_type_status_counts) {
            (Some(statuses), Some(types)) => Some(MismatchCounts::from_raw_maps(&statuses, &types)?),
            (None, None) => None,
            _ => {
                return Err(SpotcheckError::InvalidRecord(format!(
                    "report {} {} must provide both mismatchStatusCounts and mismatchTypeStatusCounts",
                    id.reference_type, id.report_date_time
                )))
            }
        };

        let report = match (raw.mismatches, precomputed) {
            (Some(records), precomputed) => {
                let records = aggregate::convert_raw(records)?;
                let report = SpotCheckReport::new(id, records);
                if let Some(expected) = precomputed {
                    if &expected != report.counts() {
                        return Err(SpotcheckError::InvalidRecord(format!(
                            "report {} {}: precomputed counts disagree with its mismatch records",
                            id.reference_type, id.report_date_time
                        )));
                    }
                }
                report
            }
            (None, Some(counts)) => SpotCheckReport::from_counts(id, counts),
            (None, None) => SpotCheckReport::new(id, Vec::new()),
        };

        Ok(match raw.notes {
            Some(notes) => report.with_notes(notes),
            None => report,
        })
    }
}
