use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::errors::SpotcheckError;
use crate::models::report::{ReportId, SpotCheckRefType, SpotCheckReport};
use crate::reporting::summary::ReportSummary;

/// A finalized report together with the summary built when it was admitted.
#[derive(Debug, Clone)]
pub struct StoredReport {
    pub report: Arc<SpotCheckReport>,
    pub summary: Arc<ReportSummary>,
}

/// In-memory catalog of finalized reports, ordered by reference type then
/// report time. Cloning shares the underlying catalog.
#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    reports: Arc<RwLock<BTreeMap<ReportId, StoredReport>>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<ReportId, StoredReport>>, SpotcheckError> {
        self.reports
            .read()
            .map_err(|_| SpotcheckError::Internal("report store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<ReportId, StoredReport>>, SpotcheckError> {
        self.reports
            .write()
            .map_err(|_| SpotcheckError::Internal("report store lock poisoned".into()))
    }

    /// Admit a report, building its summary. A report with the same id is
    /// replaced.
    pub fn insert(&self, report: SpotCheckReport) -> Result<StoredReport, SpotcheckError> {
        let id = report.id();
        let summary = ReportSummary::from_report(Some(&report));
        let stored = StoredReport {
            report: Arc::new(report),
            summary: Arc::new(summary),
        };
        let replaced = self.write()?.insert(id, stored.clone()).is_some();
        debug!(
            reference_type = %id.reference_type,
            report_date_time = %id.report_date_time,
            replaced,
            "Report admitted"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &ReportId) -> Result<Option<StoredReport>, SpotcheckError> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Most recent report of a reference type.
    pub fn latest(&self, reference_type: SpotCheckRefType) -> Result<Option<StoredReport>, SpotcheckError> {
        let reports = self.read()?;
        Ok(reports
            .range(Self::bounds(reference_type, NaiveDateTime::MIN, NaiveDateTime::MAX))
            .next_back()
            .map(|(_, stored)| stored.clone()))
    }

    /// Reports of a reference type generated between the start of
    /// `start_date` and the end of `end_date`, newest first.
    pub fn range(
        &self,
        reference_type: SpotCheckRefType,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<StoredReport>, SpotcheckError> {
        if start_date > end_date {
            return Err(SpotcheckError::InvalidDate(format!(
                "start date {} is after end date {}",
                start_date, end_date
            )));
        }
        let start = start_date.and_time(NaiveTime::default());
        // Exclusive upper bound: midnight after end_date, unbounded on the last representable day
        let end = end_date.succ_opt().map(|d| d.and_time(NaiveTime::default()));
        let reports = self.read()?;
        Ok(reports
            .range(Self::bounds(reference_type, start, end.unwrap_or(NaiveDateTime::MAX)))
            .filter(|(id, _)| end.map_or(true, |e| id.report_date_time < e))
            .rev()
            .map(|(_, stored)| stored.clone())
            .collect())
    }

    fn bounds(
        reference_type: SpotCheckRefType,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> std::ops::RangeInclusive<ReportId> {
        ReportId::new(reference_type, start)..=ReportId::new(reference_type, end)
    }

    pub fn len(&self) -> usize {
        self.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mismatch::{MismatchRecord, MismatchStatus, MismatchType};

    fn report(ref_type: SpotCheckRefType, ts: &str, n: usize) -> SpotCheckReport {
        let records = (0..n)
            .map(|_| MismatchRecord::new(MismatchType::BillSponsor, MismatchStatus::Existing))
            .collect();
        SpotCheckReport::new(ReportId::new(ref_type, ts.parse().unwrap()), records)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_insert_builds_summary() {
        let store = ReportStore::new();
        let stored = store
            .insert(report(SpotCheckRefType::LbdcDaybreak, "2015-03-02T10:15:30", 4))
            .unwrap();
        assert_eq!(stored.summary.total_mismatches(), Some(4));
        assert_eq!(store.len(), 1);
        let fetched = store.get(&stored.report.id()).unwrap().unwrap();
        assert!(Arc::ptr_eq(&fetched.summary, &stored.summary));
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let store = ReportStore::new();
        store.insert(report(SpotCheckRefType::LbdcDaybreak, "2015-03-02T10:15:30", 1)).unwrap();
        store.insert(report(SpotCheckRefType::LbdcDaybreak, "2015-03-02T10:15:30", 7)).unwrap();
        assert_eq!(store.len(), 1);
        let latest = store.latest(SpotCheckRefType::LbdcDaybreak).unwrap().unwrap();
        assert_eq!(latest.summary.total_mismatches(), Some(7));
    }

    #[test]
    fn test_latest_per_reference_type() {
        let store = ReportStore::new();
        assert!(store.latest(SpotCheckRefType::LbdcDaybreak).unwrap().is_none());
        store.insert(report(SpotCheckRefType::LbdcDaybreak, "2015-03-01T08:00:00", 1)).unwrap();
        store.insert(report(SpotCheckRefType::LbdcDaybreak, "2015-03-05T08:00:00", 2)).unwrap();
        store.insert(report(SpotCheckRefType::LbdcActiveList, "2015-04-01T08:00:00", 3)).unwrap();
        let latest = store.latest(SpotCheckRefType::LbdcDaybreak).unwrap().unwrap();
        assert_eq!(latest.report.report_date_time().to_string(), "2015-03-05 08:00:00");
    }

    #[test]
    fn test_range_inclusive_days_newest_first() {
        let store = ReportStore::new();
        for ts in [
            "2015-02-28T23:59:59",
            "2015-03-01T00:00:00",
            "2015-03-15T12:00:00",
            "2015-03-31T23:59:59",
            "2015-04-01T00:00:00",
        ] {
            store.insert(report(SpotCheckRefType::LbdcDaybreak, ts, 1)).unwrap();
        }
        store.insert(report(SpotCheckRefType::LbdcActiveList, "2015-03-10T00:00:00", 1)).unwrap();

        let found = store
            .range(SpotCheckRefType::LbdcDaybreak, date("2015-03-01"), date("2015-03-31"))
            .unwrap();
        let times: Vec<String> = found
            .iter()
            .map(|s| s.report.report_date_time().format("%Y-%m-%dT%H:%M:%S").to_string())
            .collect();
        assert_eq!(
            times,
            vec!["2015-03-31T23:59:59", "2015-03-15T12:00:00", "2015-03-01T00:00:00"]
        );
    }

    #[test]
    fn test_range_rejects_reversed_dates() {
        let store = ReportStore::new();
        let err = store
            .range(SpotCheckRefType::LbdcDaybreak, date("2015-04-01"), date("2015-03-01"))
            .unwrap_err();
        assert!(matches!(err, SpotcheckError::InvalidDate(_)));
    }

    #[test]
    fn test_clones_share_catalog() {
        let store = ReportStore::new();
        let other = store.clone();
        other.insert(report(SpotCheckRefType::LbdcDaybreak, "2015-03-02T10:15:30", 0)).unwrap();
        assert!(!store.is_empty());
    }
}
