//! Mismatch aggregation.
//!
//! Turns the mismatch records of one report into the two count groupings
//! exposed by report summaries: counts per status, and counts per type then
//! per status. Both groupings are sparse (a key exists only when its count is
//! positive) and are always derived from the same record set, so their sums
//! agree with each other and with the number of records.

use std::collections::BTreeMap;

use crate::errors::SpotcheckError;
use crate::models::mismatch::{MismatchRecord, MismatchStatus, MismatchType, RawMismatch};

pub type StatusCounts = BTreeMap<MismatchStatus, u64>;
pub type TypeStatusCounts = BTreeMap<MismatchType, StatusCounts>;

/// Count records per status.
pub fn aggregate_by_status(records: &[MismatchRecord]) -> StatusCounts {
    let mut counts = StatusCounts::new();
    for record in records {
        *counts.entry(record.status).or_insert(0) += 1;
    }
    counts
}

/// Count records per type, then per status within each type.
pub fn aggregate_by_type_then_status(records: &[MismatchRecord]) -> TypeStatusCounts {
    let mut counts = TypeStatusCounts::new();
    for record in records {
        *counts
            .entry(record.mismatch_type)
            .or_default()
            .entry(record.status)
            .or_insert(0) += 1;
    }
    counts
}

/// Sum of all status counts; 0 for an empty mapping.
pub fn total(status_counts: &StatusCounts) -> u64 {
    status_counts.values().sum()
}

/// Validate raw pipeline records against the known enumerations.
///
/// Fails on the first record whose type or status is unknown, naming its
/// position in the input.
pub fn convert_raw(raw: Vec<RawMismatch>) -> Result<Vec<MismatchRecord>, SpotcheckError> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, record)| {
            MismatchRecord::try_from(record).map_err(|e| match e {
                SpotcheckError::InvalidRecord(msg) => {
                    SpotcheckError::InvalidRecord(format!("mismatch #{}: {}", idx, msg))
                }
                other => other,
            })
        })
        .collect()
}

/// Aggregate raw pipeline records, rejecting any out-of-enumeration value.
pub fn aggregate_raw(raw: Vec<RawMismatch>) -> Result<MismatchCounts, SpotcheckError> {
    let records = convert_raw(raw)?;
    Ok(MismatchCounts::from_records(&records))
}

/// Both count groupings of one report plus their shared total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MismatchCounts {
    statuses: StatusCounts,
    types: TypeStatusCounts,
    total: u64,
}

impl MismatchCounts {
    pub fn from_records(records: &[MismatchRecord]) -> Self {
        let statuses = aggregate_by_status(records);
        let types = aggregate_by_type_then_status(records);
        let total = total(&statuses);
        Self { statuses, types, total }
    }

    /// Accept maps the pipeline computed itself.
    ///
    /// Zero entries are dropped. The maps must describe the same record set:
    /// for every status, the sum over all types equals the status count.
    pub fn from_precomputed(
        statuses: StatusCounts,
        types: TypeStatusCounts,
    ) -> Result<Self, SpotcheckError> {
        let statuses: StatusCounts = statuses.into_iter().filter(|(_, n)| *n > 0).collect();
        let types: TypeStatusCounts = types
            .into_iter()
            .map(|(ty, inner)| (ty, inner.into_iter().filter(|(_, n)| *n > 0).collect::<StatusCounts>()))
            .filter(|(_, inner)| !inner.is_empty())
            .collect();

        let mut flattened = StatusCounts::new();
        for inner in types.values() {
            for (status, n) in inner {
                let slot = flattened.entry(*status).or_insert(0);
                *slot = slot.checked_add(*n).ok_or_else(|| {
                    SpotcheckError::InvalidRecord("mismatch type counts overflow".into())
                })?;
            }
        }
        if flattened != statuses {
            return Err(SpotcheckError::InvalidRecord(format!(
                "status counts {} do not match type counts {}",
                describe(&statuses),
                describe(&flattened)
            )));
        }

        let total = statuses
            .values()
            .try_fold(0u64, |acc, n| acc.checked_add(*n))
            .ok_or_else(|| SpotcheckError::InvalidRecord("mismatch status counts overflow".into()))?;
        Ok(Self { statuses, types, total })
    }

    /// Like [`MismatchCounts::from_precomputed`], with keys still as strings.
    pub fn from_raw_maps(
        statuses: &BTreeMap<String, u64>,
        types: &BTreeMap<String, BTreeMap<String, u64>>,
    ) -> Result<Self, SpotcheckError> {
        let statuses = statuses
            .iter()
            .map(|(status, n)| Ok::<_, SpotcheckError>((status.parse::<MismatchStatus>()?, *n)))
            .collect::<Result<StatusCounts, SpotcheckError>>()?;
        let mut parsed = TypeStatusCounts::new();
        for (ty, inner) in types {
            let inner = inner
                .iter()
                .map(|(status, n)| Ok::<_, SpotcheckError>((status.parse::<MismatchStatus>()?, *n)))
                .collect::<Result<StatusCounts, SpotcheckError>>()?;
            parsed.insert(ty.parse()?, inner);
        }
        Self::from_precomputed(statuses, parsed)
    }

    pub fn statuses(&self) -> &StatusCounts {
        &self.statuses
    }

    pub fn types(&self) -> &TypeStatusCounts {
        &self.types
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count for a single (type, status) cell.
    pub fn count(&self, mismatch_type: MismatchType, status: MismatchStatus) -> u64 {
        self.types
            .get(&mismatch_type)
            .and_then(|inner| inner.get(&status))
            .copied()
            .unwrap_or(0)
    }
}

fn describe(counts: &StatusCounts) -> String {
    let parts: Vec<String> = counts.iter().map(|(s, n)| format!("{}={}", s, n)).collect();
    format!("{{{}}}", parts.join(", "))
}
