use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SpotcheckError;

/// Resolution lifecycle state of a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MismatchStatus {
    /// First seen in this report.
    New,
    /// Seen in a previous report and still present.
    Existing,
    /// Previously resolved and now present again.
    Regression,
    /// Present in the previous report, gone in this one.
    Resolved,
    Ignore,
}

impl MismatchStatus {
    pub const ALL: [MismatchStatus; 5] = [
        MismatchStatus::New,
        MismatchStatus::Existing,
        MismatchStatus::Regression,
        MismatchStatus::Resolved,
        MismatchStatus::Ignore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Existing => "EXISTING",
            Self::Regression => "REGRESSION",
            Self::Resolved => "RESOLVED",
            Self::Ignore => "IGNORE",
        }
    }

    /// NEW, EXISTING and REGRESSION mismatches still need attention.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::New | Self::Existing | Self::Regression)
    }
}

impl fmt::Display for MismatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MismatchStatus {
    type Err = SpotcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| SpotcheckError::InvalidRecord(format!("unknown mismatch status '{}'", s)))
    }
}

/// Kind of content that differs between the system and the reference source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MismatchType {
    BillActiveAmendment,
    BillSponsor,
    BillCosponsor,
    BillMultisponsor,
    BillTitle,
    BillLawCodeSummary,
    BillAction,
    BillFulltextPageCount,
    BillAmendmentPublish,
}

impl MismatchType {
    pub const ALL: [MismatchType; 9] = [
        MismatchType::BillActiveAmendment,
        MismatchType::BillSponsor,
        MismatchType::BillCosponsor,
        MismatchType::BillMultisponsor,
        MismatchType::BillTitle,
        MismatchType::BillLawCodeSummary,
        MismatchType::BillAction,
        MismatchType::BillFulltextPageCount,
        MismatchType::BillAmendmentPublish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BillActiveAmendment => "BILL_ACTIVE_AMENDMENT",
            Self::BillSponsor => "BILL_SPONSOR",
            Self::BillCosponsor => "BILL_COSPONSOR",
            Self::BillMultisponsor => "BILL_MULTISPONSOR",
            Self::BillTitle => "BILL_TITLE",
            Self::BillLawCodeSummary => "BILL_LAW_CODE_SUMMARY",
            Self::BillAction => "BILL_ACTION",
            Self::BillFulltextPageCount => "BILL_FULLTEXT_PAGE_COUNT",
            Self::BillAmendmentPublish => "BILL_AMENDMENT_PUBLISH",
        }
    }

    pub fn group(&self) -> TypeGroup {
        match self {
            Self::BillSponsor => TypeGroup::Sponsor,
            Self::BillCosponsor | Self::BillMultisponsor => TypeGroup::CoMultiSponsor,
            Self::BillTitle => TypeGroup::Title,
            Self::BillLawCodeSummary => TypeGroup::LawSummary,
            Self::BillAction => TypeGroup::Action,
            Self::BillFulltextPageCount => TypeGroup::Page,
            Self::BillActiveAmendment | Self::BillAmendmentPublish => TypeGroup::Versions,
        }
    }
}

impl fmt::Display for MismatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MismatchType {
    type Err = SpotcheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| SpotcheckError::InvalidRecord(format!("unknown mismatch type '{}'", s)))
    }
}

/// Coarse grouping of mismatch types used by the error-type chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeGroup {
    Sponsor,
    CoMultiSponsor,
    Title,
    LawSummary,
    Action,
    Page,
    Versions,
}

impl TypeGroup {
    pub const ALL: [TypeGroup; 7] = [
        TypeGroup::Sponsor,
        TypeGroup::CoMultiSponsor,
        TypeGroup::Title,
        TypeGroup::LawSummary,
        TypeGroup::Action,
        TypeGroup::Page,
        TypeGroup::Versions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sponsor => "Sponsor",
            Self::CoMultiSponsor => "Co/Multi Sponsor",
            Self::Title => "Title",
            Self::LawSummary => "Law / Summary",
            Self::Action => "Action",
            Self::Page => "Page",
            Self::Versions => "Versions",
        }
    }
}

/// A single discrepancy finding within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchRecord {
    #[serde(rename = "type")]
    pub mismatch_type: MismatchType,
    pub status: MismatchStatus,
    /// Content the mismatch was found on, e.g. a bill print number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MismatchRecord {
    pub fn new(mismatch_type: MismatchType, status: MismatchStatus) -> Self {
        Self {
            mismatch_type,
            status,
            key: None,
            notes: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// A mismatch as handed over by the reporting pipeline, before its type and
/// status have been checked against the known enumerations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMismatch {
    #[serde(rename = "type")]
    pub mismatch_type: String,
    pub status: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<RawMismatch> for MismatchRecord {
    type Error = SpotcheckError;

    fn try_from(raw: RawMismatch) -> Result<Self, Self::Error> {
        Ok(MismatchRecord {
            mismatch_type: raw.mismatch_type.parse()?,
            status: raw.status.parse()?,
            key: raw.key,
            notes: raw.notes,
        })
    }
}
