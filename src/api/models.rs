use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::mismatch::MismatchRecord;
use crate::reporting::series::Series;
use crate::reporting::summary::{ReportSummary, TypeBreakdown};

/// Paged-style list wrapper: `{"items": [...], "size": n}`.
#[derive(Serialize)]
pub struct ListView<T: Serialize> {
    pub items: Vec<T>,
    pub size: usize,
}

impl<T: Serialize> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        let size = items.len();
        Self { items, size }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryListResponse<'a> {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reports: ListView<&'a ReportSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDetailResponse<'a> {
    pub summary: &'a ReportSummary,
    pub notes: Option<&'a str>,
    pub type_breakdown: Vec<TypeBreakdown>,
    pub mismatches: &'a [MismatchRecord],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub report_dates: Vec<NaiveDateTime>,
    pub status_series: Vec<Series>,
    pub type_series: Vec<Series>,
}
