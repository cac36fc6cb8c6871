use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use crate::api::models::{ListView, ReportDetailResponse, SeriesResponse, SummaryListResponse};
use crate::api::{AppState, DAYBREAK};
use crate::errors::SpotcheckError;
use crate::models::report::ReportId;
use crate::reporting::series::{report_date_series, status_series, type_group_series};
use crate::reporting::summary::ReportSummary;

fn parse_date(value: &str) -> Result<NaiveDate, SpotcheckError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| SpotcheckError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", value)))
}

fn parse_date_time(value: &str) -> Result<NaiveDateTime, SpotcheckError> {
    value
        .parse::<NaiveDateTime>()
        .map_err(|_| SpotcheckError::InvalidDate(format!("'{}' is not an ISO-8601 date-time", value)))
}

/// Summary of the newest report; the all-null summary when there is none.
pub async fn get_latest(State(state): State<AppState>) -> Result<Json<Value>, SpotcheckError> {
    let latest = state.store.latest(DAYBREAK)?;
    let summary = match &latest {
        Some(stored) => serde_json::to_value(stored.summary.as_ref())?,
        None => serde_json::to_value(ReportSummary::empty())?,
    };
    Ok(Json(summary))
}

pub async fn list_summaries(
    State(state): State<AppState>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Result<Json<Value>, SpotcheckError> {
    let start_date = parse_date(&start_date)?;
    let end_date = parse_date(&end_date)?;
    let stored = state.store.range(DAYBREAK, start_date, end_date)?;
    debug!(%start_date, %end_date, count = stored.len(), "Listing report summaries");

    let response = SummaryListResponse {
        start_date,
        end_date,
        reports: ListView::new(stored.iter().map(|s| s.summary.as_ref()).collect()),
    };
    Ok(Json(serde_json::to_value(&response)?))
}

pub async fn get_series(
    State(state): State<AppState>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Result<Json<Value>, SpotcheckError> {
    let start_date = parse_date(&start_date)?;
    let end_date = parse_date(&end_date)?;
    let stored = state.store.range(DAYBREAK, start_date, end_date)?;
    let summaries: Vec<&ReportSummary> = stored.iter().map(|s| s.summary.as_ref()).collect();

    let response = SeriesResponse {
        report_dates: report_date_series(&summaries),
        status_series: status_series(&summaries),
        type_series: type_group_series(&summaries),
    };
    Ok(Json(serde_json::to_value(&response)?))
}

pub async fn get_detail(
    State(state): State<AppState>,
    Path(report_date_time): Path<String>,
) -> Result<Json<Value>, SpotcheckError> {
    let report_date_time = parse_date_time(&report_date_time)?;
    let id = ReportId::new(DAYBREAK, report_date_time);
    let stored = state.store.get(&id)?.ok_or_else(|| {
        SpotcheckError::NotFound(format!("No {} report at {}", id.reference_type, report_date_time))
    })?;

    let response = ReportDetailResponse {
        summary: stored.summary.as_ref(),
        notes: stored.report.notes(),
        type_breakdown: stored.summary.type_breakdown(),
        mismatches: stored.report.mismatches(),
    };
    Ok(Json(serde_json::to_value(&response)?))
}
