use std::path::Path;

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime};
use serde_json::json;
use tracing::{debug, info};

use crate::cli::commands::SummaryArgs;
use crate::config::parser::load_or_default;
use crate::errors::SpotcheckError;
use crate::models::report::ReportId;
use crate::reporting::formatter::{format_summary, format_summary_table};
use crate::reporting::series::status_series;
use crate::reporting::summary::ReportSummary;
use crate::store::{loader, ReportStore};

pub async fn handle_summary(args: SummaryArgs) -> Result<(), SpotcheckError> {
    let config = load_or_default(args.config.as_deref()).await?;
    let eff = config.resolve(None, None, args.reports.as_deref());

    let store = ReportStore::new();
    loader::load_path(&store, Path::new(&eff.reports_path))?;

    if let Some(at) = args.at.as_deref() {
        let ts: NaiveDateTime = at
            .parse()
            .map_err(|_| SpotcheckError::InvalidDate(format!("'{}' is not an ISO-8601 date-time", at)))?;
        let id = ReportId::new(eff.reference_type, ts);
        let stored = store
            .get(&id)?
            .ok_or_else(|| SpotcheckError::NotFound(format!("No {} report at {}", eff.reference_type, ts)))?;
        return print_summary(&stored.summary, args.json);
    }

    if args.from.is_none() && args.to.is_none() {
        let latest = store.latest(eff.reference_type)?;
        let summary = ReportSummary::from_report(latest.as_ref().map(|s| s.report.as_ref()));
        return print_summary(&summary, args.json);
    }

    let today = Local::now().date_naive();
    let (start, end) = resolve_range(
        args.from.as_deref(),
        args.to.as_deref(),
        today,
        eff.default_range_months,
    )?;
    info!(%start, %end, reference_type = %eff.reference_type, "Listing report summaries");
    let stored = store.range(eff.reference_type, start, end)?;
    let summaries: Vec<&ReportSummary> = stored.iter().map(|s| s.summary.as_ref()).collect();
    debug!(count = summaries.len(), "Summaries in range");

    if args.json {
        let out = json!({
            "startDate": start,
            "endDate": end,
            "reports": {"items": summaries, "size": summaries.len()},
            "statusSeries": status_series(&summaries),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_summary_table(&summaries));
    }
    Ok(())
}

fn print_summary(summary: &ReportSummary, as_json: bool) -> Result<(), SpotcheckError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", format_summary(summary));
    }
    Ok(())
}

/// Date range for listings. A missing start defaults to the first day of the
/// month `months` months back; a missing end to the last day of the current
/// month.
pub fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
    months: u32,
) -> Result<(NaiveDate, NaiveDate), SpotcheckError> {
    let parse = |value: &str| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| SpotcheckError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", value)))
    };
    let first_of_month = today
        .with_day(1)
        .ok_or_else(|| SpotcheckError::InvalidDate(format!("no first day for {}", today)))?;

    let start = match from {
        Some(value) => parse(value)?,
        None => first_of_month
            .checked_sub_months(Months::new(months))
            .ok_or_else(|| SpotcheckError::InvalidDate(format!("{} months before {} is out of range", months, today)))?,
    };
    let end = match to {
        Some(value) => parse(value)?,
        None => first_of_month
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| SpotcheckError::InvalidDate(format!("no month end for {}", today)))?,
    };
    if start > end {
        return Err(SpotcheckError::InvalidDate(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok((start, end))
}
