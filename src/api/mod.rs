pub mod errors;
pub mod models;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::SpotcheckError;
use crate::models::report::SpotCheckRefType;
use crate::store::{loader, ReportStore};

/// Reference source served under `/api/spotcheck/daybreaks`.
pub const DAYBREAK: SpotCheckRefType = SpotCheckRefType::LbdcDaybreak;

#[derive(Clone)]
pub struct AppState {
    pub store: ReportStore,
}

pub fn create_app_state(reports_path: &str) -> Result<AppState, SpotcheckError> {
    let store = ReportStore::new();
    loader::load_path(&store, std::path::Path::new(reports_path))?;
    Ok(AppState { store })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route("/api/spotcheck/daybreaks/latest", axum::routing::get(routes::daybreaks::get_latest))
        .route("/api/spotcheck/daybreaks/{report_date_time}", axum::routing::get(routes::daybreaks::get_detail))
        .route("/api/spotcheck/daybreaks/{start_date}/{end_date}", axum::routing::get(routes::daybreaks::list_summaries))
        .route("/api/spotcheck/daybreaks/{start_date}/{end_date}/series", axum::routing::get(routes::daybreaks::get_series))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
