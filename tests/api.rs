use axum::body::Body;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use spotcheck::api::{build_router, AppState};
use spotcheck::models::{MismatchRecord, MismatchStatus, MismatchType, ReportId, SpotCheckRefType, SpotCheckReport};
use spotcheck::store::ReportStore;
use tower::ServiceExt;

fn report(ref_type: SpotCheckRefType, ts: &str, records: &[(MismatchType, MismatchStatus)]) -> SpotCheckReport {
    SpotCheckReport::new(
        ReportId::new(ref_type, ts.parse().unwrap()),
        records
            .iter()
            .map(|(t, s)| MismatchRecord::new(*t, *s).with_key("S1234-2015"))
            .collect(),
    )
}

fn create_test_state() -> AppState {
    let store = ReportStore::new();
    store
        .insert(report(
            SpotCheckRefType::LbdcDaybreak,
            "2015-03-02T10:15:30",
            &[
                (MismatchType::BillSponsor, MismatchStatus::New),
                (MismatchType::BillSponsor, MismatchStatus::Resolved),
                (MismatchType::BillTitle, MismatchStatus::New),
            ],
        ))
        .unwrap();
    store
        .insert(report(
            SpotCheckRefType::LbdcDaybreak,
            "2015-03-01T10:00:00",
            &[(MismatchType::BillTitle, MismatchStatus::Existing)],
        ))
        .unwrap();
    store
        .insert(report(SpotCheckRefType::LbdcDaybreak, "2015-02-10T09:00:00", &[]))
        .unwrap();
    store
        .insert(report(
            SpotCheckRefType::LbdcActiveList,
            "2015-03-03T00:00:00",
            &[(MismatchType::BillAction, MismatchStatus::New)],
        ))
        .unwrap();
    AppState { store }
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn get(uri: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state();
    let response = app(&state).oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "spotcheck");
    assert_eq!(body["reports"], 4);
}

#[tokio::test]
async fn test_latest_summary_wire_shape() {
    let state = create_test_state();
    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/latest"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(
        body,
        json!({
            "referenceType": "LBDC_DAYBREAK",
            "reportDateTime": "2015-03-02T10:15:30",
            "mismatchStatuses": {"NEW": 2, "RESOLVED": 1},
            "mismatchTypes": {
                "BILL_SPONSOR": {"NEW": 1, "RESOLVED": 1},
                "BILL_TITLE": {"NEW": 1}
            },
            "totalMismatches": 3
        })
    );
}

#[tokio::test]
async fn test_latest_without_reports_is_null_summary() {
    let state = AppState { store: ReportStore::new() };
    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/latest"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["referenceType"].is_null());
    assert!(body["reportDateTime"].is_null());
    assert!(body["mismatchStatuses"].is_null());
    assert!(body["mismatchTypes"].is_null());
    assert!(body["totalMismatches"].is_null());
}

#[tokio::test]
async fn test_list_summaries_in_range() {
    let state = create_test_state();
    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/2015-03-01/2015-03-31"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["startDate"], "2015-03-01");
    assert_eq!(body["endDate"], "2015-03-31");
    assert_eq!(body["reports"]["size"], 2);
    let items = body["reports"]["items"].as_array().unwrap();
    assert_eq!(items[0]["reportDateTime"], "2015-03-02T10:15:30");
    assert_eq!(items[1]["reportDateTime"], "2015-03-01T10:00:00");
    assert_eq!(items[1]["totalMismatches"], 1);
    // Active list reports are never served as daybreaks
    assert!(items.iter().all(|i| i["referenceType"] == "LBDC_DAYBREAK"));
}

#[tokio::test]
async fn test_empty_report_in_listing_has_zero_total() {
    let state = create_test_state();
    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/2015-02-01/2015-02-28"))
        .await
        .unwrap();
    let body = response_json(response).await;
    let item = &body["reports"]["items"][0];
    assert_eq!(item["totalMismatches"], 0);
    assert_eq!(item["mismatchStatuses"], json!({}));
    assert_eq!(item["mismatchTypes"], json!({}));
}

#[tokio::test]
async fn test_list_rejects_bad_dates() {
    let state = create_test_state();
    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/2015-13-01/2015-03-31"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("2015-13-01"));

    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/2015-04-01/2015-03-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_series_endpoint() {
    let state = create_test_state();
    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/2015-02-01/2015-03-31/series"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(
        body["reportDates"],
        json!(["2015-02-10T09:00:00", "2015-03-01T10:00:00", "2015-03-02T10:15:30"])
    );
    let status = body["statusSeries"].as_array().unwrap();
    assert_eq!(status[0], json!({"name": "Resolved", "data": [0, 0, 1]}));
    assert_eq!(status[1], json!({"name": "New/Regression", "data": [0, 0, 2]}));
    assert_eq!(status[2], json!({"name": "Existing", "data": [0, 1, 0]}));
    let title = body["typeSeries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "Title")
        .unwrap();
    assert_eq!(title["data"], json!([0, 1, 1]));
}

#[tokio::test]
async fn test_report_detail() {
    let state = create_test_state();
    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/2015-03-02T10:15:30"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["summary"]["totalMismatches"], 3);
    assert_eq!(body["mismatches"].as_array().unwrap().len(), 3);
    assert_eq!(body["mismatches"][0]["type"], "BILL_SPONSOR");
    assert_eq!(body["mismatches"][0]["key"], "S1234-2015");
    let breakdown = body["typeBreakdown"].as_array().unwrap();
    assert_eq!(breakdown[0], json!({"type": "BILL_SPONSOR", "open": 1, "netChange": 0, "trend": "flat"}));
    assert_eq!(breakdown[1], json!({"type": "BILL_TITLE", "open": 1, "netChange": 1, "trend": "up"}));
}

#[tokio::test]
async fn test_report_detail_not_found() {
    let state = create_test_state();
    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/2015-03-03T00:00:00"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app(&state)
        .oneshot(get("/api/spotcheck/daybreaks/not-a-time"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
