//! HTTP-level integration tests for detection runs and CSV export.
//!
//! The scripted backend replays canned compute responses, so these tests
//! drive the full request path (validation, boundary resolution, the
//! pipeline's terminal calls, result storage, export) offline.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, body_text, get, post_json, ScriptedBackend};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn polygon() -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[75.0, 30.0], [75.5, 30.0], [75.5, 30.5], [75.0, 30.0]]]
    })
}

fn draw_request() -> Value {
    json!({
        "start_date": "2023-11-01",
        "end_date": "2023-11-30",
        "roi": polygon()
    })
}

fn district_request() -> Value {
    json!({
        "start_date": "2023-11-01",
        "end_date": "2023-11-30",
        "state": "Punjab",
        "district": "Sangrur"
    })
}

fn sample_feature(lon: f64, lat: f64, dnbr: f64, bai: f64, dndvi: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [lon, lat] },
        "properties": { "dNBR": dnbr, "BAI": bai, "dNDVI": dndvi }
    })
}

/// Backend scripted for a successful draw-mode run over a documented
/// burn event: pre/post subsets present, land-cover year available,
/// three sampled hotspots.
fn burn_event_backend() -> ScriptedBackend {
    ScriptedBackend::default()
        .respond("Collection.size", json!(7)) // pre-fire subset
        .respond("Collection.size", json!(4)) // post-fire subset
        .respond("Collection.size", json!(1)) // land-cover year
        .respond(
            "Image.sample",
            json!({
                "type": "FeatureCollection",
                "features": [
                    sample_feature(75.12, 30.21, 0.7204, 151.73, 0.3341),
                    sample_feature(75.18, 30.25, 0.3012, 97.2, 0.2205),
                    sample_feature(75.23, 30.28, 0.1187, 90.6, 0.2102),
                ]
            }),
        )
}

const SEVERITY_LABELS: [&str; 5] = [
    "Very High Severity",
    "High Severity",
    "Moderate Severity",
    "Low Severity",
    "Unburned or Regrowth",
];

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn neither_roi_nor_district_is_400() {
    let app = common::build_test_app(Arc::new(ScriptedBackend::default()));

    let body = json!({ "start_date": "2023-11-01", "end_date": "2023-11-30" });
    let response = post_json(app, "/api/v1/detections", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn both_roi_and_district_is_400() {
    let app = common::build_test_app(Arc::new(ScriptedBackend::default()));

    let mut body = district_request();
    body["roi"] = polygon();
    let response = post_json(app, "/api/v1/detections", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_date_is_400() {
    let app = common::build_test_app(Arc::new(ScriptedBackend::default()));

    let mut body = draw_request();
    body["start_date"] = json!("01/11/2023");
    let response = post_json(app, "/api/v1/detections", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_district_is_404() {
    // Boundary lookup matches nothing.
    let backend = Arc::new(ScriptedBackend::default().respond("Collection.size", json!(0)));
    let app = common::build_test_app(backend);

    let mut body = district_request();
    body["district"] = json!("Atlantis");
    let response = post_json(app, "/api/v1/detections", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Detection outcomes
// ---------------------------------------------------------------------------

/// A date range with no archive coverage yields a valid empty response,
/// not an error.
#[tokio::test]
async fn empty_archive_yields_zero_hotspots() {
    let backend = Arc::new(
        ScriptedBackend::default()
            .respond("Collection.size", json!(0))
            .respond("Collection.size", json!(0)),
    );
    let app = common::build_test_app(backend);

    let response = post_json(app, "/api/v1/detections", draw_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["status"], "insufficient_data");
    assert_eq!(data["fire_hotspots"], 0);
    assert_eq!(data["fire_area_hectares"], 0.0);
    assert_eq!(data["max_dnbr"], 0.0);
    assert_eq!(data["hotspots_geojson"]["features"].as_array().unwrap().len(), 0);
}

/// A documented burn event with clear imagery on both sides yields
/// classified detections above the dNBR threshold.
#[tokio::test]
async fn burn_event_yields_classified_hotspots() {
    let app = common::build_test_app(Arc::new(burn_event_backend()));

    let response = post_json(app, "/api/v1/detections", draw_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["status"], "complete");
    assert_eq!(data["agricultural_mask_applied"], true);
    assert_eq!(data["fire_hotspots"], 3);
    assert_eq!(data["fire_area_hectares"], 0.12);
    assert_eq!(data["max_dnbr"], 0.72);
    assert_eq!(data["boundary_geojson"], polygon());

    let features = data["hotspots_geojson"]["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);
    for (i, feature) in features.iter().enumerate() {
        let properties = &feature["properties"];
        assert_eq!(properties["id"], i as u64 + 1);
        assert!(properties["dnbr"].as_f64().unwrap() > 0.10);
        let severity = properties["severity"].as_str().unwrap();
        assert!(SEVERITY_LABELS.contains(&severity), "unexpected severity {severity}");
    }

    // First hotspot carries the documented rounding.
    assert_eq!(features[0]["properties"]["dnbr"], 0.72);
    assert_eq!(features[0]["properties"]["bai"], 151.73);
    assert_eq!(features[0]["properties"]["dndvi"], 0.334);
    assert_eq!(features[0]["properties"]["severity"], "Very High Severity");
    assert_eq!(features[0]["geometry"]["coordinates"][0], 75.12);
}

/// District mode resolves the boundary first and reports it back.
#[tokio::test]
async fn district_mode_resolves_boundary() {
    let backend = Arc::new(
        ScriptedBackend::default()
            .respond("Collection.size", json!(1)) // boundary match count
            .respond("Collection.geometry", polygon())
            .respond("Collection.size", json!(7))
            .respond("Collection.size", json!(4))
            .respond("Collection.size", json!(1))
            .respond(
                "Image.sample",
                json!({ "features": [sample_feature(75.12, 30.21, 0.45, 120.0, 0.3)] }),
            ),
    );
    let app = common::build_test_app(backend);

    let response = post_json(app, "/api/v1/detections", district_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["boundary_geojson"], polygon());
    assert_eq!(json["data"]["fire_hotspots"], 1);
}

/// A compute-layer fault mid-analysis downgrades to an empty
/// `remote_fault` result instead of a 5xx.
#[tokio::test]
async fn compute_fault_downgrades_to_remote_fault() {
    let backend = Arc::new(ScriptedBackend::default().fail("Collection.size"));
    let app = common::build_test_app(backend);

    let response = post_json(app, "/api/v1/detections", draw_request()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "remote_fault");
    assert_eq!(json["data"]["fire_hotspots"], 0);
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_renders_stored_run_as_csv() {
    let backend = Arc::new(burn_event_backend());

    let app = common::build_test_app(Arc::clone(&backend));
    let response = post_json(app.clone(), "/api/v1/detections", draw_request()).await;
    let json = body_json(response).await;
    let run_id = json["data"]["run_id"].as_str().unwrap().to_string();

    let response = get(app, &format!("/api/v1/detections/{run_id}/export")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["Content-Type"].to_str().unwrap(),
        "text/csv"
    );
    let disposition = response.headers()["Content-Disposition"].to_str().unwrap().to_string();
    assert!(disposition.contains("BurnScars_Custom_ROI"));

    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,latitude,longitude,severity,dnbr,bai,dndvi"
    );
    let first = lines.next().unwrap();
    assert_eq!(first, "1,30.21,75.12,Very High Severity,0.72,151.73,0.334");
    assert_eq!(csv.lines().count(), 4);
}

#[tokio::test]
async fn export_unknown_run_is_404() {
    let app = common::build_test_app(Arc::new(ScriptedBackend::default()));

    let run_id = uuid::Uuid::new_v4();
    let response = get(app, &format!("/api/v1/detections/{run_id}/export")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_of_empty_run_is_404() {
    let backend = Arc::new(
        ScriptedBackend::default()
            .respond("Collection.size", json!(0))
            .respond("Collection.size", json!(0)),
    );
    let app = common::build_test_app(backend);

    let response = post_json(app.clone(), "/api/v1/detections", draw_request()).await;
    let json = body_json(response).await;
    let run_id = json["data"]["run_id"].as_str().unwrap().to_string();

    let response = get(app, &format!("/api/v1/detections/{run_id}/export")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No data available to export");
}
