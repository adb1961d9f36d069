//! Router-level tests for the campus navigation HTTP API.

use axum_test::TestServer;
use serde_json::{json, Value};

use campusnav_service::router;
use campusnav_service_shared::test_utils::{fixture_locations::*, test_state};
use campusnav_service_shared::AppState;

fn server() -> TestServer {
    server_with(test_state())
}

fn server_with(state: AppState) -> TestServer {
    TestServer::new(router(state, "/metrics")).expect("test server should start")
}

#[tokio::test]
async fn api_health_reports_running() {
    let response = server().get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "Campus Navigation API is running");
}

#[tokio::test]
async fn responses_echo_request_id() {
    let response = server().get("/api/nodes").await;
    let id = response
        .headers()
        .get("x-request-id")
        .expect("request id header");
    assert_eq!(id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn graph_lists_locations_and_exits() {
    let response = server().get("/api/graph").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["exit_points"], json!([MAIN_GATE, SPORTS_COMPLEX]));

    let nodes = body["nodes"].as_object().expect("nodes object");
    assert_eq!(nodes.len(), 9);
    let library = &nodes[LIBRARY];
    assert!(library["x"].is_number());
    assert!(library["connections"][COMPUTER_LAB]["distance"].is_number());
}

#[tokio::test]
async fn nodes_are_listed_by_name() {
    let body: Value = server().get("/api/nodes").await.json();
    let nodes = body["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes.len(), 9);
    assert!(nodes.contains(&json!(HOSTEL)));
}

#[tokio::test]
async fn path_morning_main_gate_to_hostel() {
    let response = server()
        .post("/api/path")
        .json(&json!({"start": MAIN_GATE, "end": HOSTEL}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["distance"], 830);
    assert_eq!(
        body["path"],
        json!([MAIN_GATE, ADMIN_BLOCK, CAFETERIA, AUDITORIUM, HOSTEL])
    );

    let steps = body["steps"].as_array().expect("steps recorded by default");
    assert_eq!(steps.first().unwrap()["type"], "init");
    assert_eq!(steps.last().unwrap()["type"], "found");
    assert!(body["visited_nodes"].as_array().unwrap().len() > 1);
}

#[tokio::test]
async fn path_evening_traffic_changes_cost() {
    let body: Value = server()
        .post("/api/path")
        .json(&json!({
            "start": MAIN_GATE,
            "end": HOSTEL,
            "time_of_day": "evening",
            "track_steps": false
        }))
        .await
        .json();

    assert_eq!(body["distance"], 705);
    assert!(body.get("steps").is_none());
}

#[tokio::test]
async fn path_unreachable_is_not_an_error() {
    let server = server();
    for neighbour in [ADMIN_BLOCK, LIBRARY] {
        server
            .post("/api/paths/block")
            .json(&json!({"node1": MAIN_GATE, "node2": neighbour}))
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/api/path")
        .json(&json!({"start": MAIN_GATE, "end": HOSTEL}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["path"], json!([]));
    assert!(body["distance"].is_null());
}

#[tokio::test]
async fn path_unknown_location_suggests_names() {
    let response = server()
        .post("/api/path")
        .json(&json!({"start": "Libary", "end": HOSTEL}))
        .await;
    response.assert_status_not_found();

    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/unknown-location");
    assert!(body["suggestions"]
        .as_array()
        .unwrap()
        .contains(&json!(LIBRARY)));
}

#[tokio::test]
async fn path_rejects_missing_fields_and_bad_time() {
    let server = server();

    let missing = server.post("/api/path").json(&json!({"start": MAIN_GATE})).await;
    missing.assert_status_bad_request();
    let body: Value = missing.json();
    assert_eq!(body["type"], "/problems/invalid-request");

    let bad_time = server
        .post("/api/path")
        .json(&json!({"start": MAIN_GATE, "end": HOSTEL, "time_of_day": "midnight"}))
        .await;
    bad_time.assert_status_bad_request();
}

#[tokio::test]
async fn path_rejects_malformed_json() {
    let response = server()
        .post("/api/path")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn nearest_exit_avoids_hazards() {
    let server = server();
    for node in [LIBRARY, COMPUTER_LAB] {
        server
            .post("/api/hazards/add")
            .json(&json!({"node": node}))
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/api/emergency/nearest-exit")
        .json(&json!({"start": LECTURE_HALL}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["nearest_exit"], SPORTS_COMPLEX);
    assert_eq!(body["distance"], 200);
    assert_eq!(body["path"].as_array().unwrap().first().unwrap(), LECTURE_HALL);
    assert_eq!(body["path"].as_array().unwrap().last().unwrap(), SPORTS_COMPLEX);
}

#[tokio::test]
async fn nearest_exit_unreachable_is_not_found() {
    let server = server();
    for (a, b) in [
        (HOSTEL, AUDITORIUM),
        (HOSTEL, SPORTS_COMPLEX),
    ] {
        server
            .post("/api/paths/block")
            .json(&json!({"node1": a, "node2": b}))
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/api/emergency/nearest-exit")
        .json(&json!({"start": HOSTEL}))
        .await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/no-reachable-exit");
}

#[tokio::test]
async fn block_and_unblock_paths() {
    let server = server();

    let blocked = server
        .post("/api/paths/block")
        .json(&json!({"node1": LIBRARY, "node2": COMPUTER_LAB}))
        .await;
    blocked.assert_status_ok();
    let body: Value = blocked.json();
    assert_eq!(body["blocked_paths"], json!([[COMPUTER_LAB, LIBRARY]]));
    assert!(body["message"].as_str().unwrap().contains("blocked"));

    // Reversed order names the same connection.
    let again: Value = server
        .post("/api/paths/block")
        .json(&json!({"node1": COMPUTER_LAB, "node2": LIBRARY}))
        .await
        .json();
    assert_eq!(again["blocked_paths"].as_array().unwrap().len(), 1);

    let listed: Value = server.get("/api/paths/blocked").await.json();
    assert_eq!(listed["blocked_paths"], json!([[COMPUTER_LAB, LIBRARY]]));

    let unblocked: Value = server
        .post("/api/paths/unblock")
        .json(&json!({"node1": COMPUTER_LAB, "node2": LIBRARY}))
        .await
        .json();
    assert_eq!(unblocked["blocked_paths"], json!([]));
}

#[tokio::test]
async fn block_unknown_connection_is_not_found() {
    let response = server()
        .post("/api/paths/block")
        .json(&json!({"node1": MAIN_GATE, "node2": HOSTEL}))
        .await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/unknown-connection");
}

#[tokio::test]
async fn block_same_location_is_unknown_connection() {
    let response = server()
        .post("/api/paths/block")
        .json(&json!({"node1": LIBRARY, "node2": LIBRARY}))
        .await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/unknown-connection");
}

#[tokio::test]
async fn block_same_unknown_location_is_unknown_location() {
    let response = server()
        .post("/api/paths/block")
        .json(&json!({"node1": "Narnia", "node2": "Narnia"}))
        .await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["type"], "/problems/unknown-location");
}

#[tokio::test]
async fn hazards_add_remove_and_clear() {
    let server = server();

    let added: Value = server
        .post("/api/hazards/add")
        .json(&json!({"node": CAFETERIA}))
        .await
        .json();
    assert_eq!(added["hazard_zones"], json!([CAFETERIA]));

    let exit: Value = server
        .post("/api/hazards/add")
        .json(&json!({"node": MAIN_GATE}))
        .await
        .json();
    assert_eq!(exit["hazard_zones"], json!([CAFETERIA]));
    assert!(exit["message"].as_str().unwrap().contains("exit"));

    let listed: Value = server.get("/api/hazards").await.json();
    assert_eq!(listed["hazard_zones"], json!([CAFETERIA]));

    let removed: Value = server
        .post("/api/hazards/remove")
        .json(&json!({"node": CAFETERIA}))
        .await
        .json();
    assert_eq!(removed["hazard_zones"], json!([]));

    server
        .post("/api/hazards/add")
        .json(&json!({"node": LIBRARY}))
        .await
        .assert_status_ok();
    let cleared: Value = server.post("/api/hazards/clear").await.json();
    assert_eq!(cleared["hazard_zones"], json!([]));
}

#[tokio::test]
async fn hazard_on_unknown_location_is_not_found() {
    server()
        .post("/api/hazards/add")
        .json(&json!({"node": "Observatory"}))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn reset_clears_everything() {
    let server = server();
    server
        .post("/api/paths/block")
        .json(&json!({"node1": LIBRARY, "node2": COMPUTER_LAB}))
        .await
        .assert_status_ok();
    server
        .post("/api/hazards/add")
        .json(&json!({"node": AUDITORIUM}))
        .await
        .assert_status_ok();

    let body: Value = server.post("/api/reset").await.json();
    assert_eq!(body["blocked_paths"], json!([]));
    assert_eq!(body["hazard_zones"], json!([]));

    let path: Value = server
        .post("/api/path")
        .json(&json!({"start": MAIN_GATE, "end": HOSTEL}))
        .await
        .json();
    assert_eq!(path["distance"], 830);
}

#[tokio::test]
async fn clearing_empty_constraints_reports_no_change() {
    let server = server();

    let cleared = server.post("/api/hazards/clear").await;
    cleared.assert_status_ok();
    let cleared: Value = cleared.json();
    assert_eq!(cleared["hazard_zones"], json!([]));
    assert_eq!(cleared["message"], "No hazard zones to clear");

    let reset: Value = server.post("/api/reset").await.json();
    assert_eq!(reset["blocked_paths"], json!([]));
    assert_eq!(reset["message"], "No blocked paths or hazard zones to clear");

    server
        .post("/api/hazards/add")
        .json(&json!({"node": CAFETERIA}))
        .await
        .assert_status_ok();
    let cleared: Value = server.post("/api/hazards/clear").await.json();
    assert_eq!(cleared["message"], "All hazard zones cleared");
}

#[tokio::test]
async fn health_probes() {
    let server = server();
    server.get("/health/live").await.assert_status_ok();

    let ready: Value = server.get("/health/ready").await.json();
    assert_eq!(ready["status"], "ok");
    assert_eq!(ready["locations_loaded"], 9);
    assert_eq!(ready["exits"], 2);
}

#[tokio::test]
async fn metrics_endpoint_responds() {
    server().get("/metrics").await.assert_status_ok();
}

#[tokio::test]
async fn state_loaded_from_map_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus.json");
    let document = campusnav_lib::reference_document();
    std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

    let state = AppState::load(Some(&path)).unwrap();
    let body: Value = server_with(state).get("/api/nodes").await.json();
    assert_eq!(body["nodes"].as_array().unwrap().len(), 9);
}
