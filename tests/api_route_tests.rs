use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use currency_admin::Catalog;
use currency_admin::config::WarehouseConfig;
use currency_admin::db::open_gateway;
use currency_admin::server::{AppState, app_router};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

async fn app(tag: &str) -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "currency-admin-api-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let gateway = open_gateway(&WarehouseConfig::sqlite(format!(
        "sqlite:{}",
        path.display()
    )))
    .await
    .expect("failed to open sqlite gateway");
    (app_router(AppState::new(Catalog::new(gateway), true)), path)
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_file(path);
    let _ = fs::remove_file(format!("{}-wal", path.display()));
    let _ = fs::remove_file(format!("{}-shm", path.display()));
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => req.body(Body::empty()),
    }
    .expect("failed to build request");
    app.clone().oneshot(req).await.expect("request failed")
}

async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not json")
}

fn record(code: &str, number: &str, country: &str) -> Value {
    json!({
        "country_code": code,
        "country_number": number,
        "country": country,
        "currency_name": format!("{country} Dollar"),
        "currency_code": code,
        "currency_number": number,
    })
}

#[tokio::test]
async fn create_list_update_delete_cycle() {
    let (app, path) = app("cycle").await;

    let resp = call(&app, "POST", "/api/records", Some(record("usa", "840", "United States"))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Entry added successfully!");

    let resp = call(&app, "POST", "/api/records", Some(record("AUS", "36", "Australia"))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = call(&app, "GET", "/api/records?sort=country_number&order=desc", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = json_body(resp).await;
    let codes: Vec<&str> = rows
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["country_code"].as_str())
        .collect();
    assert_eq!(codes, vec!["USA", "AUS"]);
    assert_eq!(rows[0]["country"], "UNITED STATES");

    let resp = call(&app, "GET", "/api/records?q=austr", None).await;
    let rows = json_body(resp).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(1));

    let resp = call(&app, "PUT", "/api/records/AUS", Some(record("AUT", "40", "Austria"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["message"], "Entry updated successfully!");

    let resp = call(&app, "DELETE", "/api/records/AUT", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["message"], "Entry deleted successfully!");

    let rows = json_body(call(&app, "GET", "/api/records", None).await).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["country_code"], "USA");
    assert_eq!(rows[0]["currency_name"], "United States Dollar");

    cleanup(&path);
}

#[tokio::test]
async fn failures_map_to_error_bodies() {
    let (app, path) = app("errors").await;

    call(&app, "POST", "/api/records", Some(record("USA", "840", "United States"))).await;

    let resp = call(&app, "POST", "/api/records", Some(record("USA", "840", "United States"))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "DUPLICATE_KEY");
    assert_eq!(body["error"]["message"], "Country code USA already exists!");

    let mut incomplete = record("CAN", "124", "Canada");
    incomplete["country_number"] = json!("");
    let resp = call(&app, "POST", "/api/records", Some(incomplete)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(resp).await["error"]["message"],
        "All fields are required! Country Number is empty."
    );

    let resp = call(&app, "DELETE", "/api/records/ZZZ", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"]["code"], "NOT_FOUND");

    call(&app, "POST", "/api/records", Some(record("CAN", "124", "Canada"))).await;
    let resp = call(&app, "PUT", "/api/records/CAN", Some(record("USA", "840", "United States"))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"]["code"], "DUPLICATE_KEY");

    cleanup(&path);
}

#[tokio::test]
async fn listing_tolerates_unknown_sort_values() {
    let (app, path) = app("lenient").await;

    call(&app, "POST", "/api/records", Some(record("USA", "840", "United States"))).await;
    call(&app, "POST", "/api/records", Some(record("AUS", "36", "Australia"))).await;

    let resp = call(&app, "GET", "/api/records?sort=COUNTRY_NAME&order=sideways", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = json_body(resp).await;
    assert_eq!(rows[0]["country_code"], "AUS");

    let resp = call(&app, "GET", "/api/records?sort=Country_Number&order=DESC", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rows = json_body(resp).await;
    assert_eq!(rows[0]["country_code"], "USA");

    cleanup(&path);
}
