use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use currency_admin::Catalog;
use currency_admin::config::WarehouseConfig;
use currency_admin::db::{CountryCurrencyRecord, CurrencyGateway, Execution, Warehouse, open_gateway};
use currency_admin::error::StorageError;
use currency_admin::server::{AppState, app_router};
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

const CANADA: &str = "country_code=can&country_number=124&country=Canada\
    &currency_name=Canadian+Dollar&currency_code=cad&currency_number=124";

struct TestApp {
    app: Router,
    path: PathBuf,
}

impl TestApp {
    async fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "currency-admin-pages-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let database_url = format!("sqlite:{}", path.display());
        let gateway = open_gateway(&WarehouseConfig::sqlite(database_url))
            .await
            .expect("failed to open sqlite gateway");
        let app = app_router(AppState::new(Catalog::new(gateway), true));
        Self { app, path }
    }

    async fn send(&self, req: Request<Body>) -> Response {
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    async fn post_form(&self, uri: &str, body: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.send(req.body(Body::empty()).expect("failed to build request"))
            .await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        let _ = fs::remove_file(format!("{}-wal", self.path.display()));
        let _ = fs::remove_file(format!("{}-shm", self.path.display()));
    }
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect without location")
}

/// The `name=value` pair of the feedback cookie set on a response.
fn feedback_cookie(resp: &Response) -> String {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("operation_feedback="))
        .and_then(|v| v.split(';').next())
        .expect("feedback cookie not set")
        .to_string()
}

async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not utf-8")
}

#[tokio::test]
async fn create_redirects_and_shows_feedback_once() {
    let app = TestApp::new("create").await;

    let resp = app.post_form("/records", CANADA).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/?tab=add");
    let cookie = feedback_cookie(&resp);

    let resp = app.get("/?tab=view", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Entry added successfully!"));
    assert!(html.contains("<td>CAN</td>"));
    assert!(html.contains("<td>CANADA</td>"));

    let html = body_text(app.get("/?tab=view", None).await).await;
    assert!(!html.contains("Entry added successfully!"));
    assert!(html.contains("<td>CAN</td>"));
}

#[tokio::test]
async fn duplicate_create_shows_specific_reason() {
    let app = TestApp::new("duplicate").await;

    app.post_form("/records", CANADA).await;
    let resp = app.post_form("/records", CANADA).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = feedback_cookie(&resp);

    let html = body_text(app.get("/?tab=add", Some(&cookie)).await).await;
    assert!(html.contains("Country code CAN already exists!"));
}

#[tokio::test]
async fn missing_field_names_the_field() {
    let app = TestApp::new("missing").await;

    let resp = app
        .post_form(
            "/records",
            "country_code=CAN&country_number=124&country=Canada&currency_code=CAD&currency_number=124",
        )
        .await;
    let cookie = feedback_cookie(&resp);
    let html = body_text(app.get("/?tab=add", Some(&cookie)).await).await;
    assert!(html.contains("All fields are required! Currency Name is empty."));
}

#[tokio::test]
async fn update_redirects_to_the_new_code() {
    let app = TestApp::new("update").await;
    app.post_form("/records", CANADA).await;

    let body = format!("original_country_code=CAN&{}", CANADA.replace("can", "cnx"));
    let resp = app.post_form("/records/update", &body).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/?tab=edit&code=CNX");
    let cookie = feedback_cookie(&resp);

    let html = body_text(app.get(location(&resp), Some(&cookie)).await).await;
    assert!(html.contains("Entry updated successfully!"));
    assert!(html.contains(r#"name="original_country_code" value="CNX""#));
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let app = TestApp::new("delete").await;
    app.post_form("/records", CANADA).await;

    let resp = app.post_form("/records/delete", "country_code=CAN").await;
    assert_eq!(location(&resp), "/?tab=delete");
    let cookie = feedback_cookie(&resp);
    let html = body_text(app.get("/?tab=delete", Some(&cookie)).await).await;
    assert!(html.contains("<strong>Error!</strong> Please confirm deletion by checking the box above."));
    assert!(html.contains(r#"name="country_code" value="CAN""#));

    let resp = app
        .post_form("/records/delete", "country_code=CAN&confirm=on")
        .await;
    let cookie = feedback_cookie(&resp);
    let html = body_text(app.get("/?tab=delete", Some(&cookie)).await).await;
    assert!(html.contains("Entry deleted successfully!"));
    assert!(html.contains("The table is empty"));
}

#[tokio::test]
async fn stylesheet_and_unknown_routes() {
    let app = TestApp::new("assets").await;

    let resp = app.get("/assets/styles.css", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).expect("content type"),
        "text/css; charset=utf-8"
    );
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = app.get("/nope", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

struct OfflineWarehouse;

#[async_trait]
impl Warehouse for OfflineWarehouse {
    fn kind(&self) -> &'static str {
        "offline"
    }

    async fn fetch_records(
        &self,
        _statement: &str,
    ) -> Result<Vec<CountryCurrencyRecord>, StorageError> {
        Err(StorageError::Decode("connection refused".to_string()))
    }

    async fn execute(&self, _statement: &str, _params: &[String]) -> Result<Execution, StorageError> {
        Err(StorageError::Decode("connection refused".to_string()))
    }
}

#[tokio::test]
async fn failed_load_renders_banner_and_empty_table() {
    let gateway = CurrencyGateway::new(Arc::new(OfflineWarehouse), "offline.table");
    let app = app_router(AppState::new(Catalog::new(gateway), true));

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Failed to load data from the database. Please try again."));
    assert!(html.contains("No entries."));
    assert!(!html.contains("connection refused"));
}

#[tokio::test]
async fn unknown_query_values_fall_back_to_defaults() {
    let app = TestApp::new("lenient-query").await;
    app.post_form("/records", CANADA).await;

    for uri in ["/?sort=COUNTRY_NAME", "/?tab=bogus", "/?order=DESC"] {
        let resp = app.get(uri, None).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        let html = body_text(resp).await;
        assert!(html.contains(r#"<a class="tab active" href="/?tab=view">"#), "{uri}");
        assert!(html.contains("<td>CAN</td>"), "{uri}");
    }

    let html = body_text(app.get("/?tab=DELETE", None).await).await;
    assert!(html.contains(r#"<a class="tab active" href="/?tab=delete">"#));

    let html = body_text(app.get("/?order=DESC", None).await).await;
    assert!(html.contains(r#"value="desc" checked"#));
}

#[tokio::test]
async fn inbound_request_id_is_echoed() {
    let app = TestApp::new("request-id").await;

    let resp = app
        .send(
            Request::builder()
                .uri("/assets/styles.css")
                .header("x-request-id", "trace-abc")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await;
    assert_eq!(
        resp.headers().get("x-request-id").expect("request id"),
        "trace-abc"
    );
}
