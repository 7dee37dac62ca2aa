use crate::catalog::Catalog;
use crate::server::routes::{api, pages};

use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::extract::cookie::Key;
use base64::Engine as _;
use rand::RngCore;
use std::time::Instant;
use std::{sync::Arc, sync::LazyLock};
use tracing::{Level, event};

/// Global cookie encryption key for PrivateCookieJar.
static COOKIE_KEY: LazyLock<Key> = LazyLock::new(Key::generate);

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub insecure_cookie: bool,
}

impl AppState {
    pub fn new(catalog: Catalog, insecure_cookie: bool) -> Self {
        Self {
            catalog: Arc::new(catalog),
            insecure_cookie,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(_state: &AppState) -> Self {
        COOKIE_KEY.clone()
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Reuses a caller-supplied `x-request-id` when it is usable, otherwise mints one.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string)
}

fn status_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let protocol = format_http_version(req.version());
    let request_id = request_id(req.headers());
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    // `event!` takes its level as a constant.
    macro_rules! request_completed {
        ($level:expr) => {
            event!(
                $level,
                status = status.as_u16(),
                %request_id,
                %method,
                protocol,
                %path,
                latency_ms,
                %user_agent,
                "request completed"
            )
        };
    }
    let level = status_level(status);
    if level == Level::ERROR {
        request_completed!(Level::ERROR);
    } else if level == Level::WARN {
        request_completed!(Level::WARN);
    } else {
        request_completed!(Level::INFO);
    }

    resp
}

pub fn app_router(state: AppState) -> Router {
    let html = Router::new()
        .route("/", get(pages::index))
        .route("/records", post(pages::create_record))
        .route("/records/update", post(pages::update_record))
        .route("/records/delete", post(pages::delete_record))
        .route("/assets/styles.css", get(pages::stylesheet));

    let json = Router::new()
        .route("/api/records", get(api::list_records).post(api::create_record))
        .route(
            "/api/records/{country_code}",
            put(api::update_record).delete(api::delete_record),
        );

    Router::new()
        .merge(html)
        .merge(json)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
