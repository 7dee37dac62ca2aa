//! One-shot operation feedback carried across post/redirect/get in a private cookie.

use crate::catalog::OperationOutcome;
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::Duration;
use tracing::warn;

pub const FEEDBACK_COOKIE: &str = "operation_feedback";

pub fn store(jar: PrivateCookieJar, outcome: &OperationOutcome, insecure: bool) -> PrivateCookieJar {
    match serde_json::to_string(outcome) {
        Ok(value) => jar.add(build_cookie(value, insecure)),
        Err(e) => {
            warn!("failed to encode operation feedback: {}", e);
            jar
        }
    }
}

/// Reads and clears the pending outcome, if any.
pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<OperationOutcome>) {
    let Some(raw) = jar.get(FEEDBACK_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(FEEDBACK_COOKIE).path("/"));
    let outcome = serde_json::from_str(&raw)
        .inspect_err(|e| warn!("discarding unreadable operation feedback: {}", e))
        .ok();
    (jar, outcome)
}

fn build_cookie(value: String, insecure: bool) -> Cookie<'static> {
    Cookie::build((FEEDBACK_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(!insecure)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .build()
}
